//! The entropy module turns small byte values into variable length bit codes and back.
//!
//! Codecs work one byte at a time over a bit stream. The block level entry points apply the
//! byte operation across a buffer in order and stop at the first failure.
//!
pub mod rice_golomb;

use crate::error::Result;

/// Encodes bytes onto an output bit stream.
pub trait EntropyEncoder {
    /// Encode a single byte.
    fn encode_byte(&mut self, value: u8) -> Result<()>;

    /// Encode every byte of the block. Returns the number of bytes consumed.
    fn encode(&mut self, block: &[u8]) -> Result<usize> {
        encode_array(self, block)
    }
}

/// Decodes bytes from an input bit stream.
pub trait EntropyDecoder {
    /// Decode a single byte.
    fn decode_byte(&mut self) -> Result<u8>;

    /// Fill the block with decoded bytes. Returns the number of bytes produced.
    fn decode(&mut self, block: &mut [u8]) -> Result<usize> {
        decode_array(self, block)
    }
}

/// Run the encoder over the block.
pub fn encode_array<E: EntropyEncoder + ?Sized>(encoder: &mut E, block: &[u8]) -> Result<usize> {
    for &value in block {
        encoder.encode_byte(value)?;
    }
    Ok(block.len())
}

/// Run the decoder until the block is full.
pub fn decode_array<D: EntropyDecoder + ?Sized>(decoder: &mut D, block: &mut [u8]) -> Result<usize> {
    for slot in block.iter_mut() {
        *slot = decoder.decode_byte()?;
    }
    Ok(block.len())
}
