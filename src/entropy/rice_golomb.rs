//! Rice-Golomb coding of bytes.
//!
//! A value is split into a quotient (`value >> log_base`), written in unary as that many 0 bits
//! closed by a 1 bit, and a remainder written in `log_base` binary bits. Zero is always the
//! single codeword `1 000..0` of `log_base + 1` bits.
//!
//! In signed mode the byte is read as an `i8`: the magnitude is coded as above and one extra
//! sign bit (1 for negative) follows any non zero value. Distributions centered on 0 compress
//! better this way, e.g. -1 costs a few bits instead of the code for 255.

use log::trace;

use super::{EntropyDecoder, EntropyEncoder};
use crate::bitstream::{InputBitStream, OutputBitStream};
use crate::error::{Error, Result};

/// Widest single write used for long unary prefixes.
const MAX_CHUNK: u32 = 32;

fn check_log_base(log_base: u32) -> Result<()> {
    if !(1..=7).contains(&log_base) {
        return Err(Error::InvalidLogBase(log_base));
    }
    Ok(())
}

/// Writes Rice-Golomb codes to an output bit stream.
#[derive(Debug)]
pub struct RiceGolombEncoder<S> {
    signed: bool,
    log_base: u32,
    base: u64,
    bitstream: S,
}

impl<S: OutputBitStream> RiceGolombEncoder<S> {
    /// Create an encoder. `log_base` must be in [1..7].
    pub fn new(bitstream: S, signed: bool, log_base: u32) -> Result<Self> {
        check_log_base(log_base)?;
        Ok(Self {
            signed,
            log_base,
            base: 1 << log_base,
            bitstream,
        })
    }

    pub fn signed(&self) -> bool {
        self.signed
    }

    pub fn log_base(&self) -> u32 {
        self.log_base
    }

    pub fn bitstream(&self) -> &S {
        &self.bitstream
    }

    pub fn bitstream_mut(&mut self) -> &mut S {
        &mut self.bitstream
    }

    pub fn into_inner(self) -> S {
        self.bitstream
    }
}

impl<S: OutputBitStream> EntropyEncoder for RiceGolombEncoder<S> {
    fn encode_byte(&mut self, value: u8) -> Result<()> {
        if value == 0 {
            self.bitstream.write_bits(self.base, self.log_base + 1)?;
            return Ok(());
        }

        // -128 has magnitude 128 and still fits in a u8.
        let magnitude = if self.signed {
            (value as i8).unsigned_abs()
        } else {
            value
        };

        // Terminating 1 of the unary quotient followed by the remainder.
        let mut emit = self.base | (magnitude as u64 & (self.base - 1));
        let mut n = self.log_base + 1;

        if self.signed {
            emit = (emit << 1) | (value >> 7) as u64;
            n += 1;
        }

        let quotient = (magnitude >> self.log_base) as u32;

        if quotient + n <= 64 {
            // Leading zeros of the wider write are the unary quotient.
            self.bitstream.write_bits(emit, quotient + n)?;
        } else {
            let mut zeros = quotient;
            while zeros > 0 {
                let k = zeros.min(MAX_CHUNK);
                self.bitstream.write_bits(0, k)?;
                zeros -= k;
            }
            self.bitstream.write_bits(emit, n)?;
        }
        Ok(())
    }
}

/// Reads Rice-Golomb codes from an input bit stream.
#[derive(Debug)]
pub struct RiceGolombDecoder<S> {
    signed: bool,
    log_base: u32,
    max_quotient: u64,
    bitstream: S,
}

impl<S: InputBitStream> RiceGolombDecoder<S> {
    /// Create a decoder. `log_base` must be in [1..7]. In signed mode decoded bytes are `i8`
    /// values.
    pub fn new(bitstream: S, signed: bool, log_base: u32) -> Result<Self> {
        check_log_base(log_base)?;
        Ok(Self {
            signed,
            log_base,
            max_quotient: 255 >> log_base,
            bitstream,
        })
    }

    pub fn signed(&self) -> bool {
        self.signed
    }

    pub fn log_base(&self) -> u32 {
        self.log_base
    }

    pub fn bitstream(&self) -> &S {
        &self.bitstream
    }

    pub fn bitstream_mut(&mut self) -> &mut S {
        &mut self.bitstream
    }

    pub fn into_inner(self) -> S {
        self.bitstream
    }
}

impl<S: InputBitStream> EntropyDecoder for RiceGolombDecoder<S> {
    fn decode_byte(&mut self) -> Result<u8> {
        // quotient is unary encoded
        let mut quotient = 0_u64;
        while self.bitstream.read_bit()? == 0 {
            quotient += 1;
            if quotient > self.max_quotient {
                trace!("Unary prefix overflow at bit {}", self.bitstream.read());
                return Err(Error::InvalidCodeword(quotient));
            }
        }

        // remainder is binary encoded
        let remainder = self.bitstream.read_bits(self.log_base)?;

        // Bounded by max_quotient, so this is at most 255.
        let magnitude = ((quotient << self.log_base) | remainder) as u8;

        if magnitude != 0 && self.signed && self.bitstream.read_bit()? == 1 {
            return Ok(magnitude.wrapping_neg());
        }
        Ok(magnitude)
    }
}
