//! The bitstream module forms the I/O subsystem for the MTF / Rice-Golomb pipeline.
//!
//! Entropy codecs only see the two traits below. They write or read an arbitrary number of
//! bits (1 to 64) per call, most significant bit first. Any failure aborts the current call.
//!
//! - bitwriter: packs bits into bytes and drains them to any `std::io::Write`.
//! - bitreader: reads bits from any `std::io::Read`.
//!
pub mod bitreader;
pub mod bitwriter;

use crate::error::Result;

/// Sink of bits.
pub trait OutputBitStream {
    /// Write the low `count` bits of `value`, most significant first. Returns the number of
    /// bits written.
    fn write_bits(&mut self, value: u64, count: u32) -> Result<u32>;

    /// Number of bits written so far.
    fn written(&self) -> u64;
}

/// Source of bits.
pub trait InputBitStream {
    /// Return the next bit (0 or 1).
    fn read_bit(&mut self) -> Result<u8>;

    /// Return the next `count` bits as an unsigned integer, first bit most significant.
    fn read_bits(&mut self, count: u32) -> Result<u64>;

    /// Number of bits consumed so far.
    fn read(&self) -> u64;
}

impl<T: OutputBitStream + ?Sized> OutputBitStream for &mut T {
    fn write_bits(&mut self, value: u64, count: u32) -> Result<u32> {
        (**self).write_bits(value, count)
    }

    fn written(&self) -> u64 {
        (**self).written()
    }
}

impl<T: InputBitStream + ?Sized> InputBitStream for &mut T {
    fn read_bit(&mut self) -> Result<u8> {
        (**self).read_bit()
    }

    fn read_bits(&mut self, count: u32) -> Result<u64> {
        (**self).read_bits(count)
    }

    fn read(&self) -> u64 {
        (**self).read()
    }
}
