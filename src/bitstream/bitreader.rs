//! BitReader: reads a packed bitstream, most significant bit first.
//!
//! NOTE: This module can read from any I/O source that supports the read() call.
//!

use std::io::{ErrorKind, Read};

use super::InputBitStream;
use crate::error::{Error, Result};

const BUFFER_SIZE: usize = 64 * 1024;

/// Reads bits from any `Read` source.
#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    cursor: usize,
    bit_index: usize,
    bits_read: u64,
    source: R,
}

impl<R: Read> BitReader<R> {
    /// Creates a new BitReader (with a 64k buffer).
    pub fn new(source: R) -> Self {
        Self {
            buffer: Vec::with_capacity(BUFFER_SIZE),
            cursor: 0,
            bit_index: 0,
            bits_read: 0,
            source,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more
    fn have_data(&mut self) -> Result<bool> {
        // Only try to read more data when the buffer length is equal to the buffer cursor location
        if self.cursor == self.buffer.len() {
            self.buffer.resize(BUFFER_SIZE, 0);
            let size = loop {
                match self.source.read(&mut self.buffer) {
                    Ok(size) => break size,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => {
                        self.buffer.clear();
                        self.cursor = 0;
                        return Err(e.into());
                    }
                }
            };
            // Adjust the buffer if we read less than the buffer size
            self.buffer.truncate(size);
            self.cursor = 0;
            self.bit_index = 0;
            if size == 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Returns true once every bit of the source has been consumed.
    pub fn is_exhausted(&mut self) -> Result<bool> {
        if self.bit_index > 0 {
            return Ok(false);
        }
        Ok(!self.have_data()?)
    }

    /// Skip the remaining bits of a partially read byte.
    pub fn align(&mut self) {
        if self.bit_index > 0 {
            self.bits_read += (8 - self.bit_index) as u64;
            self.bit_index = 0;
            self.cursor += 1;
        }
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.bits_read / 8, self.bits_read % 8)
    }

    /// Returns the source.
    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R: Read> InputBitStream for BitReader<R> {
    fn read_bit(&mut self) -> Result<u8> {
        // If bit_index is == 0, check if we have a byte to read.
        if self.bit_index == 0 && !self.have_data()? {
            return Err(Error::EndOfStream);
        }
        let bit = (self.buffer[self.cursor] >> (7 - self.bit_index)) & 1;
        self.bit_index += 1;
        if self.bit_index == 8 {
            self.bit_index = 0;
            self.cursor += 1;
        }
        self.bits_read += 1;
        Ok(bit)
    }

    fn read_bits(&mut self, count: u32) -> Result<u64> {
        if count == 0 || count > 64 {
            return Err(Error::InvalidBitCount(count));
        }
        let mut n = count as usize;
        let mut result = 0_u64;

        // Take as many bits as the current byte allows on each pass.
        while n > 0 {
            if self.bit_index == 0 && !self.have_data()? {
                return Err(Error::EndOfStream);
            }
            let avail = 8 - self.bit_index;
            let take = n.min(avail);
            let bits = ((self.buffer[self.cursor] as u64) >> (avail - take)) & ((1 << take) - 1);
            result = (result << take) | bits;
            self.bit_index += take;
            if self.bit_index == 8 {
                self.bit_index = 0;
                self.cursor += 1;
            }
            self.bits_read += take as u64;
            n -= take;
        }
        Ok(result)
    }

    fn read(&self) -> u64 {
        self.bits_read
    }
}

#[cfg(test)]
mod test {
    use super::BitReader;
    use crate::bitstream::InputBitStream;
    use crate::error::Error;

    #[test]
    fn basic_test() {
        let x = [0b10000001_u8].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.read_bit().unwrap(), 1);
        for _ in 0..6 {
            assert_eq!(br.read_bit().unwrap(), 0);
        }
        assert_eq!(br.read_bit().unwrap(), 1);
        assert!(matches!(br.read_bit(), Err(Error::EndOfStream)));
    }

    #[test]
    fn read_bits_test() {
        let x = [0b00011011_u8].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.read_bits(5).unwrap(), 3);
        assert_eq!(br.read_bits(1).unwrap(), 0);
        assert_eq!(br.read_bits(2).unwrap(), 3);
        assert_eq!(br.read(), 8);
    }

    #[test]
    fn across_bytes_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = BitReader::new(x);
        assert_eq!(br.read_bits(8).unwrap(), 'H' as u64);
        assert_eq!(br.read_bits(3).unwrap(), 0b011);
        assert_eq!(br.read_bits(13).unwrap(), 0b00101_01101100);
        assert_eq!(br.loc(), "[3.0]");
    }

    #[test]
    fn wide_read_test() {
        let x = [0xff_u8; 9];
        let mut br = BitReader::new(x.as_slice());
        assert_eq!(br.read_bit().unwrap(), 1);
        assert_eq!(br.read_bits(64).unwrap(), u64::MAX);
        assert_eq!(br.read_bits(7).unwrap(), 0x7f);
        assert!(br.is_exhausted().unwrap());
    }

    #[test]
    fn truncated_test() {
        let x = [0xaa_u8].as_slice();
        let mut br = BitReader::new(x);
        br.read_bits(3).unwrap();
        assert!(matches!(br.read_bits(6), Err(Error::EndOfStream)));
    }

    #[test]
    fn align_test() {
        let x = [0b1010_0000_u8, 0b0110_0000].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.read_bits(3).unwrap(), 0b101);
        br.align();
        assert_eq!(br.read_bits(3).unwrap(), 0b011);
        assert_eq!(br.read(), 11);
    }

    #[test]
    fn bad_count_test() {
        let mut br = BitReader::new([0_u8].as_slice());
        assert!(matches!(br.read_bits(0), Err(Error::InvalidBitCount(0))));
    }
}
