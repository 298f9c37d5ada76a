use std::io::Write;

use log::error;

use super::OutputBitStream;
use crate::error::{Error, Result};

/// Output buffer size that triggers a write to the underlying device.
const FLUSH_THRESHOLD: usize = 64 * 1024;

/// Packs bits into bytes and writes them to `W`. Call close() to pad and flush the last
/// partial byte before using the output.
///
/// A device error poisons the writer: the pending bytes are dropped and every later
/// write_bits() or close() fails with `StreamClosed`.
pub struct BitWriter<W: Write> {
    /// Output buffer of packed bytes waiting to be written.
    output: Vec<u8>,
    /// Private queue to hold bits that are waiting to be put as bytes into the output buffer.
    queue: u64,
    /// Count of valid bits in the queue.
    q_bits: u32,
    /// Total bits accepted by write_bits.
    written: u64,
    /// Set once close() has run.
    closed: bool,
    /// Set when the device reported an error.
    failed: bool,
    /// Handle to the output device.
    writer: W,
}

impl<W: Write> BitWriter<W> {
    /// Create a new BitWriter over the output device.
    pub fn new(writer: W) -> Self {
        Self {
            output: Vec::with_capacity(FLUSH_THRESHOLD),
            queue: 0,
            q_bits: 0,
            written: 0,
            closed: false,
            failed: false,
            writer,
        }
    }

    /// Move all full bytes from the queue to the output buffer.
    fn push_queue(&mut self) -> Result<()> {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
        if self.output.len() >= FLUSH_THRESHOLD {
            self.drain()?;
        }
        Ok(())
    }

    /// Write the output buffer to the device. Part of it may have reached the device when
    /// this fails, so the buffer is discarded and the writer poisoned.
    fn drain(&mut self) -> Result<()> {
        let result = self.writer.write_all(&self.output);
        self.output.clear();
        if let Err(e) = result {
            error!("BitWriter device error after {} bits: {}", self.written, e);
            self.failed = true;
            return Err(e.into());
        }
        Ok(())
    }

    /// Pads the remaining bits (1-7) with 0s in the least significant bits, writes everything
    /// to the device and flushes it. Further writes fail.
    pub fn close(&mut self) -> Result<()> {
        if self.failed {
            return Err(Error::StreamClosed);
        }
        if self.closed {
            return Ok(());
        }
        if self.q_bits > 0 {
            self.queue <<= 8 - self.q_bits; //pad the queue with zeros
            self.q_bits = 8;
            self.push_queue()?;
            if self.q_bits > 0 {
                error!("Stuff left in the BitWriter queue.");
            }
        }
        self.drain()?;
        if let Err(e) = self.writer.flush() {
            self.failed = true;
            return Err(e.into());
        }
        self.closed = true;
        Ok(())
    }

    /// Returns the output device. Call close() first or buffered bits are lost.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.written / 8, self.written % 8)
    }
}

impl<W: Write> OutputBitStream for BitWriter<W> {
    fn write_bits(&mut self, value: u64, count: u32) -> Result<u32> {
        if self.closed || self.failed {
            return Err(Error::StreamClosed);
        }
        if count == 0 || count > 64 {
            return Err(Error::InvalidBitCount(count));
        }
        // The queue holds at most 7 bits between pushes, so 32 bit chunks always fit.
        let mut remaining = count;
        while remaining > 0 {
            let n = remaining.min(32);
            remaining -= n;
            let chunk = (value >> remaining) & ((1_u64 << n) - 1);
            self.queue = (self.queue << n) | chunk;
            self.q_bits += n;
            self.push_queue()?;
        }
        self.written += count as u64;
        Ok(count)
    }

    fn written(&self) -> u64 {
        self.written
    }
}
