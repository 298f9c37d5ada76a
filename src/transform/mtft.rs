//! Move-To-Front transform.
//!
//! Each byte is replaced by its rank in a recency list, then moved to the front of the list.
//! Runs and clusters of values turn into runs of small numbers, mostly zeros.
//!
//! The forward pass searches the list, so it uses the bucketed `RankList`. The inverse pass
//! only indexes and inserts at the front, so a flat 256 byte table is enough.

use super::rank_list::RankList;
use super::ByteTransform;
use crate::error::{Error, Result};

/// Move-To-Front transform. A `size` of 0 transforms the whole buffer.
#[derive(Debug, Clone, Default)]
pub struct Mtft {
    size: usize,
    ranks: RankList,
}

impl Mtft {
    /// Transform the first `size` bytes of each buffer, or all of it when `size` is 0.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            ranks: RankList::new(),
        }
    }

    /// Number of bytes each pass covers. 0 means the whole buffer.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Change how many bytes later passes cover.
    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    /// Read access to the recency list left by the last forward pass.
    pub fn ranks(&self) -> &RankList {
        &self.ranks
    }

    /// Number of bytes to process in a buffer of `len` bytes.
    fn end(&self, len: usize) -> Result<usize> {
        match self.size {
            0 => Ok(len),
            size if size > len => Err(Error::InvalidSize { size, len }),
            size => Ok(size),
        }
    }
}

impl ByteTransform for Mtft {
    fn forward(&mut self, block: &mut [u8]) -> Result<usize> {
        let end = self.end(block.len())?;

        // Every pass starts from identity order.
        self.ranks.reset();
        let mut previous = self.ranks.front();

        for byte in block[..end].iter_mut() {
            let current = *byte;
            if current == previous {
                *byte = 0;
                continue;
            }
            *byte = self.ranks.promote(current);
            previous = current;
        }
        Ok(end)
    }

    fn inverse(&mut self, block: &mut [u8]) -> Result<usize> {
        let end = self.end(block.len())?;

        let mut indices = [0_u8; 256];
        for (i, index) in indices.iter_mut().enumerate() {
            *index = i as u8;
        }

        for byte in block[..end].iter_mut() {
            let idx = *byte as usize;
            let value = indices[idx];
            *byte = value;

            if idx != 0 {
                indices.copy_within(0..idx, 1);
                indices[0] = value;
            }
        }
        Ok(end)
    }
}
