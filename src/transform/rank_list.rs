//! Bucketed recency list over the 256 byte values.
//!
//! The front-to-back order of all symbols is one doubly linked chain stored in an arena of 256
//! links indexed by symbol value. The chain is cut into 16 buckets so that finding the rank of
//! a symbol only walks its own bucket: the rank is the length of every earlier bucket plus the
//! position inside the bucket. Promoted symbols pile up in bucket 0, and the buckets are
//! re-carved into 1 + 15 x 17 symbols once bucket 0 grows past `RESET_THRESHOLD` or any bucket
//! empties.

use log::trace;

/// Number of buckets.
pub const BUCKETS: usize = 16;
/// Symbols per bucket after a rebalance, except bucket 0 which holds one.
pub const BUCKET_SIZE: usize = 17;
/// Bucket 0 length that triggers a rebalance.
pub const RESET_THRESHOLD: usize = 64;

/// End of chain marker.
const NIL: u16 = 256;

#[derive(Debug, Clone, Copy)]
struct Link {
    prev: u16,
    next: u16,
}

/// Recency ordered list of the 256 byte values.
#[derive(Debug, Clone)]
pub struct RankList {
    links: [Link; 256],
    heads: [u16; BUCKETS],
    lengths: [usize; BUCKETS],
    bucket_of: [u8; 256],
}

impl RankList {
    /// Create a list in identity order (0 at the front, 255 at the back).
    pub fn new() -> Self {
        let mut list = Self {
            links: [Link { prev: NIL, next: NIL }; 256],
            heads: [NIL; BUCKETS],
            lengths: [0; BUCKETS],
            bucket_of: [0; 256],
        };
        list.reset();
        list
    }

    /// Relink all symbols in identity order and rebuild the buckets.
    pub fn reset(&mut self) {
        for (i, link) in self.links.iter_mut().enumerate() {
            let i = i as u16;
            link.prev = if i == 0 { NIL } else { i - 1 };
            link.next = if i == 255 { NIL } else { i + 1 };
        }
        self.heads[0] = 0;
        self.rebalance();
    }

    /// Re-carve the chain into one bucket of 1 and 15 buckets of 17, keeping the order.
    pub fn rebalance(&mut self) {
        let mut p = self.heads[0];

        for bucket in 0..BUCKETS {
            let size = if bucket == 0 { 1 } else { BUCKET_SIZE };
            self.heads[bucket] = p;
            self.lengths[bucket] = size;
            for _ in 0..size {
                self.bucket_of[p as usize] = bucket as u8;
                p = self.links[p as usize].next;
            }
        }
    }

    /// The symbol at rank 0.
    pub fn front(&self) -> u8 {
        self.heads[0] as u8
    }

    /// Number of symbols in each bucket.
    pub fn lengths(&self) -> &[usize; BUCKETS] {
        &self.lengths
    }

    /// Bucket currently holding `value`.
    pub fn bucket_of(&self, value: u8) -> usize {
        self.bucket_of[value as usize] as usize
    }

    /// Symbols in rank order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            next: self.heads[0],
        }
    }

    /// Return the current rank of `value` and move it to the front.
    pub fn promote(&mut self, value: u8) -> u8 {
        let v = value as u16;
        if self.heads[0] == v {
            return 0;
        }

        let bucket = self.bucket_of[value as usize] as usize;
        let mut rank: usize = self.lengths[..bucket].iter().sum();

        // Find index in bucket (at most the bucket length)
        let mut p = self.heads[bucket];
        while p != v {
            p = self.links[p as usize].next;
            rank += 1;
        }

        // Unlink
        let Link { prev, next } = self.links[v as usize];
        if prev != NIL {
            self.links[prev as usize].next = next;
        }
        if next != NIL {
            self.links[next as usize].prev = prev;
        }
        if self.heads[bucket] == v {
            self.heads[bucket] = if self.lengths[bucket] > 1 { next } else { NIL };
        }

        // Add to head of first bucket
        let old = self.heads[0];
        self.links[v as usize] = Link { prev: NIL, next: old };
        self.links[old as usize].prev = v;
        self.heads[0] = v;

        if bucket != 0 {
            self.lengths[bucket] -= 1;
            self.lengths[0] += 1;
            self.bucket_of[value as usize] = 0;

            if self.lengths[0] > RESET_THRESHOLD || self.lengths[bucket] == 0 {
                trace!(
                    "Rebalancing buckets (front bucket {}, bucket {} has {})",
                    self.lengths[0],
                    bucket,
                    self.lengths[bucket]
                );
                self.rebalance();
            }
        }
        rank as u8
    }
}

impl Default for RankList {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the symbols of a `RankList`, front first.
pub struct Iter<'a> {
    list: &'a RankList,
    next: u16,
}

impl Iterator for Iter<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.next == NIL {
            return None;
        }
        let value = self.next as u8;
        self.next = self.list.links[self.next as usize].next;
        Some(value)
    }
}
