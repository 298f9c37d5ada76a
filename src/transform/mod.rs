//! The transform module holds reversible byte transforms applied before entropy coding.
//!
//! - mtft: Move-To-Front transform.
//! - rank_list: the bucketed recency list used by the forward Move-To-Front pass.
//!
pub mod mtft;
pub mod rank_list;

use crate::error::Result;

/// A reversible in-place transform over a byte buffer.
pub trait ByteTransform {
    /// Transform the block in place. Returns the number of bytes transformed.
    fn forward(&mut self, block: &mut [u8]) -> Result<usize>;

    /// Undo forward() in place. Returns the number of bytes restored.
    fn inverse(&mut self, block: &mut [u8]) -> Result<usize>;
}
