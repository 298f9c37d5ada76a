//! Move-To-Front transform and Rice-Golomb entropy coding of bytes.
//!
//! Version 0.1.0
//!
//! The two stages are designed to be chained. The Move-To-Front transform turns locally
//! repeated or clustered byte values into small ranks, and the Rice-Golomb codec maps those
//! small values to short bit codes:
//!
//! raw bytes -> `Mtft::forward` -> ranks -> `RiceGolombEncoder` -> bits
//!
//! Decoding runs the same chain backwards.
//!
//! The forward transform keeps the recency list in 16 linked buckets, so finding the rank of
//! a byte walks one short bucket instead of all 256 values.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> mtfrice -l 2 test.txt`
//!
//! This will compress the file and create the file test.txt.mtr.
//!
pub mod bitstream;
pub mod compression;
pub mod entropy;
pub mod error;
pub mod tools;
pub mod transform;

pub use error::{Error, Result};
