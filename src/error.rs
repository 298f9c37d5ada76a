//! Error types for the MTF / Rice-Golomb pipeline.

use thiserror::Error;

/// Error variants for transform, codec and container operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Rice-Golomb parameter outside of [1..7].
    #[error("invalid logBase value {0} (must be in [1..7])")]
    InvalidLogBase(u32),

    /// A bit stream call asked for 0 or more than 64 bits.
    #[error("invalid bit count {0} (must be in [1..64])")]
    InvalidBitCount(u32),

    /// The transform size is larger than the buffer handed to it.
    #[error("transform size {size} exceeds buffer length {len}")]
    InvalidSize { size: usize, len: usize },

    /// The unary prefix of a codeword is longer than any byte value allows.
    #[error("invalid Rice-Golomb codeword (quotient {0} too large)")]
    InvalidCodeword(u64),

    /// The input bit stream ran out of data.
    #[error("unexpected end of stream")]
    EndOfStream,

    /// Write attempted on a bit stream that was already closed.
    #[error("bit stream is closed")]
    StreamClosed,

    /// Container signature or version not recognized.
    #[error("invalid header: {0}")]
    InvalidHeader(&'static str),

    /// Block size outside of the supported range.
    #[error("invalid block size {0}")]
    InvalidBlockSize(usize),

    /// An I/O error occurred while reading or writing the underlying device.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
