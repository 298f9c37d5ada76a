//! The tools module provides helper functions for the MTF / Rice-Golomb compressor.
//!
//! The tools are:
//! - cli: Command line interface and the Options it produces.
//! - freq_count: Byte frequency counts and order-0 entropy, used for block statistics.
//!
pub mod cli;
pub mod freq_count;
