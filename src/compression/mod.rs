//! The compression module chains the Move-To-Front transform and Rice-Golomb coding over a
//! framed container.
//!
//! Compression happens in the following steps, for each block of input:
//! - Move To Front transform: turn clustered byte values into small ranks, mostly zeros.
//! - Rice-Golomb coding: give small ranks short bit codes.
//!
//! Blocks are independent, each with its own transform, encoder and bit buffer, so they are
//! processed in parallel and written out in order.
//!
//! Container layout (integers are big endian):
//! - Header: `MTRG`, version (1 byte), flags (1 byte, bit 0 = signed), logBase (1 byte),
//!   block size (u32).
//! - Each block: original length (u32, non zero), payload length (u32), payload.
//! - End of stream: an original length of 0.
//!
//! Decompression follows the inverse of the compression process.

pub mod compress;
pub mod compress_block;
pub mod decompress;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use log::info;

use crate::error::Result;
use crate::tools::cli::{Options, Output};

/// Container signature.
pub const MAGIC: &[u8; 4] = b"MTRG";
/// Container format version.
pub const VERSION: u8 = 1;
/// Flag bit set when bytes are coded as signed values.
pub const FLAG_SIGNED: u8 = 1;
/// Header length in bytes.
pub const HEADER_LEN: usize = 11;
/// Block size used unless the user asks for another one.
pub const DEFAULT_BLOCK_SIZE: usize = 1024 * 1024;
/// Largest accepted block size.
pub const MAX_BLOCK_SIZE: usize = 64 * 1024 * 1024;
/// Extension added to compressed files.
pub const EXTENSION: &str = ".mtr";

/// Write the result to stdout or to the named file, refusing to clobber an existing file
/// unless forced.
fn write_output(opts: &Options, fname: &str, data: &[u8]) -> Result<()> {
    match opts.output {
        Output::Stdout => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(data)?;
            handle.flush()?;
        }
        Output::File => {
            if Path::new(fname).exists() && !opts.force_overwrite {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{} already exists (use -f to overwrite)", fname),
                )
                .into());
            }
            fs::write(fname, data)?;
            info!("Wrote {} bytes to {}", data.len(), fname);
        }
    }
    Ok(())
}
