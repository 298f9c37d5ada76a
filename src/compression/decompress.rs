use std::fs;

use log::{info, warn};
use rayon::prelude::*;

use super::compress_block::decompress_block;
use super::{write_output, EXTENSION, FLAG_SIGNED, MAGIC, MAX_BLOCK_SIZE, VERSION};
use crate::error::{Error, Result};
use crate::tools::cli::Options;

/// Split `n` bytes off the front of the input.
fn take<'a>(rest: &mut &'a [u8], n: usize) -> Result<&'a [u8]> {
    if rest.len() < n {
        return Err(Error::EndOfStream);
    }
    let (head, tail) = rest.split_at(n);
    *rest = tail;
    Ok(head)
}

fn take_u8(rest: &mut &[u8]) -> Result<u8> {
    Ok(take(rest, 1)?[0])
}

fn take_u32(rest: &mut &[u8]) -> Result<u32> {
    let bytes = take(rest, 4)?;
    Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Decompress a complete container produced by compress_bytes.
pub fn decompress_bytes(input: &[u8]) -> Result<Vec<u8>> {
    let mut rest = input;

    // Look for a valid signature.
    if take(&mut rest, 4)? != MAGIC {
        return Err(Error::InvalidHeader("not a compressed file"));
    }
    if take_u8(&mut rest)? != VERSION {
        return Err(Error::InvalidHeader("unsupported version"));
    }
    let flags = take_u8(&mut rest)?;
    if flags & !FLAG_SIGNED != 0 {
        return Err(Error::InvalidHeader("unknown flags"));
    }
    let signed = flags & FLAG_SIGNED != 0;
    let log_base = take_u8(&mut rest)? as u32;
    if !(1..=7).contains(&log_base) {
        return Err(Error::InvalidLogBase(log_base));
    }
    let block_size = take_u32(&mut rest)? as usize;
    if block_size == 0 || block_size > MAX_BLOCK_SIZE {
        return Err(Error::InvalidBlockSize(block_size));
    }

    // Collect the block frames, then decode them side by side.
    let mut frames = Vec::new();
    loop {
        let len = take_u32(&mut rest)? as usize;
        if len == 0 {
            break;
        }
        if len > block_size {
            return Err(Error::InvalidBlockSize(len));
        }
        let payload_len = take_u32(&mut rest)? as usize;
        frames.push((len, take(&mut rest, payload_len)?));
    }
    if !rest.is_empty() {
        warn!("Ignoring {} bytes after the end of stream marker", rest.len());
    }

    let blocks = frames
        .par_iter()
        .enumerate()
        .map(|(seq, &(len, payload))| decompress_block(seq, payload, len, signed, log_base))
        .collect::<Result<Vec<Vec<u8>>>>()?;

    info!("{} blocks restored", blocks.len());
    Ok(blocks.concat())
}

/// Decompress the file specified in opts.
pub fn decompress(opts: &Options) -> Result<()> {
    info!("Decompressing {}", opts.file);
    let input = fs::read(&opts.file)?;
    let out = decompress_bytes(&input)?;

    let fname = match opts.file.strip_suffix(EXTENSION) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => format!("{}.out", opts.file),
    };
    write_output(opts, &fname, &out)
}
