use std::fs;

use log::info;
use rayon::prelude::*;

use super::compress_block::compress_block;
use super::{write_output, EXTENSION, FLAG_SIGNED, HEADER_LEN, MAGIC, VERSION};
use crate::error::Result;
use crate::tools::cli::Options;

/// Compress a buffer into a complete container using the codec settings in opts.
pub fn compress_bytes(input: &[u8], opts: &Options) -> Result<Vec<u8>> {
    opts.validate()?;

    let mut out = Vec::with_capacity(HEADER_LEN + input.len() / 2);
    out.extend_from_slice(MAGIC);
    out.push(VERSION);
    out.push(if opts.signed { FLAG_SIGNED } else { 0 });
    out.push(opts.log_base as u8);
    out.extend_from_slice(&(opts.block_size as u32).to_be_bytes());

    // Each block gets its own transform and encoder, so they can run side by side.
    let payloads = input
        .par_chunks(opts.block_size)
        .enumerate()
        .map(|(seq, chunk)| compress_block(seq, chunk, opts.signed, opts.log_base))
        .collect::<Result<Vec<Vec<u8>>>>()?;

    for (chunk, payload) in input.chunks(opts.block_size).zip(&payloads) {
        out.extend_from_slice(&(chunk.len() as u32).to_be_bytes());
        out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        out.extend_from_slice(payload);
    }
    out.extend_from_slice(&0_u32.to_be_bytes());

    info!(
        "{} blocks, {} bytes -> {} bytes",
        payloads.len(),
        input.len(),
        out.len()
    );
    Ok(out)
}

/// Compress the input file defined in opts.
pub fn compress(opts: &Options) -> Result<()> {
    info!("Compressing {}", opts.file);
    let input = fs::read(&opts.file)?;
    let out = compress_bytes(&input, opts)?;

    let mut fname = opts.file.clone();
    fname.push_str(EXTENSION);
    write_output(opts, &fname, &out)
}

#[cfg(test)]
mod test {
    use super::compress_bytes;
    use crate::compression::{HEADER_LEN, MAGIC};
    use crate::error::Error;
    use crate::tools::cli::Options;

    #[test]
    fn empty_input_test() {
        let out = compress_bytes(&[], &Options::new()).unwrap();
        assert_eq!(out.len(), HEADER_LEN + 4);
        assert_eq!(&out[..4], MAGIC);
        assert_eq!(&out[HEADER_LEN..], &[0, 0, 0, 0]);
    }

    #[test]
    fn header_test() {
        let opts = Options {
            signed: true,
            log_base: 5,
            block_size: 4096,
            ..Options::new()
        };
        let out = compress_bytes(b"x", &opts).unwrap();
        assert_eq!(&out[4..HEADER_LEN], &[1, 1, 5, 0, 0, 0x10, 0]);
        // Block of 1 byte
        assert_eq!(&out[HEADER_LEN..HEADER_LEN + 4], &[0, 0, 0, 1]);
    }

    #[test]
    fn block_split_test() {
        let opts = Options {
            block_size: 10,
            ..Options::new()
        };
        let data: Vec<u8> = (0..25).collect();
        let out = compress_bytes(&data, &opts).unwrap();
        // Three blocks: 10, 10 and 5 bytes.
        let mut pos = HEADER_LEN;
        let mut lens = vec![];
        loop {
            let len = u32::from_be_bytes(out[pos..pos + 4].try_into().unwrap());
            pos += 4;
            if len == 0 {
                break;
            }
            let plen = u32::from_be_bytes(out[pos..pos + 4].try_into().unwrap()) as usize;
            pos += 4 + plen;
            lens.push(len);
        }
        assert_eq!(lens, vec![10, 10, 5]);
        assert_eq!(pos, out.len());
    }

    #[test]
    fn bad_options_test() {
        let opts = Options {
            log_base: 0,
            ..Options::new()
        };
        assert!(matches!(
            compress_bytes(b"abc", &opts),
            Err(Error::InvalidLogBase(0))
        ));
    }
}
