use log::{debug, log_enabled, warn, Level};

use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::BitWriter;
use crate::entropy::rice_golomb::{RiceGolombDecoder, RiceGolombEncoder};
use crate::entropy::{EntropyDecoder, EntropyEncoder};
use crate::error::Result;
use crate::tools::freq_count::entropy;
use crate::transform::mtft::Mtft;
use crate::transform::ByteTransform;

/// Move-To-Front transform and Rice-Golomb code one block. Returns the byte aligned payload.
pub fn compress_block(seq: usize, data: &[u8], signed: bool, log_base: u32) -> Result<Vec<u8>> {
    let mut ranks = data.to_vec();
    Mtft::default().forward(&mut ranks)?;

    let writer = BitWriter::new(Vec::with_capacity(data.len() / 2));
    let mut encoder = RiceGolombEncoder::new(writer, signed, log_base)?;
    encoder.encode(&ranks)?;

    let mut bw = encoder.into_inner();
    bw.close()?;
    let payload = bw.into_inner();

    if log_enabled!(Level::Debug) {
        debug!(
            "Block {}: {} bytes -> {} bytes. Entropy {:.3} bits/byte, {:.3} after MTF, {:.3} coded.",
            seq,
            data.len(),
            payload.len(),
            entropy(data),
            entropy(&ranks),
            payload.len() as f64 * 8.0 / data.len().max(1) as f64,
        );
    }
    Ok(payload)
}

/// Decode `len` bytes from one block payload and undo the Move-To-Front transform.
pub fn decompress_block(
    seq: usize,
    payload: &[u8],
    len: usize,
    signed: bool,
    log_base: u32,
) -> Result<Vec<u8>> {
    let mut decoder = RiceGolombDecoder::new(BitReader::new(payload), signed, log_base)?;
    let mut out = vec![0; len];
    decoder.decode(&mut out)?;

    // The encoder pads only the last byte, anything after it is stray.
    let mut br = decoder.into_inner();
    br.align();
    if !br.is_exhausted()? {
        warn!("Block {}: ignoring unused payload bytes after {}.", seq, br.loc());
    }

    Mtft::default().inverse(&mut out)?;
    debug!("Block {}: restored {} bytes.", seq, len);
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::{compress_block, decompress_block};
    use crate::error::Error;

    #[test]
    fn block_roundtrip_test() {
        let data = b"abracadabra abracadabra abracadabra".to_vec();
        for log_base in 1..=7 {
            for signed in [false, true] {
                let payload = compress_block(0, &data, signed, log_base).unwrap();
                let out = decompress_block(0, &payload, data.len(), signed, log_base).unwrap();
                assert_eq!(out, data);
            }
        }
    }

    #[test]
    fn runs_shrink_test() {
        // One rank of 200 (102 bits), then 4095 zero ranks at 2 bits each.
        let data = vec![200_u8; 4096];
        let payload = compress_block(0, &data, false, 1).unwrap();
        assert!(payload.len() < 1100);
    }

    #[test]
    fn padded_payload_test() {
        let data = b"hello, hello, hello".to_vec();
        let mut payload = compress_block(0, &data, true, 4).unwrap();
        payload.extend_from_slice(&[0xaa, 0x55]);
        let out = decompress_block(0, &payload, data.len(), true, 4).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn truncated_payload_test() {
        let data = b"hello, hello, hello".to_vec();
        let payload = compress_block(0, &data, false, 2).unwrap();
        let result = decompress_block(0, &payload[..payload.len() / 2], data.len(), false, 2);
        assert!(matches!(result, Err(Error::EndOfStream)));
    }
}
