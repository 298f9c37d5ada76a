use mtfrice::bitstream::bitreader::BitReader;
use mtfrice::bitstream::bitwriter::BitWriter;
use mtfrice::bitstream::OutputBitStream;
use mtfrice::compression::compress::compress_bytes;
use mtfrice::compression::decompress::decompress_bytes;
use mtfrice::entropy::rice_golomb::{RiceGolombDecoder, RiceGolombEncoder};
use mtfrice::entropy::{EntropyDecoder, EntropyEncoder};
use mtfrice::tools::cli::Options;
use mtfrice::transform::mtft::Mtft;
use mtfrice::transform::ByteTransform;
use proptest::prelude::*;

fn naive_mtf(data: &[u8]) -> Vec<u8> {
    let mut list: Vec<u8> = (0..=255).collect();
    data.iter()
        .map(|&byte| {
            let pos = list.iter().position(|&b| b == byte).unwrap();
            list.remove(pos);
            list.insert(0, byte);
            pos as u8
        })
        .collect()
}

/// Bytes drawn from a small alphabet with runs, the shape MTF is meant for.
fn clustered() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec((any::<u8>(), 1..20usize), 0..60).prop_map(|runs| {
        runs.into_iter()
            .flat_map(|(v, n)| std::iter::repeat(v % 24).take(n))
            .collect()
    })
}

proptest! {
    #[test]
    fn rice_golomb_roundtrip(
        input in prop::collection::vec(any::<u8>(), 0..500),
        log_base in 1..=7u32,
        signed in any::<bool>(),
    ) {
        let mut enc = RiceGolombEncoder::new(BitWriter::new(Vec::new()), signed, log_base).unwrap();
        prop_assert_eq!(enc.encode(&input).unwrap(), input.len());
        let mut bw = enc.into_inner();
        bw.close().unwrap();
        let packed = bw.into_inner();

        let mut dec = RiceGolombDecoder::new(BitReader::new(packed.as_slice()), signed, log_base).unwrap();
        let mut output = vec![0; input.len()];
        prop_assert_eq!(dec.decode(&mut output).unwrap(), input.len());
        prop_assert_eq!(input, output);
    }

    #[test]
    fn zero_costs_log_base_plus_one(log_base in 1..=7u32, signed in any::<bool>()) {
        let mut enc = RiceGolombEncoder::new(BitWriter::new(Vec::new()), signed, log_base).unwrap();
        enc.encode_byte(0).unwrap();
        prop_assert_eq!(enc.bitstream().written(), log_base as u64 + 1);
    }

    #[test]
    fn mtft_roundtrip(input in prop::collection::vec(any::<u8>(), 0..2000)) {
        let mut mtft = Mtft::default();
        let mut data = input.clone();
        mtft.forward(&mut data).unwrap();
        mtft.inverse(&mut data).unwrap();
        prop_assert_eq!(data, input);
    }

    #[test]
    fn mtft_matches_naive(input in prop::collection::vec(any::<u8>(), 0..2000)) {
        let mut data = input.clone();
        Mtft::default().forward(&mut data).unwrap();
        prop_assert_eq!(data, naive_mtf(&input));
    }

    #[test]
    fn clustered_mtft_roundtrip(input in clustered()) {
        let mut mtft = Mtft::default();
        let mut data = input.clone();
        mtft.forward(&mut data).unwrap();
        prop_assert_eq!(&data, &naive_mtf(&input));
        mtft.inverse(&mut data).unwrap();
        prop_assert_eq!(data, input);
    }

    #[test]
    fn buckets_stay_consistent(input in prop::collection::vec(any::<u8>(), 0..3000)) {
        let mut mtft = Mtft::default();
        let mut data = input;
        mtft.forward(&mut data).unwrap();

        let ranks = mtft.ranks();
        prop_assert_eq!(ranks.lengths().iter().sum::<usize>(), 256);
        let order: Vec<u8> = ranks.iter().collect();
        prop_assert_eq!(order.len(), 256);
        let mut seen = [false; 256];
        for &v in &order {
            prop_assert!(!seen[v as usize]);
            seen[v as usize] = true;
        }
        let mut pos = 0;
        for (bucket, &len) in ranks.lengths().iter().enumerate() {
            for _ in 0..len {
                prop_assert_eq!(ranks.bucket_of(order[pos]), bucket);
                pos += 1;
            }
        }
    }

    #[test]
    fn runs_become_zeros(prefix in prop::collection::vec(any::<u8>(), 0..50), v in any::<u8>(), k in 2..40usize) {
        let mut data = prefix.clone();
        data.extend(std::iter::repeat(v).take(k));
        Mtft::default().forward(&mut data).unwrap();
        prop_assert!(data[prefix.len() + 1..].iter().all(|&r| r == 0));
    }

    #[test]
    fn container_roundtrip(
        input in prop::collection::vec(any::<u8>(), 0..3000),
        log_base in 1..=7u32,
        signed in any::<bool>(),
        block_size in 1..1000usize,
    ) {
        let opts = Options { signed, log_base, block_size, ..Options::new() };
        let packed = compress_bytes(&input, &opts).unwrap();
        prop_assert_eq!(decompress_bytes(&packed).unwrap(), input);
    }
}
