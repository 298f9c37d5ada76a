use rayon::prelude::*;

/// Returns a frequency count of the input data. Uses parallelism when data set is over 64k.
pub fn freqs(data: &[u8]) -> [u64; 256] {
    if data.len() > 64_000 {
        // 16k is pretty much the sweet spot for chunk size.
        data.par_chunks(16_000)
            .fold(
                || [0_u64; 256],
                |mut freqs, chunk| {
                    chunk.iter().for_each(|&el| freqs[el as usize] += 1);
                    freqs
                },
            )
            .reduce(
                || [0_u64; 256],
                |mut s, f| {
                    s.iter_mut().zip(f.iter()).for_each(|(a, b)| *a += b);
                    s
                },
            )
    } else {
        let mut freqs = [0_u64; 256];
        data.iter().for_each(|&el| freqs[el as usize] += 1);
        freqs
    }
}

/// Order-0 entropy of the data in bits per byte.
pub fn entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let total = data.len() as f64;
    freqs(data)
        .iter()
        .filter(|&&f| f > 0)
        .map(|&f| {
            let p = f as f64 / total;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
mod test {
    use super::{entropy, freqs};

    #[test]
    fn freqs_test() {
        let f = freqs(b"abracadabra");
        assert_eq!(f[b'a' as usize], 5);
        assert_eq!(f[b'b' as usize], 2);
        assert_eq!(f[b'z' as usize], 0);
    }

    #[test]
    fn parallel_freqs_test() {
        let data: Vec<u8> = (0..200_000_u32).map(|i| (i % 7) as u8).collect();
        let f = freqs(&data);
        assert_eq!(f.iter().sum::<u64>(), 200_000);
        assert_eq!(f[0], 28_572);
        assert_eq!(f[6], 28_571);
    }

    #[test]
    fn entropy_test() {
        assert_eq!(entropy(&[]), 0.0);
        assert_eq!(entropy(&[9; 100]), 0.0);
        assert!((entropy(b"abab") - 1.0).abs() < 1e-9);
        let all: Vec<u8> = (0..=255).collect();
        assert!((entropy(&all) - 8.0).abs() < 1e-9);
    }
}
