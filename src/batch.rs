use log::debug;
use rayon::prelude::*;

use crate::distribution::{Distribution, DistributionError};
use crate::random::Random;

/// Samples per rayon task. Each chunk owns one generator.
const CHUNK_SIZE: usize = 4096;

/// Draws `count` samples from `dist` across rayon's pool.
///
/// With a seed, chunk `i` is driven by `Random::from_seed(seed + i)`, so the
/// output is reproducible no matter how many threads run it. Without one,
/// every chunk is seeded from entropy.
pub fn sample_batch(
    dist: &Distribution,
    count: usize,
    seed: Option<u64>,
) -> Result<Vec<f64>, DistributionError> {
    dist.validate()?;
    debug!("sampling {} x {} (seed {:?})", count, dist, seed);

    let mut out = vec![0.0; count];
    out.par_chunks_mut(CHUNK_SIZE)
        .enumerate()
        .try_for_each(|(i, chunk)| {
            let mut rng = match seed {
                Some(seed) => Random::from_seed(seed.wrapping_add(i as u64)),
                None => Random::new(),
            };
            for slot in chunk.iter_mut() {
                *slot = dist.sample(&mut rng)?;
            }
            Ok::<(), DistributionError>(())
        })?;
    Ok(out)
}

/// Sample statistics over a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Unbiased (n - 1) sample variance; zero for fewer than two samples.
    pub variance: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    /// `None` for an empty slice.
    pub fn of(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let count = samples.len();
        let mean = samples.iter().sum::<f64>() / count as f64;
        let variance = if count > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (count - 1) as f64
        } else {
            0.0
        };
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            count,
            mean,
            variance,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_seeded_batch_is_reproducible() {
        let dist = Distribution::Normal {
            mu: 1.0,
            sigma: 3.0,
        };
        let a = sample_batch(&dist, 10_000, Some(17)).unwrap();
        let b = sample_batch(&dist, 10_000, Some(17)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeded_batch_matches_sequential_chunks() {
        let dist = Distribution::Uniform { a: 0.0, b: 1.0 };
        let batch = sample_batch(&dist, CHUNK_SIZE + 10, Some(5)).unwrap();

        let mut first = Random::from_seed(5);
        let mut second = Random::from_seed(6);
        assert_eq!(batch[0], dist.sample(&mut first).unwrap());
        assert_eq!(batch[CHUNK_SIZE], dist.sample(&mut second).unwrap());
    }

    #[test]
    fn test_invalid_distribution_fails_before_sampling() {
        let dist = Distribution::Binomial { n: 10, p: 2.0 };
        assert!(sample_batch(&dist, 100, None).is_err());
    }

    #[test]
    fn test_empty_batch() {
        let dist = Distribution::Poisson { lambda: 1.0 };
        assert!(sample_batch(&dist, 0, None).unwrap().is_empty());
    }

    #[test]
    fn test_unseeded_batch_has_requested_length() {
        let dist = Distribution::Exponential { lambda: 2.0 };
        let samples = sample_batch(&dist, 9_000, None).unwrap();
        assert_eq!(samples.len(), 9_000);
        assert!(samples.iter().all(|&x| x >= 0.0));
    }

    #[test]
    fn test_summary() {
        let s = Summary::of(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(s.count, 4);
        assert_relative_eq!(s.mean, 2.5);
        assert_relative_eq!(s.variance, 5.0 / 3.0);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 4.0);

        assert_eq!(Summary::of(&[7.0]).unwrap().variance, 0.0);
        assert!(Summary::of(&[]).is_none());
    }
}
