//! Random perturbation source for fraud scoring.
//!
//! The scorer never touches a platform RNG directly. Every draw flows
//! through a `RandomSource`, so callers decide whether a request is
//! reproducible (seeded `ScoreRng`) or not (`ScoreRng::from_entropy`),
//! and tests can plug in fixed sequences.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A provider of uniform floats in `[0.0, 1.0)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

/// PCG-backed random source used by the request service.
pub struct ScoreRng {
    inner: Pcg64Mcg,
}

impl ScoreRng {
    /// Deterministic stream: the same seed yields the same scores.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Seeded from OS entropy. No reproducibility across invocations.
    pub fn from_entropy() -> Self {
        Self {
            inner: Pcg64Mcg::from_entropy(),
        }
    }

    /// Seeded when a seed is configured, entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => Self::from_entropy(),
        }
    }
}

impl RandomSource for ScoreRng {
    /// Roll a float in [0.0, 1.0) from the top 53 bits of a u64.
    fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}
