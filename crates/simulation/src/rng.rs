//! Seedable random stream.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Random stream owned by a single engine.
///
/// Every stochastic decision in a run draws from here, so the number of
/// draws consumed is part of the reproducibility contract and is tracked.
#[derive(Clone, Debug)]
pub struct SimRng {
    inner: ChaCha8Rng,
    seed: Option<u64>,
    draws: u64,
}

impl SimRng {
    /// Seeded stream when `seed` is given, OS entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Deterministic stream.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed: Some(seed),
            draws: 0,
        }
    }

    /// Non-reproducible stream.
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
            seed: None,
            draws: 0,
        }
    }

    /// Uniform draw in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.draws += 1;
        self.inner.gen::<f64>()
    }

    /// One uniform draw, `true` when it falls below `probability`.
    pub fn bernoulli(&mut self, probability: f64) -> bool {
        self.uniform() < probability
    }

    /// Number of draws consumed so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Seed this stream was built from, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}
