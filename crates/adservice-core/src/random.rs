use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform random integers shared across request tasks.
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `[0, upper)`. Callers guarantee `upper > 0`.
    fn below(&self, upper: usize) -> usize;
}

/// Draws from the per-thread generator; no shared state between tasks.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn below(&self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper)
    }
}

/// One seeded generator behind a mutex, for reproducible runs.
#[derive(Debug)]
pub struct SeededRandom(Mutex<StdRng>);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(Mutex::new(StdRng::seed_from_u64(seed)))
    }
}

impl RandomSource for SeededRandom {
    fn below(&self, upper: usize) -> usize {
        let mut rng = self.0.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(0..upper)
    }
}

/// Always yields `value % upper`.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub usize);

impl RandomSource for FixedRandom {
    fn below(&self, upper: usize) -> usize {
        self.0 % upper
    }
}
