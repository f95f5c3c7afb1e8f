// Copyright (c) 2026 rezky_nightky

use rand::{
    distr::{Distribution, Uniform},
    rngs::StdRng,
    Rng, SeedableRng,
};

/// Uniform draws used for spawn decisions and bolt jitter.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn unit(&mut self) -> f32;

    /// Uniform integer in `[0, n)`. Returns 0 when `n == 0`.
    fn below(&mut self, n: u32) -> u32;

    /// Bernoulli draw that succeeds with probability `p`.
    fn chance(&mut self, p: f32) -> bool {
        self.unit() < p
    }

    /// Signed offset in `[-span, span]`.
    fn jitter(&mut self, span: u32) -> i32 {
        self.below(span * 2 + 1) as i32 - span as i32
    }
}

pub struct StdRandom {
    rng: StdRng,
    unit: Uniform<f32>,
}

impl StdRandom {
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            unit: Uniform::new(0.0, 1.0).expect("valid range"),
        }
    }
}

impl RandomSource for StdRandom {
    fn unit(&mut self) -> f32 {
        self.unit.sample(&mut self.rng)
    }

    fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.random_range(0..n)
    }
}

#[cfg(test)]
pub use scripted::ScriptedRandom;
