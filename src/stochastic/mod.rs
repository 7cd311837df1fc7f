//! # Stochastic Module
//!
//! Seeded pseudo-random source for Monte Carlo photon transport.
//!
//! ## Reproducibility
//!
//! Every transport engine owns exactly one [`RandomGenerator`]. Two generators
//! built from the same seed yield the same sequence of deviates, so a run is
//! fully determined by its seed, its inputs, and the order of draws.
//!
//! ## Sampling
//!
//! - Uniform ξ on [0, 1) with 53 bits of mantissa
//! - Exponential free paths: s = −ln(ξ) / μ
//! - Isotropic polar cosine: cos θ = 2ξ − 1
//! - Azimuth: φ = 2πξ

use std::f64::consts::PI;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::constants::DEFAULT_SEED;

/// Pseudo-random number generator (xoshiro256**)
///
/// Fast, high-quality PRNG suitable for Monte Carlo simulations.
/// Period: 2^256 - 1. Seeded through SplitMix64.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    rng: Xoshiro256StarStar,
    seed: u64,
}

impl RandomGenerator {
    /// Create new RNG with seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this generator was built from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate uniform [0, 1)
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Generate exponential distribution with rate λ
    #[inline]
    pub fn exponential(&mut self, lambda: f64) -> f64 {
        -self.uniform().max(1e-300).ln() / lambda
    }

    /// Isotropic polar cosine on [-1, 1)
    #[inline]
    pub fn isotropic_cosine(&mut self) -> f64 {
        2.0 * self.uniform() - 1.0
    }

    /// Azimuthal angle on [0, 2π)
    #[inline]
    pub fn azimuth(&mut self) -> f64 {
        2.0 * PI * self.uniform()
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)  // Reproducible default
    }
}
