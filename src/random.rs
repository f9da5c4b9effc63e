//! Random number generation, based on the abstractions of the rand crate
//!
//! All stochastic decisions of the pipeline (log-normal smearing, tower
//! center smearing, toy event generation) draw from a single generator per
//! worker, so that a run is fully determined by its seed and its event batch
//! schedule.

use crate::numeric::Float;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

// Select random number generation engine in use
#[cfg(feature = "f32")]
type Engine = rand_xoshiro::Xoshiro128Plus;
#[cfg(not(feature = "f32"))]
type Engine = rand_xoshiro::Xoshiro256Plus;

/// Facade which hides the rand crate's genericity behind the operations that
/// the simulation actually needs
#[derive(Clone)]
pub struct RandomGenerator {
    rng: Engine,
}
//
impl RandomGenerator {
    /// Spawn a new random number generator from a configured seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Engine::seed_from_u64(seed),
        }
    }

    /// Generate a random floating-point number between 0 and 1
    pub fn random(&mut self) -> Float {
        self.rng.gen()
    }

    /// Generate a random floating-point number between lo and hi
    pub fn uniform(&mut self, lo: Float, hi: Float) -> Float {
        lo + (hi - lo) * self.random()
    }

    /// Generate a standard-normal-distributed floating-point number
    pub fn normal(&mut self) -> Float {
        self.rng.sample(StandardNormal)
    }

    /// Generate a random integer in `0..n`
    pub fn index(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }

    /// Advance state to a decorrelated stream far ahead in the sequence
    ///
    /// Used to hand each event batch its own stream when batches are
    /// processed by parallel workers.
    ///
    pub fn jump(&mut self) {
        self.rng.jump();
    }
}
