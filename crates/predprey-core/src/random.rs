//! The seeded random sequence behind every life-cycle decision.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A single reproducible random stream.
///
/// Every consumer draws from the same instance in a fixed order, so a run is
/// fully determined by its seed.
#[derive(Debug, Clone)]
pub struct RandomSource {
    seed: u64,
    rng: ChaCha8Rng,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rewind the stream to its configured seed
    pub fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }

    /// Replace the seed without disturbing the current stream; takes effect on `reset`
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    /// Replace the seed and rewind
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.reset();
    }

    /// Uniform draw in `[0, 1)`
    pub fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// `true` when a unit draw does not exceed `probability`
    pub fn chance(&mut self, probability: f64) -> bool {
        self.unit() <= probability
    }

    /// Uniform integer in `[0, bound)`; zero when `bound` is zero
    pub fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.rng.gen_range(0..bound)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}
