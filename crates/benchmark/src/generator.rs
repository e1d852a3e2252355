//! Seeded random cuboid generation.

use guillotine_d3::Cuboid;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default upper bound for generated extents.
pub const DEFAULT_MAX_EXTENT: u32 = 100;

/// Generates cuboids with integer extents in `[1, max_extent]`.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    rng: StdRng,
    max_extent: u32,
}

impl RandomGenerator {
    /// Creates a generator. Without a seed the sequence is not reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            max_extent: DEFAULT_MAX_EXTENT,
        }
    }

    /// Sets the largest extent; values below 1 are raised to 1.
    pub fn with_max_extent(mut self, max_extent: u32) -> Self {
        self.max_extent = max_extent.max(1);
        self
    }

    /// Returns the largest extent.
    pub fn max_extent(&self) -> u32 {
        self.max_extent
    }

    /// Generates `count` unplaced cuboids.
    pub fn generate(&mut self, count: usize) -> Vec<Cuboid> {
        (0..count)
            .map(|_| Cuboid::new(self.extent(), self.extent(), self.extent()))
            .collect()
    }

    fn extent(&mut self) -> f64 {
        f64::from(self.rng.gen_range(1..=self.max_extent))
    }
}
