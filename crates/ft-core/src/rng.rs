//! The per-run deterministic RNG stream.
//!
//! # Determinism strategy
//!
//! Each model instance owns exactly **one** `SimRng`, seeded from the run
//! configuration.  Bridge collapse evaluation, delay sampling, and router
//! sink selection all draw from this single stream, in the fixed agent step
//! order of the scheduler.  Reordering agents therefore changes the random
//! sequence — the step order is a correctness invariant, not a style choice.
//!
//! Batch runs of independent instances each construct their own `SimRng`;
//! nothing here is shared or global.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded `SmallRng` wrapper — the run's single random stream.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand_distr` distribution
    /// types (`dist.sample(rng.inner())`).
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// A uniform draw in `[0.0, 1.0)`.
    #[inline]
    pub fn gen_unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
