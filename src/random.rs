// File: src/random.rs
//
// Random test data for benchmarks: uniform vectors over integer or
// floating-point ranges, and uniformly random permutations.

use rand::distributions::uniform::SampleUniform;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Owns one pseudo-random engine. Instances are independent of each other;
/// share one across threads only behind external synchronization.
#[derive(Debug)]
pub struct Random {
    rng: StdRng,
}

impl Random {
    /// Engine seeded from operating-system entropy.
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Engine with a fixed seed, for reproducible data.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// `n` indices drawn uniformly from `[0, n - 1]`. Empty when `n == 0`.
    pub fn uniform_vector(&mut self, n: usize) -> Vec<usize> {
        if n == 0 {
            return Vec::new();
        }
        self.uniform_vector_in(n, 0, n - 1)
    }

    /// `n` values drawn uniformly from the closed interval `[min, max]`.
    ///
    /// Panics if `min > max`. For floating-point bounds whose difference
    /// overflows, use `uniform_reals`.
    pub fn uniform_vector_in<T>(&mut self, n: usize, min: T, max: T) -> Vec<T>
    where
        T: SampleUniform + PartialOrd + Copy,
    {
        assert!(min <= max, "uniform_vector_in: min must not exceed max");
        let dist = Uniform::new_inclusive(min, max);
        let mut output = Vec::with_capacity(n);
        for _ in 0..n {
            output.push(dist.sample(&mut self.rng));
        }
        output
    }

    pub fn uniform_integers(&mut self, n: usize, min: i64, max: i64) -> Vec<i64> {
        self.uniform_vector_in(n, min, max)
    }

    /// Accepts any finite `min <= max`, including spans wider than `f64::MAX`.
    pub fn uniform_reals(&mut self, n: usize, min: f64, max: f64) -> Vec<f64> {
        if (max - min).is_finite() {
            return self.uniform_vector_in(n, min, max);
        }
        assert!(min <= max, "uniform_reals: min must not exceed max");
        // interpolate so the span itself is never computed
        self.uniform_vector_in(n, 0.0f64, 1.0)
            .into_iter()
            .map(|t| (min * (1.0 - t) + max * t).clamp(min, max))
            .collect()
    }

    /// A uniformly random ordering of `0..n` (Fisher-Yates).
    pub fn permutation_vector(&mut self, n: usize) -> Vec<usize> {
        let mut output = Vec::with_capacity(n);
        for i in 0..n {
            output.push(i);
        }
        output.shuffle(&mut self.rng);
        output
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}
