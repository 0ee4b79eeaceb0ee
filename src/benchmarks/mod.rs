// Benchmarking module for empirical complexity checks
//
// This module times a callable over the doubling progression of input sizes
// (1, 2, 4, 8, ...) and reports how runtime grows from one size to the next:
// - Clock sources and an accumulating stopwatch
// - The runtime-ratio estimator
// - Sample statistics and growth classification
// - Terminal reporting
//
// Usage:
//   let estimator = RatioEstimator::new().with_repeats(10);
//   let ratios = estimator.runtime_ratios(|v| v.iter().sum::<usize>(), |n| random.uniform_vector(n), 1 << 16);

pub mod timer;
pub mod stats;
pub mod runner;
pub mod reporter;

pub use runner::{doubling_sizes, ratios_from_steps, runtime_ratios, RatioEstimator, DEFAULT_REPEATS};
pub use timer::{Clock, ManualClock, MonotonicClock, Stopwatch};
pub use stats::{Growth, Statistics};
pub use reporter::Reporter;

use serde::Serialize;
use std::time::Duration;

/// Runtime at `size` divided by the runtime at `size / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioSample {
    pub size: usize,
    pub ratio: f64,
}

impl RatioSample {
    pub fn growth(&self) -> Growth {
        Growth::classify(self.ratio)
    }
}

/// Outcome of timing one size of the progression.
#[derive(Debug, Clone, PartialEq)]
pub struct StepMeasurement {
    pub size: usize,
    /// Total elapsed milliseconds divided by the repeat count, truncated.
    pub runtime_ms: u64,
    /// Each repeat's individual interval.
    pub samples: Vec<Duration>,
}

impl StepMeasurement {
    pub fn statistics(&self) -> Option<Statistics> {
        Statistics::from_samples(&self.samples)
    }
}
