// Summaries of timing samples and interpretation of runtime ratios

use crate::benchmarks::RatioSample;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Statistics {
    pub mean: Duration,
    pub median: Duration,
    pub min: Duration,
    pub max: Duration,
    pub stddev: Duration,
    pub samples: usize,
}

impl Statistics {
    pub fn from_samples(samples: &[Duration]) -> Option<Self> {
        let min = samples.iter().min().copied()?;
        let max = samples.iter().max().copied()?;
        let mean = calculate_mean(samples);
        let median = calculate_median(samples);
        let stddev = calculate_stddev(samples, mean);

        Some(Self {
            mean,
            median,
            min,
            max,
            stddev,
            samples: samples.len(),
        })
    }

    pub fn format_duration(duration: Duration) -> String {
        let nanos = duration.as_nanos();
        if nanos < 1_000 {
            format!("{} ns", nanos)
        } else if nanos < 1_000_000 {
            format!("{:.2} µs", nanos as f64 / 1_000.0)
        } else if nanos < 1_000_000_000 {
            format!("{:.2} ms", nanos as f64 / 1_000_000.0)
        } else {
            format!("{:.2} s", nanos as f64 / 1_000_000_000.0)
        }
    }
}

fn calculate_mean(samples: &[Duration]) -> Duration {
    let total: Duration = samples.iter().sum();
    total / samples.len() as u32
}

fn calculate_median(samples: &[Duration]) -> Duration {
    let mut sorted = samples.to_vec();
    sorted.sort();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2
    } else {
        sorted[mid]
    }
}

fn calculate_stddev(samples: &[Duration], mean: Duration) -> Duration {
    let mean_nanos = mean.as_nanos() as f64;
    let variance: f64 = samples
        .iter()
        .map(|s| {
            let diff = s.as_nanos() as f64 - mean_nanos;
            diff * diff
        })
        .sum::<f64>()
        / samples.len() as f64;

    Duration::from_nanos(variance.sqrt() as u64)
}

/// Growth class suggested by a doubling ratio.
///
/// A ratio `r` corresponds to a polynomial exponent of `log2(r)`; the class is
/// the nearest whole exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Growth {
    Constant,
    Linear,
    Quadratic,
    Cubic,
    SuperCubic,
}

impl Growth {
    pub fn classify(ratio: f64) -> Self {
        if !ratio.is_finite() {
            return Growth::SuperCubic;
        }
        match growth_exponent(ratio).round() {
            e if e <= 0.0 => Growth::Constant,
            e if e <= 1.0 => Growth::Linear,
            e if e <= 2.0 => Growth::Quadratic,
            e if e <= 3.0 => Growth::Cubic,
            _ => Growth::SuperCubic,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Growth::Constant => "O(1)",
            Growth::Linear => "O(n)",
            Growth::Quadratic => "O(n^2)",
            Growth::Cubic => "O(n^3)",
            Growth::SuperCubic => "worse than O(n^3)",
        }
    }
}

impl fmt::Display for Growth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Polynomial exponent implied by one doubling ratio.
pub fn growth_exponent(ratio: f64) -> f64 {
    if ratio <= 0.0 {
        return 0.0;
    }
    ratio.log2()
}

/// Mean exponent over the last `tail` samples of a ratio sequence.
///
/// Small sizes are dominated by timer resolution, so only the tail is
/// considered. Returns `None` for an empty sequence.
pub fn estimate_exponent(samples: &[RatioSample], tail: usize) -> Option<f64> {
    let tail = tail.max(1).min(samples.len());
    if tail == 0 {
        return None;
    }
    let recent = &samples[samples.len() - tail..];
    let sum: f64 = recent.iter().map(|s| growth_exponent(s.ratio)).sum();
    Some(sum / recent.len() as f64)
}
