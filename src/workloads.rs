// File: src/workloads.rs
//
// Reference workloads with known growth. Each pairs a callable with the
// generator that feeds it, so the command line can show what the ratio
// sequence of a constant, linear, n log n, quadratic or cubic algorithm
// looks like on the current machine.

use crate::benchmarks::{Clock, Growth, RatioEstimator, RatioSample, StepMeasurement};
use crate::errors::NvgError;
use crate::random::Random;
use std::fmt;
use std::hint::black_box;
use std::str::FromStr;

/// Fixed amount of work done by the constant workload regardless of input size.
const CONSTANT_WORK: usize = 1 << 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workload {
    Constant,
    Linear,
    Sort,
    Quadratic,
    Cubic,
}

impl Workload {
    pub const ALL: [Workload; 5] = [
        Workload::Constant,
        Workload::Linear,
        Workload::Sort,
        Workload::Quadratic,
        Workload::Cubic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Workload::Constant => "constant",
            Workload::Linear => "linear",
            Workload::Sort => "sort",
            Workload::Quadratic => "quadratic",
            Workload::Cubic => "cubic",
        }
    }

    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|w| w.name().to_string()).collect()
    }

    pub fn description(&self) -> &'static str {
        match self {
            Workload::Constant => "fixed-size hash loop that ignores input length",
            Workload::Linear => "sum of a uniform vector",
            Workload::Sort => "unstable sort of a uniform vector",
            Workload::Quadratic => "naive inversion count of a permutation",
            Workload::Cubic => "brute-force count of triples with a[i] + a[j] == a[k]",
        }
    }

    /// Growth the ratio sequence should settle on. Sorting is n log n, whose
    /// doubling ratio sits just above 2.
    pub fn expected_growth(&self) -> Growth {
        match self {
            Workload::Constant => Growth::Constant,
            Workload::Linear | Workload::Sort => Growth::Linear,
            Workload::Quadratic => Growth::Quadratic,
            Workload::Cubic => Growth::Cubic,
        }
    }

    /// A `max_n` that reaches millisecond runtimes without running for minutes.
    pub fn suggested_max_n(&self) -> usize {
        match self {
            Workload::Constant => 1 << 12,
            Workload::Linear => 1 << 24,
            Workload::Sort => 1 << 21,
            Workload::Quadratic => 1 << 14,
            Workload::Cubic => 1 << 10,
        }
    }

    /// Fresh input of size `n` for this workload.
    pub fn generate(&self, random: &mut Random, n: usize) -> Vec<usize> {
        match self {
            Workload::Quadratic => random.permutation_vector(n),
            _ => random.uniform_vector(n),
        }
    }

    /// The callable under test.
    pub fn callable(&self) -> fn(Vec<usize>) -> usize {
        match self {
            Workload::Constant => constant_hash,
            Workload::Linear => linear_sum,
            Workload::Sort => sort_and_take_median,
            Workload::Quadratic => count_inversions,
            Workload::Cubic => count_sum_triples,
        }
    }

    pub fn runtime_ratios<C: Clock + Clone>(
        &self,
        estimator: &RatioEstimator<C>,
        random: &mut Random,
        max_n: usize,
    ) -> Vec<RatioSample> {
        estimator.runtime_ratios(self.callable(), |n| self.generate(random, n), max_n)
    }

    pub fn profile<C: Clock + Clone>(
        &self,
        estimator: &RatioEstimator<C>,
        random: &mut Random,
        max_n: usize,
    ) -> Vec<StepMeasurement> {
        estimator.profile(self.callable(), |n| self.generate(random, n), max_n)
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Workload {
    type Err = NvgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|w| w.name() == wanted)
            .ok_or_else(|| NvgError::unknown_workload(s, &Self::names()))
    }
}

fn constant_hash(v: Vec<usize>) -> usize {
    if v.is_empty() {
        return 0;
    }
    let mut acc = v.len();
    for i in 0..CONSTANT_WORK {
        acc = acc.wrapping_mul(31).wrapping_add(black_box(v[i % v.len()]));
    }
    acc
}

fn linear_sum(v: Vec<usize>) -> usize {
    v.iter().fold(0usize, |acc, &x| acc.wrapping_add(black_box(x)))
}

fn sort_and_take_median(mut v: Vec<usize>) -> usize {
    v.sort_unstable();
    v.get(v.len() / 2).copied().unwrap_or(0)
}

fn count_inversions(v: Vec<usize>) -> usize {
    let mut inversions = 0;
    for i in 0..v.len() {
        for j in i + 1..v.len() {
            if v[i] > v[j] {
                inversions += 1;
            }
        }
    }
    inversions
}

fn count_sum_triples(v: Vec<usize>) -> usize {
    let mut triples = 0;
    for i in 0..v.len() {
        for j in i + 1..v.len() {
            let target = v[i] + v[j];
            for k in j + 1..v.len() {
                if v[k] == target {
                    triples += 1;
                }
            }
        }
    }
    triples
}
