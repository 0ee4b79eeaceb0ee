// File: src/lib.rs
//
// Library interface for nvg.
// Exposes the estimator, generators and helpers for integration testing
// and for benchmarks written outside this crate.

pub mod benchmarks;
pub mod config;
pub mod display;
pub mod errors;
pub mod random;
pub mod workloads;

pub use benchmarks::{runtime_ratios, RatioEstimator, RatioSample};
pub use random::Random;
