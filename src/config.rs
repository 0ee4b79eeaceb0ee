// File: src/config.rs
//
// Benchmark parameters, read from an optional TOML file and then overridden
// by command-line flags.
//
// Example file:
//   repeats = 10
//   max_n = 65536
//   seed = 7
//   workloads = ["linear", "sort"]

use crate::benchmarks::DEFAULT_REPEATS;
use crate::errors::{NvgError, Result};
use crate::workloads::Workload;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Exclusive upper bound on input size. Each workload's suggested bound
    /// is used when unset.
    pub max_n: Option<usize>,
    pub repeats: usize,
    /// Seed for the data generator; OS entropy when unset.
    pub seed: Option<u64>,
    pub workloads: Vec<String>,
    /// Print per-size timing statistics in addition to the ratios.
    pub detailed: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            max_n: None,
            repeats: DEFAULT_REPEATS,
            seed: None,
            workloads: Workload::names(),
            detailed: false,
        }
    }
}

impl BenchConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| NvgError::from(e).with_origin(path))?;
        Self::from_toml_str(&text).map_err(|e| e.with_origin(path))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: BenchConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.repeats == 0 {
            return Err(NvgError::config_error("repeats must be at least 1".to_string())
                .with_note("each size is timed `repeats` times and averaged".to_string()));
        }
        if self.workloads.is_empty() {
            return Err(NvgError::config_error("no workloads selected".to_string())
                .with_help(format!("choose from: {}", Workload::names().join(", "))));
        }
        self.resolved_workloads()?;
        Ok(())
    }

    pub fn resolved_workloads(&self) -> Result<Vec<Workload>> {
        self.workloads.iter().map(|name| name.parse()).collect()
    }

    pub fn max_n_for(&self, workload: Workload) -> usize {
        self.max_n.unwrap_or_else(|| workload.suggested_max_n())
    }
}
