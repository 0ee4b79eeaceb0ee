// File: src/main.rs
//
// Main entry point for the nvg command-line tool.
// Handles argument parsing and dispatches to the appropriate subcommand
// (ratios or generate).

use clap::{ArgAction, Parser as ClapParser, Subcommand, ValueEnum};
use nvg::benchmarks::{ratios_from_steps, RatioEstimator, RatioSample, Reporter};
use nvg::config::BenchConfig;
use nvg::display::write_sequence;
use nvg::errors::{NvgError, Result};
use nvg::random::Random;
use nvg::workloads::Workload;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tracing::{info, Level};

#[derive(ClapParser)]
#[command(
    name = "nvg",
    about = "nvg: estimate how runtime scales with input size",
    version = env!("CARGO_PKG_VERSION"),
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[command(arg_required_else_help = true)]
enum Commands {
    /// Print runtime-doubling ratios for built-in workloads
    Ratios {
        /// TOML file with benchmark parameters
        #[arg(long)]
        config: Option<PathBuf>,

        /// Workload to run; repeat to select several (default: all)
        #[arg(short, long = "workload")]
        workloads: Vec<String>,

        /// Exclusive upper bound on input size
        #[arg(long)]
        max_n: Option<usize>,

        /// Timed trials averaged per size
        #[arg(short, long)]
        repeats: Option<usize>,

        /// Seed for generated inputs
        #[arg(long)]
        seed: Option<u64>,

        /// Also print per-size timing statistics
        #[arg(long)]
        detailed: bool,

        /// Print the ratio sequences as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Print a generated vector
    Generate {
        #[arg(value_enum)]
        kind: VectorKind,

        /// Number of elements
        #[arg(short)]
        n: usize,

        /// Lower bound (integers and reals)
        #[arg(long, allow_negative_numbers = true)]
        min: Option<String>,

        /// Upper bound (integers and reals)
        #[arg(long, allow_negative_numbers = true)]
        max: Option<String>,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value = " ")]
        separator: String,

        #[arg(long, default_value = "\n")]
        ending: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum VectorKind {
    /// Indices uniform over [0, n-1]
    Uniform,
    /// Random ordering of 0..n
    Permutation,
    /// Integers uniform over [min, max]
    Integers,
    /// Reals uniform over [min, max]
    Reals,
}

#[derive(Serialize)]
struct WorkloadReport<'a> {
    workload: &'a str,
    max_n: usize,
    repeats: usize,
    ratios: Vec<RatioSample>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match cli.command {
        Commands::Ratios { config, workloads, max_n, repeats, seed, detailed, json } => {
            load_config(config, workloads, max_n, repeats, seed, detailed)
                .and_then(|config| run_ratios(&config, json))
        }
        Commands::Generate { kind, n, min, max, seed, separator, ending } => {
            run_generate(kind, n, min.as_deref(), max.as_deref(), seed, &separator, &ending)
        }
    };

    if let Err(error) = outcome {
        eprint!("{}", error);
        process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_config(
    path: Option<PathBuf>,
    workloads: Vec<String>,
    max_n: Option<usize>,
    repeats: Option<usize>,
    seed: Option<u64>,
    detailed: bool,
) -> Result<BenchConfig> {
    let mut config = match path {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            BenchConfig::load(&path)?
        }
        None => BenchConfig::default(),
    };

    if !workloads.is_empty() {
        config.workloads = workloads;
    }
    if max_n.is_some() {
        config.max_n = max_n;
    }
    if let Some(repeats) = repeats {
        config.repeats = repeats;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    config.detailed |= detailed;

    config.validate()?;
    Ok(config)
}

fn run_ratios(config: &BenchConfig, json: bool) -> Result<()> {
    let estimator = RatioEstimator::new().with_repeats(config.repeats);
    let mut random = match config.seed {
        Some(seed) => Random::seeded(seed),
        None => Random::new(),
    };

    if !json {
        Reporter::print_header("Runtime Ratios");
    }

    let mut reports = Vec::new();
    for workload in config.resolved_workloads()? {
        let max_n = config.max_n_for(workload);
        info!(workload = workload.name(), max_n, repeats = config.repeats, "running workload");

        let ratios = if config.detailed {
            let steps = workload.profile(&estimator, &mut random, max_n);
            if !json {
                Reporter::print_steps(workload.name(), &steps);
            }
            ratios_from_steps(&steps)
        } else {
            workload.runtime_ratios(&estimator, &mut random, max_n)
        };

        if json {
            reports.push(WorkloadReport {
                workload: workload.name(),
                max_n,
                repeats: config.repeats,
                ratios,
            });
        } else {
            let title = format!("{} ({}, expect {})", workload, workload.description(), workload.expected_growth());
            Reporter::print_ratio_table(&title, &ratios);
        }
    }

    if json {
        let rendered = serde_json::to_string_pretty(&reports)
            .map_err(|e| NvgError::invalid_argument(format!("could not encode report: {}", e)))?;
        println!("{}", rendered);
    }
    Ok(())
}

fn run_generate(
    kind: VectorKind,
    n: usize,
    min: Option<&str>,
    max: Option<&str>,
    seed: Option<u64>,
    separator: &str,
    ending: &str,
) -> Result<()> {
    let mut random = match seed {
        Some(seed) => Random::seeded(seed),
        None => Random::new(),
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match kind {
        VectorKind::Uniform => write_sequence(&mut out, random.uniform_vector(n), separator, ending)?,
        VectorKind::Permutation => {
            write_sequence(&mut out, random.permutation_vector(n), separator, ending)?
        }
        VectorKind::Integers => {
            let (min, max) = integer_bounds(min, max)?;
            write_sequence(&mut out, random.uniform_integers(n, min, max), separator, ending)?
        }
        VectorKind::Reals => {
            let (min, max) = real_bounds(min, max)?;
            write_sequence(&mut out, random.uniform_reals(n, min, max), separator, ending)?
        }
    }

    out.flush()?;
    Ok(())
}

/// Both bounds present and ordered, parsed as whole `i64` values.
fn integer_bounds(min: Option<&str>, max: Option<&str>) -> Result<(i64, i64)> {
    let (min, max) = required_bounds(min, max)?;
    let parse = |text: &str| {
        text.trim().parse::<i64>().map_err(|_| {
            NvgError::invalid_argument(format!("'{}' is not a whole number in the i64 range", text))
                .with_help("use `reals` for fractional bounds".to_string())
        })
    };
    ordered(parse(min)?, parse(max)?)
}

/// Both bounds present, finite and ordered.
fn real_bounds(min: Option<&str>, max: Option<&str>) -> Result<(f64, f64)> {
    let (min, max) = required_bounds(min, max)?;
    let parse = |text: &str| match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(NvgError::invalid_argument(format!("bound '{}' must be finite", text))),
        Err(_) => Err(NvgError::invalid_argument(format!("'{}' is not a number", text))),
    };
    ordered(parse(min)?, parse(max)?)
}

fn required_bounds<'a>(min: Option<&'a str>, max: Option<&'a str>) -> Result<(&'a str, &'a str)> {
    match (min, max) {
        (Some(min), Some(max)) => Ok((min, max)),
        _ => Err(NvgError::invalid_argument("--min and --max are required".to_string())
            .with_help("e.g. `nvg generate integers -n 10 --min 0 --max 99`".to_string())),
    }
}

fn ordered<T: PartialOrd + std::fmt::Display>(min: T, max: T) -> Result<(T, T)> {
    if min > max {
        return Err(NvgError::invalid_argument(format!(
            "--min ({}) must not exceed --max ({})",
            min, max
        )));
    }
    Ok((min, max))
}
