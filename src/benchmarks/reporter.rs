// Results formatting and reporting

use crate::benchmarks::stats::estimate_exponent;
use crate::benchmarks::{Growth, RatioSample, Statistics, StepMeasurement};
use colored::*;

/// Ratios considered when summarising a workload's growth.
const SUMMARY_TAIL: usize = 3;

/// Shown when no ratio came out: either fewer than two sizes were measured
/// (`max_n <= 2`) or the earlier sizes ran below timer resolution.
const NO_RATIOS_HINT: &str = "no ratios: a ratio needs two sizes measuring at least 1 ms, raise --max-n";

pub struct Reporter;

impl Reporter {
    pub fn print_header(title: &str) {
        let width = 72;
        println!("{}", "=".repeat(width).bright_blue());
        println!("{:^width$}", title.bright_white().bold(), width = width);
        println!("{}", "=".repeat(width).bright_blue());
        println!();
    }

    pub fn print_separator() {
        println!("{}", "-".repeat(72).blue());
    }

    pub fn print_ratio_table(name: &str, ratios: &[RatioSample]) {
        println!("{} {}", "▶".cyan().bold(), name.bright_white().bold());

        if ratios.is_empty() {
            println!(
                "  {}",
                NO_RATIOS_HINT.yellow()
            );
            println!();
            return;
        }

        println!(
            "  {:>12} {:>10} {:>20}",
            "Size".bright_white().bold(),
            "Ratio".bright_white().bold(),
            "Suggests".bright_white().bold()
        );
        for sample in ratios {
            let growth = sample.growth();
            println!(
                "  {:>12} {:>10} {:>20}",
                sample.size,
                format!("{:.2}", sample.ratio).yellow(),
                Self::colorize_growth(growth)
            );
        }
        Self::print_separator();
        Self::print_summary(ratios);
        println!();
    }

    pub fn print_steps(name: &str, steps: &[StepMeasurement]) {
        println!("{} {} {}", "▶".cyan().bold(), name.bright_white().bold(), "(per size)".dimmed());
        println!(
            "  {:>12} {:>10} {:>12} {:>12} {:>12} {:>12}",
            "Size".bright_white().bold(),
            "Avg ms".bright_white().bold(),
            "Median".bright_white().bold(),
            "Min".bright_white().bold(),
            "Max".bright_white().bold(),
            "StdDev".bright_white().bold()
        );
        for step in steps {
            match step.statistics() {
                Some(stats) => println!(
                    "  {:>12} {:>10} {:>12} {:>12} {:>12} {:>12}",
                    step.size,
                    step.runtime_ms.to_string().yellow(),
                    Statistics::format_duration(stats.median),
                    Statistics::format_duration(stats.min).green(),
                    Statistics::format_duration(stats.max).red(),
                    Statistics::format_duration(stats.stddev).blue()
                ),
                None => println!("  {:>12} {:>10}", step.size, "N/A"),
            }
        }
    }

    fn print_summary(ratios: &[RatioSample]) {
        if let Some(exponent) = estimate_exponent(ratios, SUMMARY_TAIL) {
            let growth = Growth::classify(2f64.powf(exponent));
            println!(
                "  {} exponent ≈ {} → {}",
                "Summary:".bright_white().bold(),
                format!("{:.2}", exponent).bright_green().bold(),
                Self::colorize_growth(growth)
            );
        }
    }

    fn colorize_growth(growth: Growth) -> ColoredString {
        match growth {
            Growth::Constant | Growth::Linear => growth.name().green(),
            Growth::Quadratic => growth.name().yellow(),
            Growth::Cubic | Growth::SuperCubic => growth.name().red(),
        }
    }
}
