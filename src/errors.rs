// File: src/errors.rs
//
// Error reporting for the nvg command-line surface and configuration loading.
// Contract violations inside the measuring code panic at the call site; the
// types here cover what a user can get wrong from the outside.

use colored::Colorize;
use std::fmt;
use std::io;
use std::path::Path;

/// Types of errors that can reach the user
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    ConfigError,
    InvalidArgument,
    IoError,
    UnknownWorkload,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::ConfigError => write!(f, "Config Error"),
            ErrorKind::InvalidArgument => write!(f, "Invalid Argument"),
            ErrorKind::IoError => write!(f, "I/O Error"),
            ErrorKind::UnknownWorkload => write!(f, "Unknown Workload"),
        }
    }
}

/// A structured error with optional origin and hints
#[derive(Debug, Clone)]
pub struct NvgError {
    pub kind: ErrorKind,
    pub message: String,
    pub origin: Option<String>,
    pub suggestion: Option<String>,
    pub help: Option<String>,
    pub note: Option<String>,
}

pub type Result<T> = std::result::Result<T, NvgError>;

impl NvgError {
    pub fn new(kind: ErrorKind, message: String) -> Self {
        Self {
            kind,
            message,
            origin: None,
            suggestion: None,
            help: None,
            note: None,
        }
    }

    pub fn with_origin(mut self, path: &Path) -> Self {
        self.origin = Some(path.display().to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    pub fn with_help(mut self, help: String) -> Self {
        self.help = Some(help);
        self
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.note = Some(note);
        self
    }

    pub fn config_error(message: String) -> Self {
        Self::new(ErrorKind::ConfigError, message)
    }

    pub fn invalid_argument(message: String) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// Unknown workload name, with a "did you mean" hint when one is close.
    pub fn unknown_workload(name: &str, known: &[String]) -> Self {
        let mut error = Self::new(
            ErrorKind::UnknownWorkload,
            format!("Workload '{}' does not exist", name),
        )
        .with_help(format!("available workloads: {}", known.join(", ")));
        if let Some(candidate) = find_closest_match(name, known) {
            error = error.with_suggestion(candidate.to_string());
        }
        error
    }
}

impl fmt::Display for NvgError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind_str = format!("{}", self.kind);
        writeln!(f, "{}: {}", kind_str.red().bold(), self.message.bold())?;

        if let Some(ref origin) = self.origin {
            let origin_str = format!("  --> {}", origin);
            writeln!(f, "{}", origin_str.bright_blue())?;
        }

        if let Some(ref help) = self.help {
            writeln!(
                f,
                "   {} {}",
                "=".bright_yellow(),
                format!("help: {}", help).bright_yellow()
            )?;
        }

        if let Some(ref suggestion) = self.suggestion {
            writeln!(
                f,
                "   {} {}",
                "=".bright_green(),
                format!("Did you mean '{}'?", suggestion).bright_green()
            )?;
        }

        if let Some(ref note) = self.note {
            writeln!(f, "   {} {}", "=".bright_cyan(), format!("note: {}", note).bright_cyan())?;
        }

        Ok(())
    }
}

impl std::error::Error for NvgError {}

impl From<io::Error> for NvgError {
    fn from(error: io::Error) -> Self {
        Self::new(ErrorKind::IoError, error.to_string())
    }
}

impl From<toml::de::Error> for NvgError {
    fn from(error: toml::de::Error) -> Self {
        Self::config_error(error.message().to_string())
    }
}

/// Computes the Levenshtein distance between two strings
/// Used for "Did you mean?" suggestions
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // single rolling row of the edit-distance matrix
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for i in 1..=a.len() {
        let mut diagonal = row[0];
        row[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            let substitution = diagonal + cost;
            diagonal = row[j];
            row[j] = (row[j] + 1).min(row[j - 1] + 1).min(substitution);
        }
    }

    row[b.len()]
}

/// Find the closest match from a list of candidates using Levenshtein distance
/// Returns None if no good match is found (distance > 3)
pub fn find_closest_match<'a>(target: &str, candidates: &'a [String]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|candidate| (levenshtein_distance(target, candidate), candidate))
        .filter(|(distance, _)| *distance <= 3)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate.as_str())
}
