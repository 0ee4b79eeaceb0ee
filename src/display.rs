// File: src/display.rs
//
// Printing helpers for inspecting generated data.

use std::fmt::Display;
use std::io::{self, Write};

pub const DEFAULT_SEPARATOR: &str = " ";
pub const DEFAULT_ENDING: &str = "\n";

/// Write every item of `items` to `out`, separated by `separator` and
/// followed by `ending`.
pub fn write_sequence<W, I>(out: &mut W, items: I, separator: &str, ending: &str) -> io::Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator,
    I::Item: Display,
{
    let mut first = true;
    for item in items {
        if !first {
            out.write_all(separator.as_bytes())?;
        }
        write!(out, "{}", item)?;
        first = false;
    }
    out.write_all(ending.as_bytes())
}

/// `write_sequence` to stdout with a space separator and a trailing newline.
pub fn print_sequence<I>(items: I) -> io::Result<()>
where
    I: IntoIterator,
    I::Item: Display,
{
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_sequence(&mut lock, items, DEFAULT_SEPARATOR, DEFAULT_ENDING)
}
