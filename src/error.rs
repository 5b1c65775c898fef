//! Shared error utilities used across the compilation pipeline.
//!
//! Every failure in the front end is a [`CompileError`] value that bubbles up
//! to the binary. Diagnostics are rendered in a style reminiscent of chibicc:
//! the quoted expression, then a caret under the offending byte.

use std::fmt::Display;
use std::num::ParseIntError;
use std::process;

use snafu::Snafu;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CompileError {
  #[snafu(display("{}\n{} invalid token: '{ch}'", quoted(expr), marker(expr, *loc)))]
  UnrecognizedCharacter { expr: String, loc: usize, ch: char },

  #[snafu(display("{}\n{} invalid number: {source}", quoted(expr), marker(expr, *loc)))]
  InvalidNumber {
    expr: String,
    loc: usize,
    source: ParseIntError,
  },

  #[snafu(display(
    "{}\n{} expected a number, but got \"{got}\"",
    quoted(expr),
    marker(expr, *loc)
  ))]
  ExpectedNumber { expr: String, loc: usize, got: String },

  #[snafu(display(
    "{}\n{} expected \"{expected}\", but got \"{got}\"",
    quoted(expr),
    marker(expr, *loc)
  ))]
  UnexpectedToken {
    expr: String,
    loc: usize,
    expected: char,
    got: String,
  },
}

impl CompileError {
  /// Byte offset into the source the diagnostic points at.
  pub fn location(&self) -> usize {
    match self {
      Self::UnrecognizedCharacter { loc, .. }
      | Self::InvalidNumber { loc, .. }
      | Self::ExpectedNumber { loc, .. }
      | Self::UnexpectedToken { loc, .. } => *loc,
    }
  }
}

fn quoted(expr: &str) -> String {
  format!("'{expr}'")
}

/// Caret line pointing at `loc`, shifted by one column for the opening quote.
fn marker(expr: &str, loc: usize) -> String {
  let safe_loc = loc.min(expr.len());
  let columns = expr
    .get(..safe_loc)
    .map_or(safe_loc, |prefix| prefix.chars().count());
  format!("{}^", " ".repeat(columns + 1))
}

/// Print a fatal diagnostic to stderr and terminate with status 1.
pub fn report(err: &dyn Display) -> ! {
  eprintln!("{err}");
  process::exit(1)
}
