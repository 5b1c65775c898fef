//! Command-line driver: parse arguments, compile the expression, and print
//! the assembly or a diagnostic.

use std::fs;
use std::io;
use std::path::PathBuf;

use arithcc::error::report;
use arithcc::{CompileError, Syntax, generate_assembly};
use clap::Parser;
use clap::error::ErrorKind;
use snafu::{ResultExt, Snafu};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Compile an additive integer expression into x86-64 assembly.
#[derive(Parser, Debug)]
#[command(name = "arithcc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compile an additive integer expression into x86-64 assembly", long_about = None)]
struct Cli {
  /// Expression such as "5+20-4"
  #[arg(allow_hyphen_values = true)]
  expr: String,

  /// Assembler dialect to emit
  #[arg(short, long, value_enum, default_value_t = Syntax::Intel, env = "ARITHCC_SYNTAX")]
  syntax: Syntax,

  /// Write assembly to this file instead of stdout
  #[arg(short, long, env = "ARITHCC_OUTPUT")]
  output: Option<PathBuf>,

  /// Enable debug logging on stderr
  #[arg(short, long, env = "ARITHCC_VERBOSE")]
  verbose: bool,
}

#[derive(Debug, Snafu)]
enum CliError {
  #[snafu(display("{source}"))]
  Compile { source: CompileError },

  #[snafu(display("cannot write {}: {source}", path.display()))]
  WriteOutput { path: PathBuf, source: io::Error },
}

/// Logs go to stderr so they never mix with emitted assembly.
/// `ARITHCC_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
  let default = if verbose { "debug" } else { "warn" };
  let filter =
    EnvFilter::try_from_env("ARITHCC_LOG").unwrap_or_else(|_| EnvFilter::new(default));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .with_target(false)
    .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
  debug!(expr = %cli.expr, syntax = ?cli.syntax, "compiling");
  let asm = generate_assembly(&cli.expr, cli.syntax).context(CompileSnafu)?;

  match &cli.output {
    Some(path) => {
      fs::write(path, &asm).context(WriteOutputSnafu { path })?;
      info!(path = %path.display(), "wrote assembly");
    }
    None => print!("{asm}"),
  }
  Ok(())
}

fn main() {
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
      err.exit()
    }
    Err(err) => report(&err),
  };

  init_tracing(cli.verbose);

  if let Err(err) = run(&cli) {
    report(&err);
  }
}
