//! This program draws boundary-layer charts from a "script", which is just a
//! TOML file naming directories of extracted line data and the charts to
//! draw from them: velocity profiles, the law of the wall and skin friction
//! against the usual flat-plate correlations.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::needless_return)]

pub(crate) mod script;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::*;
use toml::de::Error as TomlError;

use crate::script::PlotScript;

/// The arguments passed to blplot.
#[derive(Clone, Debug, Parser)]
#[command(author, version, about)]
struct Cli {
  /// Stop at malformed data lines and at tables without wall units, instead
  /// of skipping them.
  #[arg(long = "strict")]
  strict: bool,
  /// Output extra/debug info while loading and drawing.
  #[arg(short = 'v', long = "verbose")]
  verbose: bool,
  /// The script to run.
  script: PathBuf,
}

/// Runs a script and outputs results.
fn run_script(args: &Cli) -> Result<(), Box<dyn Error>> {
  let contents = std::fs::read_to_string(&args.script)?;
  let try_script: Result<PlotScript, TomlError> = toml::from_str(&contents);
  let ready = try_script?.prepare(args.strict)?;
  if ready.charts.is_empty() {
    println!("no charts in script");
  }
  let written = ready.draw_all()?;
  for (path, entry) in written.iter().zip(ready.charts.iter()) {
    println!("==> {}: {} series", path.display(), entry.series.len());
  }
  return Ok(());
}

fn main() {
  let args = Cli::parse();
  let log_level = if args.verbose {
    LevelFilter::Debug
  } else {
    LevelFilter::Info
  };
  env_logger::builder().filter_level(log_level).init();
  match run_script(&args) {
    Ok(()) => info!("All done."),
    Err(e) => {
      error!("{}", e);
      std::process::exit(1);
    },
  }
}

#[cfg(test)]
mod tests;
