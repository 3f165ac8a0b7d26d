//! This program writes Tecplot macros from a "script", which is just a TOML
//! file describing alter-data, extraction and picture jobs, and has Tecplot
//! run them one after the other.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::needless_return)]

pub(crate) mod script;
pub(crate) mod utils;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::*;
use toml::de::Error as TomlError;

use crate::script::Script;

/// The arguments passed to tecmagic.
#[derive(Clone, Debug, Parser)]
#[command(author, version, about)]
struct Cli {
  /// Write the macros, but don't run Tecplot.
  #[arg(short = 'n', long = "dry-run")]
  dry_run: bool,
  /// Only run the jobs with these names. Can be specified more than once, or
  /// comma-separated. If absent, all jobs are run.
  #[arg(long = "only", num_args = 0.., value_delimiter = ',')]
  only: Vec<String>,
  /// Output extra/debug info while running.
  #[arg(short = 'v', long = "verbose")]
  verbose: bool,
  /// The script to run.
  script: PathBuf,
}

/// Runs a script and outputs results. Returns whether every job went well.
fn run_script(args: &Cli) -> Result<bool, Box<dyn Error>> {
  let contents = std::fs::read_to_string(&args.script)?;
  let try_script: Result<Script, TomlError> = toml::from_str(&contents);
  let script = try_script?.prepare()?;
  let jobs = script.select(&args.only)?;
  if jobs.is_empty() {
    println!("no jobs in script");
  }
  let mut all_ok = true;
  for job in jobs {
    let report = script.run(job, args.dry_run)?;
    let status = if args.dry_run {
      "WRITTEN"
    } else if report.ok() {
      "DONE"
    } else {
      all_ok = false;
      "ISSUES"
    };
    println!("==> {}: {}", job.name, status);
    println!("  => macro: {}", report.macro_file.display());
    if let Some(s) = report.status {
      println!("  => exit: {:?}", s);
    }
    if !report.missing.is_empty() {
      println!("  => missing outputs: {}", report.missing.len());
    }
  }
  return Ok(all_ok);
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
    Ok(true) => info!("All done."),
    Ok(false) => {
      warn!("Some jobs didn't produce what they should have.");
      std::process::exit(2);
    },
    Err(e) => {
      error!("{}", e);
      std::process::exit(1);
    },
  }
}
