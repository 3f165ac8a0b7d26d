//! A command-line application to convert Tecplot line extractions to CSV or
//! JSON.

#![allow(clippy::needless_return)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub(crate) mod formatting;

use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use linedata::prelude::*;
use log::*;
use serde::Serialize;

use crate::formatting::{header_name, FloatFormat};

/// The arguments passed to the converter.
#[derive(Clone, Debug, Parser)]
#[command(author, version, about)]
struct Cli {
  /// The delimiter used in the CSV.
  #[arg(short = 'd', long = "delim", default_value = ",")]
  delim: char,
  /// Write JSON instead of CSV.
  #[arg(long = "json")]
  json: bool,
  /// Stop at the first malformed data line instead of skipping it.
  #[arg(long = "strict")]
  strict: bool,
  /// Write column names in snake_case.
  #[arg(long = "snake")]
  snake: bool,
  /// Options for printing out real numbers.
  #[command(flatten)]
  reals: FloatFormat,
  /// Output extra/debug info while parsing and converting.
  #[arg(short = 'v', long = "verbose")]
  verbose: bool,
  /// Path to write output to. If absent, writes to standard output. Must be
  /// a directory if the input is one.
  #[arg(short = 'o')]
  output: Option<PathBuf>,
  /// The export file to convert. If -, reads from standard input. If a
  /// directory, every file in it is converted.
  input: PathBuf,
}

impl Cli {
  /// What to do with malformed lines.
  fn policy(&self) -> MalformedPolicy {
    return if self.strict {
      MalformedPolicy::Fail
    } else {
      MalformedPolicy::Warn
    };
  }

  /// Extension of the output files.
  fn extension(&self) -> &'static str {
    return if self.json { "json" } else { "csv" };
  }
}

/// A column, as written in JSON.
#[derive(Serialize)]
struct JsonColumn<'a> {
  /// Column name.
  name: String,
  /// The values.
  values: &'a [f64],
}

/// A table, as written in JSON.
#[derive(Serialize)]
struct JsonTable<'a> {
  /// Table name.
  name: Option<&'a str>,
  /// The columns, in order.
  columns: Vec<JsonColumn<'a>>,
  /// How many lines were skipped while loading.
  skipped: usize,
}

/// Writes a table as CSV: a header, then one record per row.
fn write_csv<W: Write>(
  table: &Table,
  output: W,
  args: &Cli
) -> Result<(), Box<dyn Error>> {
  let delim_byte = u8::try_from(args.delim)
    .map_err(|_| format!("delimiter '{}' is not a single byte", args.delim))?;
  let mut wtr = csv::WriterBuilder::new()
    .delimiter(delim_byte)
    .from_writer(output);
  wtr.write_record(table.names().iter().map(|n| header_name(n, args.snake)))?;
  for row in table.rows() {
    wtr.write_record(row.iter().map(|x| args.reals.to_string(*x)))?;
  }
  wtr.flush()?;
  return Ok(());
}

/// Writes a table as pretty JSON.
fn write_json<W: Write>(
  table: &Table,
  output: W,
  args: &Cli
) -> Result<(), Box<dyn Error>> {
  let json = JsonTable {
    name: table.name.as_deref(),
    columns: table.iter()
      .map(|(n, values)| JsonColumn { name: header_name(n, args.snake), values })
      .collect(),
    skipped: table.skipped.len(),
  };
  serde_json::to_writer_pretty(output, &json)?;
  return Ok(());
}

/// Writes a table in the chosen format.
fn write_table_as<W: Write>(
  table: &Table,
  output: W,
  args: &Cli
) -> Result<(), Box<dyn Error>> {
  return if args.json {
    write_json(table, output, args)
  } else {
    write_csv(table, output, args)
  };
}

/// Where a table from a directory goes.
fn output_path(dir: &Path, table: &Table, index: usize, ext: &str) -> PathBuf {
  let stem = table.name.clone().unwrap_or_else(|| format!("table_{}", index));
  return dir.join(format!("{}.{}", stem, ext));
}

/// Converts a whole directory, one output file per input file.
fn convert_dir(args: &Cli) -> Result<(), Box<dyn Error>> {
  let out_dir = args.output.as_ref()
    .ok_or("an output directory (-o) is needed to convert a directory")?;
  let tables = load_dir(&args.input, args.policy())?;
  std::fs::create_dir_all(out_dir)?;
  for (i, table) in tables.iter().enumerate() {
    let path = output_path(out_dir, table, i, args.extension());
    debug!("Writing {}...", path.display());
    write_table_as(table, BufWriter::new(File::create(&path)?), args)?;
  }
  info!("Wrote {} files to {}.", tables.len(), out_dir.display());
  return Ok(());
}

/// Converts a single file, or standard input.
fn convert_file(args: &Cli) -> Result<(), Box<dyn Error>> {
  let table = if args.input.as_os_str().eq_ignore_ascii_case("-") {
    OnePassParser::parse_bufread(BufReader::new(io::stdin()), args.policy())?
  } else {
    info!("Parsing {}...", args.input.display());
    load_file(&args.input, args.policy())?
  };
  info!(
    "Done parsing: {} columns, {} rows.",
    table.ncols(),
    table.nrows()
  );
  if !table.skipped.is_empty() {
    warn!("{} lines were skipped.", table.skipped.len());
  }
  let output: BufWriter<Box<dyn Write>> = BufWriter::new(
    if let Some(ref op) = args.output {
      Box::new(File::create(op)?)
    } else {
      Box::new(io::stdout())
    }
  );
  return write_table_as(&table, output, args);
}

fn main() {
  // init cli stuff
  let args = Cli::parse();
  let log_level = if args.verbose {
    LevelFilter::Debug
  } else {
    LevelFilter::Info
  };
  env_logger::builder().filter_level(log_level).init();
  let res = if args.input.is_dir() {
    convert_dir(&args)
  } else {
    convert_file(&args)
  };
  match res {
    Ok(()) => info!("All done."),
    Err(e) => {
      error!("{}", e);
      std::process::exit(1);
    },
  }
}

#[cfg(test)]
mod tests;
