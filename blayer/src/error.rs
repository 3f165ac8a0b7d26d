//! Contains the error type for boundary-layer analysis and plotting.

use std::error::Error;
use std::fmt::Display;
use std::io;

use linedata::prelude::{LoadError, TableError};

/// Errors when deriving quantities or drawing charts.
#[derive(Debug, derive_more::From)]
pub enum AnalysisError {
  /// A column the analysis needs isn't in the table.
  #[from(ignore)]
  MissingColumn {
    /// The table, if it has a name.
    table: Option<String>,
    /// The missing column.
    column: String,
  },
  /// No row has a zero wall distance.
  #[from(ignore)]
  NoReferenceRow {
    /// The table, if it has a name.
    table: Option<String>,
    /// The wall distance column.
    column: String,
  },
  /// The table has no rows to take values from.
  #[from(ignore)]
  EmptyTable(Option<String>),
  /// A table operation failed.
  Table(TableError),
  /// Loading data failed.
  Load(LoadError),
  /// An equation couldn't be solved.
  #[from(ignore)]
  Solve(String),
  /// A chart couldn't be drawn.
  #[from(ignore)]
  Plot(String),
  /// Some I/O error.
  Io(io::Error),
}

/// Formats an optional table name for messages.
fn table_name(t: &Option<String>) -> &str {
  return t.as_deref().unwrap_or("<unnamed>");
}

impl Display for AnalysisError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return match self {
      Self::MissingColumn { table, column } => write!(
        f,
        "table {} has no column \"{}\"",
        table_name(table),
        column
      ),
      Self::NoReferenceRow { table, column } => write!(
        f,
        "table {} has no row where \"{}\" is zero",
        table_name(table),
        column
      ),
      Self::EmptyTable(t) => write!(f, "table {} is empty", table_name(t)),
      Self::Table(e) => e.fmt(f),
      Self::Load(e) => e.fmt(f),
      Self::Solve(s) => write!(f, "could not solve {}", s),
      Self::Plot(s) => write!(f, "could not draw chart: {}", s),
      Self::Io(e) => e.fmt(f),
    };
  }
}

impl Error for AnalysisError {}

/// Short for results with an analysis error.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
