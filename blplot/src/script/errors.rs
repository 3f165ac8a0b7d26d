//! Contains error types for plot scripts and their runnings.

use std::error::Error;
use std::fmt::Display;

use blayer::prelude::AnalysisError;
use linedata::prelude::LoadError;

/// Errors when preparing or drawing plots.
#[derive(Debug)]
pub(crate) enum PlotScriptError {
  /// Could not find a dataset with a given name.
  DatasetNotFound(String),
  /// Could not find a table within a dataset.
  TableNotFound {
    /// The dataset.
    dataset: String,
    /// The table, by name or index.
    table: String,
  },
  /// Loading data failed.
  Load(LoadError),
  /// Deriving quantities or drawing failed.
  Analysis(AnalysisError),
}

impl Display for PlotScriptError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return match self {
      Self::DatasetNotFound(n) => write!(f, "no dataset named \"{}\"", n),
      Self::TableNotFound { dataset, table } => write!(
        f,
        "dataset \"{}\" has no table {}",
        dataset,
        table
      ),
      Self::Load(e) => e.fmt(f),
      Self::Analysis(e) => e.fmt(f),
    };
  }
}

impl Error for PlotScriptError {}

impl From<LoadError> for PlotScriptError {
  fn from(value: LoadError) -> Self {
    return Self::Load(value);
  }
}

impl From<AnalysisError> for PlotScriptError {
  fn from(value: AnalysisError) -> Self {
    return Self::Analysis(value);
  }
}
