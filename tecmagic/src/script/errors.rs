//! Contains error types for scripts and their runnings.

use std::error::Error;
use std::fmt::Display;

use tecmacro::prelude::MacroError;

/// Errors when preparing or running a script.
#[derive(Debug)]
pub(crate) enum ScriptError {
  /// Two jobs have the same name.
  DuplicateJob(String),
  /// Could not find a job with a given name.
  JobNotFound(String),
  /// Building or running a macro failed.
  Macro(MacroError),
}

impl Display for ScriptError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return match self {
      Self::DuplicateJob(n) => write!(f, "more than one job is named \"{}\"", n),
      Self::JobNotFound(n) => write!(f, "no job named \"{}\"", n),
      Self::Macro(e) => e.fmt(f),
    };
  }
}

impl Error for ScriptError {}

impl From<MacroError> for ScriptError {
  fn from(value: MacroError) -> Self {
    return Self::Macro(value);
  }
}
