//! Loads whole directories of extracted line data, one table per file.

use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::parser::{MalformedPolicy, OnePassParser};
use crate::table::{SkipReason, Table};

/// Things that can go wrong when loading export files.
#[derive(Debug)]
pub enum LoadError {
  /// Couldn't read a file or a directory.
  Io(PathBuf, io::Error),
  /// The file had no content at all.
  NoHeader,
  /// A line was malformed and the policy said to stop.
  Malformed {
    /// Line number, starting at 1.
    line: usize,
    /// What was wrong with it.
    reason: SkipReason,
  },
  /// Something went wrong within a specific file.
  InFile(PathBuf, Box<LoadError>),
}

impl LoadError {
  /// Attaches a path to this error, if it doesn't have one yet.
  pub fn at(self, p: &Path) -> Self {
    return match self {
      Self::Io(_, e) => Self::Io(p.to_path_buf(), e),
      Self::InFile(..) => self,
      other => Self::InFile(p.to_path_buf(), Box::new(other)),
    };
  }
}

impl Display for LoadError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return match self {
      Self::Io(p, e) if p.as_os_str().is_empty() => e.fmt(f),
      Self::Io(p, e) => write!(f, "could not read {}: {}", p.display(), e),
      Self::NoHeader => write!(f, "no variable names found"),
      Self::Malformed { line, reason } => write!(
        f,
        "malformed data on line {}: {}",
        line,
        reason
      ),
      Self::InFile(p, e) => write!(f, "in {}: {}", p.display(), e),
    };
  }
}

impl std::error::Error for LoadError {}

impl From<io::Error> for LoadError {
  fn from(value: io::Error) -> Self {
    return Self::Io(PathBuf::new(), value);
  }
}

/// Reads and parses a single export file.
pub fn load_file<P: AsRef<Path>>(
  path: P,
  policy: MalformedPolicy
) -> Result<Table, LoadError> {
  return OnePassParser::parse_file(path, policy);
}

/// Lists the regular files in a directory, sorted by name.
pub fn list_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, LoadError> {
  let dir = dir.as_ref();
  let entries = std::fs::read_dir(dir)
    .map_err(|e| LoadError::Io(dir.to_path_buf(), e))?;
  let mut files: Vec<PathBuf> = Vec::new();
  for entry in entries {
    let path = entry.map_err(|e| LoadError::Io(dir.to_path_buf(), e))?.path();
    if path.is_file() {
      files.push(path);
    }
  }
  files.sort();
  return Ok(files);
}

/// Reads every file in a directory, in name order, producing one table per
/// file. Files that can't be loaded at all are left out with a warning, or
/// stop the whole load under [`MalformedPolicy::Fail`].
pub fn load_dir<P: AsRef<Path>>(
  dir: P,
  policy: MalformedPolicy
) -> Result<Vec<Table>, LoadError> {
  let files = list_files(&dir)?;
  info!("Loading {} files from {}...", files.len(), dir.as_ref().display());
  let mut tables: Vec<Table> = Vec::with_capacity(files.len());
  for file in files {
    let table = match (load_file(&file, policy), policy) {
      (Ok(table), _) => table,
      (Err(e), MalformedPolicy::Fail) => return Err(e),
      (Err(e), MalformedPolicy::Warn) => {
        warn!("Leaving {} out: {}", file.display(), e);
        continue;
      },
    };
    debug!(
      "Loaded {}: {} columns, {} rows, {} skipped lines.",
      file.display(),
      table.ncols(),
      table.nrows(),
      table.skipped.len()
    );
    tables.push(table);
  }
  return Ok(tables);
}
