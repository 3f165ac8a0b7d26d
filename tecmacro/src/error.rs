//! Contains error types for building and running macros.

use std::error::Error;
use std::fmt::Display;
use std::io;
use std::path::PathBuf;

/// Errors when building or running macros.
#[derive(Debug, derive_more::From)]
pub enum MacroError {
  /// An arbitrary slice was requested without a normal vector.
  #[from(ignore)]
  MissingNormal,
  /// The normal vector of a slice has zero length.
  #[from(ignore)]
  ZeroNormal,
  /// Contour levels need at least one level and a sane range.
  #[from(ignore)]
  BadLevels {
    /// Requested number of levels.
    count: usize,
  },
  /// The number of data files and polyline sets differ.
  #[from(ignore)]
  CountMismatch {
    /// Number of data files found.
    files: usize,
    /// Number of polyline sets given.
    sets: usize,
  },
  /// A polyline set was referenced but never defined.
  #[from(ignore)]
  UnknownPolylineSet(String),
  /// A polyline with no nodes can't be extracted.
  #[from(ignore)]
  EmptyPolyline,
  /// A file operation failed.
  #[from(ignore)]
  File(PathBuf, io::Error),
  /// Some other I/O error.
  Io(io::Error),
  /// The external tool could not be started.
  #[from(ignore)]
  Launch(String),
}

impl Display for MacroError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return match self {
      Self::MissingNormal => write!(
        f,
        "a normal vector must be specified for an arbitrary slice"
      ),
      Self::ZeroNormal => write!(f, "the slice normal has zero length"),
      Self::BadLevels { count } => write!(
        f,
        "cannot make {} contour levels",
        count
      ),
      Self::CountMismatch { files, sets } => write!(
        f,
        "number of data files ({}) and number of sets of polylines ({}) \
         must be the same",
        files,
        sets
      ),
      Self::UnknownPolylineSet(s) => write!(f, "unknown polyline set \"{}\"", s),
      Self::EmptyPolyline => write!(f, "polyline has no nodes"),
      Self::File(p, e) => write!(f, "{}: {}", p.display(), e),
      Self::Io(e) => e.fmt(f),
      Self::Launch(s) => write!(f, "could not launch Tecplot: {}", s),
    };
  }
}

impl Error for MacroError {}

/// Short for results with a macro error.
pub type MacroResult<T> = Result<T, MacroError>;
