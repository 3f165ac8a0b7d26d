//! This sub-module implements the job entries a script is made of. Each one
//! converts into a real tecmacro job.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tecmacro::prelude::*;

use crate::utils::OneOrMany;

/// A named set of polylines, shared by extraction entries.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub(crate) struct PolylineSet {
  /// The lines, extracted in order.
  #[serde(alias = "line")]
  pub(crate) lines: Vec<PolyLine>,
}

/// Extraction of line data from every data file in a directory.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct ExtractionEntry {
  /// Job name -- must be unique.
  #[serde(default)]
  pub(crate) name: Option<String>,
  /// Directory with the `.plt` files.
  #[serde(alias = "data_files_dir")]
  pub(crate) data_dir: PathBuf,
  /// Directory for the extracted data.
  #[serde(alias = "extracted_data_dir")]
  pub(crate) output_dir: PathBuf,
  /// Where to write the macro.
  #[serde(alias = "macro")]
  pub(crate) macro_file: PathBuf,
  /// Polyline set names. One name is shared by all files; a list gives one
  /// set per file, in file name order.
  #[serde(alias = "set")]
  pub(crate) sets: OneOrMany<String>,
}

impl ExtractionEntry {
  /// Resolves set names into a real job.
  pub(crate) fn resolve(
    self,
    sets: &BTreeMap<String, PolylineSet>
  ) -> Result<LineExtraction, MacroError> {
    let lookup = |n: &String| -> Result<Vec<PolyLine>, MacroError> {
      return sets.get(n)
        .map(|s| s.lines.clone())
        .ok_or_else(|| MacroError::UnknownPolylineSet(n.clone()));
    };
    let resolved = match self.sets {
      OneOrMany::One(ref n) => PolylineSets::Shared(lookup(n)?),
      OneOrMany::Many(ref v) => PolylineSets::PerFile(
        v.iter().map(lookup).collect::<Result<_, _>>()?
      ),
    };
    return Ok(LineExtraction {
      data_dir: self.data_dir,
      output_dir: self.output_dir,
      sets: resolved,
      macro_file: self.macro_file,
    });
  }
}

/// A picture of a contoured slice.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct PictureEntry {
  /// Job name -- must be unique.
  #[serde(default)]
  pub(crate) name: Option<String>,
  /// The job itself.
  #[serde(flatten)]
  pub(crate) job: PictureJob,
}

/// Equations applied to a data file, saved as a layout.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct AlterEntry {
  /// Job name -- must be unique.
  #[serde(default)]
  pub(crate) name: Option<String>,
  /// The job itself.
  #[serde(flatten)]
  pub(crate) job: AlterDataJob,
}
