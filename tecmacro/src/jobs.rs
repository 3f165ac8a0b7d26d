//! This module composes fragments into whole macros. Each job knows where its
//! macro goes and which files it should leave behind once Tecplot is done.
//!
//! Fragments always go in the same order: open the data, geometry and
//! extraction, display and formatting, export, clean-up.

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::commands::*;
use crate::error::{MacroError, MacroResult};
use crate::geometry::PolyLine;
use crate::settings::*;

/// Anything that can be turned into a complete macro.
pub trait MacroJob {
  /// Builds the macro body (without the header and quit).
  fn body(&self) -> MacroResult<String>;

  /// Where the macro file should be written.
  fn macro_file(&self) -> &Path;

  /// The files Tecplot is expected to produce.
  fn expected_outputs(&self) -> MacroResult<Vec<PathBuf>>;

  /// Directories Tecplot writes into. They must exist before it runs, since
  /// Tecplot won't create them.
  fn output_dirs(&self) -> MacroResult<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = self.expected_outputs()?
      .iter()
      .filter_map(|p| p.parent())
      .filter(|d| !d.as_os_str().is_empty())
      .map(Path::to_path_buf)
      .collect();
    dirs.sort();
    dirs.dedup();
    return Ok(dirs);
  }

  /// Builds the whole macro.
  fn build(&self, install_dir: &str) -> MacroResult<String> {
    return Ok(wrap_macro(&self.body()?, install_dir));
  }
}

/// Lists the Tecplot data files (`.plt`) in a directory, sorted by name.
pub fn data_files<P: AsRef<Path>>(dir: P) -> MacroResult<Vec<PathBuf>> {
  let dir = dir.as_ref();
  let entries = std::fs::read_dir(dir)
    .map_err(|e| MacroError::File(dir.to_path_buf(), e))?;
  let mut files: Vec<PathBuf> = Vec::new();
  for entry in entries {
    let path = entry?.path();
    let is_plt = path.extension().is_some_and(|e| e.eq_ignore_ascii_case("plt"));
    if path.is_file() && is_plt {
      files.push(path);
    }
  }
  files.sort();
  return Ok(files);
}

/// The polylines to extract along, for every data file.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum PolylineSets {
  /// The same polylines for every file.
  Shared(Vec<PolyLine>),
  /// One set per file, in file name order.
  PerFile(Vec<Vec<PolyLine>>),
}

impl PolylineSets {
  /// Pairs the sets up with a number of files.
  fn for_files(&self, files: usize) -> MacroResult<Vec<&[PolyLine]>> {
    return match self {
      Self::Shared(set) => Ok(vec![set.as_slice(); files]),
      Self::PerFile(sets) if sets.len() == files => {
        Ok(sets.iter().map(Vec::as_slice).collect())
      },
      Self::PerFile(sets) => Err(MacroError::CountMismatch {
        files,
        sets: sets.len(),
      }),
    };
  }
}

/// Name of the file data along the n-th polyline of a data file goes to.
pub fn extraction_output(output_dir: &Path, data_file: &Path, n: usize) -> PathBuf {
  let stem = data_file.file_stem()
    .map(|s| s.to_string_lossy().into_owned())
    .unwrap_or_default();
  return output_dir.join(format!("{}_line_{}.dat", stem, n));
}

/// Extracts data along polylines out of every data file in a directory,
/// writing one text file per polyline.
#[derive(Clone, Debug)]
pub struct LineExtraction {
  /// Directory with the `.plt` files.
  pub data_dir: PathBuf,
  /// Directory for the extracted data.
  pub output_dir: PathBuf,
  /// The polylines.
  pub sets: PolylineSets,
  /// Where to write the macro.
  pub macro_file: PathBuf,
}

impl LineExtraction {
  /// Pairs each data file with its polylines.
  fn plan(&self) -> MacroResult<Vec<(PathBuf, &[PolyLine])>> {
    let files = data_files(&self.data_dir)?;
    let sets = self.sets.for_files(files.len())?;
    return Ok(files.into_iter().zip(sets).collect());
  }
}

impl MacroJob for LineExtraction {
  fn body(&self) -> MacroResult<String> {
    let mut body = String::new();
    for (file, lines) in self.plan()? {
      debug!("Extracting {} lines from {}.", lines.len(), file.display());
      body.push_str(&read_dataset(&file));
      for (n, line) in lines.iter().enumerate() {
        let out = extraction_output(&self.output_dir, &file, n);
        body.push_str(&extract_from_polyline(line, out)?);
      }
    }
    return Ok(body);
  }

  fn macro_file(&self) -> &Path {
    return &self.macro_file;
  }

  fn expected_outputs(&self) -> MacroResult<Vec<PathBuf>> {
    return Ok(
      self.plan()?
        .into_iter()
        .flat_map(|(file, lines)| {
          (0..lines.len())
            .map(|n| extraction_output(&self.output_dir, &file, n))
            .collect::<Vec<_>>()
        })
        .collect()
    );
  }

  fn output_dirs(&self) -> MacroResult<Vec<PathBuf>> {
    return Ok(vec![self.output_dir.clone()]);
  }
}

/// Cuts a slice, contours it, formats it, and exports it as an image.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PictureJob {
  /// The data (`.plt`) or layout file to picture.
  #[serde(alias = "file_for_pictures")]
  pub file: PathBuf,
  /// Where to write the macro.
  #[serde(alias = "macro")]
  pub macro_file: PathBuf,
  /// The slice.
  pub slice: SliceSettings,
  /// Contour levels.
  pub levels: LevelSettings,
  /// Legend.
  #[serde(default)]
  pub legend: LegendSettings,
  /// Colormap.
  #[serde(default)]
  pub colormap: ColormapSettings,
  /// Axes.
  pub axis: AxisSettings,
  /// Export.
  pub export: ExportSettings,
  /// Frame size.
  #[serde(default)]
  pub frame: FrameSettings,
}

impl MacroJob for PictureJob {
  fn body(&self) -> MacroResult<String> {
    let zones = [self.export.zone];
    let fragments = [
      open_any(&self.file),
      slice(&self.slice)?,
      contour_levels(&self.levels)?,
      legend(&self.legend),
      legend_fonts(&self.legend.header_font, &self.legend.number_font),
      colormap(&self.colormap),
      create_slice_zones(),
      show_contour(),
      two_d_axis(&self.axis),
      axis_fonts(&self.axis),
      active_field_maps(&zones),
      frame_size(&self.frame),
      export(&self.export),
      delete_zones(&zones),
      go_to_3d(),
    ];
    return Ok(fragments.concat());
  }

  fn macro_file(&self) -> &Path {
    return &self.macro_file;
  }

  fn expected_outputs(&self) -> MacroResult<Vec<PathBuf>> {
    return Ok(vec![PathBuf::from(&self.export.file)]);
  }
}

/// Opens a data file, applies equations to it and saves it as a layout.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AlterDataJob {
  /// The data file.
  pub file: PathBuf,
  /// Where to write the macro.
  #[serde(alias = "macro")]
  pub macro_file: PathBuf,
  /// The equations, applied in order.
  #[serde(alias = "equation")]
  pub equations: Vec<String>,
  /// Don't stop on divisions by zero.
  #[serde(default, alias = "ignored_divided_by_zero")]
  pub ignore_divide_by_zero: bool,
  /// Type of the variables the equations create.
  #[serde(default)]
  pub data_type: DataType,
  /// Where to save the layout. Defaults to the data file with a `.lay`
  /// extension.
  #[serde(default)]
  pub layout: Option<PathBuf>,
}

impl AlterDataJob {
  /// The layout file this job saves.
  pub fn layout_file(&self) -> PathBuf {
    return self.layout.clone()
      .unwrap_or_else(|| self.file.with_extension("lay"));
  }
}

impl MacroJob for AlterDataJob {
  fn body(&self) -> MacroResult<String> {
    let mut body = read_dataset(&self.file);
    for eq in self.equations.iter() {
      body.push_str(&alter_data(eq, self.ignore_divide_by_zero, self.data_type));
    }
    body.push_str(&save_layout(self.layout_file()));
    return Ok(body);
  }

  fn macro_file(&self) -> &Path {
    return &self.macro_file;
  }

  fn expected_outputs(&self) -> MacroResult<Vec<PathBuf>> {
    return Ok(vec![self.layout_file()]);
  }
}
