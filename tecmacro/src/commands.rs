//! This module implements the building blocks of macros. Every function here
//! is pure: it takes settings and returns a fragment of macro text, each line
//! terminated by a newline.

use std::fmt::Write;
use std::path::Path;

use itertools::Itertools;

use crate::error::{MacroError, MacroResult};
use crate::geometry::PolyLine;
use crate::settings::*;

/// Version directive at the top of every macro.
pub const MACRO_HEADER: &str = "#!MC 1410";

/// Default Tecplot installation directory, bound to `|MFBD|`.
pub const DEFAULT_INSTALL_DIR: &str =
  "C:\\Program Files\\Tecplot\\Tecplot 360 EX 2016 R2";

/// Prefix of global contour group 1 directives.
const CONTOUR: &str = "$!GLOBALCONTOUR 1 ";

/// Wraps a macro body with the version header, the install directory variable
/// and the final quit.
pub fn wrap_macro(body: &str, install_dir: &str) -> String {
  return format!(
    "{}\n$!VarSet |MFBD| = '{}'\n{}$!RemoveVar |MFBD|\n$!Quit",
    MACRO_HEADER,
    install_dir,
    body
  );
}

/// Opens a data file.
pub fn read_dataset<P: AsRef<Path>>(file: P) -> String {
  return format!("$!READDATASET  '{}'\n", file.as_ref().display());
}

/// Opens a layout file.
pub fn open_layout<P: AsRef<Path>>(file: P) -> String {
  return format!("$!OPENLAYOUT  '{}'\n", file.as_ref().display());
}

/// Opens whatever the file is: data files with `READDATASET`, anything else
/// as a layout.
pub fn open_any<P: AsRef<Path>>(file: P) -> String {
  let is_data = file.as_ref()
    .extension()
    .is_some_and(|e| e.eq_ignore_ascii_case("plt"));
  return if is_data { read_dataset(file) } else { open_layout(file) };
}

/// Saves the current state as a layout, data included.
pub fn save_layout<P: AsRef<Path>>(file: P) -> String {
  return format!(
    "$!SAVELAYOUT  '{}'\n  INCLUDEDATA = YES\n  INCLUDEPREVIEW = NO\n",
    file.as_ref().display()
  );
}

/// Extracts data along a polyline into a text file.
pub fn extract_from_polyline<P: AsRef<Path>>(
  line: &PolyLine,
  file: P
) -> MacroResult<String> {
  if line.nodes.is_empty() {
    return Err(MacroError::EmptyPolyline);
  }
  let mut s = format!(
    "$!EXTRACTFROMPOLYLINE\n\
     EXTRACTLINEPOINTSONLY = NO\n\
     EXTRACTTHROUGHVOLUME = YES\n\
     EXTRACTTOFILE = YES\n\
     FNAME = '{}'\n\
     NUMPTS = {}\n\
     RAWDATA\n\
     {}\n",
    file.as_ref().display(),
    line.points,
    line.nodes.len()
  );
  for node in line.nodes.iter() {
    s.push_str(&format!("{}\n", node));
  }
  return Ok(s);
}

/// Alters data with an equation, e.g. `{X/h} = {X}`.
pub fn alter_data(
  equation: &str,
  ignore_divide_by_zero: bool,
  data_type: DataType
) -> String {
  return format!(
    "$!ALTERDATA\n  EQUATION = '{}'\n  IGNOREDIVIDEBYZERO = {}\n  DATATYPE = {}\n",
    equation,
    yes_no(ignore_divide_by_zero),
    data_type
  );
}

/// Shows a slice. Fails before writing anything if an arbitrary slice has no
/// usable normal. The normal is written as a unit vector, whatever length it
/// was given with; Tecplot only cares about its direction.
pub fn slice(settings: &SliceSettings) -> MacroResult<String> {
  let normal = settings.unit_normal()?;
  let axes = if settings.slice_type.is_indexed() {
    ["I", "J", "K"]
  } else {
    ["X", "Y", "Z"]
  };
  let position = axes.iter()
    .zip(settings.position.iter())
    .map(|(a, p)| format!("{} = {}", a, p))
    .join(" ");
  let mut s = format!(
    "$!SLICELAYERS SHOW = YES\n\
     $!SLICEATTRIBUTES 1  SLICESURFACE = {}\n\
     $!SLICEATTRIBUTES 1  PRIMARYPOSITION{{{}}}\n",
    settings.slice_type,
    position
  );
  if let Some(n) = normal {
    s.push_str(&format!(
      "$!SLICEATTRIBUTES 1 NORMAL {{X = {} Y = {} Z = {}}}\n",
      n[0], n[1], n[2]
    ));
  }
  return Ok(s);
}

/// Sets the contour variable and its levels.
pub fn contour_levels(settings: &LevelSettings) -> MacroResult<String> {
  let levels = settings.levels()?;
  let mut s = format!(
    "$!SETCONTOURVAR\n\
     \x20 VAR = {}\n\
     \x20 CONTOURGROUP = 1\n\
     $!CONTOURLEVELS NEW\n\
     \x20 CONTOURGROUP = 1\n\
     \x20 RAWDATA\n\
     {}\n",
    settings.variable,
    levels.len()
  );
  for level in levels {
    s.push_str(&format!("{}\n", level));
  }
  return Ok(s);
}

/// Places and shapes the contour legend.
pub fn legend(settings: &LegendSettings) -> String {
  return format!(
    "{c} LEGEND{{ISVERTICAL = {}}}\n\
     {c} LABELS{{AUTOLEVELSKIP = {}}}\n\
     {c} LEGEND{{ROWSPACING = {}}}\n\
     $!GLOBALCONTOUR 1\n\
     LEGEND\n{{\nSHOW = YES\nXYPOS\n{{\nX = {}\nY = {}\n}}\n}}\n",
    yes_no(settings.vertical),
    settings.auto_level_skip,
    settings.row_spacing,
    settings.position.0,
    settings.position.1,
    c = CONTOUR
  );
}

/// Writes the four text shape directives for a font under some prefix.
fn text_shape(s: &mut String, prefix: &str, suffix: &str, font: &Font) {
  // writing into a String can't fail
  let _ = write!(
    s,
    "{p}{{TEXTSHAPE{{FONTFAMILY = '{}'}}}}{x}\n\
     {p}{{TEXTSHAPE{{HEIGHT = {}}}}}{x}\n\
     {p}{{TEXTSHAPE{{ISITALIC = {}}}}}{x}\n\
     {p}{{TEXTSHAPE{{ISBOLD = {}}}}}{x}\n",
    font.family,
    font.height,
    yes_no(font.italic),
    yes_no(font.bold),
    p = prefix,
    x = suffix
  );
}

/// Fonts for the legend header and numbers.
pub fn legend_fonts(header: &Font, number: &Font) -> String {
  let mut s = String::new();
  for (kind, font) in [("HEADER", header), ("NUMBER", number)] {
    let _ = write!(
      s,
      "{c} LEGEND{{{k}TEXTSHAPE{{FONTFAMILY = '{}'}}}}\n\
       {c} LEGEND{{{k}TEXTSHAPE{{HEIGHT = {}}}}}\n\
       {c} LEGEND{{{k}TEXTSHAPE{{ISITALIC = {}}}}}\n\
       {c} LEGEND{{{k}TEXTSHAPE{{ISBOLD = {}}}}}\n",
      font.family,
      font.height,
      yes_no(font.italic),
      yes_no(font.bold),
      c = CONTOUR,
      k = kind
    );
  }
  return s;
}

/// Picks the colormap and how it's spread.
pub fn colormap(settings: &ColormapSettings) -> String {
  let mut s = format!(
    "{c} COLORMAPNAME = {}\n\
     {c} COLORMAPFILTER{{COLORMAPDISTRIBUTION = {}}}\n",
    settings.colormap,
    settings.distribution,
    c = CONTOUR
  );
  if let (ColorDistribution::Continuous, Some((cmin, cmax))) =
    (settings.distribution, settings.continuous_range) {
    let _ = write!(
      s,
      "{c} COLORMAPFILTER{{CONTINUOUSCOLOR{{CMIN = {}}}}}\n\
       {c} COLORMAPFILTER{{CONTINUOUSCOLOR{{CMAX = {}}}}}\n",
      cmin,
      cmax,
      c = CONTOUR
    );
  }
  return s;
}

/// Switches to a 2-D cartesian plot and lays the axes out.
pub fn two_d_axis(settings: &AxisSettings) -> String {
  let mut s = format!(
    "$!PLOTTYPE = CARTESIAN2D\n\
     $!TWODAXIS XDETAIL{{VARNUM = {}}}\n\
     $!TWODAXIS YDETAIL{{VARNUM = {}}}\n",
    settings.x_var,
    settings.y_var
  );
  if let (Some(xlim), Some(ylim)) = (settings.xlim, settings.ylim) {
    let _ = write!(
      s,
      "$!TWODAXIS\n\
       \x20 PRESERVEAXISSCALE = {}\n\
       \x20 XDETAIL\n    {{\n    RANGEMIN = {}\n    RANGEMAX = {}\n    }}\n\
       \x20 YDETAIL\n    {{\n    RANGEMIN = {}\n    RANGEMAX = {}\n    }}\n",
      yes_no(settings.preserves_scale()),
      xlim.0,
      xlim.1,
      ylim.0,
      ylim.1
    );
  }
  let (x1, y1, x2, y2) = settings.rect;
  let _ = write!(
    s,
    "$!TWODAXIS\n\
     \x20 GRIDAREA\n  {{\n    EXTENTS\n    {{\n\
     \x20     X1 = {}\n      Y1 = {}\n      X2 = {}\n      Y2 = {}\n\
     \x20   }}\n  }}\n\
     $!TWODAXIS XDETAIL{{AXISLINE{{POSITION = {}}}}}\n\
     $!TWODAXIS YDETAIL{{AXISLINE{{POSITION = {}}}}}\n",
    x1, y1, x2, y2,
    settings.x_line_pos,
    settings.y_line_pos
  );
  return s;
}

/// Fonts and title offsets for both axes.
pub fn axis_fonts(settings: &AxisSettings) -> String {
  let mut s = String::new();
  let axes = [
    ("X", &settings.x_title_font, &settings.x_label_font, settings.x_title_offset),
    ("Y", &settings.y_title_font, &settings.y_label_font, settings.y_title_offset),
  ];
  for (axis, title, label, offset) in axes {
    text_shape(&mut s, &format!("$!TWODAXIS {}DETAIL{{TITLE", axis), "}", title);
    let _ = writeln!(s, "$!TWODAXIS {}DETAIL{{TITLE{{OFFSET = {}}}}}", axis, offset);
    text_shape(
      &mut s,
      &format!("$!TWODAXIS {}DETAIL{{TICKLABEL", axis),
      "}",
      label
    );
  }
  return s;
}

/// Turns slice zones into actual zones.
pub fn create_slice_zones() -> String {
  return "$!CREATESLICEZONES\n".to_string();
}

/// Turns contour flooding on.
pub fn show_contour() -> String {
  return "$!FIELDLAYERS SHOWCONTOUR = YES\n".to_string();
}

/// Back to the 3-D view.
pub fn go_to_3d() -> String {
  return "$!PLOTTYPE = CARTESIAN3D\n".to_string();
}

/// Activates only the given zones.
pub fn active_field_maps(zones: &[usize]) -> String {
  return format!("$!ACTIVEFIELDMAPS = [{}]\n", zones.iter().join(","));
}

/// Deletes the given zones.
pub fn delete_zones(zones: &[usize]) -> String {
  return format!("$!DELETEZONES [{}]\n", zones.iter().join(","));
}

/// Sets the frame size.
pub fn frame_size(frame: &FrameSettings) -> String {
  return format!(
    "$!FRAMELAYOUT HEIGHT = {}\n$!FRAMELAYOUT WIDTH = {}\n",
    frame.height,
    frame.width
  );
}

/// Exports the current frame as an image.
pub fn export(settings: &ExportSettings) -> String {
  return format!(
    "$!EXPORTSETUP EXPORTFNAME = '{}'\n\
     $!EXPORTSETUP IMAGEWIDTH = {}\n\
     $!EXPORT\n  EXPORTREGION = CURRENTFRAME\n",
    settings.file,
    settings.image_width
  );
}
