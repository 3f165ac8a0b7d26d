//! This module implements the settings that parameterise macro fragments:
//! slices, contour levels, legends, colormaps, axes, frames and exports.
//!
//! Every settings struct deserialises from a TOML table with sensible
//! defaults, so scripts only need to spell out what they change.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::{MacroError, MacroResult};
use crate::geometry::unit_vector;

/// Generates an enum whose variants map to Tecplot keywords.
macro_rules! gen_keywords {
  (
    $(#[$meta:meta])*
    $ename:ident {
      $(($vn:ident, $kw:literal, $desc:literal),)*
    }
  ) => {
    $(#[$meta])*
    #[derive(
      Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd,
      Ord
    )]
    #[serde(rename_all = "snake_case")]
    pub enum $ename {
      $(
        #[doc = $desc]
        $vn,
      )*
    }

    impl $ename {
      /// Returns all variants.
      pub const fn all() -> &'static [Self] {
        return &[ $(Self::$vn,)* ];
      }

      /// Returns the keyword, as written in macros.
      pub const fn keyword(&self) -> &'static str {
        return match self {
          $(Self::$vn => $kw,)*
        };
      }
    }

    impl Display for $ename {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write!(f, "{}", self.keyword());
      }
    }
  };
}

gen_keywords!(
  /// The orientation of a slice.
  SliceType {
    (XPlanes, "XPLANES", "Planes of constant X."),
    (YPlanes, "YPLANES", "Planes of constant Y."),
    (ZPlanes, "ZPLANES", "Planes of constant Z."),
    (IPlanes, "IPLANES", "Planes of constant I index."),
    (JPlanes, "JPLANES", "Planes of constant J index."),
    (KPlanes, "KPLANES", "Planes of constant K index."),
    (Arbitrary, "ARBITRARY", "A plane with an arbitrary normal."),
  }
);

gen_keywords!(
  /// Storage type for variables created by alter-data equations.
  DataType {
    (Single, "SINGLE", "Single precision float."),
    (ShortInt, "SHORTINT", "16-bit integer."),
    (Double, "DOUBLE", "Double precision float."),
    (Byte, "BYTE", "8-bit integer."),
    (LongInt, "LONGINT", "32-bit integer."),
    (Bit, "BIT", "A single bit."),
  }
);

gen_keywords!(
  /// How colours are spread over the contour levels.
  ColorDistribution {
    (Banded, "BANDED", "One flat colour per level band."),
    (Continuous, "CONTINUOUS", "A continuous gradient."),
  }
);

gen_keywords!(
  /// The built-in colormaps. Keywords carry their own quoting.
  ColorMap {
    (Modern, "'Modern'", "The \"Modern\" colormap."),
    (SmallRainbow, "'Small Rainbow'", "The \"Small Rainbow\" colormap."),
    (Wild, "'Wild'", "The \"Wild\" colormap."),
    (GrayScale, "GrayScale", "Shades of gray."),
  }
);

impl Default for DataType {
  fn default() -> Self {
    return Self::Single;
  }
}

impl Default for ColorDistribution {
  fn default() -> Self {
    return Self::Banded;
  }
}

impl Default for ColorMap {
  fn default() -> Self {
    return Self::Modern;
  }
}

impl SliceType {
  /// Whether the slice is positioned by index (I/J/K) rather than by
  /// coordinates (X/Y/Z).
  pub const fn is_indexed(&self) -> bool {
    return matches!(self, Self::IPlanes | Self::JPlanes | Self::KPlanes);
  }
}

/// Writes a boolean the way macros want it.
pub(crate) const fn yes_no(b: bool) -> &'static str {
  return if b { "YES" } else { "NO" };
}

/// Text appearance.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Font {
  /// Font family, e.g. "Helvetica".
  #[serde(alias = "font_family")]
  pub family: String,
  /// Bold?
  #[serde(alias = "is_bold")]
  pub bold: bool,
  /// Italic?
  #[serde(alias = "is_italic")]
  pub italic: bool,
  /// Height, in frame units.
  pub height: f64,
}

impl Default for Font {
  fn default() -> Self {
    return Self {
      family: "Helvetica".to_string(),
      bold: false,
      italic: false,
      height: 3.0,
    };
  }
}

impl Font {
  /// A Helvetica font of a given height and weight.
  pub fn helvetica(height: f64, bold: bool) -> Self {
    return Self { height, bold, ..Default::default() };
  }
}

/// Where and how to cut a slice through the data.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SliceSettings {
  /// Orientation of the slice.
  #[serde(alias = "type")]
  pub slice_type: SliceType,
  /// A point the slice goes through; coordinates or I/J/K indices.
  pub position: [f64; 3],
  /// The normal vector. Required for arbitrary slices, ignored otherwise.
  #[serde(default)]
  pub normal: Option<[f64; 3]>,
}

impl SliceSettings {
  /// A slice with an axis-aligned or index orientation.
  pub fn new(slice_type: SliceType, position: [f64; 3]) -> Self {
    return Self { slice_type, position, normal: None };
  }

  /// An arbitrary slice with a given normal.
  pub fn arbitrary(position: [f64; 3], normal: [f64; 3]) -> Self {
    return Self {
      slice_type: SliceType::Arbitrary,
      position,
      normal: Some(normal),
    };
  }

  /// Returns the unit normal of an arbitrary slice, None for other kinds.
  pub fn unit_normal(&self) -> MacroResult<Option<[f64; 3]>> {
    if self.slice_type != SliceType::Arbitrary {
      return Ok(None);
    }
    let normal = self.normal.ok_or(MacroError::MissingNormal)?;
    return unit_vector(normal).map(Some).ok_or(MacroError::ZeroNormal);
  }
}

/// Which variable to contour, and over which levels.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LevelSettings {
  /// The variable number, as Tecplot counts them (starting at 1).
  #[serde(alias = "variable_number")]
  pub variable: usize,
  /// The lowest level.
  #[serde(alias = "min_level")]
  pub min: f64,
  /// The highest level.
  #[serde(alias = "max_level")]
  pub max: f64,
  /// Number of levels, ends included.
  #[serde(alias = "num_levels")]
  pub count: usize,
}

impl LevelSettings {
  /// Returns the evenly spaced levels.
  pub fn levels(&self) -> MacroResult<Vec<f64>> {
    if self.count == 0 || !self.min.is_finite() || !self.max.is_finite() {
      return Err(MacroError::BadLevels { count: self.count });
    }
    if self.count == 1 {
      return Ok(vec![self.min]);
    }
    let last = self.count - 1;
    let span = self.max - self.min;
    return Ok(
      (0..self.count)
        .map(|i| if i == last {
          self.max
        } else {
          self.min + span * i as f64 / last as f64
        })
        .collect()
    );
  }
}

/// Contour legend placement and looks.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LegendSettings {
  /// Position of the legend, in frame percentage.
  #[serde(alias = "xy_position")]
  pub position: (f64, f64),
  /// Spacing between legend rows.
  #[serde(alias = "rowspacing")]
  pub row_spacing: f64,
  /// Label every n-th level.
  pub auto_level_skip: usize,
  /// Vertical legend?
  #[serde(alias = "isvertical")]
  pub vertical: bool,
  /// Font for the legend header.
  pub header_font: Font,
  /// Font for the legend numbers.
  pub number_font: Font,
}

impl Default for LegendSettings {
  fn default() -> Self {
    return Self {
      position: (95.0, 80.0),
      row_spacing: 1.2,
      auto_level_skip: 1,
      vertical: true,
      header_font: Font::default(),
      number_font: Font::default(),
    };
  }
}

/// The colormap for contours.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColormapSettings {
  /// Banded or continuous colour.
  pub distribution: ColorDistribution,
  /// The colormap to use.
  #[serde(alias = "colormap_name")]
  pub colormap: ColorMap,
  /// Limits for continuous colour, as (min, max). Only used when the
  /// distribution is continuous.
  pub continuous_range: Option<(f64, f64)>,
}

/// 2-D axis setup for pictures of slices.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AxisSettings {
  /// Variable number on the horizontal axis.
  #[serde(alias = "x_axis_var")]
  pub x_var: usize,
  /// Variable number on the vertical axis.
  #[serde(alias = "y_axis_var")]
  pub y_var: usize,
  /// Grid area within the frame, as (x1, y1, x2, y2) percentages.
  #[serde(default = "AxisSettings::default_rect")]
  pub rect: (f64, f64, f64, f64),
  /// Vertical position of the horizontal axis line.
  #[serde(default)]
  pub x_line_pos: f64,
  /// Horizontal position of the vertical axis line.
  #[serde(default)]
  pub y_line_pos: f64,
  /// Keep the axis scale when ranges change. On by default.
  #[serde(default = "AxisSettings::default_preserve_scale")]
  pub preserve_axis_scale: bool,
  /// Keep the axis lengths instead, letting the scale go. Overrides
  /// `preserve_axis_scale` when given.
  #[serde(default)]
  pub preserve_axis_length: Option<bool>,
  /// Font for the X axis title.
  #[serde(default)]
  pub x_title_font: Font,
  /// Font for the X tick labels.
  #[serde(default)]
  pub x_label_font: Font,
  /// Offset of the X axis title.
  #[serde(default = "AxisSettings::default_offset")]
  pub x_title_offset: f64,
  /// Font for the Y axis title.
  #[serde(default)]
  pub y_title_font: Font,
  /// Font for the Y tick labels.
  #[serde(default)]
  pub y_label_font: Font,
  /// Offset of the Y axis title.
  #[serde(default = "AxisSettings::default_offset")]
  pub y_title_offset: f64,
  /// X range. Ranges are only set when both are present.
  #[serde(default)]
  pub xlim: Option<(f64, f64)>,
  /// Y range.
  #[serde(default)]
  pub ylim: Option<(f64, f64)>,
}

impl AxisSettings {
  /// The default grid area.
  fn default_rect() -> (f64, f64, f64, f64) {
    return (10.0, 10.0, 90.0, 90.0);
  }

  /// The default title offset.
  fn default_offset() -> f64 {
    return 5.0;
  }

  /// The scale is kept unless told otherwise.
  fn default_preserve_scale() -> bool {
    return true;
  }

  /// Whether Tecplot should keep the axis scale.
  pub fn preserves_scale(&self) -> bool {
    return self.preserve_axis_length.map_or(self.preserve_axis_scale, |l| !l);
  }

  /// Axis settings with everything but the variables defaulted.
  pub fn new(x_var: usize, y_var: usize) -> Self {
    return Self {
      x_var,
      y_var,
      rect: Self::default_rect(),
      x_line_pos: 0.0,
      y_line_pos: 0.0,
      preserve_axis_scale: Self::default_preserve_scale(),
      preserve_axis_length: None,
      x_title_font: Font::default(),
      x_label_font: Font::default(),
      x_title_offset: Self::default_offset(),
      y_title_font: Font::default(),
      y_label_font: Font::default(),
      y_title_offset: Self::default_offset(),
      xlim: None,
      ylim: None,
    };
  }
}

/// What to export and where.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExportSettings {
  /// The zone holding the slice. One past the existing zones.
  #[serde(alias = "zone_number")]
  pub zone: usize,
  /// The image file to write.
  #[serde(alias = "exportfname")]
  pub file: String,
  /// Image width in pixels.
  #[serde(default = "ExportSettings::default_width", alias = "imagewidth")]
  pub image_width: usize,
}

impl ExportSettings {
  /// The default image width.
  fn default_width() -> usize {
    return 1200;
  }

  /// Export settings with the default width.
  pub fn new<S: Into<String>>(zone: usize, file: S) -> Self {
    return Self { zone, file: file.into(), image_width: Self::default_width() };
  }
}

/// Frame dimensions.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FrameSettings {
  /// Frame width.
  pub width: f64,
  /// Frame height.
  pub height: f64,
}

impl Default for FrameSettings {
  fn default() -> Self {
    return Self { width: 9.0, height: 8.0 };
  }
}
