//! This module draws comparison charts of boundary-layer profiles as SVG
//! files. There are three kinds of chart, each with its own axes and limits;
//! theory curves are added as ordinary series.

use std::fmt::Display;
use std::path::Path;

use log::{debug, info};
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};

use linedata::prelude::Table;

use crate::columns::*;
use crate::correlations::CorrelationCurve;
use crate::derived::column;
use crate::error::{AnalysisError, AnalysisResult};
use crate::wall::LawOfTheWall;

/// Default chart size, in pixels.
pub const DEFAULT_SIZE: (u32, u32) = (800, 600);

/// Number of samples in the law of the wall overlay.
pub const THEORY_POINTS: usize = 2500;

/// Turns any plotting error into ours.
fn plot_error<E: Display>(e: E) -> AnalysisError {
  return AnalysisError::Plot(e.to_string());
}

/// The kinds of chart.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
  /// Velocity against wall distance.
  VelocityProfile,
  /// U+ against Y+, log scale, with the theoretical curve.
  LawOfTheWall,
  /// Friction coefficient along the plate, with the correlations.
  FrictionCoefficient,
}

impl ChartKind {
  /// The (x, y) columns a series of this kind of chart is made of.
  pub fn columns<'a>(&self, map: &'a ColumnMap) -> (&'a str, &'a str) {
    return match self {
      Self::VelocityProfile => {
        (map.velocity.as_str(), map.wall_distance.as_str())
      },
      Self::LawOfTheWall => (YPLUS, UPLUS),
      Self::FrictionCoefficient => (map.streamwise.as_str(), SKIN_FRICTION),
    };
  }
}

/// Series colours.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SeriesColor {
  /// Red.
  Red,
  /// Blue.
  Blue,
  /// Green.
  Green,
  /// Black.
  Black,
  /// Orange.
  Orange,
  /// Purple.
  Purple,
  /// Gray.
  Gray,
  /// Anything else, as RGB.
  Rgb(u8, u8, u8),
}

impl SeriesColor {
  /// Colours handed out to series that don't pick one.
  pub const CYCLE: [Self; 6] = [
    Self::Red, Self::Blue, Self::Green, Self::Orange, Self::Purple, Self::Gray
  ];

  /// The colour as plotters wants it.
  pub fn rgb(&self) -> RGBColor {
    return match self {
      Self::Red => RGBColor(214, 39, 40),
      Self::Blue => RGBColor(31, 119, 180),
      Self::Green => RGBColor(44, 160, 44),
      Self::Black => RGBColor(0, 0, 0),
      Self::Orange => RGBColor(255, 127, 14),
      Self::Purple => RGBColor(148, 103, 189),
      Self::Gray => RGBColor(127, 127, 127),
      Self::Rgb(r, g, b) => RGBColor(*r, *g, *b),
    };
  }
}

/// How lines are drawn.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Stroke {
  /// A continuous line.
  #[default]
  Solid,
  /// Long dashes.
  Dashed,
  /// Short dashes.
  Dotted,
}

/// A line on a chart.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
  /// Legend entry. Empty for none.
  pub label: String,
  /// Horizontal values.
  pub x: Vec<f64>,
  /// Vertical values.
  pub y: Vec<f64>,
  /// Colour.
  pub color: SeriesColor,
  /// Line style.
  pub stroke: Stroke,
  /// Line width in pixels.
  pub width: u32,
}

impl Series {
  /// A solid, 2-pixel series.
  pub fn new<S: Into<String>>(
    label: S,
    x: Vec<f64>,
    y: Vec<f64>,
    color: SeriesColor
  ) -> Self {
    return Self {
      label: label.into(),
      x,
      y,
      color,
      stroke: Stroke::Solid,
      width: 2,
    };
  }

  /// Takes the columns a kind of chart plots out of a table.
  pub fn from_table<S: Into<String>>(
    table: &Table,
    map: &ColumnMap,
    kind: ChartKind,
    label: S,
    color: SeriesColor
  ) -> AnalysisResult<Self> {
    let (x, y) = kind.columns(map);
    return Ok(Self::new(
      label,
      column(table, x)?.to_vec(),
      column(table, y)?.to_vec(),
      color
    ));
  }

  /// Sets the line style.
  pub fn stroke(mut self, stroke: Stroke, width: u32) -> Self {
    self.stroke = stroke;
    self.width = width;
    return self;
  }

  /// Splits the series into runs of consecutive points that can be drawn
  /// within the given limits. Non-finite points break runs, as do points
  /// out of bounds, and non-positive x on log axes.
  pub fn runs(
    &self,
    xlim: (f64, f64),
    ylim: (f64, f64),
    log_x: bool
  ) -> Vec<Vec<(f64, f64)>> {
    let inside = |x: f64, y: f64| {
      x.is_finite() && y.is_finite()
        && (!log_x || x > 0.0)
        && x >= xlim.0 && x <= xlim.1
        && y >= ylim.0 && y <= ylim.1
    };
    let mut runs: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    for (x, y) in self.x.iter().zip(self.y.iter()) {
      if inside(*x, *y) {
        current.push((*x, *y));
      } else if !current.is_empty() {
        runs.push(std::mem::take(&mut current));
      }
    }
    if !current.is_empty() {
      runs.push(current);
    }
    return runs;
  }
}

/// The theoretical law of the wall, as a dotted black series.
pub fn theory_series(law: &LawOfTheWall) -> Series {
  let (y_plus, u_plus) = law.curve(THEORY_POINTS);
  return Series::new("Law of the wall", y_plus, u_plus, SeriesColor::Black)
    .stroke(Stroke::Dotted, 2);
}

/// The friction correlations, as thin series.
pub fn correlation_series(curves: &[CorrelationCurve]) -> Vec<Series> {
  let styles = [
    (SeriesColor::Red, Stroke::Dashed),
    (SeriesColor::Blue, Stroke::Dashed),
    (SeriesColor::Green, Stroke::Dashed),
    (SeriesColor::Red, Stroke::Dotted),
  ];
  return curves.iter()
    .zip(styles.iter().cycle())
    .map(|(c, (color, stroke))| {
      Series::new(
        format!("{} formula", c.correlation.name()),
        c.x.clone(),
        c.friction.clone(),
        *color
      ).stroke(*stroke, 1)
    })
    .collect();
}

/// Smallest and largest finite values, padded a little. Used for axes that
/// have no fixed limits.
fn auto_range<'a>(values: impl Iterator<Item = &'a f64>) -> (f64, f64) {
  let (lo, hi) = values
    .filter(|v| v.is_finite())
    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
      (lo.min(*v), hi.max(*v))
    });
  if lo > hi {
    return (0.0, 1.0);
  }
  if lo == hi {
    return (lo - 1.0, hi + 1.0);
  }
  let pad = (hi - lo) * 0.05;
  return (lo - pad, hi + pad);
}

/// Builds the coordinate system and draws everything onto it. The x axis
/// is either a plain range or a log range, which are different types.
macro_rules! draw_chart {
  ($chart:expr, $root:expr, $xrange:expr, $xlim:expr, $ylim:expr) => {{
    let chart = $chart;
    let mut builder = ChartBuilder::on($root);
    builder.margin(15).x_label_area_size(45).y_label_area_size(65);
    if let Some(ref title) = chart.title {
      builder.caption(title, ("sans-serif", 20).into_font());
    }
    let mut ctx = builder
      .build_cartesian_2d($xrange, $ylim.0..$ylim.1)
      .map_err(plot_error)?;
    ctx.configure_mesh()
      .x_desc(chart.x_label.as_str())
      .y_desc(chart.y_label.as_str())
      .axis_desc_style(("sans-serif", 16).into_font())
      .draw()
      .map_err(plot_error)?;
    let mut labelled = false;
    for s in chart.series.iter() {
      let style = s.color.rgb().stroke_width(s.width);
      let runs = s.runs($xlim, $ylim, chart.log_x);
      if runs.is_empty() {
        debug!("Nothing of \"{}\" falls within the chart.", s.label);
      }
      for (i, run) in runs.into_iter().enumerate() {
        let anno = match s.stroke {
          Stroke::Solid => ctx.draw_series(LineSeries::new(run, style)),
          Stroke::Dashed => {
            ctx.draw_series(DashedLineSeries::new(run, 8, 5, style))
          },
          Stroke::Dotted => {
            ctx.draw_series(DashedLineSeries::new(run, 2, 4, style))
          },
        }.map_err(plot_error)?;
        if i == 0 && !s.label.is_empty() {
          labelled = true;
          anno.label(s.label.as_str()).legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], style)
          });
        }
      }
    }
    if labelled {
      ctx.configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_error)?;
    }
  }};
}

/// A chart, ready to be drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Chart {
  /// The kind of chart.
  pub kind: ChartKind,
  /// Title on top, if any.
  pub title: Option<String>,
  /// Horizontal axis description.
  pub x_label: String,
  /// Vertical axis description.
  pub y_label: String,
  /// Horizontal limits. Fitted to the data if absent.
  pub xlim: Option<(f64, f64)>,
  /// Vertical limits. Fitted to the data if absent.
  pub ylim: Option<(f64, f64)>,
  /// Log scale on the horizontal axis.
  pub log_x: bool,
  /// Image size, in pixels.
  pub size: (u32, u32),
  /// The lines, drawn in order.
  pub series: Vec<Series>,
}

impl Chart {
  /// An empty chart with the axes and limits of its kind.
  pub fn new(kind: ChartKind) -> Self {
    let (x_label, y_label, xlim, ylim, log_x) = match kind {
      ChartKind::VelocityProfile => ("U, m/s", "Z, m", None, None, false),
      ChartKind::LawOfTheWall => {
        ("Y+", "U+", Some((1.0, 1000.0)), Some((0.0, 25.0)), true)
      },
      ChartKind::FrictionCoefficient => {
        ("X, m", "Cf", Some((0.0, 8.0)), Some((0.0, 0.03)), false)
      },
    };
    return Self {
      kind,
      title: None,
      x_label: x_label.to_string(),
      y_label: y_label.to_string(),
      xlim,
      ylim,
      log_x,
      size: DEFAULT_SIZE,
      series: Vec::new(),
    };
  }

  /// Sets the title.
  pub fn title<S: Into<String>>(mut self, title: S) -> Self {
    self.title = Some(title.into());
    return self;
  }

  /// Adds a series.
  pub fn push(&mut self, series: Series) {
    self.series.push(series);
  }

  /// The limits the chart will be drawn with.
  pub fn limits(&self) -> ((f64, f64), (f64, f64)) {
    let xlim = self.xlim.unwrap_or_else(|| {
      auto_range(self.series.iter().flat_map(|s| s.x.iter()))
    });
    let ylim = self.ylim.unwrap_or_else(|| {
      auto_range(self.series.iter().flat_map(|s| s.y.iter()))
    });
    return (xlim, ylim);
  }

  /// Draws the chart onto a drawing area.
  fn draw(&self, root: &DrawingArea<SVGBackend<'_>, Shift>) -> AnalysisResult<()> {
    root.fill(&WHITE).map_err(plot_error)?;
    let (xlim, ylim) = self.limits();
    if self.log_x {
      if xlim.0 <= 0.0 {
        return Err(AnalysisError::Plot(format!(
          "log axis can't start at {}",
          xlim.0
        )));
      }
      draw_chart!(self, root, (xlim.0..xlim.1).log_scale(), xlim, ylim);
    } else {
      draw_chart!(self, root, xlim.0..xlim.1, xlim, ylim);
    }
    root.present().map_err(plot_error)?;
    return Ok(());
  }

  /// Renders the chart as SVG text.
  pub fn render_svg(&self) -> AnalysisResult<String> {
    let mut svg = String::new();
    {
      let root = SVGBackend::with_string(&mut svg, self.size).into_drawing_area();
      self.draw(&root)?;
    }
    return Ok(svg);
  }

  /// Renders the chart to an SVG file, creating its directory if needed.
  pub fn save<P: AsRef<Path>>(&self, path: P) -> AnalysisResult<()> {
    let path = path.as_ref();
    let svg = self.render_svg()?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
      std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, svg)?;
    info!("Saved {} with {} series.", path.display(), self.series.len());
    return Ok(());
  }
}
