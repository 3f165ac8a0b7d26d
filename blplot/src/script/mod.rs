//! This module implements the data structures included in plot scripts.

pub(crate) mod errors;

use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::PathBuf;

use blayer::prelude::*;
use linedata::prelude::*;
use log::*;
use serde::{Deserialize, Serialize};

use crate::script::errors::PlotScriptError;

/// A directory of extracted line data from one solver.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct DatasetEntry {
  /// The directory. Every file in it is a table, in name order.
  #[serde(alias = "directory")]
  pub(crate) dir: PathBuf,
  /// Which solver wrote it, for column names.
  #[serde(default)]
  pub(crate) solver: Solver,
  /// Reference velocity, to scale friction and wall units with.
  pub(crate) u_ref: f64,
}

/// A table within a dataset, by position or by name.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub(crate) enum TableRef {
  /// Position in the dataset, starting at 0.
  Index(usize),
  /// Name of the table (the stem of its file).
  Name(String),
}

impl Display for TableRef {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return match self {
      Self::Index(i) => write!(f, "#{}", i),
      Self::Name(n) => write!(f, "\"{}\"", n),
    };
  }
}

/// Where the free stream is read from.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct FreeStreamEntry {
  /// The dataset.
  pub(crate) dataset: String,
  /// The table; its last row is the free stream.
  #[serde(default = "FreeStreamEntry::default_table")]
  pub(crate) table: TableRef,
}

impl FreeStreamEntry {
  /// The first table.
  fn default_table() -> TableRef {
    return TableRef::Index(0);
  }
}

/// Where along the plate the correlations are sampled.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CorrelationRange {
  /// First streamwise position.
  pub(crate) x_min: f64,
  /// Last streamwise position.
  pub(crate) x_max: f64,
  /// Number of samples.
  pub(crate) points: usize,
}

impl Default for CorrelationRange {
  fn default() -> Self {
    return Self { x_min: 0.0, x_max: 8.0, points: 1500 };
  }
}

/// A line on a chart, taken from a table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct SeriesEntry {
  /// The dataset.
  pub(crate) dataset: String,
  /// The table.
  pub(crate) table: TableRef,
  /// Legend entry.
  #[serde(default)]
  pub(crate) label: String,
  /// Colour. Picked from a cycle if absent.
  #[serde(default)]
  pub(crate) color: Option<SeriesColor>,
  /// Line style.
  #[serde(default)]
  pub(crate) stroke: Stroke,
  /// Line width.
  #[serde(default = "SeriesEntry::default_width")]
  pub(crate) width: u32,
}

impl SeriesEntry {
  /// The default line width.
  fn default_width() -> u32 {
    return 2;
  }
}

/// A chart to draw.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct ChartEntry {
  /// What kind of chart.
  pub(crate) kind: ChartKind,
  /// Output file name, within the output directory.
  #[serde(default)]
  pub(crate) file: Option<String>,
  /// Title on top.
  #[serde(default)]
  pub(crate) title: Option<String>,
  /// Horizontal limits, overriding the kind's.
  #[serde(default)]
  pub(crate) xlim: Option<(f64, f64)>,
  /// Vertical limits, overriding the kind's.
  #[serde(default)]
  pub(crate) ylim: Option<(f64, f64)>,
  /// Overlay theory: the law of the wall or the friction correlations.
  #[serde(default = "ChartEntry::default_theory")]
  pub(crate) theory: bool,
  /// The lines.
  #[serde(default)]
  pub(crate) series: Vec<SeriesEntry>,
}

impl ChartEntry {
  /// Theory is on by default.
  fn default_theory() -> bool {
    return true;
  }

  /// Output file name, made up from the position if absent.
  pub(crate) fn file_name(&self, index: usize) -> String {
    return self.file.clone()
      .unwrap_or_else(|| format!("chart_{}.svg", index + 1));
  }
}

/// A plot script. Contains datasets, the free stream and charts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct PlotScript {
  /// Where charts go.
  #[serde(default = "PlotScript::default_output")]
  pub(crate) output_dir: PathBuf,
  /// The datasets, by name.
  pub(crate) datasets: BTreeMap<String, DatasetEntry>,
  /// Where the free stream comes from. Needed for friction charts with
  /// theory on.
  #[serde(default)]
  pub(crate) free_stream: Option<FreeStreamEntry>,
  /// Correlation sampling.
  #[serde(default)]
  pub(crate) correlation: CorrelationRange,
  /// The charts.
  #[serde(default, alias = "chart")]
  pub(crate) charts: Vec<ChartEntry>,
}

/// A dataset with its tables loaded and derived.
pub(crate) struct Dataset {
  /// Column names.
  pub(crate) columns: ColumnMap,
  /// The tables, in file name order.
  pub(crate) tables: Vec<Table>,
}

impl Dataset {
  /// Finds a table.
  fn table(&self, r: &TableRef) -> Option<&Table> {
    return match r {
      TableRef::Index(i) => self.tables.get(*i),
      TableRef::Name(n) => self.tables.iter()
        .find(|t| t.name.as_deref() == Some(n.as_str())),
    };
  }
}

impl PlotScript {
  /// The default output directory.
  fn default_output() -> PathBuf {
    return PathBuf::from("plots");
  }

  /// Loads every dataset and derives wall units for each table. Tables
  /// that can't be derived are kept as they are, unless `strict`.
  pub(crate) fn prepare(self, strict: bool) -> Result<ReadyPlots, PlotScriptError> {
    let policy = if strict {
      MalformedPolicy::Fail
    } else {
      MalformedPolicy::Warn
    };
    let mut datasets: BTreeMap<String, Dataset> = BTreeMap::new();
    for (name, entry) in self.datasets {
      let columns = entry.solver.columns();
      let mut tables = load_dir(&entry.dir, policy)?;
      for table in tables.iter_mut() {
        if let Err(e) = derive_columns(table, &columns, entry.u_ref) {
          if strict {
            return Err(e.into());
          }
          warn!("Dataset {}: {}; no wall units for this table.", name, e);
        }
      }
      info!("Dataset {}: {} tables.", name, tables.len());
      datasets.insert(name, Dataset { columns, tables });
    }
    return Ok(ReadyPlots {
      output_dir: self.output_dir,
      datasets,
      free_stream: self.free_stream,
      correlation: self.correlation,
      charts: self.charts,
    });
  }
}

/// A plot script with its data loaded.
pub(crate) struct ReadyPlots {
  /// Where charts go.
  pub(crate) output_dir: PathBuf,
  /// The datasets, by name.
  pub(crate) datasets: BTreeMap<String, Dataset>,
  /// Where the free stream comes from.
  pub(crate) free_stream: Option<FreeStreamEntry>,
  /// Correlation sampling.
  pub(crate) correlation: CorrelationRange,
  /// The charts.
  pub(crate) charts: Vec<ChartEntry>,
}

impl ReadyPlots {
  /// Finds a dataset and one of its tables.
  fn lookup(
    &self,
    dataset: &str,
    table: &TableRef
  ) -> Result<(&Dataset, &Table), PlotScriptError> {
    let ds = self.datasets.get(dataset)
      .ok_or_else(|| PlotScriptError::DatasetNotFound(dataset.to_string()))?;
    let t = ds.table(table).ok_or_else(|| PlotScriptError::TableNotFound {
      dataset: dataset.to_string(),
      table: table.to_string(),
    })?;
    return Ok((ds, t));
  }

  /// The free stream, if the script says where it is.
  pub(crate) fn free_stream(&self) -> Result<Option<FreeStream>, PlotScriptError> {
    let Some(ref entry) = self.free_stream else {
      return Ok(None);
    };
    let (ds, t) = self.lookup(&entry.dataset, &entry.table)?;
    let free = FreeStream::from_last_row(t, &ds.columns)?;
    debug!(
      "Free stream: U = {}, rho = {}, mu = {}, Re/m = {}.",
      free.velocity,
      free.density,
      free.viscosity,
      free.reynolds(1.0)
    );
    return Ok(Some(free));
  }

  /// Builds a chart, theory included.
  pub(crate) fn build_chart(
    &self,
    entry: &ChartEntry,
    free: Option<&FreeStream>,
    law: &LawOfTheWall
  ) -> Result<Chart, PlotScriptError> {
    let mut chart = Chart::new(entry.kind);
    chart.title = entry.title.clone();
    chart.xlim = entry.xlim.or(chart.xlim);
    chart.ylim = entry.ylim.or(chart.ylim);
    let mut colors = SeriesColor::CYCLE.iter().cycle();
    for s in entry.series.iter() {
      let (ds, t) = self.lookup(&s.dataset, &s.table)?;
      let color = s.color
        .or_else(|| colors.next().copied())
        .unwrap_or(SeriesColor::Black);
      let series = Series::from_table(t, &ds.columns, entry.kind, &s.label, color)?
        .stroke(s.stroke, s.width);
      chart.push(series);
    }
    if entry.theory {
      match (entry.kind, free) {
        (ChartKind::LawOfTheWall, _) => chart.push(theory_series(law)),
        (ChartKind::FrictionCoefficient, Some(free)) => {
          let c = &self.correlation;
          let x = linspace(c.x_min, c.x_max, c.points);
          for s in correlation_series(&all_curves(free, &x)) {
            chart.push(s);
          }
        },
        (ChartKind::FrictionCoefficient, None) => {
          warn!("No free stream given, friction correlations left out.");
        },
        (ChartKind::VelocityProfile, _) => {},
      }
    }
    return Ok(chart);
  }

  /// Draws every chart. Returns the files written.
  pub(crate) fn draw_all(&self) -> Result<Vec<PathBuf>, PlotScriptError> {
    let free = self.free_stream()?;
    let law = LawOfTheWall::new()?;
    debug!("Law of the wall crossover at y+ = {}.", law.y0);
    let mut written: Vec<PathBuf> = Vec::with_capacity(self.charts.len());
    for (i, entry) in self.charts.iter().enumerate() {
      let chart = self.build_chart(entry, free.as_ref(), &law)?;
      let path = self.output_dir.join(entry.file_name(i));
      chart.save(&path)?;
      written.push(path);
    }
    return Ok(written);
  }
}
