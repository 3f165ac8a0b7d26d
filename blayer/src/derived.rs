//! This module computes the wall-scaled quantities of a velocity profile and
//! appends them to its table as new columns.

use linedata::prelude::Table;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::columns::*;
use crate::error::{AnalysisError, AnalysisResult};

/// Gets a column, or says which table lacks it.
pub fn column<'a>(table: &'a Table, name: &str) -> AnalysisResult<&'a [f64]> {
  return table.column(name).ok_or_else(|| AnalysisError::MissingColumn {
    table: table.name.clone(),
    column: name.to_string(),
  });
}

/// Finds the row at the wall, where the wall distance is exactly zero. If
/// there are several, the first one is used.
pub fn reference_row(table: &Table, wall_distance: &str) -> AnalysisResult<usize> {
  let rows = column(table, wall_distance)?
    .iter()
    .enumerate()
    .filter(|(_, z)| **z == 0.0)
    .map(|(i, _)| i)
    .collect::<Vec<usize>>();
  return match rows.as_slice() {
    [] => Err(AnalysisError::NoReferenceRow {
      table: table.name.clone(),
      column: wall_distance.to_string(),
    }),
    [only] => Ok(*only),
    [first, ..] => {
      warn!(
        "{} rows of {} have {} = 0, using row {}.",
        rows.len(),
        table.name.as_deref().unwrap_or("<unnamed>"),
        wall_distance,
        first
      );
      Ok(*first)
    },
  };
}

/// Friction coefficient from wall shear: `2 τ / (ρ u_ref²)`.
pub fn skin_friction_from_shear(
  shear: &[f64],
  density: &[f64],
  u_ref: f64
) -> Vec<f64> {
  return shear.iter()
    .zip(density.iter())
    .map(|(tau, rho)| 2.0 * tau / (rho * u_ref * u_ref))
    .collect();
}

/// Flow state at the wall, read off the reference row.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WallState {
  /// Row the values came from.
  pub row: usize,
  /// Density.
  pub density: f64,
  /// Molecular viscosity.
  pub viscosity: f64,
  /// Eddy viscosity, if the table has it.
  pub eddy_viscosity: Option<f64>,
  /// Friction coefficient.
  pub friction: f64,
}

impl WallState {
  /// Friction velocity over reference velocity: `sqrt(Cf / 2)`.
  pub fn friction_ratio(&self) -> f64 {
    return (self.friction / 2.0).sqrt();
  }

  /// Wall shear stress: `0.5 ρ u_ref² Cf`.
  pub fn shear(&self, u_ref: f64) -> f64 {
    return 0.5 * self.density * u_ref * u_ref * self.friction;
  }
}

/// The friction coefficient along a table, as exported or computed from the
/// wall shear when the solver doesn't export it.
pub fn friction_column(
  table: &Table,
  map: &ColumnMap,
  u_ref: f64
) -> AnalysisResult<Vec<f64>> {
  return match &map.friction {
    FrictionSource::Column(name) => Ok(column(table, name)?.to_vec()),
    FrictionSource::WallShear(name) => Ok(skin_friction_from_shear(
      column(table, name)?,
      column(table, &map.density)?,
      u_ref
    )),
  };
}

/// Reads the wall state of a table, given its friction coefficients.
pub fn wall_state(
  table: &Table,
  map: &ColumnMap,
  friction: &[f64]
) -> AnalysisResult<WallState> {
  let row = reference_row(table, &map.wall_distance)?;
  let eddy_viscosity = table.column(&map.eddy_viscosity).map(|c| c[row]);
  return Ok(WallState {
    row,
    density: column(table, &map.density)?[row],
    viscosity: column(table, &map.viscosity)?[row],
    eddy_viscosity,
    friction: friction[row],
  });
}

/// Appends the friction coefficient, U+, Y+ and wall shear columns to a
/// table, all scaled by the reference velocity. Returns the wall state they
/// were computed with. Nothing is appended unless every column can be
/// computed.
pub fn derive_columns(
  table: &mut Table,
  map: &ColumnMap,
  u_ref: f64
) -> AnalysisResult<WallState> {
  let cf = friction_column(table, map, u_ref)?;
  let wall = wall_state(table, map, &cf)?;
  if wall.friction <= 0.0 {
    warn!(
      "Friction coefficient at the wall of {} is {}, wall units will be off.",
      table.name.as_deref().unwrap_or("<unnamed>"),
      wall.friction
    );
  }
  let ratio = wall.friction_ratio();
  let u_plus: Vec<f64> = column(table, &map.velocity)?
    .iter()
    .map(|u| u / u_ref / ratio)
    .collect();
  let y_plus: Vec<f64> = column(table, &map.wall_distance)?
    .iter()
    .map(|z| wall.density / wall.viscosity * z * u_ref * ratio)
    .collect();
  let tau = vec![wall.shear(u_ref); table.nrows()];
  table.push_column(SKIN_FRICTION, cf)?;
  table.push_column(UPLUS, u_plus)?;
  table.push_column(YPLUS, y_plus)?;
  table.push_column(TAU, tau)?;
  debug!(
    "Derived wall units for {} from row {}: Cf = {}.",
    table.name.as_deref().unwrap_or("<unnamed>"),
    wall.row,
    wall.friction
  );
  return Ok(wall);
}

/// Free-stream conditions, used to build Reynolds numbers.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FreeStream {
  /// Velocity.
  pub velocity: f64,
  /// Density.
  pub density: f64,
  /// Molecular viscosity.
  pub viscosity: f64,
}

impl FreeStream {
  /// Takes the free stream from the last row of a profile, the point
  /// farthest from the wall.
  pub fn from_last_row(table: &Table, map: &ColumnMap) -> AnalysisResult<Self> {
    let last = table.nrows()
      .checked_sub(1)
      .ok_or_else(|| AnalysisError::EmptyTable(table.name.clone()))?;
    return Ok(Self {
      velocity: column(table, &map.velocity)?[last],
      density: column(table, &map.density)?[last],
      viscosity: column(table, &map.viscosity)?[last],
    });
  }

  /// Reynolds number at a streamwise distance: `ρ x U / μ`.
  pub fn reynolds(&self, x: f64) -> f64 {
    return self.density * x * self.velocity / self.viscosity;
  }
}
