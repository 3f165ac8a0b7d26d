//! This module names the columns the analysis reads from and writes to. Each
//! solver exports its variables under different names.

use serde::{Deserialize, Serialize};

/// Name of the derived friction coefficient column.
pub const SKIN_FRICTION: &str = "SkinFrictionCoefficient";
/// Name of the derived dimensionless velocity column.
pub const UPLUS: &str = "UPLUS";
/// Name of the derived dimensionless wall distance column.
pub const YPLUS: &str = "YPLUSPrime";
/// Name of the derived wall shear stress column.
pub const TAU: &str = "TAU";

/// Where the friction coefficient comes from.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum FrictionSource {
  /// The solver exports it directly, under this name.
  Column(String),
  /// It has to be computed from the wall shear stress in this column.
  WallShear(String),
}

/// The columns an analysis reads.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ColumnMap {
  /// Streamwise velocity.
  pub velocity: String,
  /// Wall-normal coordinate. The reference row is where this is zero.
  pub wall_distance: String,
  /// Streamwise coordinate.
  pub streamwise: String,
  /// Density.
  pub density: String,
  /// Molecular (dynamic) viscosity.
  pub viscosity: String,
  /// Turbulent (eddy) viscosity.
  pub eddy_viscosity: String,
  /// The friction coefficient, or how to get it.
  pub friction: FrictionSource,
}

impl ColumnMap {
  /// Column names in ACE exports.
  pub fn ace() -> Self {
    return Self {
      velocity: "U".into(),
      wall_distance: "Z".into(),
      streamwise: "X".into(),
      density: "RHO".into(),
      viscosity: "Vislam".into(),
      eddy_viscosity: "VIS_T".into(),
      friction: FrictionSource::Column(SKIN_FRICTION.into()),
    };
  }

  /// Column names in CFX exports.
  pub fn cfx() -> Self {
    return Self {
      velocity: "U".into(),
      wall_distance: "Z".into(),
      streamwise: "X".into(),
      density: "Density".into(),
      viscosity: "Dynamic Viscosity".into(),
      eddy_viscosity: "Eddy Viscosity".into(),
      friction: FrictionSource::WallShear("X Wall Shear".into()),
    };
  }
}

/// The solvers whose exports we know how to read.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Solver {
  /// ACE-CFD.
  Ace,
  /// ANSYS CFX.
  Cfx,
  /// Anything else, with explicit column names.
  Custom(ColumnMap),
}

impl Default for Solver {
  fn default() -> Self {
    return Self::Ace;
  }
}

impl Solver {
  /// The column names for this solver.
  pub fn columns(&self) -> ColumnMap {
    return match self {
      Self::Ace => ColumnMap::ace(),
      Self::Cfx => ColumnMap::cfx(),
      Self::Custom(map) => map.clone(),
    };
  }
}
