//! Empirical skin friction correlations for turbulent flat plates, as
//! functions of the local Reynolds number.

use serde::{Deserialize, Serialize};

use crate::derived::FreeStream;

/// A skin friction correlation.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Correlation {
  /// `(2 log10 Re - 0.65)^-2.3`
  Schlichting,
  /// `0.37 (log10 Re)^-2.584`
  SchultzGrunow,
  /// `0.074 Re^-1/5`
  Prandtl,
  /// `0.067 (log10 Re - 2)^-2`
  Hughes,
}

impl Correlation {
  /// Returns all correlations.
  pub const fn all() -> &'static [Self] {
    return &[Self::Schlichting, Self::SchultzGrunow, Self::Prandtl, Self::Hughes];
  }

  /// A human-readable name.
  pub const fn name(&self) -> &'static str {
    return match self {
      Self::Schlichting => "Schlichting",
      Self::SchultzGrunow => "Schultz-Grunow",
      Self::Prandtl => "Prandtl",
      Self::Hughes => "Hughes",
    };
  }

  /// Friction coefficient at a Reynolds number. Non-finite for Reynolds
  /// numbers the formula doesn't cover, like zero.
  pub fn friction(&self, re: f64) -> f64 {
    return match self {
      Self::Schlichting => (2.0 * re.log10() - 0.65).powf(-2.3),
      Self::SchultzGrunow => 0.37 * re.log10().powf(-2.584),
      Self::Prandtl => 0.074 * re.powf(-0.2),
      Self::Hughes => 0.067 * (re.log10() - 2.0).powi(-2),
    };
  }
}

/// Wall shear stress from a friction coefficient: `0.5 ρ U² Cf`.
pub fn wall_shear(friction: f64, density: f64, velocity: f64) -> f64 {
  return 0.5 * density * velocity * velocity * friction;
}

/// A correlation sampled along the plate.
#[derive(Clone, Debug, PartialEq)]
pub struct CorrelationCurve {
  /// The correlation.
  pub correlation: Correlation,
  /// Streamwise positions.
  pub x: Vec<f64>,
  /// Friction coefficient at each position.
  pub friction: Vec<f64>,
  /// Wall shear stress at each position.
  pub shear: Vec<f64>,
}

impl CorrelationCurve {
  /// Samples a correlation at some streamwise positions.
  pub fn sample(correlation: Correlation, free: &FreeStream, x: &[f64]) -> Self {
    let friction: Vec<f64> = x.iter()
      .map(|x| correlation.friction(free.reynolds(*x)))
      .collect();
    let shear = friction.iter()
      .map(|cf| wall_shear(*cf, free.density, free.velocity))
      .collect();
    return Self { correlation, x: x.to_vec(), friction, shear };
  }
}

/// Samples every correlation at the same positions.
pub fn all_curves(free: &FreeStream, x: &[f64]) -> Vec<CorrelationCurve> {
  return Correlation::all()
    .iter()
    .map(|c| CorrelationCurve::sample(*c, free, x))
    .collect();
}
