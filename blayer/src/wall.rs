//! The law of the wall: a linear viscous sublayer joined to the log law at
//! the wall distance where the two meet.

use log::debug;

use crate::error::{AnalysisError, AnalysisResult};
use crate::sampling::logspace;

/// Inverse of the von Kármán constant.
pub const INV_KAPPA: f64 = 2.5;

/// Offset of the log law, in wall units.
pub const LOG_OFFSET: f64 = 0.13;

/// The log law: `2.5 ln(y+ / 0.13)`.
pub fn log_law(y_plus: f64) -> f64 {
  return INV_KAPPA * (y_plus / LOG_OFFSET).ln();
}

/// Finds a root of `f` with Newton's method, starting at `x0`.
pub fn newton<F, D>(
  f: F,
  df: D,
  x0: f64,
  tol: f64,
  max_iter: usize
) -> AnalysisResult<f64>
where
  F: Fn(f64) -> f64,
  D: Fn(f64) -> f64,
{
  let mut x = x0;
  for i in 0..max_iter {
    let (fx, dfx) = (f(x), df(x));
    if !fx.is_finite() || !dfx.is_finite() || dfx == 0.0 {
      return Err(AnalysisError::Solve(format!(
        "Newton iteration stalled at x = {} (f = {}, f' = {})",
        x, fx, dfx
      )));
    }
    let next = x - fx / dfx;
    if (next - x).abs() <= tol * next.abs().max(1.0) {
      debug!("Newton converged to {} after {} iterations.", next, i + 1);
      return Ok(next);
    }
    x = next;
  }
  return Err(AnalysisError::Solve(format!(
    "Newton iteration did not converge from {} in {} steps",
    x0, max_iter
  )));
}

/// The wall distance where the log law meets `u+ = y+`, near 11.1.
pub fn crossover() -> AnalysisResult<f64> {
  return newton(
    |y| log_law(y) - y,
    |y| INV_KAPPA / y - 1.0,
    10.0,
    1e-12,
    100
  );
}

/// The law of the wall, with its crossover solved once.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LawOfTheWall {
  /// Where the sublayer gives way to the log law.
  pub y0: f64,
}

impl LawOfTheWall {
  /// Solves for the crossover.
  pub fn new() -> AnalysisResult<Self> {
    return Ok(Self { y0: crossover()? });
  }

  /// Theoretical `u+` at some `y+`.
  pub fn u_plus(&self, y_plus: f64) -> f64 {
    return if y_plus > self.y0 { log_law(y_plus) } else { y_plus };
  }

  /// The theoretical curve as (y+, u+) samples, over `y+` from 1 to 10^5.
  pub fn curve(&self, points: usize) -> (Vec<f64>, Vec<f64>) {
    let y = logspace(0.0, 5.0, points);
    let u = y.iter().map(|y| self.u_plus(*y)).collect();
    return (y, u);
  }
}
