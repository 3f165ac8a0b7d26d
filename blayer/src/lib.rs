//! This library turns velocity profiles extracted from boundary-layer
//! simulations into wall units, compares them with the law of the wall and
//! with empirical friction correlations, and draws the comparisons.
//!
//! Profiles come in as [`Table`](linedata::prelude::Table)s; the columns
//! computed here are appended to them, so they can be written back out or
//! plotted alongside the solver's own variables.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::needless_return)]

pub mod columns;
pub mod correlations;
pub mod derived;
pub mod error;
pub mod plotting;
pub mod sampling;
pub mod wall;

/// Imports the most relevant exports from the library.
pub mod prelude {
  pub use crate::columns::*;
  pub use crate::correlations::*;
  pub use crate::derived::*;
  pub use crate::error::*;
  pub use crate::plotting::*;
  pub use crate::sampling::*;
  pub use crate::wall::*;
}
