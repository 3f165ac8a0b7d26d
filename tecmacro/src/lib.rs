//! This library writes macros for Tecplot 360: extracting field data along
//! polylines, altering data with equations, and picturing contoured slices.
//!
//! Fragments of macro text are built by pure functions in [`commands`] from
//! the settings in [`settings`]; [`jobs`] puts them together in the order
//! Tecplot expects, and [`runner`] writes the result out and runs it.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::needless_return)]

pub mod commands;
pub mod error;
pub mod geometry;
pub mod jobs;
pub mod runner;
pub mod settings;

/// Imports the most relevant exports from the library.
pub mod prelude {
  pub use crate::commands::*;
  pub use crate::error::*;
  pub use crate::geometry::*;
  pub use crate::jobs::*;
  pub use crate::runner::*;
  pub use crate::settings::*;
}

#[cfg(test)]
mod tests;
