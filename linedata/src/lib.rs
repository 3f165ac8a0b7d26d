//! This library implements types and functions to read the text files that
//! Tecplot writes when extracting field data along polylines.
//!
//! Every file becomes a [`Table`](table::Table): named columns of floats,
//! with a record of any line that looked like data but couldn't be decoded,
//! so malformed exports never go unnoticed.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::needless_return)]

pub mod loader;
pub mod parser;
pub mod table;
pub mod util;
pub mod writer;

/// Imports the most relevant exports from the library.
pub mod prelude {
  pub use crate::loader::*;
  pub use crate::parser::*;
  pub use crate::table::*;
  pub use crate::writer::*;
}
