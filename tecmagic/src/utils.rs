//! This module implements utility types for tecmagic.

use serde::{Deserialize, Serialize};

/// One or many of anything.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
  /// One of the thing
  One(T),
  /// Many of the thing
  Many(Vec<T>),
}
