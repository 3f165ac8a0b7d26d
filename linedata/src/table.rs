//! This module implements the columnar table that holds the contents of a
//! single export file.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Why a line that looked like data didn't make it into the table.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum SkipReason {
  /// One of the tokens wasn't a number.
  NotNumeric {
    /// Position of the offending token.
    position: usize,
    /// The offending token itself.
    token: String,
  },
  /// The line had a different number of values than there are columns.
  WidthMismatch {
    /// Number of columns in the table.
    expected: usize,
    /// Number of values found in the line.
    found: usize,
  },
  /// A numeric line showed up before the header was finished.
  BeforeZone,
}

impl Display for SkipReason {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return match self {
      Self::NotNumeric { position, token } => write!(
        f,
        "token {} (\"{}\") is not a number",
        position,
        token
      ),
      Self::WidthMismatch { expected, found } => write!(
        f,
        "expected {} values, found {}",
        expected,
        found
      ),
      Self::BeforeZone => write!(f, "data before the first zone"),
    };
  }
}

/// A line that was left out of a table, and why.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SkippedLine {
  /// Line number, starting at 1.
  pub line: usize,
  /// The reason it was skipped.
  pub reason: SkipReason,
}

/// Errors that come from manipulating tables.
#[derive(Clone, Debug, PartialEq)]
pub enum TableError {
  /// A new column doesn't have the same length as the existing ones.
  LengthMismatch {
    /// Name of the rejected column.
    column: String,
    /// Number of rows in the table.
    expected: usize,
    /// Number of values in the rejected column.
    found: usize,
  },
  /// No column goes by this name.
  UnknownColumn(String),
}

impl Display for TableError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return match self {
      Self::LengthMismatch { column, expected, found } => write!(
        f,
        "column \"{}\" has {} values, but the table has {} rows",
        column,
        found,
        expected
      ),
      Self::UnknownColumn(c) => write!(f, "no column named \"{}\"", c),
    };
  }
}

impl std::error::Error for TableError {}

/// A table of named columns of floats. All columns have the same length.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Table {
  /// Name of the table, usually the stem of the file it came from.
  pub name: Option<String>,
  /// Column names, in file order.
  names: Vec<String>,
  /// Column data, parallel to `names`.
  columns: Vec<Vec<f64>>,
  /// Lines that looked like data but were left out.
  pub skipped: Vec<SkippedLine>,
}

impl Table {
  /// Creates an empty table with the given column names.
  pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    let columns = vec![Vec::new(); names.len()];
    return Self { name: None, names, columns, skipped: Vec::new() };
  }

  /// Builds a table straight from (name, values) pairs.
  pub fn from_columns<S: Into<String>>(
    cols: impl IntoIterator<Item = (S, Vec<f64>)>
  ) -> Result<Self, TableError> {
    let mut table = Self::default();
    for (name, values) in cols {
      table.push_column(name, values)?;
    }
    return Ok(table);
  }

  /// The column names, in order.
  pub fn names(&self) -> &[String] {
    return &self.names;
  }

  /// Number of columns.
  pub fn ncols(&self) -> usize {
    return self.names.len();
  }

  /// Number of rows.
  pub fn nrows(&self) -> usize {
    return self.columns.first().map_or(0, Vec::len);
  }

  /// Returns true if there are no rows.
  pub fn is_empty(&self) -> bool {
    return self.nrows() == 0;
  }

  /// Position of a column by name. The first one wins if names repeat.
  pub fn position(&self, name: &str) -> Option<usize> {
    return self.names.iter().position(|n| n == name);
  }

  /// Gets a column by name.
  pub fn column(&self, name: &str) -> Option<&[f64]> {
    return self.position(name).map(|i| self.columns[i].as_slice());
  }

  /// Gets a column by name, or complains.
  pub fn try_column(&self, name: &str) -> Result<&[f64], TableError> {
    return self.column(name)
      .ok_or_else(|| TableError::UnknownColumn(name.to_string()));
  }

  /// Gets a column by position.
  pub fn column_at(&self, index: usize) -> Option<&[f64]> {
    return self.columns.get(index).map(Vec::as_slice);
  }

  /// Iterates over (name, values) pairs.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
    return self.names.iter()
      .zip(self.columns.iter())
      .map(|(n, c)| (n.as_str(), c.as_slice()));
  }

  /// Returns a single row as a vector, in column order.
  pub fn row(&self, index: usize) -> Option<Vec<f64>> {
    if index >= self.nrows() {
      return None;
    }
    return Some(self.columns.iter().map(|c| c[index]).collect());
  }

  /// Iterates over the rows.
  pub fn rows(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
    return (0..self.nrows()).map(|i| self.columns.iter().map(|c| c[i]).collect());
  }

  /// Finds the indices of the rows where a column is exactly a value.
  pub fn rows_where(
    &self,
    name: &str,
    value: f64
  ) -> Result<Vec<usize>, TableError> {
    let col = self.try_column(name)?;
    return Ok(
      col.iter()
        .enumerate()
        .filter(|(_, v)| **v == value)
        .map(|(i, _)| i)
        .collect()
    );
  }

  /// Appends a row. Used by the loader, which has already checked the width.
  pub(crate) fn push_row(&mut self, row: Vec<f64>) {
    for (col, x) in self.columns.iter_mut().zip(row) {
      col.push(x);
    }
  }

  /// Appends a new column, or replaces one with the same name. The first
  /// column pushed into an empty table sets the row count.
  pub fn push_column<S: Into<String>>(
    &mut self,
    name: S,
    values: Vec<f64>
  ) -> Result<(), TableError> {
    let name: String = name.into();
    if !self.names.is_empty() && values.len() != self.nrows() {
      return Err(TableError::LengthMismatch {
        column: name,
        expected: self.nrows(),
        found: values.len(),
      });
    }
    if let Some(i) = self.position(&name) {
      self.columns[i] = values;
    } else {
      self.names.push(name);
      self.columns.push(values);
    }
    return Ok(());
  }
}
