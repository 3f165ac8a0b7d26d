//! This module implements the parser for the text files Tecplot writes when
//! extracting data, and associated structures and enums.
//!
//! The format is loose: a header listing variable names (first line minus its
//! first two tokens, then one name per line unless quoted otherwise), a `ZONE`
//! line, and whitespace-separated numeric rows.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::loader::LoadError;
use crate::table::{SkipReason, SkippedLine, Table};
use crate::util::*;

/// What to do when a line looks like data but can't be fully decoded.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
  /// Log a warning, leave the line out, remember it in the table.
  #[default]
  Warn,
  /// Give up on the whole file.
  Fail,
}

/// The parser responds this to every line it consumes.
#[derive(Clone, Debug, PartialEq)]
pub enum LineResponse {
  /// The line was empty.
  Blank,
  /// The line contributed these variable names.
  Names(usize),
  /// The line was a zone sentinel.
  Zone,
  /// The line wasn't data, e.g. zone attributes after the sentinel.
  Metadata,
  /// The line was a row of data.
  Row,
  /// The line looked like data but was rejected.
  Skipped(SkipReason),
}

impl LineResponse {
  /// Returns true if the response means data was thrown away.
  pub fn abnormal(&self) -> bool {
    return matches!(self, Self::Skipped(_));
  }
}

/// Which part of the file we're in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Section {
  /// Nothing seen yet.
  Start,
  /// Reading variable names.
  Header,
  /// Past at least one zone sentinel.
  Data,
}

/// This is the export file parser -- it doesn't care how lines are fed into
/// it. It's one-pass, single-thread.
pub struct OnePassParser {
  /// Variable names gathered so far.
  names: Vec<String>,
  /// The table being built, instantiated at the first sentinel.
  table: Option<Table>,
  /// Where in the file we are.
  section: Section,
  /// Lines left out, with reasons.
  skipped: Vec<SkippedLine>,
  /// The total number of consumed lines.
  total_lines: usize,
  /// Number of zones seen.
  zones: usize,
}

impl Default for OnePassParser {
  fn default() -> Self {
    return Self::new();
  }
}

impl OnePassParser {
  /// Instantiates a new parser.
  pub fn new() -> Self {
    return Self {
      names: Vec::new(),
      table: None,
      section: Section::Start,
      skipped: Vec::new(),
      total_lines: 0,
      zones: 0,
    };
  }

  /// Number of lines consumed so far.
  pub fn total_lines(&self) -> usize {
    return self.total_lines;
  }

  /// Decodes a data row. All tokens must be floats and the width must match.
  fn decode_row(&self, line: &str) -> Result<Vec<f64>, SkipReason> {
    let mut row: Vec<f64> = Vec::with_capacity(self.names.len());
    for (position, tok) in tokens(line).enumerate() {
      match parse_float(tok) {
        Some(x) => row.push(x),
        None => return Err(SkipReason::NotNumeric {
          position,
          token: tok.to_string(),
        }),
      }
    }
    if row.len() != self.names.len() {
      return Err(SkipReason::WidthMismatch {
        expected: self.names.len(),
        found: row.len(),
      });
    }
    return Ok(row);
  }

  /// Remembers a rejected line and hands back the response.
  fn skip(&mut self, reason: SkipReason) -> LineResponse {
    self.skipped.push(SkippedLine { line: self.total_lines, reason: reason.clone() });
    return LineResponse::Skipped(reason);
  }

  /// Consumes a line into the parser.
  pub fn consume(&mut self, line: &str) -> LineResponse {
    self.total_lines += 1;
    let first = match tokens(line).next() {
      Some(tok) => tok,
      None => return LineResponse::Blank,
    };
    // zone sentinel: the header is over, data may follow.
    if is_sentinel(first) {
      self.zones += 1;
      if self.table.is_none() {
        debug!(
          "Header finished on line {} with {} variables.",
          self.total_lines,
          self.names.len()
        );
        self.table = Some(Table::new(self.names.iter().cloned()));
      } else {
        debug!("Zone {} starts on line {}.", self.zones, self.total_lines);
      }
      self.section = Section::Data;
      return LineResponse::Zone;
    }
    match self.section {
      Section::Start => {
        // first content line: the first two tokens are the keyword and "="
        let found = split_names(skip_tokens(line, 2));
        let n = found.len();
        self.names.extend(found);
        self.section = Section::Header;
        return LineResponse::Names(n);
      },
      Section::Header => {
        if parse_float(first).is_some() {
          return self.skip(SkipReason::BeforeZone);
        }
        let found = line_names(line);
        let n = found.len();
        self.names.extend(found);
        return LineResponse::Names(n);
      },
      Section::Data => {
        if parse_float(first).is_none() {
          return LineResponse::Metadata;
        }
        match self.decode_row(line) {
          Ok(row) => {
            if let Some(table) = self.table.as_mut() {
              table.push_row(row);
            }
            return LineResponse::Row;
          },
          Err(reason) => return self.skip(reason),
        }
      },
    }
  }

  /// Finishes up and returns the table. A file without a sentinel yields a
  /// table with the header's columns and no rows.
  pub fn finish(self) -> Table {
    let mut table = self.table
      .unwrap_or_else(|| Table::new(self.names.iter().cloned()));
    table.skipped = self.skipped;
    return table;
  }

  /// Parses from a BufRead instance.
  pub fn parse_bufread<R: BufRead>(
    reader: R,
    policy: MalformedPolicy
  ) -> Result<Table, LoadError> {
    let mut parser = Self::new();
    for line in reader.lines() {
      if let LineResponse::Skipped(reason) = parser.consume(&line?) {
        match policy {
          MalformedPolicy::Warn => warn!(
            "Skipping line {}: {}.",
            parser.total_lines,
            reason
          ),
          MalformedPolicy::Fail => return Err(LoadError::Malformed {
            line: parser.total_lines,
            reason,
          }),
        }
      }
    }
    if parser.section == Section::Start {
      return Err(LoadError::NoHeader);
    }
    return Ok(parser.finish());
  }

  /// Utility method -- reads and parses a file. The table is named after the
  /// file stem.
  pub fn parse_file<S: AsRef<Path>>(
    p: S,
    policy: MalformedPolicy
  ) -> Result<Table, LoadError> {
    let file = File::open(p.as_ref())
      .map_err(|e| LoadError::Io(p.as_ref().to_path_buf(), e))?;
    let mut table = Self::parse_bufread(BufReader::new(file), policy)
      .map_err(|e| e.at(p.as_ref()))?;
    table.name = p.as_ref().file_stem()
      .and_then(|s| s.to_str())
      .map(String::from);
    return Ok(table);
  }
}

