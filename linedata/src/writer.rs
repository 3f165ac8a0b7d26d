//! Writes tables back out in the same format Tecplot uses for extracted data,
//! so they can be fed to anything that reads those files.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use itertools::Itertools;

use crate::table::Table;

/// Writes a table in export format: a `VARIABLES` line with quoted names, a
/// `ZONE` line, and one row per line.
pub fn write_table<W: Write>(table: &Table, mut w: W) -> io::Result<()> {
  let names = table.names().iter().map(|n| format!("\"{}\"", n)).join(" ");
  writeln!(w, "VARIABLES = {}", names)?;
  writeln!(
    w,
    "ZONE T=\"{}\", I={}, F=POINT",
    table.name.as_deref().unwrap_or("Extracted Line"),
    table.nrows()
  )?;
  for row in table.rows() {
    writeln!(w, " {}", row.iter().map(|x| format!("{:e}", x)).join(" "))?;
  }
  return Ok(());
}

/// Writes a table into a file, creating or truncating it.
pub fn write_table_file<P: AsRef<Path>>(table: &Table, p: P) -> io::Result<()> {
  let mut w = BufWriter::new(File::create(p)?);
  write_table(table, &mut w)?;
  return w.flush();
}
