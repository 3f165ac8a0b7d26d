use std::error::Error;
use std::ffi::OsStr;

use clap::Parser;
use linedata::prelude::*;

use crate::formatting::{header_name, FloatFormat};
use crate::*;

/// A small table with a name that needs converting.
fn table() -> Table {
  let mut t = Table::from_columns([
    ("Z", vec![0.0, 0.00125]),
    ("X Wall Shear", vec![1500.0, -2.5]),
  ]).unwrap();
  t.name = Some("case_line_0".into());
  return t;
}

/// Runs a writer into a string.
fn written<F>(f: F) -> String
where
  F: Fn(&mut Vec<u8>) -> Result<(), Box<dyn Error>>,
{
  let mut buf: Vec<u8> = Vec::new();
  f(&mut buf).unwrap();
  return String::from_utf8(buf).unwrap();
}

#[test]
fn test_float_format() {
  let sci = FloatFormat { dec_places: Some(6), ..Default::default() };
  assert_eq!(sci.to_string(0.00125), "1.250000E-03");
  assert_eq!(sci.to_string(-2.5), "-2.500000E+00");
  let free = FloatFormat::default();
  assert_eq!(free.to_string(0.00125), "1.25E-03");
  assert_eq!(free.to_string(1500.0), "1.5E+03");
  assert_eq!(free.to_string(f64::NAN), "NaN");
  let small = FloatFormat { small_e: true, ..Default::default() };
  assert_eq!(small.to_string(1500.0), "1.5e+03");
  let plain = FloatFormat { no_scientific: true, ..Default::default() };
  assert_eq!(plain.to_string(0.1), "0.1");
  let fixed = FloatFormat { dec_places: Some(2), no_scientific: true, ..Default::default() };
  assert_eq!(fixed.to_string(3.14159), "3.14");
}

#[test]
fn test_header_names() {
  assert_eq!(header_name("X Wall Shear", true), "x_wall_shear");
  assert_eq!(header_name("Dynamic Viscosity", true), "dynamic_viscosity");
  assert_eq!(header_name("X Wall Shear", false), "X Wall Shear");
}

#[test]
fn test_cli_flags() {
  let args = Cli::parse_from([
    "linecsv", "--strict", "--snake", "--decimals", "3", "-d", ";", "in.dat"
  ]);
  assert!(matches!(args.policy(), MalformedPolicy::Fail));
  assert_eq!(args.reals.dec_places, Some(3));
  assert_eq!(args.delim, ';');
  assert_eq!(args.extension(), "csv");
  let json = Cli::parse_from(["linecsv", "--json", "in.dat"]);
  assert!(matches!(json.policy(), MalformedPolicy::Warn));
  assert_eq!(json.extension(), "json");
}

#[test]
fn test_write_csv() {
  let args = Cli::parse_from(["linecsv", "--snake", "-d", ";", "in.dat"]);
  let text = written(|b| write_csv(&table(), b, &args));
  assert_eq!(
    text,
    "z;x_wall_shear\n0E+00;1.5E+03\n1.25E-03;-2.5E+00\n"
  );
  let quoted = Cli::parse_from(["linecsv", "--no-sci", "in.dat"]);
  let text = written(|b| write_csv(&table(), b, &quoted));
  assert_eq!(text, "Z,X Wall Shear\n0,1500\n0.00125,-2.5\n");
}

#[test]
fn test_write_json() {
  let args = Cli::parse_from(["linecsv", "--json", "in.dat"]);
  let text = written(|b| write_json(&table(), b, &args));
  let v: serde_json::Value = serde_json::from_str(&text).unwrap();
  assert_eq!(v["name"], "case_line_0");
  assert_eq!(v["columns"][1]["name"], "X Wall Shear");
  assert_eq!(v["columns"][1]["values"][0], 1500.0);
  assert_eq!(v["skipped"], 0);
}

#[test]
fn test_convert_dir() {
  let dir = tempfile::tempdir().unwrap();
  let input = dir.path().join("extracted");
  let output = dir.path().join("csv");
  std::fs::create_dir(&input).unwrap();
  for name in ["b_line_0.dat", "a_line_0.dat"] {
    write_table_file(&table(), input.join(name)).unwrap();
  }
  let args = Cli::parse_from([
    OsStr::new("linecsv"),
    OsStr::new("-o"),
    output.as_os_str(),
    input.as_os_str(),
  ]);
  convert_dir(&args).unwrap();
  let a = std::fs::read_to_string(output.join("a_line_0.csv")).unwrap();
  assert!(a.starts_with("Z,X Wall Shear\n"));
  assert_eq!(a.lines().count(), 3);
  assert!(output.join("b_line_0.csv").is_file());
  // directories need somewhere to go
  let no_output = Cli::parse_from([OsStr::new("linecsv"), input.as_os_str()]);
  assert!(convert_dir(&no_output).is_err());
}
