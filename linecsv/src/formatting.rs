//! This module implements facilities to customise the display of numbers and
//! column names.

use std::fmt::Write;

use clap::Args;
use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

/// This struct specifies how floats should be formatted.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, Args)]
pub(crate) struct FloatFormat {
  /// Specifies a fixed number of decimal places to display numbers with.
  ///
  /// If absent, numbers are written as short as they can be while still
  /// reading back the same.
  #[arg(long = "decimals")]
  pub(crate) dec_places: Option<usize>,
  /// Use decimals instead of scientific notation.
  #[arg(long = "no-sci", verbatim_doc_comment)]
  pub(crate) no_scientific: bool,
  /// Use a small 'e' for exponents instead of a capital 'E'.
  #[arg(long = "small-e", verbatim_doc_comment)]
  pub(crate) small_e: bool,
}

/// Writes a float in scientific notation with a signed, two-digit exponent,
/// e.g. `1.250000E-03`.
fn fmt_sci<W: Write>(
  f: &mut W,
  x: f64,
  prec: Option<usize>,
  capital: bool
) -> std::fmt::Result {
  if !x.is_finite() {
    return write!(f, "{}", x);
  }
  let s = match prec {
    Some(p) => format!("{:.prec$e}", x, prec = p),
    None => format!("{:e}", x),
  };
  let (mantissa, exponent) = s.split_once('e').unwrap_or((s.as_str(), "0"));
  let exponent: i32 = exponent.parse().unwrap_or(0);
  let e = if capital { 'E' } else { 'e' };
  let sign = if exponent < 0 { '-' } else { '+' };
  return write!(f, "{}{}{}{:02}", mantissa, e, sign, exponent.abs());
}

impl FloatFormat {
  /// Writes an f64 into a formatter.
  pub(crate) fn fmt_f64<W: Write>(&self, f: &mut W, x: f64) -> std::fmt::Result {
    if self.no_scientific {
      return match self.dec_places {
        None => write!(f, "{}", x),
        Some(d) => write!(f, "{:.prec$}", x, prec = d),
      };
    }
    return fmt_sci(f, x, self.dec_places, !self.small_e);
  }

  /// Turns an f64 into a string using this format.
  pub(crate) fn to_string(&self, x: f64) -> String {
    let mut buf = String::new();
    // writing into a String can't fail
    let _ = self.fmt_f64(&mut buf, x);
    return buf;
  }
}

/// Column names as they go in headers.
pub(crate) fn header_name(name: &str, snake: bool) -> String {
  return if snake { name.to_case(Case::Snake) } else { name.to_string() };
}
