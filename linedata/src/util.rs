//! This module implements utility functions without much need for defining
//! context or not enough of it to warrant them having their own modules.

use itertools::Itertools;

/// The keyword that ends the variable list and starts a block of data.
pub const ZONE_SENTINEL: &str = "ZONE";

/// Breaks a line into whitespace-separated tokens.
pub(crate) fn tokens(line: &str) -> impl Iterator<Item = &str> {
  return line.split_whitespace();
}

/// Returns whatever is left of a line after skipping its first `n` tokens.
/// Keeps the inner spacing of the remainder intact, so quoted names with
/// spaces in them survive.
pub(crate) fn skip_tokens(line: &str, n: usize) -> &str {
  let mut rest = line.trim_start();
  for _ in 0..n {
    match rest.find(char::is_whitespace) {
      Some(end) => rest = rest[end..].trim_start(),
      None => return "",
    }
  }
  return rest;
}

/// Extracts variable names from a chunk of header text.
///
/// When the text has double quotes in it, every quoted segment is a name
/// (inner spaces included). Otherwise, every token is a name. A dangling,
/// unterminated quote takes the rest of the text.
pub(crate) fn split_names(text: &str) -> Vec<String> {
  if !text.contains('"') {
    return tokens(text).map(String::from).collect();
  }
  let mut names: Vec<String> = Vec::new();
  let mut parts = text.split('"');
  // everything before the first quote is noise
  parts.next();
  while let Some(inside) = parts.next() {
    let name = inside.trim();
    if !name.is_empty() {
      names.push(name.to_string());
    }
    // the text between a closing quote and the next opening one
    if parts.next().is_none() {
      break;
    }
  }
  return names;
}

/// Extracts variable names from a header line after the first. Quoted names
/// are taken as in [`split_names`]; an unquoted line is one name, its tokens
/// joined by single spaces.
pub(crate) fn line_names(line: &str) -> Vec<String> {
  if line.contains('"') {
    return split_names(line);
  }
  let name = tokens(line).join(" ");
  return if name.is_empty() { Vec::new() } else { vec![name] };
}

/// Checks if a token is the sentinel that begins a data block.
pub(crate) fn is_sentinel(token: &str) -> bool {
  return token == ZONE_SENTINEL;
}

/// Tries to parse a token as a float, tolerating stray quotes.
pub(crate) fn parse_float(token: &str) -> Option<f64> {
  return token.trim_matches('"').parse::<f64>().ok();
}
