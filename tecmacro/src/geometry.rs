//! This module defines basic geometric concepts used to tell Tecplot where to
//! extract data from.

use std::fmt::Display;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A point in space. Written as `[x, y, z]` in scripts.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Point {
  /// The X coordinate.
  pub x: f64,
  /// The Y coordinate.
  pub y: f64,
  /// The Z coordinate.
  pub z: f64,
}

impl Point {
  /// Creates a point from its coordinates.
  pub const fn new(x: f64, y: f64, z: f64) -> Self {
    return Self { x, y, z };
  }
}

impl From<[f64; 3]> for Point {
  fn from(value: [f64; 3]) -> Self {
    return Self::new(value[0], value[1], value[2]);
  }
}

impl From<Point> for [f64; 3] {
  fn from(value: Point) -> Self {
    return [value.x, value.y, value.z];
  }
}

impl From<Point3<f64>> for Point {
  fn from(value: Point3<f64>) -> Self {
    return Self::new(value.x, value.y, value.z);
  }
}

impl From<Point> for Point3<f64> {
  fn from(value: Point) -> Self {
    return Point3::new(value.x, value.y, value.z);
  }
}

impl Display for Point {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return write!(f, "{} {} {}", self.x, self.y, self.z);
  }
}

/// A line made of connected segments, along which Tecplot samples a fixed
/// number of points.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PolyLine {
  /// The nodes, in order.
  pub nodes: Vec<Point>,
  /// The number of points to sample along the whole line.
  #[serde(alias = "numpoints")]
  pub points: usize,
}

impl PolyLine {
  /// Creates a polyline.
  pub fn new(nodes: Vec<Point>, points: usize) -> Self {
    return Self { nodes, points };
  }

  /// A straight segment between two points.
  pub fn segment(from: Point, to: Point, points: usize) -> Self {
    return Self::new(vec![from, to], points);
  }

  /// Total length of the line.
  pub fn length(&self) -> f64 {
    return self.nodes.windows(2)
      .map(|w| (Point3::from(w[1]) - Point3::from(w[0])).norm())
      .sum();
  }
}

/// Normalises a direction, e.g. a slice normal. Returns None for a zero
/// vector.
pub fn unit_vector(v: [f64; 3]) -> Option<[f64; 3]> {
  let n = Vector3::from(v).try_normalize(f64::EPSILON)?;
  return Some([n.x, n.y, n.z]);
}
