//! Toolpath geometry model shared by every dialect and exporter
//!
//! A toolpath is an ordered point list plus a connectivity list of directed
//! edges. Parsers only ever append to it; exporters only ever read it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ExportError;

/// Point in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

/// Current machine position while folding G-code lines
pub type Position = Point3;

impl Point3 {
    /// Origin (0, 0, 0)
    pub const ORIGIN: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new point
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Multiply every coordinate by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Largest per-axis distance to another point
    pub fn max_abs_diff(&self, other: &Point3) -> f64 {
        (self.x - other.x)
            .abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
    }
}

impl From<(f64, f64, f64)> for Point3 {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Directed edge between two entries of a point list (zero-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Index of the start point
    pub from: usize,
    /// Index of the end point
    pub to: usize,
}

impl Edge {
    /// Create a new edge
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

impl From<(usize, usize)> for Edge {
    fn from((from, to): (usize, usize)) -> Self {
        Self::new(from, to)
    }
}

/// Points plus connectivity
///
/// Both lists are append-only while a parser builds them, and every edge
/// references points that were appended before it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Toolpath {
    points: Vec<Point3>,
    connectivity: Vec<Edge>,
}

impl Toolpath {
    /// Create an empty toolpath
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a toolpath from raw lists without checking edge indices
    ///
    /// Use [`Toolpath::validate`] before handing such a model to a writer.
    pub fn from_parts(points: Vec<Point3>, connectivity: Vec<Edge>) -> Self {
        Self {
            points,
            connectivity,
        }
    }

    /// Point list in insertion order
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Connectivity list in discovery order
    pub fn connectivity(&self) -> &[Edge] {
        &self.connectivity
    }

    /// Append a point and return its index
    pub fn push_point(&mut self, point: Point3) -> usize {
        self.points.push(point);
        self.points.len() - 1
    }

    /// Append `point` unless it equals the last point; return its index either way
    pub fn push_point_dedup(&mut self, point: Point3) -> usize {
        match self.points.last() {
            Some(last) if *last == point => self.points.len() - 1,
            _ => self.push_point(point),
        }
    }

    /// Connect two existing points
    pub fn connect(&mut self, from: usize, to: usize) {
        debug_assert!(
            from < self.points.len() && to < self.points.len(),
            "edge ({from}, {to}) out of range for {} points",
            self.points.len()
        );
        self.connectivity.push(Edge::new(from, to));
    }

    /// Connect the two most recently appended points
    pub fn connect_last_two(&mut self) {
        let len = self.points.len();
        debug_assert!(len >= 2, "need two points to connect, have {len}");
        self.connect(len - 2, len - 1);
    }

    /// Number of points
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.connectivity.len()
    }

    /// Whether the toolpath has no edges
    pub fn is_empty(&self) -> bool {
        self.connectivity.is_empty()
    }

    /// Multiply every coordinate of every point by `factor`
    pub fn scale(&mut self, factor: f64) {
        for point in &mut self.points {
            *point = point.scaled(factor);
        }
    }

    /// Iterate edges as `(start, end)` point pairs
    pub fn segments(&self) -> impl Iterator<Item = (Point3, Point3)> + '_ {
        self.connectivity
            .iter()
            .map(|edge| (self.points[edge.from], self.points[edge.to]))
    }

    /// Check that every edge references an existing point
    pub fn validate(&self) -> Result<(), ExportError> {
        let len = self.points.len();
        for (idx, edge) in self.connectivity.iter().enumerate() {
            for index in [edge.from, edge.to] {
                if index >= len {
                    return Err(ExportError::DanglingEdge {
                        edge: idx,
                        index,
                        len,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_point_dedup_reuses_last() {
        let mut path = Toolpath::new();
        let a = path.push_point_dedup(Point3::new(1.0, 2.0, 3.0));
        let b = path.push_point_dedup(Point3::new(1.0, 2.0, 3.0));
        assert_eq!(a, b);
        assert_eq!(path.point_count(), 1);
    }

    #[test]
    fn test_connect_last_two() {
        let mut path = Toolpath::new();
        path.push_point(Point3::ORIGIN);
        path.push_point(Point3::new(1.0, 0.0, 0.0));
        path.connect_last_two();
        assert_eq!(path.connectivity(), &[Edge::new(0, 1)]);
        let segments: Vec<_> = path.segments().collect();
        assert_eq!(segments, vec![(Point3::ORIGIN, Point3::new(1.0, 0.0, 0.0))]);
    }

    #[test]
    fn test_scale_multiplies_all_axes() {
        let mut path = Toolpath::from_parts(vec![Point3::new(1.0, -2.0, 0.5)], vec![]);
        path.scale(2.0);
        assert_eq!(path.points()[0], Point3::new(2.0, -4.0, 1.0));
    }

    #[test]
    fn test_validate_rejects_dangling_edge() {
        let path = Toolpath::from_parts(vec![Point3::ORIGIN], vec![Edge::new(0, 1)]);
        let err = path.validate().unwrap_err();
        assert!(matches!(
            err,
            ExportError::DanglingEdge {
                edge: 0,
                index: 1,
                len: 1
            }
        ));
    }

    #[test]
    fn test_max_abs_diff() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(0.5, -2.0, 1.0);
        assert_eq!(a.max_abs_diff(&b), 2.0);
    }
}
