//! Axis-aligned bounding box accumulated from raw coordinate streams

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::Point3;

/// Default layer height in mm
pub const DEFAULT_LAYER_HEIGHT: f64 = 0.2;

/// Default nozzle diameter in mm
pub const DEFAULT_NOZZLE_DIAMETER: f64 = 0.4;

/// Cartesian axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
            Self::Z => write!(f, "z"),
        }
    }
}

/// Bounding box with print parameters
///
/// Starts empty (min = +inf, max = -inf) and grows as coordinates stream in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub z_min: f64,
    pub z_max: f64,
    /// Layer height used when inflating the box downwards
    pub layer_height: f64,
    /// Nozzle diameter used when inflating the box sideways
    pub nozzle_diameter: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundingBox {
    /// Create an empty bounding box with default print parameters
    pub fn new() -> Self {
        Self::with_parameters(DEFAULT_LAYER_HEIGHT, DEFAULT_NOZZLE_DIAMETER)
    }

    /// Create an empty bounding box with explicit print parameters
    pub fn with_parameters(layer_height: f64, nozzle_diameter: f64) -> Self {
        Self {
            x_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_min: f64::INFINITY,
            y_max: f64::NEG_INFINITY,
            z_min: f64::INFINITY,
            z_max: f64::NEG_INFINITY,
            layer_height,
            nozzle_diameter,
        }
    }

    /// Box of the given dimensions centered at the origin
    pub fn from_dimensions(length: f64, width: f64, height: f64) -> Self {
        Self::from_center_half_lengths(
            Point3::ORIGIN,
            length / 2.0,
            width / 2.0,
            height / 2.0,
        )
    }

    /// Box from a center and half lengths along each axis
    pub fn from_center_half_lengths(
        center: Point3,
        half_length: f64,
        half_width: f64,
        half_height: f64,
    ) -> Self {
        let mut bb = Self::new();
        bb.x_min = -half_length;
        bb.x_max = half_length;
        bb.y_min = -half_width;
        bb.y_max = half_width;
        bb.z_min = -half_height;
        bb.z_max = half_height;
        bb.translate(center);
        bb
    }

    /// Extend one axis with a new value
    ///
    /// The minimum moves only for values strictly below it and the maximum
    /// only for values strictly above it; anything in between is ignored.
    pub fn update(&mut self, axis: Axis, value: f64) {
        let (min, max) = match axis {
            Axis::X => (&mut self.x_min, &mut self.x_max),
            Axis::Y => (&mut self.y_min, &mut self.y_max),
            Axis::Z => (&mut self.z_min, &mut self.z_max),
        };
        if value < *min {
            *min = value;
        }
        if value > *max {
            *max = value;
        }
    }

    /// Extend all three axes with a point
    pub fn update_point(&mut self, point: &Point3) {
        self.update(Axis::X, point.x);
        self.update(Axis::Y, point.y);
        self.update(Axis::Z, point.z);
    }

    /// Whether every axis has seen at least one value
    pub fn is_valid(&self) -> bool {
        self.x_min.is_finite()
            && self.x_max.is_finite()
            && self.y_min.is_finite()
            && self.y_max.is_finite()
            && self.z_min.is_finite()
            && self.z_max.is_finite()
    }

    /// Extent along each axis
    pub fn dimensions(&self) -> (f64, f64, f64) {
        (
            self.x_max - self.x_min,
            self.y_max - self.y_min,
            self.z_max - self.z_min,
        )
    }

    /// Largest of the three extents
    pub fn max_dimension(&self) -> f64 {
        let (dx, dy, dz) = self.dimensions();
        dx.max(dy).max(dz)
    }

    /// Per-axis midpoint
    pub fn center(&self) -> Point3 {
        Point3::new(
            (self.x_max + self.x_min) / 2.0,
            (self.y_max + self.y_min) / 2.0,
            (self.z_max + self.z_min) / 2.0,
        )
    }

    /// Cube sharing this box's center, with side equal to the largest extent
    pub fn bounding_cube(&self) -> Self {
        let half = self.max_dimension() / 2.0;
        let mut cube = Self::from_center_half_lengths(self.center(), half, half, half);
        cube.layer_height = self.layer_height;
        cube.nozzle_diameter = self.nozzle_diameter;
        cube
    }

    /// Constant translation by vector `offset`
    pub fn translate(&mut self, offset: Point3) {
        self.x_min += offset.x;
        self.x_max += offset.x;
        self.y_min += offset.y;
        self.y_max += offset.y;
        self.z_min += offset.z;
        self.z_max += offset.z;
    }

    /// Account for extrusion width and the base layer
    ///
    /// Grows X and Y by half a nozzle diameter on each side and lowers the
    /// bottom by one layer height.
    pub fn inflate(&mut self) {
        let half_nozzle = self.nozzle_diameter / 2.0;
        self.z_min -= self.layer_height;
        self.x_min -= half_nozzle;
        self.y_min -= half_nozzle;
        self.x_max += half_nozzle;
        self.y_max += half_nozzle;
    }

    /// The eight corners in hexahedron node order
    ///
    /// Order: (xmin,ymax,zmax), (xmin,ymax,zmin), (xmin,ymin,zmax),
    /// (xmax,ymax,zmax), (xmin,ymin,zmin), (xmax,ymax,zmin),
    /// (xmax,ymin,zmax), (xmax,ymin,zmin).
    pub fn hexahedron_nodes(&self) -> [Point3; 8] {
        [
            Point3::new(self.x_min, self.y_max, self.z_max),
            Point3::new(self.x_min, self.y_max, self.z_min),
            Point3::new(self.x_min, self.y_min, self.z_max),
            Point3::new(self.x_max, self.y_max, self.z_max),
            Point3::new(self.x_min, self.y_min, self.z_min),
            Point3::new(self.x_max, self.y_max, self.z_min),
            Point3::new(self.x_max, self.y_min, self.z_max),
            Point3::new(self.x_max, self.y_min, self.z_min),
        ]
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bounding box:")?;
        writeln!(f, "Min x: {}", self.x_min)?;
        writeln!(f, "Max x: {}", self.x_max)?;
        writeln!(f, "Min y: {}", self.y_min)?;
        writeln!(f, "Max y: {}", self.y_max)?;
        writeln!(f, "Min z: {}", self.z_min)?;
        writeln!(f, "Max z: {}", self.z_max)?;
        writeln!(f, "Layer height: {}", self.layer_height)?;
        writeln!(f, "Max dimension: {}", self.max_dimension())?;
        write!(f, "Center: {}", self.center())
    }
}
