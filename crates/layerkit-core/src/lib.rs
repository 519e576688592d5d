//! # layerkit Core
//!
//! Core types shared by the layerkit crates: the toolpath model
//! (points and connectivity), the bounding box helper, the error
//! taxonomy and the diagnostics sink threaded through every conversion.

pub mod bbox;
pub mod diagnostics;
pub mod error;
pub mod geometry;

pub use bbox::{Axis, BoundingBox, DEFAULT_LAYER_HEIGHT, DEFAULT_NOZZLE_DIAMETER};
pub use diagnostics::{
    CollectingSink, Diagnostic, DiagnosticSink, NullSink, Severity, TracingSink,
};
pub use error::{ExportError, ParseError};
pub use geometry::{Edge, Point3, Position, Toolpath};
