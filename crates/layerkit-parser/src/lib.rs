//! # layerkit Parser
//!
//! Line-oriented parsers for the two toolpath dialects layerkit reads.
//!
//! - [`gcode`]: extrusion moves of slicer G-code become toolpath edges
//! - [`cli`]: layers, hatches and polylines of ASCII CLI files
//! - [`dialect`]: the generic [`LineParser`] both dialects run on
//! - [`bbox_scan`]: bounding box of the motion commands in a G-code file
//!
//! Every entry point takes an explicit [`layerkit_core::DiagnosticSink`].

pub mod bbox_scan;
pub mod cli;
pub mod dialect;
pub mod gcode;
pub mod reader;

pub use bbox_scan::{scan_gcode_bbox, scan_gcode_bbox_str, BboxScan, BboxScanOptions, BboxScanner, DEFAULT_END_MARKER};
pub use cli::{CliDialect, CliDocument, CliHeader, CliRecord};
pub use dialect::{Classify, Dialect, LineParser, UnrecognizedPolicy};
pub use gcode::{GcodeDialect, GcodeTokens, ParsedGcode, PositionTracker, SegmentBuilder};
pub use reader::{FileReadStats, ReadControl, ToolpathFileReader};
