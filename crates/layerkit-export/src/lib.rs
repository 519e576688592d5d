//! # layerkit Export
//!
//! Writers for a finished [`Toolpath`]. Every writer renders into any
//! [`Write`] implementation and checks the connectivity before the first
//! byte goes out, so a broken model never produces a partial file.

pub mod cli;
pub mod femuss;
pub mod gcode;
pub mod text;
pub mod vtk;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use layerkit_core::{ExportError, Toolpath};

pub use cli::{CliWriter, CliWriterOptions};
pub use femuss::{write_bbox_geometry, write_bbox_geometry_file};
pub use gcode::{GcodeWriter, GcodeWriterOptions};
pub use text::{TextLayout, TextWriter};
pub use vtk::VtkWriter;

/// A toolpath output format
pub trait ToolpathWriter {
    /// Render the toolpath into `out`
    fn write_to(&self, toolpath: &Toolpath, out: &mut dyn Write) -> Result<(), ExportError>;

    /// Render the toolpath into a string
    fn render(&self, toolpath: &Toolpath) -> Result<String, ExportError> {
        let mut buf = Vec::new();
        self.write_to(toolpath, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write the toolpath to `path`
    ///
    /// The file is only created once the toolpath has been validated.
    fn write_file(&self, toolpath: &Toolpath, path: &Path) -> Result<(), ExportError> {
        toolpath.validate()?;
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        self.write_to(toolpath, &mut out)?;
        out.flush()?;
        tracing::info!(
            "Wrote {} points, {} edges to {}",
            toolpath.point_count(),
            toolpath.edge_count(),
            path.display()
        );
        Ok(())
    }
}
