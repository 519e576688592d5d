//! CLI (Common Layer Interface) output
//!
//! Every edge is written as a single hatch on the layer of its start point.
//! A `$$LAYER` line is emitted whenever that height changes.

use std::io::Write;

use layerkit_core::{ExportError, Point3, Toolpath};

use crate::ToolpathWriter;

/// CLI format version written in the header
const CLI_VERSION: u32 = 200;

/// Options for [`CliWriter`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CliWriterOptions {
    /// Added to the destination Y of every hatch, in file units
    ///
    /// Some simulators reject a hatch whose end coincides with the start of
    /// the next one.
    pub y_shift: f64,
    /// Wrap the geometry in a header block
    pub header: bool,
    /// Units factor; coordinates are divided by it on output
    ///
    /// Any factor other than 1 forces the header so the `$$UNITS` line is
    /// there to undo the division when the file is read back.
    pub units: f64,
}

impl Default for CliWriterOptions {
    fn default() -> Self {
        Self {
            y_shift: 1e-4,
            header: false,
            units: 1.0,
        }
    }
}

/// CLI writer
#[derive(Debug, Clone, Copy, Default)]
pub struct CliWriter {
    options: CliWriterOptions,
}

impl CliWriter {
    pub fn new(options: CliWriterOptions) -> Result<Self, ExportError> {
        if !(options.units > 0.0) || !options.units.is_finite() {
            return Err(ExportError::InvalidOption {
                option: "units".to_string(),
                reason: format!("must be a positive number, got {}", options.units),
            });
        }
        if !options.y_shift.is_finite() {
            return Err(ExportError::InvalidOption {
                option: "y_shift".to_string(),
                reason: "must be finite".to_string(),
            });
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &CliWriterOptions {
        &self.options
    }

    fn writes_header(&self) -> bool {
        self.options.header || self.options.units != 1.0
    }

    fn to_file_units(&self, p: Point3) -> Point3 {
        if self.options.units == 1.0 {
            p
        } else {
            p.scaled(1.0 / self.options.units)
        }
    }
}

/// Number of `$$LAYER` lines the body will contain
fn layer_changes(toolpath: &Toolpath) -> usize {
    let mut current: Option<f64> = None;
    let mut count = 0;
    for (start, _) in toolpath.segments() {
        if current != Some(start.z) {
            current = Some(start.z);
            count += 1;
        }
    }
    count
}

impl ToolpathWriter for CliWriter {
    fn write_to(&self, toolpath: &Toolpath, out: &mut dyn Write) -> Result<(), ExportError> {
        toolpath.validate()?;

        let header = self.writes_header();
        if header {
            writeln!(out, "$$HEADERSTART")?;
            writeln!(out, "$$ASCII")?;
            writeln!(out, "$$UNITS/{}", self.options.units)?;
            writeln!(out, "$$VERSION/{}", CLI_VERSION)?;
            writeln!(out, "$$LAYERS/{}", layer_changes(toolpath))?;
            writeln!(out, "$$HEADEREND")?;
            writeln!(out, "$$GEOMETRYSTART")?;
        }

        let mut current_z: Option<f64> = None;
        for (start, end) in toolpath.segments() {
            let start = self.to_file_units(start);
            let end = self.to_file_units(end);

            if current_z != Some(start.z) {
                current_z = Some(start.z);
                writeln!(out, "$$LAYER/{}", start.z)?;
            }

            writeln!(
                out,
                "$$HATCHES/1 1 {:.4} {:.4} {:.4} {:.4}",
                start.x,
                start.y,
                end.x,
                end.y + self.options.y_shift
            )?;
        }

        if header {
            writeln!(out, "$$GEOMETRYEND")?;
        }
        Ok(())
    }
}
