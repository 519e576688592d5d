//! G-code generation from a toolpath
//!
//! Each edge becomes a rapid move to its start point followed by an
//! extruding linear move to its end point.

use std::io::Write;

use layerkit_core::{ExportError, Toolpath};

use crate::ToolpathWriter;

/// Extrusion added per edge
const EXTRUSION_STEP: f64 = 0.1;

/// Options for [`GcodeWriter`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GcodeWriterOptions {
    /// Feed rate written as a leading `G1 F..` line
    pub feed_rate: Option<f64>,
}

/// G-code writer
#[derive(Debug, Clone, Copy, Default)]
pub struct GcodeWriter {
    options: GcodeWriterOptions,
}

impl GcodeWriter {
    pub fn new(options: GcodeWriterOptions) -> Result<Self, ExportError> {
        if let Some(rate) = options.feed_rate {
            if !(rate > 0.0) || !rate.is_finite() {
                return Err(ExportError::InvalidOption {
                    option: "feed_rate".to_string(),
                    reason: format!("must be a positive number, got {}", rate),
                });
            }
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &GcodeWriterOptions {
        &self.options
    }
}

impl ToolpathWriter for GcodeWriter {
    fn write_to(&self, toolpath: &Toolpath, out: &mut dyn Write) -> Result<(), ExportError> {
        toolpath.validate()?;

        if let Some(rate) = self.options.feed_rate {
            writeln!(out, "G1 F{}", rate)?;
        }

        let mut last_z: Option<f64> = None;
        for (k, (start, end)) in toolpath.segments().enumerate() {
            if last_z == Some(start.z) {
                writeln!(out, "G0 X{} Y{}", start.x, start.y)?;
            } else {
                writeln!(out, "G0 X{} Y{} Z{}", start.x, start.y, start.z)?;
            }

            let e = (k + 1) as f64 * EXTRUSION_STEP;
            if end.z != start.z {
                writeln!(out, "G1 X{} Y{} Z{} E{:.2}", end.x, end.y, end.z, e)?;
            } else {
                writeln!(out, "G1 X{} Y{} E{:.2}", end.x, end.y, e)?;
            }
            last_z = Some(end.z);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerkit_core::{Edge, Point3};

    fn two_layers() -> Toolpath {
        Toolpath::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.2),
                Point3::new(1.0, 0.0, 0.2),
                Point3::new(1.0, 1.0, 0.2),
                Point3::new(0.0, 0.0, 0.4),
                Point3::new(2.0, 0.0, 0.4),
            ],
            vec![Edge::new(0, 1), Edge::new(1, 2), Edge::new(3, 4)],
        )
    }

    #[test]
    fn test_moves_and_extrusion() {
        let text = GcodeWriter::default().render(&two_layers()).unwrap();
        assert_eq!(
            text,
            "G0 X0 Y0 Z0.2\n\
             G1 X1 Y0 E0.10\n\
             G0 X1 Y0\n\
             G1 X1 Y1 E0.20\n\
             G0 X0 Y0 Z0.4\n\
             G1 X2 Y0 E0.30\n"
        );
    }

    #[test]
    fn test_feed_rate_line() {
        let writer = GcodeWriter::new(GcodeWriterOptions {
            feed_rate: Some(1800.0),
        })
        .unwrap();
        let text = writer.render(&two_layers()).unwrap();
        assert!(text.starts_with("G1 F1800\nG0 X0 Y0 Z0.2\n"));
    }

    #[test]
    fn test_edge_changing_z_writes_z() {
        let path = Toolpath::from_parts(
            vec![Point3::new(0.0, 0.0, 0.2), Point3::new(0.0, 0.0, 0.4)],
            vec![Edge::new(0, 1)],
        );
        let text = GcodeWriter::default().render(&path).unwrap();
        assert_eq!(text, "G0 X0 Y0 Z0.2\nG1 X0 Y0 Z0.4 E0.10\n");
    }

    #[test]
    fn test_invalid_feed_rate() {
        assert!(GcodeWriter::new(GcodeWriterOptions {
            feed_rate: Some(0.0)
        })
        .is_err());
    }
}
