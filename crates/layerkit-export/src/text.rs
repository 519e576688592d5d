//! Plain text output

use std::io::Write;

use layerkit_core::{ExportError, Toolpath};

use crate::ToolpathWriter;

/// Layout of the text output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextLayout {
    /// `POINTS <n>` block followed by a `LINES <m>` block of index pairs
    #[default]
    Mesh,
    /// One `x1, y1, z1, x2, y2, z2` row per edge under a column header
    Segments,
}

/// Text mesh writer
#[derive(Debug, Clone, Copy, Default)]
pub struct TextWriter {
    pub layout: TextLayout,
}

impl TextWriter {
    pub fn new(layout: TextLayout) -> Self {
        Self { layout }
    }
}

impl ToolpathWriter for TextWriter {
    fn write_to(&self, toolpath: &Toolpath, out: &mut dyn Write) -> Result<(), ExportError> {
        toolpath.validate()?;
        match self.layout {
            TextLayout::Mesh => {
                writeln!(out, "POINTS {}", toolpath.point_count())?;
                for p in toolpath.points() {
                    writeln!(out, "{}, {}, {}", p.x, p.y, p.z)?;
                }
                writeln!(out, "LINES {}", toolpath.edge_count())?;
                for edge in toolpath.connectivity() {
                    writeln!(out, "{}, {}", edge.from, edge.to)?;
                }
            }
            TextLayout::Segments => {
                writeln!(out, "X1, Y1, Z1, X2, Y2, Z2")?;
                for (a, b) in toolpath.segments() {
                    writeln!(out, "{}, {}, {}, {}, {}, {}", a.x, a.y, a.z, b.x, b.y, b.z)?;
                }
            }
        }
        Ok(())
    }
}
