//! Legacy VTK polydata output

use std::io::Write;

use layerkit_core::{ExportError, Toolpath};

use crate::ToolpathWriter;

/// ASCII VTK polydata writer, one line cell per edge
#[derive(Debug, Clone)]
pub struct VtkWriter {
    /// Dataset title (second line of the file)
    pub title: String,
}

impl Default for VtkWriter {
    fn default() -> Self {
        Self::new("layerkit toolpath")
    }
}

impl VtkWriter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl ToolpathWriter for VtkWriter {
    fn write_to(&self, toolpath: &Toolpath, out: &mut dyn Write) -> Result<(), ExportError> {
        toolpath.validate()?;

        // The title must fit on one line
        let title = self.title.lines().next().unwrap_or_default();

        writeln!(out, "# vtk DataFile Version 2.0")?;
        writeln!(out, "{}", title)?;
        writeln!(out, "ASCII")?;
        writeln!(out, "DATASET POLYDATA")?;
        writeln!(out, "POINTS {} float", toolpath.point_count())?;
        for p in toolpath.points() {
            writeln!(out, "{} {} {}", p.x, p.y, p.z)?;
        }
        let edges = toolpath.edge_count();
        writeln!(out, "LINES {} {}", edges, 3 * edges)?;
        for edge in toolpath.connectivity() {
            writeln!(out, "2 {} {}", edge.from, edge.to)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerkit_core::{Edge, Point3};

    #[test]
    fn test_polydata_layout() {
        let path = Toolpath::from_parts(
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.5, 0.0)],
            vec![Edge::new(0, 1)],
        );
        let text = VtkWriter::new("part").render(&path).unwrap();
        assert_eq!(
            text,
            "# vtk DataFile Version 2.0\npart\nASCII\nDATASET POLYDATA\n\
             POINTS 2 float\n0 0 0\n1 0.5 0\nLINES 1 3\n2 0 1\n"
        );
    }

    #[test]
    fn test_empty_toolpath() {
        let text = VtkWriter::default().render(&Toolpath::new()).unwrap();
        assert!(text.contains("POINTS 0 float\nLINES 0 0\n"));
    }

    #[test]
    fn test_multiline_title_is_cut() {
        let text = VtkWriter::new("first\nsecond")
            .render(&Toolpath::new())
            .unwrap();
        assert_eq!(text.lines().nth(1), Some("first"));
        assert!(!text.contains("second"));
    }
}
