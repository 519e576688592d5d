//! Bounding box as an eight-node hexahedron geometry file
//!
//! Coordinates are given in millimetres and written with an `e-3` suffix so
//! the reader sees metres.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use layerkit_core::{BoundingBox, ExportError};

/// Node ordering of the single hexahedron element
const ELEMENT_LINE: &str = "1 8 4 1 2 6 7 3 5 8";

/// Write the geometry block for `bbox`
pub fn write_bbox_geometry(bbox: &BoundingBox, out: &mut dyn Write) -> Result<(), ExportError> {
    if !bbox.is_valid() {
        return Err(ExportError::InvalidOption {
            option: "bbox".to_string(),
            reason: "bounding box is empty".to_string(),
        });
    }

    writeln!(out, "ELEMENTS NEWFORMAT")?;
    writeln!(out, "{}", ELEMENT_LINE)?;
    writeln!(out, "COORDINATES")?;
    for (i, node) in bbox.hexahedron_nodes().iter().enumerate() {
        writeln!(
            out,
            "{:2}{:12.2}e-3{:12.2}e-3{:12.2}e-3",
            i + 1,
            node.x,
            node.y,
            node.z
        )?;
    }
    writeln!(out, "END_COORDINATES")?;
    writeln!(out, "END_ELEMENTS")?;
    Ok(())
}

/// Write the geometry block to `path`
pub fn write_bbox_geometry_file(bbox: &BoundingBox, path: &Path) -> Result<(), ExportError> {
    let mut buf = Vec::new();
    write_bbox_geometry(bbox, &mut buf)?;

    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(&buf)?;
    out.flush()?;
    tracing::info!("Wrote bounding box to {}", path.display());
    Ok(())
}
