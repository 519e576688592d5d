use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use layerkit::{compute_bbox, Config};
use layerkit_core::TracingSink;
use layerkit_export::write_bbox_geometry_file;
use layerkit_parser::BboxScanOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BoxType {
    /// The bounding box itself
    Box,
    /// Cube around the box center, side equal to its largest extent
    Cube,
}

#[derive(Args)]
pub struct BboxArgs {
    /// Path to the input G-code file.
    pub input: PathBuf,

    /// Path to the geometry file to write.
    ///
    /// Defaults to `bbox.geo.dat`.
    pub output: Option<PathBuf>,

    /// Shape to write.
    #[arg(long = "type", value_enum, default_value_t = BoxType::Box)]
    pub box_type: BoxType,

    /// Only print the box, do not write a file.
    #[arg(short = 'n', long)]
    pub nono: bool,

    /// Keep the raw extrema; do not inflate by nozzle width and base layer.
    #[arg(long)]
    pub literal: bool,

    /// Layer height in mm; inferred from the file when omitted.
    #[arg(long)]
    pub layer_height: Option<f64>,

    /// Nozzle diameter in mm.
    #[arg(long)]
    pub nozzle: Option<f64>,
}

impl BboxArgs {
    pub fn run(&self, config: &Config) -> Result<()> {
        let options = BboxScanOptions {
            layer_height: self.layer_height.or(config.bbox.layer_height),
            nozzle_diameter: self.nozzle.unwrap_or(config.bbox.nozzle_diameter),
            literal: self.literal || config.bbox.literal,
            end_marker: config.bbox.end_marker.clone(),
        };

        let scan = compute_bbox(&self.input, options, &mut TracingSink)?;
        let bbox = match self.box_type {
            BoxType::Box => scan.bbox,
            BoxType::Cube => scan.bbox.bounding_cube(),
        };

        println!();
        println!("{}", bbox);
        println!();

        if self.nono {
            return Ok(());
        }

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| config.bbox.output.clone());
        write_bbox_geometry_file(&bbox, &output)
            .with_context(|| format!("failed to write {}", output.display()))?;

        let written = fs::read_to_string(&output)
            .with_context(|| format!("failed to read back {}", output.display()))?;
        print!("{}", written);
        Ok(())
    }
}
