use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use layerkit::{convert_gcode_file, default_output, Config, OutputKind};
use layerkit_core::TracingSink;
use layerkit_export::{CliWriter, CliWriterOptions, TextLayout, TextWriter, VtkWriter};

use super::print_report;

#[derive(Args)]
pub struct Gcode2CliArgs {
    /// Path to the input G-code file.
    pub input: PathBuf,

    /// Path to the CLI file to write.
    ///
    /// Defaults to `<stem>.CLI` in the working directory.
    pub output: Option<PathBuf>,

    /// Do not shift the destination Y of each hatch.
    #[arg(long, conflicts_with = "shift")]
    pub no_shift: bool,

    /// Shift added to the destination Y of each hatch.
    #[arg(long)]
    pub shift: Option<f64>,

    /// Write the header block.
    #[arg(long)]
    pub header: bool,

    /// Units factor; coordinates are divided by it and a header is written.
    #[arg(long)]
    pub units: Option<f64>,
}

impl Gcode2CliArgs {
    pub fn run(&self, config: &Config) -> Result<()> {
        let mut y_shift = self.shift.unwrap_or(config.cli.y_shift);
        if self.no_shift || (!config.cli.shift_enabled && self.shift.is_none()) {
            y_shift = 0.0;
        }

        let writer = CliWriter::new(CliWriterOptions {
            y_shift,
            header: self.header || config.cli.write_header,
            units: self.units.unwrap_or(config.cli.units),
        })?;

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| default_output(&self.input, OutputKind::Cli));
        tracing::info!("Writing CLI to {}", output.display());

        let report = convert_gcode_file(&self.input, &output, &writer, &mut TracingSink)?;
        print_report(&report);
        Ok(())
    }
}

#[derive(Args)]
pub struct Gcode2VtkArgs {
    /// Path to the input G-code file.
    pub input: PathBuf,

    /// Path to the VTK file to write.
    ///
    /// Defaults to `<stem>-gcode.vtk` in the working directory.
    pub output: Option<PathBuf>,

    /// Dataset title.
    #[arg(long)]
    pub title: Option<String>,
}

impl Gcode2VtkArgs {
    pub fn run(&self, config: &Config) -> Result<()> {
        let writer = VtkWriter::new(self.title.clone().unwrap_or_else(|| config.vtk.title.clone()));
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| default_output(&self.input, OutputKind::GcodeVtk));

        let report = convert_gcode_file(&self.input, &output, &writer, &mut TracingSink)?;
        print_report(&report);
        Ok(())
    }
}

#[derive(Args)]
pub struct Gcode2TxtArgs {
    /// Path to the input G-code file.
    pub input: PathBuf,

    /// Path to the text file to write.
    ///
    /// Defaults to `<stem>.txt` in the working directory.
    pub output: Option<PathBuf>,

    /// Write one `x1, y1, z1, x2, y2, z2` row per edge instead of a mesh.
    #[arg(long)]
    pub segments: bool,
}

impl Gcode2TxtArgs {
    pub fn run(&self, _config: &Config) -> Result<()> {
        let layout = if self.segments {
            TextLayout::Segments
        } else {
            TextLayout::Mesh
        };
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| default_output(&self.input, OutputKind::Text));

        let report = convert_gcode_file(&self.input, &output, &TextWriter::new(layout), &mut TracingSink)?;
        print_report(&report);
        Ok(())
    }
}
