use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use layerkit::{convert_cli_file, default_output, Config, OutputKind};
use layerkit_core::TracingSink;
use layerkit_export::{GcodeWriter, GcodeWriterOptions, VtkWriter};

use super::print_report;

#[derive(Args)]
pub struct Cli2GcodeArgs {
    /// Path to the input CLI file.
    pub input: PathBuf,

    /// Path to the G-code file to write.
    ///
    /// Defaults to the input path with `.CLI` replaced by `.gcode`.
    pub output: Option<PathBuf>,

    /// Feed rate written on a leading `G1 F..` line.
    #[arg(long)]
    pub speed: Option<f64>,
}

impl Cli2GcodeArgs {
    pub fn run(&self, config: &Config) -> Result<()> {
        let writer = GcodeWriter::new(GcodeWriterOptions {
            feed_rate: self.speed.or(config.gcode.feed_rate),
        })?;
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| default_output(&self.input, OutputKind::Gcode));

        let report = convert_cli_file(&self.input, &output, &writer, &mut TracingSink)?;
        print_report(&report);
        Ok(())
    }
}

#[derive(Args)]
pub struct Cli2VtkArgs {
    /// Path to the input CLI file.
    pub input: PathBuf,

    /// Path to the VTK file to write.
    ///
    /// Defaults to `<stem>-cli.vtk` in the working directory.
    pub output: Option<PathBuf>,

    /// Dataset title.
    #[arg(long)]
    pub title: Option<String>,
}

impl Cli2VtkArgs {
    pub fn run(&self, config: &Config) -> Result<()> {
        let writer = VtkWriter::new(self.title.clone().unwrap_or_else(|| config.vtk.title.clone()));
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| default_output(&self.input, OutputKind::CliVtk));

        let report = convert_cli_file(&self.input, &output, &writer, &mut TracingSink)?;
        print_report(&report);
        Ok(())
    }
}
