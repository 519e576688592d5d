use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use layerkit::{init_logging, Config, BUILD_DATE, VERSION};

mod commands;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    cli.apply_logging_overrides(&mut config);
    init_logging(&config.logging)?;
    tracing::debug!("layerkit {} built {}", VERSION, BUILD_DATE);

    match cli.command {
        Command::Gcode2cli(args) => args.run(&config),
        Command::Gcode2vtk(args) => args.run(&config),
        Command::Gcode2txt(args) => args.run(&config),
        Command::Cli2gcode(args) => args.run(&config),
        Command::Cli2vtk(args) => args.run(&config),
        Command::Bbox(args) => args.run(&config),
    }
}

#[derive(Parser)]
#[command(
    name = "layerkit",
    version,
    long_version = LONG_VERSION,
    about = "Convert 3D printing toolpaths between G-code, CLI, VTK and text"
)]
struct Cli {
    /// Configuration file (.toml or .json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also write log records to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn apply_logging_overrides(&self, config: &mut Config) {
        if let Some(path) = &self.log_file {
            config.logging.log_file = Some(path.clone());
        }
        if self.log_json {
            config.logging.json = true;
        }
        match self.verbose {
            0 => {}
            1 => config.logging.level = "debug".to_string(),
            _ => config.logging.level = "trace".to_string(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Convert G-code to a CLI hatch file.
    #[command(name = "gcode2cli")]
    Gcode2cli(commands::gcode::Gcode2CliArgs),
    /// Convert G-code to a VTK polydata file.
    #[command(name = "gcode2vtk")]
    Gcode2vtk(commands::gcode::Gcode2VtkArgs),
    /// Convert G-code to a plain text mesh.
    #[command(name = "gcode2txt")]
    Gcode2txt(commands::gcode::Gcode2TxtArgs),
    /// Convert a CLI file to G-code.
    #[command(name = "cli2gcode")]
    Cli2gcode(commands::cli::Cli2GcodeArgs),
    /// Convert a CLI file to a VTK polydata file.
    #[command(name = "cli2vtk")]
    Cli2vtk(commands::cli::Cli2VtkArgs),
    /// Write the bounding box of a G-code file as a hexahedron.
    Bbox(commands::bbox::BboxArgs),
}
