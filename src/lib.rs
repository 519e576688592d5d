//! # layerkit
//!
//! Converts 3D printing toolpaths between line-oriented formats:
//! - slicer G-code (extrusion moves become toolpath edges)
//! - CLI (Common Layer Interface) layers, hatches and polylines
//! - legacy VTK polydata and plain text meshes for inspection
//! - a hexahedron geometry file for the bounding box of a print
//!
//! ## Architecture
//!
//! layerkit is organized as a workspace with multiple crates:
//!
//! 1. **layerkit-core** - Toolpath model, bounding box, errors, diagnostics
//! 2. **layerkit-settings** - Configuration file
//! 3. **layerkit-parser** - G-code and CLI dialects, bounding box scan
//! 4. **layerkit-export** - Text, VTK, G-code, CLI and geometry writers
//! 5. **layerkit** - Command line tool that integrates all crates

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;

pub mod convert;

pub use convert::{
    compute_bbox, convert_cli_file, convert_gcode_file, default_output, ConversionReport,
    OutputKind,
};
pub use layerkit_core::{BoundingBox, Point3, Toolpath};
pub use layerkit_settings::{Config, LoggingSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - `RUST_LOG` support, falling back to the configured level
/// - Console output on stderr, human readable or JSON lines
/// - An optional log file that receives the same records without colors
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .with_context(|| format!("invalid log level '{}'", settings.level))?;

    let console_layer = (!settings.json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
    });

    let json_layer = settings
        .json
        .then(|| fmt::layer().json().with_writer(std::io::stderr));

    let file_layer = match &settings.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(json_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")?;

    Ok(())
}
