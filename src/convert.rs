//! File-to-file conversion pipelines
//!
//! Each pipeline parses the whole input before the output file is created,
//! so a fatal parse error never leaves a partial output behind.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use layerkit_core::{Diagnostic, DiagnosticSink, Severity, Toolpath};
use layerkit_export::ToolpathWriter;
use layerkit_parser::{cli, gcode, BboxScan, BboxScanOptions};

/// Kinds of output with a conventional default file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// `<stem>.CLI` from G-code
    Cli,
    /// `<stem>-gcode.vtk` from G-code
    GcodeVtk,
    /// `<stem>.txt` from G-code
    Text,
    /// The input path with its `.cli` extension replaced by `.gcode`
    Gcode,
    /// `<stem>-cli.vtk` from CLI
    CliVtk,
    /// `bbox.geo.dat`
    BboxGeometry,
}

/// Default output path for `input`
///
/// Stem-derived names land in the working directory. The G-code output of a
/// CLI file sits next to its input; an input without a `.cli` extension gets
/// `.gcode` appended so the input is never overwritten.
pub fn default_output(input: &Path, kind: OutputKind) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());

    match kind {
        OutputKind::Cli => PathBuf::from(format!("{stem}.CLI")),
        OutputKind::GcodeVtk => PathBuf::from(format!("{stem}-gcode.vtk")),
        OutputKind::Text => PathBuf::from(format!("{stem}.txt")),
        OutputKind::CliVtk => PathBuf::from(format!("{stem}-cli.vtk")),
        OutputKind::BboxGeometry => PathBuf::from("bbox.geo.dat"),
        OutputKind::Gcode => {
            let is_cli = input
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("cli"));
            if is_cli {
                input.with_extension("gcode")
            } else {
                let mut name = input.as_os_str().to_owned();
                name.push(".gcode");
                PathBuf::from(name)
            }
        }
    }
}

/// Summary of a finished conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub points: usize,
    pub edges: usize,
    /// Warnings reported while parsing
    pub warnings: usize,
}

/// Forwards diagnostics and counts warnings
struct CountingSink<'a> {
    inner: &'a mut dyn DiagnosticSink,
    warnings: usize,
}

impl<'a> CountingSink<'a> {
    fn new(inner: &'a mut dyn DiagnosticSink) -> Self {
        Self { inner, warnings: 0 }
    }
}

impl DiagnosticSink for CountingSink<'_> {
    fn report(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity == Severity::Warning {
            self.warnings += 1;
        }
        self.inner.report(diagnostic);
    }
}

fn write_output(
    toolpath: &Toolpath,
    input: &Path,
    output: &Path,
    writer: &dyn ToolpathWriter,
    warnings: usize,
) -> Result<ConversionReport> {
    writer
        .write_file(toolpath, output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    Ok(ConversionReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        points: toolpath.point_count(),
        edges: toolpath.edge_count(),
        warnings,
    })
}

/// Parse a G-code file and write its toolpath with `writer`
pub fn convert_gcode_file(
    input: &Path,
    output: &Path,
    writer: &dyn ToolpathWriter,
    sink: &mut dyn DiagnosticSink,
) -> Result<ConversionReport> {
    tracing::info!("Reading G-code from {}", input.display());
    let mut counting = CountingSink::new(sink);
    let parsed = gcode::parse_file(input, &mut counting)
        .with_context(|| format!("failed to parse {}", input.display()))?;
    tracing::debug!(
        "{} lines, {} unknown, {} extrusions",
        parsed.stats.lines,
        parsed.stats.unknown,
        parsed.stats.extrusions
    );

    let warnings = counting.warnings;
    write_output(&parsed.toolpath, input, output, writer, warnings)
}

/// Parse a CLI file and write its toolpath with `writer`
pub fn convert_cli_file(
    input: &Path,
    output: &Path,
    writer: &dyn ToolpathWriter,
    sink: &mut dyn DiagnosticSink,
) -> Result<ConversionReport> {
    tracing::info!("Reading CLI from {}", input.display());
    let mut counting = CountingSink::new(sink);
    let doc = cli::parse_file(input, &mut counting)
        .with_context(|| format!("failed to parse {}", input.display()))?;
    if let Some(declared) = doc.header.layers {
        if declared != doc.stats.layers {
            counting.report(Diagnostic {
                severity: Severity::Warning,
                line: None,
                message: format!(
                    "header declares {} layers but {} were found",
                    declared, doc.stats.layers
                ),
            });
        }
    }

    let warnings = counting.warnings;
    write_output(&doc.toolpath, input, output, writer, warnings)
}

/// Bounding box of the motion commands in a G-code file
///
/// Fails when the file holds no motion coordinates at all.
pub fn compute_bbox(
    input: &Path,
    options: BboxScanOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<BboxScan> {
    let scan = layerkit_parser::scan_gcode_bbox(input, options, sink)
        .with_context(|| format!("failed to scan {}", input.display()))?;
    if !scan.bbox.is_valid() {
        bail!("no motion coordinates found in {}", input.display());
    }
    Ok(scan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_outputs() {
        let input = Path::new("prints/benchy.gcode");
        assert_eq!(default_output(input, OutputKind::Cli), PathBuf::from("benchy.CLI"));
        assert_eq!(
            default_output(input, OutputKind::GcodeVtk),
            PathBuf::from("benchy-gcode.vtk")
        );
        assert_eq!(default_output(input, OutputKind::Text), PathBuf::from("benchy.txt"));
        assert_eq!(
            default_output(input, OutputKind::BboxGeometry),
            PathBuf::from("bbox.geo.dat")
        );
    }

    #[test]
    fn test_cli_to_gcode_output_name() {
        assert_eq!(
            default_output(Path::new("jobs/part.CLI"), OutputKind::Gcode),
            PathBuf::from("jobs/part.gcode")
        );
        assert_eq!(
            default_output(Path::new("part.cli"), OutputKind::Gcode),
            PathBuf::from("part.gcode")
        );
        assert_eq!(
            default_output(Path::new("part.txt"), OutputKind::Gcode),
            PathBuf::from("part.txt.gcode")
        );
        assert_eq!(
            default_output(Path::new("part.CLI"), OutputKind::CliVtk),
            PathBuf::from("part-cli.vtk")
        );
    }
}
