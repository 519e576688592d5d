//! Bounding box of the motion commands in a G-code file

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

use layerkit_core::{Axis, BoundingBox, Diagnostic, DiagnosticSink, DEFAULT_LAYER_HEIGHT, DEFAULT_NOZZLE_DIAMETER};

use crate::gcode::tokens::coordinate_regex;
use crate::reader::{ReadControl, ToolpathFileReader};

/// Comment that marks the end of the print body in slicer output
pub const DEFAULT_END_MARKER: &str = ";End of Gcode";

/// Options for a bounding box scan
#[derive(Debug, Clone, PartialEq)]
pub struct BboxScanOptions {
    /// Layer height; inferred from the first Z step when `None`
    pub layer_height: Option<f64>,
    pub nozzle_diameter: f64,
    /// Keep the raw extrema instead of inflating them
    pub literal: bool,
    pub end_marker: String,
}

impl Default for BboxScanOptions {
    fn default() -> Self {
        Self {
            layer_height: None,
            nozzle_diameter: DEFAULT_NOZZLE_DIAMETER,
            literal: false,
            end_marker: DEFAULT_END_MARKER.to_string(),
        }
    }
}

/// Outcome of a scan
#[derive(Debug, Clone, PartialEq)]
pub struct BboxScan {
    pub bbox: BoundingBox,
    /// Lines consumed, including the end marker line
    pub lines_read: usize,
    /// Lines in the whole input, when known
    pub total_lines: Option<usize>,
    pub hit_end_marker: bool,
    /// Whether the layer height came from the file rather than the options
    pub layer_height_inferred: bool,
}

fn motion_regex() -> &'static Regex {
    static MOTION_REGEX: OnceLock<Regex> = OnceLock::new();
    MOTION_REGEX.get_or_init(|| Regex::new(r"^\s*G0?[01]\s").expect("invalid regex pattern"))
}

/// Incremental scanner fed one line at a time
#[derive(Debug, Clone)]
pub struct BboxScanner {
    options: BboxScanOptions,
    bbox: BoundingBox,
    inferred_layer_height: Option<f64>,
    lines_read: usize,
    hit_end_marker: bool,
}

impl BboxScanner {
    pub fn new(options: BboxScanOptions) -> Self {
        let bbox = BoundingBox::with_parameters(
            options.layer_height.unwrap_or(DEFAULT_LAYER_HEIGHT),
            options.nozzle_diameter,
        );
        Self {
            options,
            bbox,
            inferred_layer_height: None,
            lines_read: 0,
            hit_end_marker: false,
        }
    }

    /// Feed the next line; returns [`ReadControl::Stop`] at the end marker
    pub fn feed(&mut self, line: &str) -> ReadControl {
        self.lines_read += 1;

        if motion_regex().is_match(line) {
            let mut x = None;
            let mut y = None;
            let mut z = None;
            for caps in coordinate_regex().captures_iter(line) {
                let Ok(value) = caps[2].parse::<f64>() else {
                    continue;
                };
                match &caps[1] {
                    "X" => x = Some(value),
                    "Y" => y = Some(value),
                    "Z" => z = Some(value),
                    _ => {}
                }
            }

            if let Some(x) = x {
                self.bbox.update(Axis::X, x);
            }
            if let Some(y) = y {
                self.bbox.update(Axis::Y, y);
            }
            if let Some(z) = z {
                self.observe_z(z);
                self.bbox.update(Axis::Z, z);
            }
        }

        if line.contains(self.options.end_marker.as_str()) {
            self.hit_end_marker = true;
            return ReadControl::Stop;
        }
        ReadControl::Continue
    }

    fn observe_z(&mut self, z: f64) {
        if self.options.layer_height.is_some() || self.inferred_layer_height.is_some() {
            return;
        }
        let top = self.bbox.z_max;
        if top.is_finite() && z > top {
            let step = ((z - top) * 100.0).round() / 100.0;
            if step > 0.0 {
                self.inferred_layer_height = Some(step);
            }
        }
    }

    /// Finish the scan, inflating the box unless literal mode was requested
    pub fn finish(self, total_lines: Option<usize>) -> BboxScan {
        let mut bbox = self.bbox;
        if let Some(height) = self.inferred_layer_height {
            bbox.layer_height = height;
        }
        if !self.options.literal && bbox.is_valid() {
            bbox.inflate();
        }
        BboxScan {
            bbox,
            lines_read: self.lines_read,
            total_lines,
            hit_end_marker: self.hit_end_marker,
            layer_height_inferred: self.inferred_layer_height.is_some(),
        }
    }
}

fn report_scan(scan: &BboxScan, sink: &mut dyn DiagnosticSink) {
    if scan.hit_end_marker {
        let total = scan
            .total_lines
            .map_or_else(|| "?".to_string(), |n| n.to_string());
        sink.report(Diagnostic::info(format!(
            "Detected end of file at line {} out of {}",
            scan.lines_read, total
        )));
    }
    if !scan.bbox.is_valid() {
        sink.report(Diagnostic::error(None, "No motion coordinates found"));
    }
}

/// Scan G-code text
pub fn scan_gcode_bbox_str(text: &str, options: BboxScanOptions, sink: &mut dyn DiagnosticSink) -> BboxScan {
    let mut scanner = BboxScanner::new(options);
    for line in text.lines() {
        if scanner.feed(line) == ReadControl::Stop {
            break;
        }
    }
    let scan = scanner.finish(Some(text.lines().count()));
    report_scan(&scan, sink);
    scan
}

/// Scan a G-code file, stopping at the end marker
pub fn scan_gcode_bbox(
    path: impl AsRef<Path>,
    options: BboxScanOptions,
    sink: &mut dyn DiagnosticSink,
) -> anyhow::Result<BboxScan> {
    let reader = ToolpathFileReader::new(path)?;
    tracing::info!("Computing bounding box of {}", reader.path().display());

    let total_lines = reader.count_lines()?;
    let mut scanner = BboxScanner::new(options);
    let stats = reader.read_lines(|_, line| Ok(scanner.feed(line)))?;
    tracing::debug!(
        "Scanned {} bytes, {} lines, stopped early: {}",
        stats.bytes_read,
        stats.lines_read,
        stats.stopped_early
    );

    let scan = scanner.finish(Some(total_lines));
    report_scan(&scan, sink);
    Ok(scan)
}
