//! Toolpath construction from CLI records

use layerkit_core::{ParseError, Point3, Toolpath};
use serde::Serialize;

use super::record::{CliKeyword, CliRecord};

/// Values captured from the header section
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CliHeader {
    /// Last `$$UNITS` factor seen
    pub units: Option<f64>,
    pub version: Option<f64>,
    /// Declared number of layers
    pub layers: Option<usize>,
    pub date: Option<String>,
    /// `x1, y1, z1, x2, y2, z2` of the part extents
    pub dimension: Option<[f64; 6]>,
    pub labels: Vec<String>,
}

/// Counters collected while building a toolpath
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CliStats {
    pub layers: usize,
    pub hatches: usize,
    pub polylines: usize,
}

/// Result of a CLI parse
#[derive(Debug, Clone, Default)]
pub struct CliDocument {
    pub toolpath: Toolpath,
    pub header: CliHeader,
    pub stats: CliStats,
}

/// Folds CLI records into a toolpath
///
/// Every point takes the height of the latest layer. Coordinates are
/// multiplied by the units factor once, after the whole file has been read.
#[derive(Debug, Clone)]
pub struct CliBuilder {
    curr_z: f64,
    scaling: f64,
    toolpath: Toolpath,
    header: CliHeader,
    stats: CliStats,
}

impl Default for CliBuilder {
    fn default() -> Self {
        Self {
            curr_z: 0.0,
            scaling: 1.0,
            toolpath: Toolpath::new(),
            header: CliHeader::default(),
            stats: CliStats::default(),
        }
    }
}

impl CliBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record
    pub fn push(&mut self, record: CliRecord, line: usize) -> Result<(), ParseError> {
        match record {
            CliRecord::Comment | CliRecord::Blank | CliRecord::Unrecognized { .. } => {}
            CliRecord::Layer { z } => {
                self.curr_z = z;
                self.stats.layers += 1;
            }
            CliRecord::Units { factor } => {
                self.scaling = factor;
                self.header.units = Some(factor);
            }
            CliRecord::Hatches { count, coords, .. } => self.push_hatches(count, &coords, line)?,
            CliRecord::Polyline { count, coords, .. } => self.push_polyline(count, &coords, line)?,
            CliRecord::Header {
                keyword,
                numbers,
                args,
            } => self.capture_header(keyword, &numbers, args),
            CliRecord::Malformed { keyword, reason } => {
                return Err(ParseError::MalformedRecord {
                    line,
                    record: keyword.to_string(),
                    reason,
                });
            }
        }
        Ok(())
    }

    fn push_hatches(&mut self, count: usize, coords: &[f64], line: usize) -> Result<(), ParseError> {
        let expected = count.saturating_mul(4);
        if coords.len() != expected {
            return Err(ParseError::HatchCountMismatch {
                line,
                declared: count,
                expected,
                found: coords.len(),
            });
        }

        for hatch in coords.chunks_exact(4) {
            self.toolpath
                .push_point(Point3::new(hatch[0], hatch[1], self.curr_z));
            self.toolpath
                .push_point(Point3::new(hatch[2], hatch[3], self.curr_z));
            self.toolpath.connect_last_two();
        }
        self.stats.hatches += count;
        Ok(())
    }

    fn push_polyline(&mut self, count: usize, coords: &[f64], line: usize) -> Result<(), ParseError> {
        let expected = count.saturating_mul(2);
        if coords.len() != expected {
            return Err(ParseError::PolylineCountMismatch {
                line,
                declared: count,
                expected,
                found: coords.len(),
            });
        }

        for (i, xy) in coords.chunks_exact(2).enumerate() {
            self.toolpath
                .push_point(Point3::new(xy[0], xy[1], self.curr_z));
            if i > 0 {
                self.toolpath.connect_last_two();
            }
        }
        self.stats.polylines += 1;
        Ok(())
    }

    fn capture_header(&mut self, keyword: CliKeyword, numbers: &[f64], args: String) {
        match keyword {
            CliKeyword::Version => self.header.version = numbers.first().copied(),
            CliKeyword::Layers => {
                self.header.layers = numbers
                    .first()
                    .filter(|n| **n >= 0.0)
                    .map(|n| *n as usize)
            }
            CliKeyword::Date if !args.is_empty() => self.header.date = Some(args),
            CliKeyword::Dimension => {
                if let Ok(dims) = <[f64; 6]>::try_from(numbers) {
                    self.header.dimension = Some(dims);
                }
            }
            CliKeyword::Label if !args.is_empty() => self.header.labels.push(args),
            _ => {}
        }
    }

    /// Apply the units factor and hand out the document
    pub fn finish(self) -> CliDocument {
        let mut toolpath = self.toolpath;
        if self.scaling != 1.0 {
            toolpath.scale(self.scaling);
        }
        CliDocument {
            toolpath,
            header: self.header,
            stats: self.stats,
        }
    }
}
