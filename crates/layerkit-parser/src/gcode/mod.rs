//! G-code dialect
//!
//! Extrusion moves become edges of the toolpath. Travel moves only move the
//! tracked position. Comments and blank lines are skipped.

pub mod builder;
pub mod tokens;
pub mod tracker;

use std::path::Path;

use layerkit_core::{DiagnosticSink, ParseError, Toolpath};

use crate::dialect::{Dialect, LineParser, UnrecognizedPolicy};

pub use builder::{GcodeStats, SegmentBuilder};
pub use tokens::{tokenize, GcodeKind, GcodeTokens};
pub use tracker::PositionTracker;

/// Result of a G-code parse
#[derive(Debug, Clone, Default)]
pub struct ParsedGcode {
    pub toolpath: Toolpath,
    pub stats: GcodeStats,
}

/// G-code dialect driven by [`LineParser`]
#[derive(Debug, Clone, Default)]
pub struct GcodeDialect {
    builder: SegmentBuilder,
}

impl GcodeDialect {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Dialect for GcodeDialect {
    type Record = GcodeTokens;
    type Output = ParsedGcode;

    const NAME: &'static str = "gcode";

    fn tokenize(&self, line: &str) -> GcodeTokens {
        tokenize(line)
    }

    fn apply(&mut self, record: GcodeTokens, _line_no: usize) -> Result<(), ParseError> {
        self.builder.push(&record);
        Ok(())
    }

    fn finish(self) -> Result<ParsedGcode, ParseError> {
        let (toolpath, stats) = self.builder.finish();
        tracing::debug!(
            "G-code: {} moves, {} extrusions, {} points",
            stats.moves,
            stats.extrusions,
            toolpath.point_count()
        );
        Ok(ParsedGcode { toolpath, stats })
    }

    fn default_policy() -> UnrecognizedPolicy {
        UnrecognizedPolicy::Warn
    }
}

/// Parser for the G-code dialect with its default policy
pub fn parser() -> LineParser<GcodeDialect> {
    LineParser::new(GcodeDialect::new())
}

/// Parse G-code text into a toolpath
pub fn parse_str(text: &str, sink: &mut dyn DiagnosticSink) -> Result<ParsedGcode, ParseError> {
    parser().parse_str(text, sink)
}

/// Parse a G-code file into a toolpath
pub fn parse_file(path: impl AsRef<Path>, sink: &mut dyn DiagnosticSink) -> anyhow::Result<ParsedGcode> {
    parser().parse_file(path, sink)
}
