//! CLI (Common Layer Interface) dialect
//!
//! Reads ASCII CLI files: layer heights, hatches and polylines become the
//! same points and connectivity model the G-code dialect produces. Any line
//! the dialect does not know aborts the run by default.

pub mod builder;
pub mod record;

use std::path::Path;

use layerkit_core::{DiagnosticSink, ParseError};

use crate::dialect::{Dialect, LineParser, UnrecognizedPolicy};

pub use builder::{CliBuilder, CliDocument, CliHeader, CliStats};
pub use record::{extract_numbers, tokenize, CliKeyword, CliRecord};

/// CLI dialect driven by [`LineParser`]
#[derive(Debug, Clone, Default)]
pub struct CliDialect {
    builder: CliBuilder,
}

impl CliDialect {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Dialect for CliDialect {
    type Record = CliRecord;
    type Output = CliDocument;

    const NAME: &'static str = "cli";

    fn tokenize(&self, line: &str) -> CliRecord {
        tokenize(line)
    }

    fn apply(&mut self, record: CliRecord, line_no: usize) -> Result<(), ParseError> {
        self.builder.push(record, line_no)
    }

    fn finish(self) -> Result<CliDocument, ParseError> {
        let doc = self.builder.finish();
        tracing::debug!(
            "CLI: {} layers, {} hatches, {} polylines",
            doc.stats.layers,
            doc.stats.hatches,
            doc.stats.polylines
        );
        Ok(doc)
    }

    fn default_policy() -> UnrecognizedPolicy {
        UnrecognizedPolicy::Abort
    }
}

/// Parser for the CLI dialect with its default policy
pub fn parser() -> LineParser<CliDialect> {
    LineParser::new(CliDialect::new())
}

/// Parse CLI text into a toolpath
pub fn parse_str(text: &str, sink: &mut dyn DiagnosticSink) -> Result<CliDocument, ParseError> {
    parser().parse_str(text, sink)
}

/// Parse a CLI file into a toolpath
pub fn parse_file(path: impl AsRef<Path>, sink: &mut dyn DiagnosticSink) -> anyhow::Result<CliDocument> {
    parser().parse_file(path, sink)
}
