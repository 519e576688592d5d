//! Dialect-generic line parser
//!
//! Both toolpath dialects follow the same shape: tokenize a line into a
//! record, fold the record into builder state, and hand out the finished
//! model at the end. [`LineParser`] drives any [`Dialect`] through that loop
//! and applies one policy for lines the dialect does not recognize.

use std::path::Path;

use layerkit_core::{Diagnostic, DiagnosticSink, ParseError};

use crate::reader::{ReadControl, ToolpathFileReader};

/// What to do with a line the dialect cannot classify
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnrecognizedPolicy {
    /// Report a warning and keep folding the record
    Warn,
    /// Stop the run with [`ParseError::UnrecognizedLine`]
    Abort,
}

/// Line classification shared by every dialect record
pub trait Classify {
    /// Whitespace-only line; skipped without a diagnostic
    fn is_blank(&self) -> bool;

    /// Line the dialect does not know
    fn is_unrecognized(&self) -> bool;
}

/// A line-oriented toolpath dialect
pub trait Dialect {
    type Record: Classify;
    type Output;

    /// Short name used in log messages
    const NAME: &'static str;

    /// Classify one raw line
    fn tokenize(&self, line: &str) -> Self::Record;

    /// Fold one record into the builder state
    fn apply(&mut self, record: Self::Record, line_no: usize) -> Result<(), ParseError>;

    /// Produce the finished model
    fn finish(self) -> Result<Self::Output, ParseError>;

    /// Policy used when the caller does not choose one
    fn default_policy() -> UnrecognizedPolicy;
}

/// Drives a dialect over a stream of lines
#[derive(Debug)]
pub struct LineParser<D: Dialect> {
    dialect: D,
    policy: UnrecognizedPolicy,
    line_no: usize,
    unrecognized: usize,
}

impl<D: Dialect> LineParser<D> {
    /// Create a parser with the dialect's default policy
    pub fn new(dialect: D) -> Self {
        Self::with_policy(dialect, D::default_policy())
    }

    pub fn with_policy(dialect: D, policy: UnrecognizedPolicy) -> Self {
        Self {
            dialect,
            policy,
            line_no: 0,
            unrecognized: 0,
        }
    }

    /// Feed the next line
    pub fn feed_line(&mut self, line: &str, sink: &mut dyn DiagnosticSink) -> Result<(), ParseError> {
        self.line_no += 1;
        let line_no = self.line_no;
        let record = self.dialect.tokenize(line);

        if record.is_blank() {
            return Ok(());
        }

        if record.is_unrecognized() {
            self.unrecognized += 1;
            let text = line.trim().to_string();
            match self.policy {
                UnrecognizedPolicy::Abort => {
                    let err = ParseError::UnrecognizedLine {
                        line: line_no,
                        text,
                    };
                    sink.report(Diagnostic::error(Some(line_no), err.to_string()));
                    return Err(err);
                }
                UnrecognizedPolicy::Warn => {
                    sink.report(Diagnostic::warning(
                        line_no,
                        format!("Type of line not detected: \"{}\"", text),
                    ));
                }
            }
        }

        tracing::trace!(line = line_no, "{}", line);
        self.dialect.apply(record, line_no).inspect_err(|err| {
            sink.report(Diagnostic::error(Some(line_no), err.to_string()));
        })
    }

    /// Finish the run and return the model
    pub fn finish(self, sink: &mut dyn DiagnosticSink) -> Result<D::Output, ParseError> {
        let lines = self.line_no;
        let unrecognized = self.unrecognized;
        let output = self.dialect.finish()?;
        tracing::debug!("{} parse finished: {} lines", D::NAME, lines);
        sink.report(Diagnostic::info(format!(
            "{}: read {} lines, {} unrecognized",
            D::NAME,
            lines,
            unrecognized
        )));
        Ok(output)
    }

    /// Parse every line of an iterator
    pub fn parse_lines<I, S>(mut self, lines: I, sink: &mut dyn DiagnosticSink) -> Result<D::Output, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.feed_line(line.as_ref(), sink)?;
        }
        self.finish(sink)
    }

    /// Parse an in-memory document
    pub fn parse_str(self, text: &str, sink: &mut dyn DiagnosticSink) -> Result<D::Output, ParseError> {
        self.parse_lines(text.lines(), sink)
    }

    /// Stream a file through the parser
    ///
    /// A [`ParseError`] is kept as the root cause of the returned error and
    /// can be recovered with `downcast_ref`.
    pub fn parse_file(mut self, path: impl AsRef<Path>, sink: &mut dyn DiagnosticSink) -> anyhow::Result<D::Output> {
        let reader = ToolpathFileReader::new(path)?;
        let stats = reader.read_lines(|_, line| {
            self.feed_line(line, sink)?;
            Ok(ReadControl::Continue)
        })?;
        tracing::debug!(
            "Read {} ({} bytes, {} lines)",
            reader.path().display(),
            stats.bytes_read,
            stats.lines_read
        );
        Ok(self.finish(sink)?)
    }
}
