//! Error handling for layerkit
//!
//! Provides error types for every stage of a conversion run:
//! - Parse errors (CLI directives, hatch and polyline records)
//! - Export errors (writing meshes, G-code and CLI files)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Parse error type
///
/// Every variant is fatal to the conversion run that raised it. There is no
/// partial-success mode: either the whole toolpath is produced or nothing is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Line could not be classified by a strict dialect
    #[error("Line type not found at line {line}: \"{text}\"")]
    UnrecognizedLine {
        /// The 1-based line number.
        line: usize,
        /// The offending line, trimmed.
        text: String,
    },

    /// A HATCHES record declares a different number of hatches than it carries
    #[error(
        "Incorrect number of coordinates at line {line}: {declared} hatches need {expected} values, found {found}"
    )]
    HatchCountMismatch {
        /// The 1-based line number.
        line: usize,
        /// The declared hatch count.
        declared: usize,
        /// The number of coordinates implied by the declared count.
        expected: usize,
        /// The number of coordinates actually present.
        found: usize,
    },

    /// A POLYLINE record declares a different number of points than it carries
    #[error(
        "Incorrect number of coordinates at line {line}: {declared} points need {expected} values, found {found}"
    )]
    PolylineCountMismatch {
        /// The 1-based line number.
        line: usize,
        /// The declared point count.
        declared: usize,
        /// The number of coordinates implied by the declared count.
        expected: usize,
        /// The number of coordinates actually present.
        found: usize,
    },

    /// A record is missing mandatory fields
    #[error("Malformed {record} record at line {line}: {reason}")]
    MalformedRecord {
        /// The 1-based line number.
        line: usize,
        /// The directive keyword.
        record: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl ParseError {
    /// Line number the error refers to
    pub fn line(&self) -> usize {
        match self {
            Self::UnrecognizedLine { line, .. }
            | Self::HatchCountMismatch { line, .. }
            | Self::PolylineCountMismatch { line, .. }
            | Self::MalformedRecord { line, .. } => *line,
        }
    }
}

/// Export error type
#[derive(Error, Debug)]
pub enum ExportError {
    /// An edge points outside of the point list
    #[error("Edge {edge} references point {index} but only {len} points exist")]
    DanglingEdge {
        /// Position of the edge in the connectivity list.
        edge: usize,
        /// The out-of-range point index.
        index: usize,
        /// Number of points in the model.
        len: usize,
    },

    /// Invalid writer option
    #[error("Invalid export option '{option}': {reason}")]
    InvalidOption {
        /// The option name.
        option: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// I/O error while writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hatch_mismatch_display() {
        let err = ParseError::HatchCountMismatch {
            line: 7,
            declared: 2,
            expected: 8,
            found: 7,
        };
        assert_eq!(
            err.to_string(),
            "Incorrect number of coordinates at line 7: 2 hatches need 8 values, found 7"
        );
        assert_eq!(err.line(), 7);
    }

    #[test]
    fn test_unrecognized_display() {
        let err = ParseError::UnrecognizedLine {
            line: 3,
            text: "$$FOO/1".to_string(),
        };
        assert_eq!(err.to_string(), "Line type not found at line 3: \"$$FOO/1\"");
    }
}
