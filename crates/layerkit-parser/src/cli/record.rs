//! CLI record tokenizer
//!
//! A CLI line is either a `//` comment or a `$$KEYWORD/args` directive
//! (a single `$` is accepted too). Numbers are read from the arguments only.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::dialect::Classify;

/// Directive keywords understood by the CLI dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CliKeyword {
    HeaderStart,
    Ascii,
    Units,
    Version,
    Layers,
    HeaderEnd,
    GeometryStart,
    Layer,
    Hatches,
    Polyline,
    Date,
    Dimension,
    Label,
    GeometryEnd,
}

impl CliKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HeaderStart => "HEADERSTART",
            Self::Ascii => "ASCII",
            Self::Units => "UNITS",
            Self::Version => "VERSION",
            Self::Layers => "LAYERS",
            Self::HeaderEnd => "HEADEREND",
            Self::GeometryStart => "GEOMETRYSTART",
            Self::Layer => "LAYER",
            Self::Hatches => "HATCHES",
            Self::Polyline => "POLYLINE",
            Self::Date => "DATE",
            Self::Dimension => "DIMENSION",
            Self::Label => "LABEL",
            Self::GeometryEnd => "GEOMETRYEND",
        }
    }
}

impl FromStr for CliKeyword {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "HEADERSTART" => Self::HeaderStart,
            "ASCII" => Self::Ascii,
            "UNITS" => Self::Units,
            "VERSION" => Self::Version,
            "LAYERS" => Self::Layers,
            "HEADEREND" => Self::HeaderEnd,
            "GEOMETRYSTART" => Self::GeometryStart,
            "LAYER" => Self::Layer,
            "HATCHES" => Self::Hatches,
            "POLYLINE" => Self::Polyline,
            "DATE" => Self::Date,
            "DIMENSION" => Self::Dimension,
            "LABEL" => Self::Label,
            "GEOMETRYEND" => Self::GeometryEnd,
            _ => return Err(()),
        })
    }
}

impl fmt::Display for CliKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tokenized CLI line
#[derive(Debug, Clone, PartialEq)]
pub enum CliRecord {
    Comment,
    Blank,
    /// Start of a layer at height `z`
    Layer { z: f64 },
    /// Units factor applied to every coordinate once the file is read
    Units { factor: f64 },
    /// `count` hatches, four coordinates each
    Hatches {
        model_id: usize,
        count: usize,
        coords: Vec<f64>,
    },
    /// Open or closed polyline with `count` points
    Polyline {
        model_id: usize,
        direction: usize,
        count: usize,
        coords: Vec<f64>,
    },
    /// Header and framing directives, with their raw arguments
    Header {
        keyword: CliKeyword,
        numbers: Vec<f64>,
        args: String,
    },
    /// Known keyword with missing or unusable fields
    Malformed { keyword: CliKeyword, reason: String },
    /// Unknown keyword, or a line that is neither directive nor comment
    Unrecognized { keyword: Option<String> },
}

impl Classify for CliRecord {
    fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized { .. })
    }
}

fn directive_regex() -> &'static Regex {
    static DIRECTIVE_REGEX: OnceLock<Regex> = OnceLock::new();
    DIRECTIVE_REGEX.get_or_init(|| Regex::new(r"^\s*\$\$?(\w+)").expect("invalid regex pattern"))
}

fn comment_regex() -> &'static Regex {
    static COMMENT_REGEX: OnceLock<Regex> = OnceLock::new();
    COMMENT_REGEX.get_or_init(|| Regex::new(r"^\s*//").expect("invalid regex pattern"))
}

fn number_regex() -> &'static Regex {
    static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();
    NUMBER_REGEX.get_or_init(|| Regex::new(r"[+-]?(?:\d*\.)?\d+").expect("invalid regex pattern"))
}

/// Every number in `text`, in order
pub fn extract_numbers(text: &str) -> Vec<f64> {
    number_regex()
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Non-negative integral value as a count or id
fn as_count(value: f64) -> Option<usize> {
    if value >= 0.0 && value.fract() == 0.0 && value <= usize::MAX as f64 {
        Some(value as usize)
    } else {
        None
    }
}

fn malformed(keyword: CliKeyword, reason: impl Into<String>) -> CliRecord {
    CliRecord::Malformed {
        keyword,
        reason: reason.into(),
    }
}

/// Tokenize one raw line
pub fn tokenize(line: &str) -> CliRecord {
    if line.trim().is_empty() {
        return CliRecord::Blank;
    }

    let Some(caps) = directive_regex().captures(line) else {
        if comment_regex().is_match(line) {
            return CliRecord::Comment;
        }
        return CliRecord::Unrecognized { keyword: None };
    };

    let name = &caps[1];
    let Ok(keyword) = name.parse::<CliKeyword>() else {
        return CliRecord::Unrecognized {
            keyword: Some(name.to_string()),
        };
    };

    let rest = caps.get(0).map_or("", |m| &line[m.end()..]);
    let args = rest.trim().trim_start_matches('/').trim().to_string();
    let numbers = extract_numbers(rest);

    match keyword {
        CliKeyword::Layer => match numbers.first() {
            Some(&z) => CliRecord::Layer { z },
            None => malformed(keyword, "missing layer height"),
        },
        CliKeyword::Units => match numbers.first() {
            Some(&factor) if factor > 0.0 => CliRecord::Units { factor },
            Some(_) => malformed(keyword, "units factor must be positive"),
            None => malformed(keyword, "missing units factor"),
        },
        CliKeyword::Hatches => {
            if numbers.len() < 2 {
                return malformed(keyword, "expected model id and hatch count");
            }
            match (as_count(numbers[0]), as_count(numbers[1])) {
                (Some(model_id), Some(count)) => CliRecord::Hatches {
                    model_id,
                    count,
                    coords: numbers[2..].to_vec(),
                },
                _ => malformed(keyword, "model id and hatch count must be non-negative integers"),
            }
        }
        CliKeyword::Polyline => {
            if numbers.len() < 3 {
                return malformed(keyword, "expected model id, direction and point count");
            }
            match (as_count(numbers[0]), as_count(numbers[1]), as_count(numbers[2])) {
                (Some(model_id), Some(direction), Some(count)) => CliRecord::Polyline {
                    model_id,
                    direction,
                    count,
                    coords: numbers[3..].to_vec(),
                },
                _ => malformed(
                    keyword,
                    "model id, direction and point count must be non-negative integers",
                ),
            }
        }
        _ => CliRecord::Header {
            keyword,
            numbers,
            args,
        },
    }
}
