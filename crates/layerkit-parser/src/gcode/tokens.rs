//! Single-line G-code tokenizer

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::dialect::Classify;

/// What kind of line a token set came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GcodeKind {
    /// `;` or `//` comment line
    Comment,
    /// Whitespace only
    Blank,
    /// Motion or machine instruction, with its literal code (`G1`, `G01`, ...)
    Instruction(String),
    /// Nothing recognizable at the start of the line
    Unknown,
}

/// Values found on one G-code line
///
/// A `None` axis means "unchanged", which is not the same as an explicit zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GcodeTokens {
    pub kind: GcodeKind,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub e: Option<f64>,
    pub f: Option<f64>,
}

impl GcodeTokens {
    fn empty(kind: GcodeKind) -> Self {
        Self {
            kind,
            x: None,
            y: None,
            z: None,
            e: None,
            f: None,
        }
    }

    /// Whether X, Y or Z appears on the line
    pub fn has_coordinate(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.z.is_some()
    }

    /// Whether the line moves an axis while extruding (`E > 0`)
    pub fn has_extrusion(&self) -> bool {
        self.has_coordinate() && self.e.is_some_and(|e| e > 0.0)
    }

    /// Numeric part of a `G` instruction code
    pub fn motion_code(&self) -> Option<u32> {
        match &self.kind {
            GcodeKind::Instruction(code) => code.get(1..).and_then(|n| n.parse().ok()),
            _ => None,
        }
    }

    pub fn is_comment(&self) -> bool {
        self.kind == GcodeKind::Comment
    }
}

impl Classify for GcodeTokens {
    fn is_blank(&self) -> bool {
        self.kind == GcodeKind::Blank
    }

    fn is_unrecognized(&self) -> bool {
        self.kind == GcodeKind::Unknown
    }
}

fn line_type_regex() -> &'static Regex {
    static LINE_TYPE_REGEX: OnceLock<Regex> = OnceLock::new();
    LINE_TYPE_REGEX.get_or_init(|| {
        Regex::new(r"^\s*(?:(?P<comment>;|//)|(?P<code>G\d+))").expect("invalid regex pattern")
    })
}

pub(crate) fn coordinate_regex() -> &'static Regex {
    static COORDINATE_REGEX: OnceLock<Regex> = OnceLock::new();
    COORDINATE_REGEX.get_or_init(|| {
        Regex::new(r"([XYZEF])([+-]?(?:\d+\.?\d*|\.\d+))").expect("invalid regex pattern")
    })
}

/// Tokenize one raw line
///
/// Never fails: anything that is not a comment, blank or `G` instruction is
/// tagged [`GcodeKind::Unknown`], with its coordinates still extracted.
pub fn tokenize(line: &str) -> GcodeTokens {
    let kind = match line_type_regex().captures(line) {
        Some(caps) if caps.name("comment").is_some() => return GcodeTokens::empty(GcodeKind::Comment),
        Some(caps) => match caps.name("code") {
            Some(code) => GcodeKind::Instruction(code.as_str().to_string()),
            None => GcodeKind::Unknown,
        },
        None if line.trim().is_empty() => return GcodeTokens::empty(GcodeKind::Blank),
        None => GcodeKind::Unknown,
    };

    let mut tokens = GcodeTokens::empty(kind);
    for caps in coordinate_regex().captures_iter(line) {
        let Ok(value) = caps[2].parse::<f64>() else {
            continue;
        };
        match &caps[1] {
            "X" => tokens.x = Some(value),
            "Y" => tokens.y = Some(value),
            "Z" => tokens.z = Some(value),
            "E" => tokens.e = Some(value),
            "F" => tokens.f = Some(value),
            _ => {}
        }
    }
    tokens
}
