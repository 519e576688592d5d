//! Segment reconstruction from a stream of G-code token sets

use layerkit_core::{Position, Toolpath};
use serde::Serialize;

use super::tokens::{GcodeKind, GcodeTokens};
use super::tracker::PositionTracker;

/// Counters collected while building a toolpath
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GcodeStats {
    /// Lines handed to the builder
    pub lines: usize,
    pub comments: usize,
    pub blanks: usize,
    /// Lines that were neither comment, blank nor instruction
    pub unknown: usize,
    /// Lines that carried at least one of X, Y, Z
    pub moves: usize,
    /// Moves with positive extrusion, one edge each
    pub extrusions: usize,
}

/// Builds points and connectivity from extruding moves
///
/// Keeps the previous and current position. Every extruding move adds an
/// edge from the previous to the current position; the start point is
/// reused when it equals the last point already stored.
#[derive(Debug, Clone, Default)]
pub struct SegmentBuilder {
    tracker: PositionTracker,
    prev: Position,
    curr: Position,
    toolpath: Toolpath,
    stats: GcodeStats,
}

impl SegmentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one token set
    pub fn push(&mut self, tokens: &GcodeTokens) {
        self.stats.lines += 1;
        match tokens.kind {
            GcodeKind::Comment => {
                self.stats.comments += 1;
                return;
            }
            GcodeKind::Blank => {
                self.stats.blanks += 1;
                return;
            }
            GcodeKind::Unknown => self.stats.unknown += 1,
            GcodeKind::Instruction(_) => {}
        }

        let (position, changed) = self.tracker.apply(tokens);
        if changed {
            self.stats.moves += 1;
            self.prev = self.curr;
            self.curr = position;
        }

        if tokens.has_extrusion() {
            self.stats.extrusions += 1;
            self.toolpath.push_point_dedup(self.prev);
            self.toolpath.push_point(self.curr);
            self.toolpath.connect_last_two();
        }
    }

    /// Current machine position
    pub fn position(&self) -> Position {
        self.curr
    }

    pub fn toolpath(&self) -> &Toolpath {
        &self.toolpath
    }

    pub fn stats(&self) -> GcodeStats {
        self.stats
    }

    /// Finish and hand out the toolpath with the counters
    pub fn finish(self) -> (Toolpath, GcodeStats) {
        (self.toolpath, self.stats)
    }
}
