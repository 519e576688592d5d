//! Running machine position folded over tokenized lines

use layerkit_core::Position;

use super::tokens::GcodeTokens;

/// Last known value per axis
///
/// Starts at the origin. Axes absent from a line keep their previous value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionTracker {
    position: Position,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position
    pub fn position(&self) -> Position {
        self.position
    }

    /// Fold one token set into the position
    ///
    /// Returns the new position and whether any of X, Y or Z was present.
    /// Presence counts even when the value equals the old one.
    pub fn apply(&mut self, tokens: &GcodeTokens) -> (Position, bool) {
        if let Some(x) = tokens.x {
            self.position.x = x;
        }
        if let Some(y) = tokens.y {
            self.position.y = y;
        }
        if let Some(z) = tokens.z {
            self.position.z = z;
        }
        (self.position, tokens.has_coordinate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcode::tokens::tokenize;
    use layerkit_core::Point3;

    #[test]
    fn test_absent_axes_persist() {
        let mut tracker = PositionTracker::new();
        tracker.apply(&tokenize("G1 X1 Y2 Z3"));
        let (pos, changed) = tracker.apply(&tokenize("G1 X5"));
        assert!(changed);
        assert_eq!(pos, Point3::new(5.0, 2.0, 3.0));
    }

    #[test]
    fn test_no_axis_means_unchanged() {
        let mut tracker = PositionTracker::new();
        tracker.apply(&tokenize("G1 X1"));
        let (pos, changed) = tracker.apply(&tokenize("G1 F1200 E3"));
        assert!(!changed);
        assert_eq!(pos, Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_same_value_still_counts_as_change() {
        let mut tracker = PositionTracker::new();
        let (_, changed) = tracker.apply(&tokenize("G1 X0"));
        assert!(changed);
    }
}
