use layerkit_core::{CollectingSink, Edge, NullSink, Point3, Severity};
use layerkit_parser::dialect::{LineParser, UnrecognizedPolicy};
use layerkit_parser::gcode::{self, tokenize, GcodeDialect, PositionTracker};
use proptest::prelude::*;

#[test]
fn test_single_extrusion_after_positioning() {
    let mut sink = CollectingSink::new();
    let parsed = gcode::parse_str("G1 X0 Y0 Z0 E0\nG1 X1 Y0 Z0 E1\n", &mut sink).unwrap();
    assert_eq!(
        parsed.toolpath.points(),
        &[Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)]
    );
    assert_eq!(parsed.toolpath.connectivity(), &[Edge::new(0, 1)]);
}

#[test]
fn test_zero_extrusion_move_still_updates_position() {
    let mut sink = CollectingSink::new();
    let parsed = gcode::parse_str("G1 X0 Y0 E1\nG1 X1 Y0 E0\nG1 X2 Y0 E1\n", &mut sink).unwrap();

    // The first edge runs from the origin to itself; the second starts at the
    // position reached by the non-extruding move.
    assert_eq!(
        parsed.toolpath.points(),
        &[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ]
    );
    assert_eq!(
        parsed.toolpath.connectivity(),
        &[Edge::new(0, 1), Edge::new(2, 3)]
    );
    assert_eq!(parsed.stats.moves, 3);
    assert_eq!(parsed.stats.extrusions, 2);
}

#[test]
fn test_unknown_lines_warn_and_continue() {
    let mut sink = CollectingSink::new();
    let text = "M104 S210\nG1 X1 Y1 E1\nT0\n\nG1 X2 Y1 E2\n";
    let parsed = gcode::parse_str(text, &mut sink).unwrap();
    assert_eq!(parsed.toolpath.edge_count(), 2);
    assert_eq!(sink.count(Severity::Warning), 2);
    let lines: Vec<_> = sink
        .diagnostics()
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .map(|d| d.line)
        .collect();
    assert_eq!(lines, vec![Some(1), Some(3)]);
}

#[test]
fn test_strict_policy_rejects_unknown_gcode() {
    let mut sink = CollectingSink::new();
    let parser = LineParser::with_policy(GcodeDialect::new(), UnrecognizedPolicy::Abort);
    let err = parser.parse_str("G1 X1 E1\nM107\n", &mut sink).unwrap_err();
    assert_eq!(err.line(), 2);
}

#[test]
fn test_parse_file_matches_parse_str() {
    use std::io::Write;

    let text = "; generated\nG0 X0 Y0 Z0.2\nG1 X5 Y0 E0.4\nG1 X5 Y5 E0.8\nG0 Z0.4\nG1 X0 Y5 E1.2\n";
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();

    let from_file = gcode::parse_file(file.path(), &mut CollectingSink::new()).unwrap();
    let from_str = gcode::parse_str(text, &mut CollectingSink::new()).unwrap();
    assert_eq!(from_file.toolpath, from_str.toolpath);
    assert_eq!(from_file.toolpath.edge_count(), 3);
}

fn parse_lines(lines: &[String]) -> gcode::ParsedGcode {
    gcode::parser()
        .parse_lines(lines, &mut NullSink)
        .expect("gcode never aborts under the warn policy")
}

fn axis_value() -> impl Strategy<Value = Option<f64>> {
    prop::option::of((-200i32..200).prop_map(|v| v as f64 / 4.0))
}

fn motion_line() -> impl Strategy<Value = String> {
    (axis_value(), axis_value(), axis_value(), prop::option::of(-1i32..4)).prop_map(|(x, y, z, e)| {
        let mut line = String::from("G1");
        for (letter, value) in [('X', x), ('Y', y), ('Z', z)] {
            if let Some(v) = value {
                line.push_str(&format!(" {}{}", letter, v));
            }
        }
        if let Some(e) = e {
            line.push_str(&format!(" E{}", e));
        }
        line
    })
}

proptest! {
    #[test]
    fn absent_axes_keep_their_value(lines in prop::collection::vec(motion_line(), 1..40)) {
        let mut tracker = PositionTracker::new();
        for line in &lines {
            let tokens = tokenize(line);
            let before = tracker.position();
            let (after, _) = tracker.apply(&tokens);
            if tokens.x.is_none() { prop_assert_eq!(after.x, before.x); }
            if tokens.y.is_none() { prop_assert_eq!(after.y, before.y); }
            if tokens.z.is_none() { prop_assert_eq!(after.z, before.z); }
        }
    }

    #[test]
    fn edges_reference_existing_points(lines in prop::collection::vec(motion_line(), 1..60)) {
        let parsed = parse_lines(&lines);
        let path = &parsed.toolpath;
        prop_assert!(path.validate().is_ok());
        for edge in path.connectivity() {
            prop_assert!(edge.from < edge.to);
        }
        prop_assert_eq!(path.edge_count(), parsed.stats.extrusions);
    }

    #[test]
    fn chained_extrusions_reuse_start_point(lines in prop::collection::vec(motion_line(), 1..60)) {
        let parsed = parse_lines(&lines);
        let path = &parsed.toolpath;
        // consecutive edges that share a point share its index
        for pair in path.connectivity().windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if path.points()[a.to] == path.points()[b.from] {
                prop_assert_eq!(a.to, b.from);
            }
        }
    }
}
