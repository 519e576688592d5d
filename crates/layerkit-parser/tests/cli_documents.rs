use std::io::Write;

use layerkit_core::{CollectingSink, Edge, ParseError, Point3, Severity};
use layerkit_parser::cli;
use layerkit_parser::dialect::{LineParser, UnrecognizedPolicy};
use layerkit_parser::CliDialect;
use tempfile::NamedTempFile;

fn temp_cli(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_single_hatch_on_layer() {
    let mut sink = CollectingSink::new();
    let doc = cli::parse_str("$$LAYER/0.2\n$$HATCHES/1 1 0 0 1 1\n", &mut sink).unwrap();
    assert_eq!(
        doc.toolpath.points(),
        &[Point3::new(0.0, 0.0, 0.2), Point3::new(1.0, 1.0, 0.2)]
    );
    assert_eq!(doc.toolpath.connectivity(), &[Edge::new(0, 1)]);
}

#[test]
fn test_hatch_with_seven_numbers_aborts() {
    let mut sink = CollectingSink::new();
    let err = cli::parse_str("$$LAYER/0.2\n$$HATCHES/1 2 0 0 1 1 2 2 3\n", &mut sink).unwrap_err();
    assert_eq!(
        err,
        ParseError::HatchCountMismatch {
            line: 2,
            declared: 2,
            expected: 8,
            found: 7,
        }
    );
    assert_eq!(sink.count(Severity::Error), 1);
}

#[test]
fn test_oversized_hatch_count_aborts() {
    let mut sink = CollectingSink::new();
    let err = cli::parse_str("$$LAYER/0.2\n$$HATCHES/1 4611686018427387904 0 0 1 1\n", &mut sink)
        .unwrap_err();
    assert!(matches!(
        err,
        ParseError::HatchCountMismatch {
            line: 2,
            found: 4,
            ..
        }
    ));
    assert_eq!(sink.count(Severity::Error), 1);
}

#[test]
fn test_unknown_directive_aborts_by_default() {
    let mut sink = CollectingSink::new();
    let err = cli::parse_str("$$LAYER/0.2\n$$MAGIC/3\n", &mut sink).unwrap_err();
    assert!(matches!(err, ParseError::UnrecognizedLine { line: 2, .. }));
    assert!(err.to_string().contains("Line type not found"));
}

#[test]
fn test_unknown_directive_skipped_under_warn() {
    let mut sink = CollectingSink::new();
    let parser = LineParser::with_policy(CliDialect::new(), UnrecognizedPolicy::Warn);
    let doc = parser
        .parse_str("$$MAGIC/3\n$$LAYER/1\n$$HATCHES/1 1 0 0 2 0\n", &mut sink)
        .unwrap();
    assert_eq!(doc.toolpath.edge_count(), 1);
    assert_eq!(sink.count(Severity::Warning), 1);
}

#[test]
fn test_full_document_from_file() {
    let file = temp_cli(
        "\
$$HEADERSTART
$$ASCII
$$UNITS/1
$$VERSION/200
$$LAYERS/2
$$HEADEREND

$$GEOMETRYSTART
$$LAYER/0.2
$$HATCHES/1 2 0 0 10 0 10 0 10 10
$$LAYER/0.4
// outline
$$POLYLINE/1 1 4 0 0 10 0 10 10 0 0
$$GEOMETRYEND
",
    );

    let mut sink = CollectingSink::new();
    let doc = cli::parse_file(file.path(), &mut sink).unwrap();
    assert_eq!(doc.header.version, Some(200.0));
    assert_eq!(doc.header.layers, Some(2));
    assert_eq!(doc.stats.layers, 2);
    assert_eq!(doc.stats.hatches, 2);
    assert_eq!(doc.stats.polylines, 1);
    assert_eq!(doc.toolpath.point_count(), 8);
    assert_eq!(doc.toolpath.edge_count(), 5);
    assert_eq!(doc.toolpath.points()[4], Point3::new(0.0, 0.0, 0.4));
    assert!(doc.toolpath.validate().is_ok());
}

#[test]
fn test_parse_file_keeps_parse_error() {
    let file = temp_cli("$$LAYER/0.2\n$$HATCHES/1 2 0 0 1 1\n");
    let err = cli::parse_file(file.path(), &mut CollectingSink::new()).unwrap_err();
    let parse_err = err
        .downcast_ref::<ParseError>()
        .expect("root cause should be a parse error");
    assert!(matches!(parse_err, ParseError::HatchCountMismatch { found: 4, .. }));
}

#[test]
fn test_units_factor_scales_coordinates() {
    let doc = cli::parse_str(
        "$$UNITS/0.001\n$$LAYER/200\n$$HATCHES/1 1 1000 2000 3000 4000\n",
        &mut CollectingSink::new(),
    )
    .unwrap();
    let p = doc.toolpath.points();
    assert!(p[0].max_abs_diff(&Point3::new(1.0, 2.0, 0.2)) < 1e-12);
    assert!(p[1].max_abs_diff(&Point3::new(3.0, 4.0, 0.2)) < 1e-12);
}
