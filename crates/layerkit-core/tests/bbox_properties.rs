use layerkit_core::{Axis, BoundingBox, Point3};
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = f64> {
    -1000.0f64..1000.0
}

fn point() -> impl Strategy<Value = Point3> {
    (coord(), coord(), coord()).prop_map(|(x, y, z)| Point3::new(x, y, z))
}

proptest! {
    #[test]
    fn every_streamed_point_lies_inside(points in prop::collection::vec(point(), 1..64)) {
        let mut bb = BoundingBox::new();
        for p in &points {
            bb.update_point(p);
        }
        prop_assert!(bb.is_valid());
        for p in &points {
            prop_assert!(bb.x_min <= p.x && p.x <= bb.x_max);
            prop_assert!(bb.y_min <= p.y && p.y <= bb.y_max);
            prop_assert!(bb.z_min <= p.z && p.z <= bb.z_max);
        }
    }

    #[test]
    fn cube_encloses_box(points in prop::collection::vec(point(), 2..32)) {
        let mut bb = BoundingBox::new();
        for p in &points {
            bb.update_point(p);
        }
        let cube = bb.bounding_cube();
        let eps = 1e-9;
        prop_assert!(cube.x_min <= bb.x_min + eps && bb.x_max <= cube.x_max + eps);
        prop_assert!(cube.y_min <= bb.y_min + eps && bb.y_max <= cube.y_max + eps);
        prop_assert!(cube.z_min <= bb.z_min + eps && bb.z_max <= cube.z_max + eps);
    }

    #[test]
    fn updates_never_shrink(values in prop::collection::vec(coord(), 1..64)) {
        let mut bb = BoundingBox::new();
        let mut last = (f64::INFINITY, f64::NEG_INFINITY);
        for v in values {
            bb.update(Axis::X, v);
            prop_assert!(bb.x_min <= last.0);
            prop_assert!(bb.x_max >= last.1);
            last = (bb.x_min, bb.x_max);
        }
    }
}
