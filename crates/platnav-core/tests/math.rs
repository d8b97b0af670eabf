use platnav_core::{GridCell, Vec2};
use proptest::prelude::*;

#[test]
fn rotating_down_by_ninety_points_right() {
    let v = Vec2::DOWN.rotated(90.0);

    assert!((v.x - 1.0).abs() < 1e-6);
    assert!(v.y.abs() < 1e-6);
}

#[test]
fn normalize_zero_stays_zero() {
    assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);
    assert_eq!(Vec2::new(0.0, 3.0).normalize_or_zero(), Vec2::new(0.0, 1.0));
}

#[test]
fn grid_cells_order_by_x_then_y() {
    let mut cells = vec![
        GridCell::new(1, 0),
        GridCell::new(0, 5),
        GridCell::new(0, -2),
    ];
    cells.sort();

    assert_eq!(
        cells,
        vec![GridCell::new(0, -2), GridCell::new(0, 5), GridCell::new(1, 0)]
    );
    assert_eq!(GridCell::new(2, 3).left(), GridCell::new(1, 3));
    assert_eq!(GridCell::new(0, 0).grid_distance(GridCell::new(3, 4)), 5.0);
}

proptest! {
    #[test]
    fn rotation_preserves_length(x in -100.0f32..100.0, y in -100.0f32..100.0, deg in -360.0f32..360.0) {
        let v = Vec2::new(x, y);
        let r = v.rotated(deg);
        prop_assert!((v.length() - r.length()).abs() <= 1e-3 * (1.0 + v.length()));
    }

    #[test]
    fn normalized_vectors_are_unit_or_zero(x in -100.0f32..100.0, y in -100.0f32..100.0) {
        let n = Vec2::new(x, y).normalize_or_zero();
        let len = n.length();
        prop_assert!(len == 0.0 || (len - 1.0).abs() < 1e-4);
    }
}
