use platnav_core::{
    Aabb, CollisionWorld, Occupancy, OccupancyOracle, ProbeConfig, SolidBoxes, Vec2,
};

fn flat_ground() -> SolidBoxes {
    SolidBoxes::new(vec![Aabb::new(
        Vec2::new(-10.0, -1.0),
        Vec2::new(10.0, 0.0),
    )])
}

fn oracle(world: SolidBoxes) -> OccupancyOracle<SolidBoxes> {
    OccupancyOracle::new(world, ProbeConfig::default())
}

#[test]
fn points_inside_ground_are_solid() {
    let oracle = oracle(flat_ground());

    assert!(oracle.is_solid(Vec2::new(0.0, 0.0)));
    assert!(oracle.is_solid(Vec2::new(0.0, -0.5)));
    assert!(!oracle.is_solid(Vec2::new(0.0, 1.0)));
}

#[test]
fn ground_is_found_one_and_two_rows_up_but_not_three() {
    let oracle = oracle(flat_ground());

    assert!(oracle.has_ground_below(Vec2::new(0.0, 1.0), 2.0));
    assert!(oracle.has_ground_below(Vec2::new(0.0, 2.0), 2.0));
    assert!(!oracle.has_ground_below(Vec2::new(0.0, 3.0), 2.0));

    assert!(oracle.is_open_with_support(Vec2::new(4.0, 1.0)));
    assert!(!oracle.is_open_with_support(Vec2::new(4.0, 0.0)));
    assert!(!oracle.is_open_with_support(Vec2::new(20.0, 1.0)));
}

#[test]
fn fan_probe_detects_offset_ledge() {
    // A small ledge down and to the side, out of reach of the overlap and box probes.
    let ledge = SolidBoxes::new(vec![Aabb::new(
        Vec2::new(0.9, 1.4),
        Vec2::new(1.2, 1.5),
    )]);
    let point = Vec2::new(0.0, 3.0);

    let with_fan = oracle(ledge.clone());
    assert!(with_fan.has_ground_below(point, 2.0));

    let straight_only = OccupancyOracle::new(
        ledge,
        ProbeConfig {
            fan_angles: vec![0.0],
            ..ProbeConfig::default()
        },
    );
    assert!(!straight_only.has_ground_below(point, 2.0));
}

#[test]
fn default_box_cast_sweeps_the_box_width() {
    let post = SolidBoxes::new(vec![Aabb::new(
        Vec2::new(0.25, -1.0),
        Vec2::new(0.35, 0.0),
    )]);
    let origin = Vec2::new(0.0, 1.0);

    assert!(post.raycast(origin, Vec2::DOWN, 2.0).is_none());

    let hit = post
        .box_cast(origin, Vec2::new(0.6, 0.1), Vec2::DOWN, 2.0)
        .expect("side ray should hit the post");
    assert!((hit.distance - 1.0).abs() < 1e-5);
    assert!((hit.point.y - 0.0).abs() < 1e-5);
}

#[test]
fn raycast_reports_nearest_surface() {
    let world = SolidBoxes::new(vec![
        Aabb::new(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 0.0)),
        Aabb::new(Vec2::new(-1.0, 2.0), Vec2::new(1.0, 3.0)),
    ]);

    let hit = world
        .raycast(Vec2::new(0.0, 5.0), Vec2::new(0.0, -4.0), 10.0)
        .expect("hit");
    assert!((hit.distance - 2.0).abs() < 1e-5);
    assert_eq!(hit.point, Vec2::new(0.0, 3.0));

    assert!(world
        .raycast(Vec2::new(0.0, 5.0), Vec2::DOWN, 1.5)
        .is_none());

    let inside = world
        .raycast(Vec2::new(0.0, -0.5), Vec2::DOWN, 1.0)
        .expect("origin inside a solid hits immediately");
    assert_eq!(inside.distance, 0.0);
}

#[test]
fn line_of_sight_is_blocked_by_walls() {
    let wall = SolidBoxes::new(vec![Aabb::new(
        Vec2::new(-0.5, 0.0),
        Vec2::new(0.5, 5.0),
    )]);
    let oracle = oracle(wall);

    assert!(!oracle.has_line_of_sight(Vec2::new(-3.0, 1.0), Vec2::new(3.0, 1.0)));
    assert!(oracle.has_line_of_sight(Vec2::new(-3.0, 6.0), Vec2::new(3.0, 6.0)));
    assert!(oracle.is_clear(Vec2::new(-3.0, 1.0), 1.0));
    assert!(!oracle.is_clear(Vec2::new(-1.0, 1.0), 1.0));
}

#[test]
fn ground_height_reads_surface_below() {
    let oracle = oracle(flat_ground());

    assert_eq!(oracle.ground_height(Vec2::new(3.0, 4.0), 10.0), Some(0.0));
    assert_eq!(oracle.ground_height(Vec2::new(3.0, 4.0), 2.0), None);
    assert_eq!(oracle.ground_height(Vec2::new(30.0, 4.0), 10.0), None);
}

#[test]
fn oracle_accepts_borrowed_worlds() {
    let world = flat_ground();
    let oracle = OccupancyOracle::new(&world, ProbeConfig::default());

    assert!(oracle.is_open_with_support(Vec2::new(0.0, 1.0)));
}
