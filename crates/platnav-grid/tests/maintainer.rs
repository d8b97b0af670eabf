use platnav_core::{
    Aabb, GridConfig, MaintainerConfig, OccupancyOracle, ProbeConfig, SolidBoxes, TickContext,
    Vec2,
};
use platnav_grid::{ContinuousMaintainer, GridNavGraph};

fn long_ground() -> OccupancyOracle<SolidBoxes> {
    OccupancyOracle::new(
        SolidBoxes::new(vec![Aabb::new(
            Vec2::new(-200.0, -1.0),
            Vec2::new(200.0, 0.0),
        )]),
        ProbeConfig::default(),
    )
}

fn tick(n: u64) -> TickContext {
    TickContext::new(n, 1.0 / 60.0)
}

#[test]
fn first_update_generates_a_window() {
    let oracle = long_ground();
    let mut graph = GridNavGraph::new(GridConfig::default());
    let mut maintainer = ContinuousMaintainer::new(MaintainerConfig::default());

    let report = maintainer.tick(&mut graph, &oracle, &tick(0), Vec2::new(0.0, 1.0));

    assert!(report.window_generated);
    assert!(report.cells_added > 20);
    assert_eq!(report.cells_pruned, 0);
    assert_eq!(maintainer.last_generation(), Some(Vec2::new(0.0, 1.0)));
}

#[test]
fn stationary_reference_over_covered_window_does_not_regenerate() {
    let oracle = long_ground();
    let mut graph = GridNavGraph::new(GridConfig::default());
    let mut maintainer = ContinuousMaintainer::new(MaintainerConfig::default());
    let reference = Vec2::new(0.0, 1.0);

    maintainer.tick(&mut graph, &oracle, &tick(0), reference);
    let revision = graph.revision();

    for n in [30, 60, 90] {
        let report = maintainer.tick(&mut graph, &oracle, &tick(n), reference);
        assert!(!report.window_generated);
    }
    assert_eq!(graph.revision(), revision);
}

#[test]
fn updates_run_only_on_interval_ticks() {
    let oracle = long_ground();
    let mut graph = GridNavGraph::new(GridConfig::default());
    let mut maintainer = ContinuousMaintainer::new(MaintainerConfig::default());

    let report = maintainer.tick(&mut graph, &oracle, &tick(15), Vec2::new(0.0, 1.0));
    assert!(!report.window_generated);
    assert!(graph.is_empty());

    let report = maintainer.tick(&mut graph, &oracle, &tick(30), Vec2::new(0.0, 1.0));
    assert!(report.window_generated);
}

#[test]
fn moving_far_enough_triggers_a_new_window() {
    let oracle = long_ground();
    let mut graph = GridNavGraph::new(GridConfig::default());
    let mut maintainer = ContinuousMaintainer::new(MaintainerConfig::default());

    maintainer.tick(&mut graph, &oracle, &tick(0), Vec2::new(0.0, 1.0));

    let small = maintainer.tick(&mut graph, &oracle, &tick(30), Vec2::new(5.0, 1.0));
    assert!(!small.window_generated);

    let large = maintainer.tick(&mut graph, &oracle, &tick(60), Vec2::new(12.0, 1.0));
    assert!(large.window_generated);
    assert!(large.cells_added > 0);
    assert_eq!(maintainer.last_generation(), Some(Vec2::new(12.0, 1.0)));
}

#[test]
fn sparse_coverage_triggers_regeneration_without_movement() {
    // A short floor never reaches the minimum cell count.
    let oracle = OccupancyOracle::new(
        SolidBoxes::new(vec![Aabb::new(Vec2::new(-4.0, -1.0), Vec2::new(4.0, 0.0))]),
        ProbeConfig::default(),
    );
    let mut graph = GridNavGraph::new(GridConfig::default());
    let mut maintainer = ContinuousMaintainer::new(MaintainerConfig::default());
    let reference = Vec2::new(0.0, 1.0);

    maintainer.tick(&mut graph, &oracle, &tick(0), reference);
    assert!(graph.len() < 20);

    let report = maintainer.tick(&mut graph, &oracle, &tick(30), reference);
    assert!(report.window_generated);
    assert_eq!(report.cells_added, 0);
}

#[test]
fn periodic_prune_drops_cells_left_behind() {
    let oracle = long_ground();
    let mut graph = GridNavGraph::new(GridConfig::default());
    let config = MaintainerConfig::default();
    let mut maintainer = ContinuousMaintainer::new(config);

    maintainer.tick(&mut graph, &oracle, &tick(0), Vec2::new(-100.0, 1.0));
    let reference = Vec2::new(100.0, 1.0);
    let report = maintainer.tick(&mut graph, &oracle, &tick(300), reference);

    assert!(report.window_generated);
    assert!(report.cells_pruned > 0);
    let limit = config.coverage_radius * config.prune_distance_factor;
    for (cell, _) in graph.cells() {
        assert!(graph.grid_to_world(cell).distance(reference) <= limit);
    }
}

#[test]
fn densify_and_reset() {
    let oracle = long_ground();
    let mut graph = GridNavGraph::new(GridConfig::default());
    let mut maintainer = ContinuousMaintainer::new(MaintainerConfig::default());

    let added = maintainer.densify(&mut graph, &oracle, Vec2::new(50.0, 1.0), 5.0);
    assert!(added > 0);
    assert_eq!(graph.len(), added);

    let rebuilt = maintainer.reset(&mut graph, &oracle, Vec2::new(0.0, 1.0));
    assert_eq!(graph.len(), rebuilt);
    assert!(!graph.contains(graph.world_to_grid(Vec2::new(50.0, 1.0))));
    assert_eq!(maintainer.last_generation(), Some(Vec2::new(0.0, 1.0)));
}
