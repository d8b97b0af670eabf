#![cfg(feature = "serde")]

use platnav::core::{Aabb, GridConfig, OccupancyOracle, ProbeConfig, SolidBoxes, Vec2};
use platnav::grid::{GridNavGraph, GridSnapshot, MovementAction};
use platnav::waypoint::WaypointGraph;

fn oracle() -> OccupancyOracle<SolidBoxes> {
    OccupancyOracle::new(
        SolidBoxes::new(vec![Aabb::new(Vec2::new(-10.0, -1.0), Vec2::new(10.0, 0.0))]),
        ProbeConfig::default(),
    )
}

#[test]
fn grid_snapshot_roundtrips_through_the_umbrella() {
    let oracle = oracle();
    let mut graph = GridNavGraph::new(GridConfig::default());
    graph.rebuild(&oracle, oracle.world().bounds().expect("bounds"));
    let snapshot = graph.snapshot();

    let json = serde_json::to_string(&snapshot).expect("serialize");
    let back: GridSnapshot = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(back, snapshot);
}

#[test]
fn waypoint_graph_and_actions_serialize() {
    let graph = WaypointGraph::from_positions([Vec2::new(0.0, 4.0), Vec2::new(2.0, 4.0)]);

    let json = serde_json::to_value(&graph).expect("serialize");
    let back: WaypointGraph = serde_json::from_value(json).expect("deserialize");

    assert_eq!(back, graph);
    assert_eq!(
        serde_json::to_value(MovementAction::MoveRight).expect("serialize"),
        "MoveRight"
    );
}
