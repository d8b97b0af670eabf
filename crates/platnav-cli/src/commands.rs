//! One function per subcommand. Each returns a serializable report.

use serde::Serialize;

use platnav::core::{NavConfig, NavPath, Navigator, OccupancyOracle, SolidBoxes, TickContext, Vec2};
use platnav::grid::{GridNavigator, GridSnapshot, MovementAction, MovementDecision};
use platnav::waypoint::{FollowStatus, PathFollower, WaypointGraph};

use crate::Level;

fn oracle(level: &Level, config: &NavConfig) -> OccupancyOracle<SolidBoxes> {
    OccupancyOracle::new(level.world.clone(), config.probe.clone())
}

fn flight_graph(level: &Level, config: &NavConfig) -> WaypointGraph {
    WaypointGraph::flight(
        &oracle(level, config),
        level.bounds,
        &config.flight,
        &config.waypoint,
    )
}

#[derive(Debug, Serialize)]
pub struct FlightSummary {
    pub nodes: usize,
    pub edges: usize,
    pub positions: Vec<Vec2>,
}

/// Full grid rebuild over the level bounds.
pub fn grid_graph(level: &Level, config: &NavConfig) -> GridSnapshot {
    let mut nav = GridNavigator::new(oracle(level, config), config);
    nav.rebuild(level.bounds);
    nav.graph().snapshot()
}

pub fn flight_summary(level: &Level, config: &NavConfig) -> FlightSummary {
    let graph = flight_graph(level, config);
    FlightSummary {
        nodes: graph.len(),
        edges: graph.edge_count(),
        positions: graph.nodes().map(|(_, node)| node.position).collect(),
    }
}

#[derive(Debug, Serialize)]
pub struct QueryReport {
    pub decision: MovementDecision,
    pub cells: usize,
    /// Cell the direction field was seeded from, if one was used.
    pub field_seed: Option<[i32; 2]>,
}

/// One movement decision with the coverage window generated around the agent.
pub fn query(level: &Level, config: &NavConfig, agent: Vec2, goal: Vec2) -> QueryReport {
    let mut nav = GridNavigator::new(oracle(level, config), config);
    nav.reset(agent);
    let decision = nav.decide(agent, goal);
    QueryReport {
        decision,
        cells: nav.graph().len(),
        field_seed: nav.last_field().map(|f| [f.seed().x, f.seed().y]),
    }
}

/// Flight path between the waypoint nodes nearest to `from` and `to`.
pub fn path(level: &Level, config: &NavConfig, from: Vec2, to: Vec2) -> Option<NavPath> {
    flight_graph(level, config).find_path(from, to)
}

#[derive(Debug, Clone, Copy)]
pub struct SimulateOptions {
    pub ticks: u64,
    pub speed: f32,
    pub dt_seconds: f32,
}

impl Default for SimulateOptions {
    fn default() -> Self {
        Self {
            ticks: 600,
            speed: 5.0,
            dt_seconds: 1.0 / 60.0,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GroundStep {
    pub tick: u64,
    pub position: Vec2,
    pub decision: MovementDecision,
}

/// Drive a ground agent horizontally with continuous maintenance until it idles or runs
/// out of ticks.
pub fn simulate_ground(
    level: &Level,
    config: &NavConfig,
    start: Vec2,
    goal: Vec2,
    options: SimulateOptions,
) -> Vec<GroundStep> {
    let mut nav = GridNavigator::new(oracle(level, config), config);
    let mut position = start;
    let mut steps = Vec::new();
    let stride = options.speed * options.dt_seconds;

    for tick in 0..options.ticks {
        let ctx = TickContext::new(tick, options.dt_seconds);
        let report = nav.tick(&ctx, position);
        if report.window_generated || report.cells_pruned > 0 {
            tracing::debug!(
                tick,
                added = report.cells_added,
                pruned = report.cells_pruned,
                "Maintenance"
            );
        }

        let decision = nav.decide(position, goal);
        match decision.action {
            MovementAction::MoveLeft => position.x -= stride,
            MovementAction::MoveRight => position.x += stride,
            _ => {}
        }
        steps.push(GroundStep {
            tick,
            position,
            decision,
        });
        if decision.action == MovementAction::Idle {
            break;
        }
    }

    tracing::info!(steps = steps.len(), x = position.x, y = position.y, "Ground simulation done");
    steps
}

#[derive(Debug, Serialize)]
pub struct FlightStep {
    pub tick: u64,
    pub position: Vec2,
    pub status: FollowStatus,
}

/// Plan a flight path and follow it. Empty when no path exists.
pub fn simulate_flight(
    level: &Level,
    config: &NavConfig,
    start: Vec2,
    goal: Vec2,
    options: SimulateOptions,
) -> Vec<FlightStep> {
    let Some(route) = path(level, config, start, goal) else {
        tracing::info!("No flight path");
        return Vec::new();
    };

    let mut follower = PathFollower::new(route, options.speed, options.speed * options.dt_seconds);
    let mut position = start;
    let mut steps = Vec::new();

    for tick in 0..options.ticks {
        let (next, status) = follower.advance(position, &TickContext::new(tick, options.dt_seconds));
        position = next;
        steps.push(FlightStep {
            tick,
            position,
            status,
        });
        if status == FollowStatus::Arrived {
            break;
        }
    }

    tracing::info!(steps = steps.len(), x = position.x, y = position.y, "Flight simulation done");
    steps
}
