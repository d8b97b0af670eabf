use platnav_core::{Aabb, NavConfig, Occupancy, QueryConfig, TickContext, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    ContinuousMaintainer, DirectionField, DirectionFieldCache, GridNavGraph, MaintenanceReport,
};

/// Primitive movement command for a ground agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MovementAction {
    #[default]
    Idle,
    MoveLeft,
    MoveRight,
    /// Reserved. Never produced by [`GridNavigator`].
    Jump,
    /// Reserved. Never produced by [`GridNavigator`].
    Wait,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DecisionSource {
    /// Read from a direction field.
    Field,
    /// Sign of the horizontal displacement toward the goal.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MovementDecision {
    pub action: MovementAction,
    pub source: DecisionSource,
    /// Goal row minus agent row. Informational; it never changes `action`.
    pub height_difference: i32,
}

/// Grid graph, maintainer and field cache behind one movement query.
#[derive(Debug)]
pub struct GridNavigator<O> {
    oracle: O,
    graph: GridNavGraph,
    cache: DirectionFieldCache,
    maintainer: ContinuousMaintainer,
    query: QueryConfig,
}

impl<O: Occupancy> GridNavigator<O> {
    pub fn new(oracle: O, config: &NavConfig) -> Self {
        let graph = GridNavGraph::new(config.grid)
            .with_nearest_search(config.field.same_row_window, config.field.below_preference);
        Self {
            oracle,
            graph,
            cache: DirectionFieldCache::new(config.field),
            maintainer: ContinuousMaintainer::new(config.maintainer),
            query: config.query,
        }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn graph(&self) -> &GridNavGraph {
        &self.graph
    }

    pub fn cache(&self) -> &DirectionFieldCache {
        &self.cache
    }

    pub fn maintainer(&self) -> &ContinuousMaintainer {
        &self.maintainer
    }

    pub fn last_field(&self) -> Option<&DirectionField> {
        self.cache.last_field()
    }

    /// Advance continuous maintenance around `reference` (usually the player).
    pub fn tick(&mut self, ctx: &TickContext, reference: Vec2) -> MaintenanceReport {
        self.maintainer
            .tick(&mut self.graph, &self.oracle, ctx, reference)
    }

    pub fn rebuild(&mut self, bounds: Aabb) -> usize {
        self.graph.rebuild(&self.oracle, bounds)
    }

    /// Full rebuild of the coverage window around `reference`.
    pub fn reset(&mut self, reference: Vec2) -> usize {
        self.maintainer
            .reset(&mut self.graph, &self.oracle, reference)
    }

    pub fn movement_action(&mut self, agent: Vec2, goal: Vec2) -> MovementAction {
        self.decide(agent, goal).action
    }

    pub fn decide(&mut self, agent: Vec2, goal: Vec2) -> MovementDecision {
        let agent_cell = self.graph.world_to_grid(agent);
        let goal_cell = self.graph.world_to_grid(goal);
        let height_difference = goal_cell.y - agent_cell.y;

        let mut covered = self.cache.field_for(&self.graph, goal_cell).is_some();
        if !covered {
            let densify_range =
                self.maintainer.config().coverage_radius * self.query.densify_range_factor;
            if agent.distance(goal) < densify_range {
                self.maintainer.densify(
                    &mut self.graph,
                    &self.oracle,
                    goal,
                    self.query.densify_radius,
                );
                covered = self.cache.field_for(&self.graph, goal_cell).is_some();
            }
        }

        let direction = if covered {
            self.graph
                .nearest_cell(agent_cell)
                .and_then(|cell| self.cache.last_field()?.direction(cell))
        } else {
            None
        };

        let threshold = self.query.direction_threshold;
        let (action, source) = match direction {
            Some(dir) if dir.x > threshold => (MovementAction::MoveRight, DecisionSource::Field),
            Some(dir) if dir.x < -threshold => (MovementAction::MoveLeft, DecisionSource::Field),
            _ => (self.fallback(agent, goal), DecisionSource::Fallback),
        };

        tracing::trace!(
            ?action,
            ?source,
            agent_x = agent.x,
            agent_y = agent.y,
            goal_x = goal.x,
            goal_y = goal.y,
            "Movement decision"
        );

        MovementDecision {
            action,
            source,
            height_difference,
        }
    }

    fn fallback(&self, agent: Vec2, goal: Vec2) -> MovementAction {
        let dx = goal.x - agent.x;
        if dx > self.query.fallback_dead_zone {
            MovementAction::MoveRight
        } else if dx < -self.query.fallback_dead_zone {
            MovementAction::MoveLeft
        } else {
            MovementAction::Idle
        }
    }
}
