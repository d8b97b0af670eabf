use std::collections::{BTreeMap, VecDeque};

use platnav_core::{FieldConfig, GridCell, Vec2};

use crate::GridNavGraph;

/// Step directions toward one goal, computed by breadth-first propagation from the goal.
///
/// Each reached cell stores the unit vector toward its BFS parent; the seed cell stores
/// [`Vec2::ZERO`].
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionField {
    goal: GridCell,
    seed: GridCell,
    directions: BTreeMap<GridCell, Vec2>,
    truncated: bool,
}

impl DirectionField {
    /// Propagate from `seed` over left/right adjacency, visiting at most `max_visits` cells.
    pub fn compute(graph: &GridNavGraph, goal: GridCell, seed: GridCell, max_visits: usize) -> Self {
        let mut directions = BTreeMap::new();
        let mut queue = VecDeque::new();
        let mut visits = 0usize;
        let mut truncated = false;

        directions.insert(seed, Vec2::ZERO);
        queue.push_back(seed);

        while let Some(current) = queue.pop_front() {
            if visits >= max_visits {
                truncated = true;
                break;
            }
            visits += 1;

            for neighbor in graph.neighbors(current) {
                if directions.contains_key(&neighbor) {
                    continue;
                }
                let step = Vec2::new(
                    (current.x - neighbor.x) as f32,
                    (current.y - neighbor.y) as f32,
                )
                .normalize_or_zero();
                directions.insert(neighbor, step);
                queue.push_back(neighbor);
            }
        }

        tracing::debug!(
            goal_x = goal.x,
            goal_y = goal.y,
            reached = directions.len(),
            truncated,
            "Computed direction field"
        );

        Self {
            goal,
            seed,
            directions,
            truncated,
        }
    }

    /// Goal cell the field was requested for.
    pub fn goal(&self) -> GridCell {
        self.goal
    }

    /// Navigable cell the propagation started from.
    pub fn seed(&self) -> GridCell {
        self.seed
    }

    pub fn direction(&self, cell: GridCell) -> Option<Vec2> {
        self.directions.get(&cell).copied()
    }

    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    /// True when propagation stopped at the visit budget.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridCell, Vec2)> + '_ {
        self.directions.iter().map(|(&cell, &dir)| (cell, dir))
    }
}

/// Per-goal direction fields, invalidated whenever the graph changes.
#[derive(Debug, Clone)]
pub struct DirectionFieldCache {
    config: FieldConfig,
    fields: BTreeMap<GridCell, DirectionField>,
    insertion_order: VecDeque<GridCell>,
    last_goal: Option<GridCell>,
    graph_revision: Option<u64>,
}

impl DirectionFieldCache {
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            fields: BTreeMap::new(),
            insertion_order: VecDeque::new(),
            last_goal: None,
            graph_revision: None,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
        self.insertion_order.clear();
        self.last_goal = None;
    }

    /// Field toward `goal`, computing and caching it if needed.
    ///
    /// Returns `None` when the graph has no cell within `goal_coverage_radius` of the goal.
    /// Nothing is cached in that case, so the next call probes again.
    pub fn field_for(&mut self, graph: &GridNavGraph, goal: GridCell) -> Option<&DirectionField> {
        if self.graph_revision != Some(graph.revision()) {
            if !self.fields.is_empty() {
                tracing::trace!(dropped = self.fields.len(), "Graph changed, dropping fields");
            }
            self.clear();
            self.graph_revision = Some(graph.revision());
        }

        let key = match self.cached_key(goal) {
            Some(key) => key,
            None => {
                let field = self.compute(graph, goal)?;
                self.insert(field);
                goal
            }
        };

        self.last_goal = Some(key);
        self.fields.get(&key)
    }

    /// Field most recently returned by [`DirectionFieldCache::field_for`].
    pub fn last_field(&self) -> Option<&DirectionField> {
        self.fields.get(&self.last_goal?)
    }

    fn cached_key(&self, goal: GridCell) -> Option<GridCell> {
        if self.fields.contains_key(&goal) {
            return Some(goal);
        }
        let last = self.last_goal?;
        (last.grid_distance(goal) < self.config.goal_jitter && self.fields.contains_key(&last))
            .then_some(last)
    }

    fn compute(&self, graph: &GridNavGraph, goal: GridCell) -> Option<DirectionField> {
        let seed = graph.nearest_cell(goal)?;
        let gap = graph.grid_to_world(seed).distance(graph.grid_to_world(goal));
        if gap > self.config.goal_coverage_radius {
            tracing::trace!(goal_x = goal.x, goal_y = goal.y, gap, "Goal outside coverage");
            return None;
        }
        Some(DirectionField::compute(
            graph,
            goal,
            seed,
            self.config.max_visits,
        ))
    }

    fn insert(&mut self, field: DirectionField) {
        let goal = field.goal();
        self.fields.insert(goal, field);
        self.insertion_order.push_back(goal);

        while self.fields.len() > self.config.max_cached_fields {
            let Some(oldest) = self.insertion_order.pop_front() else {
                break;
            };
            self.fields.remove(&oldest);
        }
    }
}
