use platnav_core::{Aabb, MaintainerConfig, Occupancy, TickContext, Vec2};

use crate::GridNavGraph;

/// What a [`ContinuousMaintainer::tick`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaintenanceReport {
    /// A generation window was run this tick.
    pub window_generated: bool,
    pub cells_added: usize,
    pub cells_pruned: usize,
}

/// Keeps a [`GridNavGraph`] populated around a moving reference point.
#[derive(Debug, Clone)]
pub struct ContinuousMaintainer {
    config: MaintainerConfig,
    last_generation: Option<Vec2>,
}

impl ContinuousMaintainer {
    pub fn new(config: MaintainerConfig) -> Self {
        Self {
            config,
            last_generation: None,
        }
    }

    pub fn config(&self) -> &MaintainerConfig {
        &self.config
    }

    /// Reference point of the most recent generation window.
    pub fn last_generation(&self) -> Option<Vec2> {
        self.last_generation
    }

    pub fn tick(
        &mut self,
        graph: &mut GridNavGraph,
        oracle: &dyn Occupancy,
        ctx: &TickContext,
        reference: Vec2,
    ) -> MaintenanceReport {
        let mut report = MaintenanceReport::default();

        if ctx.every(self.config.update_interval_ticks) && self.needs_window(graph, reference) {
            report.window_generated = true;
            report.cells_added =
                graph.generate_window(oracle, reference, self.config.coverage_radius);
            self.last_generation = Some(reference);
        }

        if ctx.every(self.config.prune_interval_ticks) {
            report.cells_pruned = graph.prune_beyond(
                reference,
                self.config.coverage_radius * self.config.prune_distance_factor,
            );
        }

        report
    }

    fn needs_window(&self, graph: &GridNavGraph, reference: Vec2) -> bool {
        let moved = self
            .last_generation
            .map_or(true, |last| last.distance(reference) >= self.config.update_distance);
        if moved {
            return true;
        }

        let min = self.config.min_cells_in_radius;
        graph.count_within(reference, self.config.coverage_radius, min) < min
    }

    /// Generate a small window on request, e.g. around a goal outside coverage.
    pub fn densify(
        &mut self,
        graph: &mut GridNavGraph,
        oracle: &dyn Occupancy,
        at: Vec2,
        radius: f32,
    ) -> usize {
        let added = graph.generate_window(oracle, at, radius);
        tracing::debug!(added, x = at.x, y = at.y, radius, "Densified around point");
        added
    }

    /// Rebuild the whole graph around `reference`.
    pub fn reset(&mut self, graph: &mut GridNavGraph, oracle: &dyn Occupancy, reference: Vec2) -> usize {
        let extent = self.config.coverage_radius * 2.0;
        let bounds = Aabb::from_center_size(reference, Vec2::new(extent, extent));
        self.last_generation = Some(reference);
        graph.rebuild(oracle, bounds)
    }
}
