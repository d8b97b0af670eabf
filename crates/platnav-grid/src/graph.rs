use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicU64, Ordering};

use platnav_core::{Aabb, FieldConfig, GridCell, GridConfig, Occupancy, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeClassification {
    /// Not navigable (or never sampled).
    #[default]
    None,
    /// Open space with ground support below.
    Base,
    /// A navigable cell with a missing horizontal neighbor. Traversed exactly like `Base`.
    Edge,
}

impl NodeClassification {
    pub fn is_navigable(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Source of graph revisions, shared by every graph in the process.
static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

/// Largest number of cells a single generation pass will scan.
const MAX_SCAN_CELLS: u64 = 1 << 24;

/// Read-only view of the graph for debugging and tooling.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridSnapshot {
    pub revision: u64,
    pub node_spacing: f32,
    pub node_height: f32,
    pub base_count: usize,
    pub edge_count: usize,
    pub cells: Vec<(GridCell, NodeClassification)>,
}

/// Sparse grid of navigable cells.
///
/// Only navigable cells are stored: an absent cell reads as [`NodeClassification::None`], so a
/// probe that failed once is retried on the next generation pass. Cells live in an ordered map,
/// which makes iteration order (and every tie-break built on it) deterministic.
#[derive(Debug, Clone)]
pub struct GridNavGraph {
    config: GridConfig,
    same_row_window: i32,
    below_preference: f32,
    cells: BTreeMap<GridCell, NodeClassification>,
    /// Stored cells whose own point fails the obstruction test.
    obstructed: BTreeSet<GridCell>,
    revision: u64,
}

impl GridNavGraph {
    pub fn new(config: GridConfig) -> Self {
        assert!(config.node_spacing > 0.0, "node_spacing must be > 0");
        assert!(config.node_height > 0.0, "node_height must be > 0");
        let field = FieldConfig::default();
        Self {
            config,
            same_row_window: field.same_row_window,
            below_preference: field.below_preference,
            cells: BTreeMap::new(),
            obstructed: BTreeSet::new(),
            revision: next_revision(),
        }
    }

    /// Override the nearest-cell search parameters (see [`GridNavGraph::nearest_cell`]).
    pub fn with_nearest_search(mut self, same_row_window: i32, below_preference: f32) -> Self {
        self.same_row_window = same_row_window;
        self.below_preference = below_preference;
        self
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Changes on every mutation that adds, removes, or reclassifies a cell.
    ///
    /// Revisions are drawn from a process-wide counter, so two graphs only share a revision
    /// when one is an unmodified clone of the other.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump_revision(&mut self) {
        self.revision = next_revision();
    }

    fn insert_base(&mut self, cell: GridCell, oracle: &dyn Occupancy) {
        self.cells.insert(cell, NodeClassification::Base);
        if oracle.is_obstructed(self.grid_to_world(cell)) {
            self.obstructed.insert(cell);
        }
    }

    /// Cell ranges covering `min..max`, padded below and to the sides by `pad_cells` and above
    /// by `pad_above`. `None` when the range is larger than one pass may scan.
    fn scan_range(
        &self,
        min: Vec2,
        max: Vec2,
        pad_above: i32,
    ) -> Option<(RangeInclusive<i32>, RangeInclusive<i32>)> {
        let s = self.config.node_spacing;
        let h = self.config.node_height;
        let pad = self.config.pad_cells;
        let xs = ((min.x / s).floor() as i32).saturating_sub(pad)
            ..=((max.x / s).ceil() as i32).saturating_add(pad);
        let ys = ((min.y / h).floor() as i32).saturating_sub(pad)
            ..=((max.y / h).ceil() as i32).saturating_add(pad_above);

        let span = |r: &RangeInclusive<i32>| {
            (i64::from(*r.end()) - i64::from(*r.start()) + 1).max(0) as u64
        };
        let cells = span(&xs).saturating_mul(span(&ys));
        if cells > MAX_SCAN_CELLS {
            tracing::warn!(cells, max = MAX_SCAN_CELLS, "Scan range too large, skipping");
            return None;
        }
        Some((xs, ys))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn world_to_grid(&self, p: Vec2) -> GridCell {
        GridCell::new(
            (p.x / self.config.node_spacing).round() as i32,
            (p.y / self.config.node_height).round() as i32,
        )
    }

    pub fn grid_to_world(&self, cell: GridCell) -> Vec2 {
        Vec2::new(
            cell.x as f32 * self.config.node_spacing,
            cell.y as f32 * self.config.node_height,
        )
    }

    pub fn contains(&self, cell: GridCell) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Stored classification; absent cells are `None`.
    pub fn classification(&self, cell: GridCell) -> NodeClassification {
        self.cells.get(&cell).copied().unwrap_or_default()
    }

    pub fn cells(&self) -> impl Iterator<Item = (GridCell, NodeClassification)> + '_ {
        self.cells.iter().map(|(&cell, &class)| (cell, class))
    }

    /// Navigable horizontal neighbors, left before right.
    pub fn neighbors(&self, cell: GridCell) -> impl Iterator<Item = GridCell> + '_ {
        [cell.left(), cell.right()]
            .into_iter()
            .filter(move |n| self.cells.contains_key(n))
    }

    /// Stored classification if present, otherwise a fresh probe. Never mutates.
    pub fn classify(&self, cell: GridCell, oracle: &dyn Occupancy) -> NodeClassification {
        if let Some(&class) = self.cells.get(&cell) {
            return class;
        }
        if oracle.is_open_with_support(self.grid_to_world(cell)) {
            NodeClassification::Base
        } else {
            NodeClassification::None
        }
    }

    /// Sample new cells within `radius` of `center` and return how many were added.
    ///
    /// Cells already present are left alone, so calling this twice with the same arguments
    /// changes nothing the second time.
    pub fn generate_window(&mut self, oracle: &dyn Occupancy, center: Vec2, radius: f32) -> usize {
        if radius.is_nan() || radius <= 0.0 || !center.is_finite() {
            return 0;
        }

        let reach = Vec2::new(radius, radius);
        let Some((xs, ys)) =
            self.scan_range(center - reach, center + reach, self.config.pad_rows_above)
        else {
            return 0;
        };
        let max_dist_sq = radius * radius * self.config.window_slack;

        let mut created = 0;
        for x in xs {
            for y in ys.clone() {
                let cell = GridCell::new(x, y);
                if self.cells.contains_key(&cell) {
                    continue;
                }
                if self.grid_to_world(cell).distance_squared(center) > max_dist_sq {
                    continue;
                }
                if self.classify(cell, oracle) == NodeClassification::Base {
                    self.insert_base(cell, oracle);
                    created += 1;
                }
            }
        }

        if created > 0 {
            self.bump_revision();
            let reclassified = self.mark_edges_in_rows(oracle, ys);
            tracing::debug!(
                created,
                reclassified,
                center_x = center.x,
                center_y = center.y,
                radius,
                "Generated grid window"
            );
        }
        created
    }

    /// Re-derive `Base`/`Edge` for every cell. Returns the number of cells that changed.
    pub fn mark_edges(&mut self, oracle: &dyn Occupancy) -> usize {
        self.mark_edges_in_rows(oracle, i32::MIN..=i32::MAX)
    }

    fn mark_edges_in_rows(&mut self, oracle: &dyn Occupancy, rows: RangeInclusive<i32>) -> usize {
        let updates: Vec<(GridCell, NodeClassification)> = self
            .cells
            .iter()
            .filter(|(cell, _)| rows.contains(&cell.y))
            .filter_map(|(&cell, &current)| {
                let derived = if self.is_open_side(cell.left(), oracle)
                    || self.is_open_side(cell.right(), oracle)
                {
                    NodeClassification::Edge
                } else {
                    NodeClassification::Base
                };
                (derived != current).then_some((cell, derived))
            })
            .collect();

        let changed = updates.len();
        for (cell, class) in updates {
            self.cells.insert(cell, class);
        }
        if changed > 0 {
            self.bump_revision();
            tracing::trace!(changed, "Reclassified edge cells");
        }
        changed
    }

    /// A horizontal neighbor that is neither navigable nor solid.
    fn is_open_side(&self, neighbor: GridCell, oracle: &dyn Occupancy) -> bool {
        !self.cells.contains_key(&neighbor) && !oracle.is_obstructed(self.grid_to_world(neighbor))
    }

    /// Remove every cell farther than `max_distance` from `center`. Returns the count removed.
    ///
    /// Survivors next to a removed, unobstructed cell become `Edge`, so classifications stay
    /// consistent with [`GridNavGraph::mark_edges`] without probing the world again.
    pub fn prune_beyond(&mut self, center: Vec2, max_distance: f32) -> usize {
        let max_sq = max_distance * max_distance;
        let removed: Vec<GridCell> = self
            .cells
            .keys()
            .copied()
            .filter(|&cell| self.grid_to_world(cell).distance_squared(center) > max_sq)
            .collect();
        if removed.is_empty() {
            return 0;
        }

        for cell in &removed {
            self.cells.remove(cell);
        }
        let mut promoted = 0;
        for cell in &removed {
            if self.obstructed.remove(cell) {
                continue;
            }
            for side in [cell.left(), cell.right()] {
                if let Some(class) = self.cells.get_mut(&side) {
                    if *class == NodeClassification::Base {
                        *class = NodeClassification::Edge;
                        promoted += 1;
                    }
                }
            }
        }

        self.bump_revision();
        tracing::debug!(
            removed = removed.len(),
            promoted,
            remaining = self.cells.len(),
            "Pruned distant cells"
        );
        removed.len()
    }

    /// Drop every cell.
    pub fn clear(&mut self) {
        if !self.cells.is_empty() {
            self.cells.clear();
            self.obstructed.clear();
            self.bump_revision();
        }
    }

    /// Clear and resample an axis-aligned region.
    ///
    /// The region is padded by `pad_cells` on the left, right and bottom and by
    /// `pad_rows_above` on top, both in cells and in world units.
    pub fn rebuild(&mut self, oracle: &dyn Occupancy, bounds: Aabb) -> usize {
        self.clear();

        let pad = self.config.pad_cells;
        let pad_above = self.config.pad_rows_above;
        let Some((xs, ys)) = self.scan_range(bounds.min, bounds.max, pad_above) else {
            return 0;
        };
        let region = Aabb::new(
            bounds.min - Vec2::new(pad as f32, pad as f32),
            bounds.max + Vec2::new(pad as f32, pad_above as f32),
        );

        let mut created = 0;
        for x in xs {
            for y in ys.clone() {
                let cell = GridCell::new(x, y);
                if !region.contains(self.grid_to_world(cell)) {
                    continue;
                }
                if oracle.is_open_with_support(self.grid_to_world(cell)) {
                    self.insert_base(cell, oracle);
                    created += 1;
                }
            }
        }
        if created > 0 {
            self.bump_revision();
        }
        self.mark_edges(oracle);

        tracing::info!(
            created,
            min_x = bounds.min.x,
            min_y = bounds.min.y,
            max_x = bounds.max.x,
            max_y = bounds.max.y,
            "Rebuilt grid graph"
        );
        created
    }

    /// Snap `cell` to a navigable cell.
    ///
    /// Tries, in order: the cell itself; the closest cell on the same row within
    /// `same_row_window` cells (left wins ties); the globally closest cell by grid distance,
    /// where cells at or below the query row have their distance scaled by
    /// `below_preference`.
    pub fn nearest_cell(&self, cell: GridCell) -> Option<GridCell> {
        if self.cells.contains_key(&cell) {
            return Some(cell);
        }

        for dx in 1..self.same_row_window {
            for candidate in [cell.offset(-dx, 0), cell.offset(dx, 0)] {
                if self.cells.contains_key(&candidate) {
                    return Some(candidate);
                }
            }
        }

        let mut best: Option<(GridCell, f32)> = None;
        for &candidate in self.cells.keys() {
            let mut distance = cell.grid_distance(candidate);
            if candidate.y <= cell.y {
                distance *= self.below_preference;
            }
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((candidate, distance));
            }
        }
        best.map(|(candidate, _)| candidate)
    }

    /// Count cells within `radius` of `center`, stopping early at `limit`.
    pub fn count_within(&self, center: Vec2, radius: f32, limit: usize) -> usize {
        let radius_sq = radius * radius;
        self.cells
            .keys()
            .filter(|&&cell| self.grid_to_world(cell).distance_squared(center) <= radius_sq)
            .take(limit)
            .count()
    }

    pub fn snapshot(&self) -> GridSnapshot {
        let mut base_count = 0;
        let mut edge_count = 0;
        for class in self.cells.values() {
            match class {
                NodeClassification::Base => base_count += 1,
                NodeClassification::Edge => edge_count += 1,
                NodeClassification::None => {}
            }
        }
        GridSnapshot {
            revision: self.revision,
            node_spacing: self.config.node_spacing,
            node_height: self.config.node_height,
            base_count,
            edge_count,
            cells: self.cells().collect(),
        }
    }
}
