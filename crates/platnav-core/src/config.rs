//! Navigation configuration loading and validation.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::{self, ConfigError};

/// Top-level navigation configuration, usually loaded from a YAML file.
///
/// Every section falls back to its defaults when omitted, so an empty file is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Config version
    pub version: Option<String>,
    pub grid: GridConfig,
    pub probe: ProbeConfig,
    pub field: FieldConfig,
    pub query: QueryConfig,
    pub maintainer: MaintainerConfig,
    pub waypoint: WaypointConfig,
    pub flight: FlightConfig,
}

/// Grid sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Horizontal distance between samples (world units).
    pub node_spacing: f32,
    /// Vertical distance between samples (world units).
    pub node_height: f32,
    /// Extra cells scanned left, right and below a generation window.
    pub pad_cells: i32,
    /// Extra rows scanned above a generation window.
    pub pad_rows_above: i32,
    /// Multiplier on `radius²` when filtering window cells.
    pub window_slack: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            node_spacing: 2.0,
            node_height: 1.0,
            pad_cells: 3,
            pad_rows_above: 8,
            window_slack: 1.2,
        }
    }
}

/// Occupancy probing against the collision world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Radius of the "is this point solid" overlap test.
    pub clearance_radius: f32,
    /// Radius of the ground overlap probes and of the edge-neighbor solid test.
    pub ground_check_radius: f32,
    /// Downward offsets of the overlap probes, tried in order.
    pub probe_heights: Vec<f32>,
    /// Length of the box cast and angled rays.
    pub ground_check_distance: f32,
    /// Height of the thin box swept downward.
    pub box_cast_thickness: f32,
    /// Angles (degrees, relative to straight down) of the fallback ray fan.
    pub fan_angles: Vec<f32>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            clearance_radius: 0.21,
            ground_check_radius: 0.3,
            probe_heights: vec![0.25, 0.5, 0.75, 1.0, 1.5, 2.0],
            ground_check_distance: 2.0,
            box_cast_thickness: 0.1,
            fan_angles: vec![-30.0, -15.0, 0.0, 15.0, 30.0],
        }
    }
}

/// Direction-field computation and caching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Goal cells closer than this (grid units) to the last goal reuse its field.
    pub goal_jitter: f32,
    /// Same-row search window (cells) when snapping to the nearest cell.
    pub same_row_window: i32,
    /// Distance multiplier for cells at or below the query row.
    pub below_preference: f32,
    /// A seed farther than this (world units) from the goal means "no coverage".
    pub goal_coverage_radius: f32,
    /// Upper bound on cells visited by one BFS.
    pub max_visits: usize,
    /// Upper bound on cached fields.
    pub max_cached_fields: usize,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            goal_jitter: 2.0,
            same_row_window: 5,
            below_preference: 0.8,
            goal_coverage_radius: 5.0,
            max_visits: 100_000,
            max_cached_fields: 32,
        }
    }
}

/// Movement query translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Minimum |x| of a field direction that maps to a move.
    pub direction_threshold: f32,
    /// Horizontal dead-zone (world units) of the fallback heuristic.
    pub fallback_dead_zone: f32,
    /// Radius of the window generated around an uncovered goal.
    pub densify_radius: f32,
    /// Densify only when agent and goal are within `coverage_radius * densify_range_factor`.
    pub densify_range_factor: f32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            direction_threshold: 0.1,
            fallback_dead_zone: 0.3,
            densify_radius: 5.0,
            densify_range_factor: 1.5,
        }
    }
}

/// Continuous generation around the reference point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintainerConfig {
    pub coverage_radius: f32,
    /// Reference-point displacement that triggers a new window.
    pub update_distance: f32,
    /// Coverage sample threshold below which a window is regenerated.
    pub min_cells_in_radius: usize,
    pub update_interval_ticks: u64,
    pub prune_interval_ticks: u64,
    /// Cells beyond `coverage_radius * prune_distance_factor` are pruned.
    pub prune_distance_factor: f32,
}

impl Default for MaintainerConfig {
    fn default() -> Self {
        Self {
            coverage_radius: 30.0,
            update_distance: 10.0,
            min_cells_in_radius: 20,
            update_interval_ticks: 30,
            prune_interval_ticks: 300,
            prune_distance_factor: 2.0,
        }
    }
}

/// Waypoint connection synthesis and search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaypointConfig {
    pub max_connection_distance: f32,
    pub max_height_difference: f32,
    pub max_connections_per_node: usize,
    /// Weight of the horizontal-alignment term in the connection score.
    pub horizontal_preference: f32,
    /// Pairs with |dy| at most this are on the same layer.
    pub same_layer_tolerance: f32,
    pub same_layer_bonus: f32,
    /// Upper bound on nodes expanded by one A* run.
    pub max_visits: usize,
}

impl Default for WaypointConfig {
    fn default() -> Self {
        Self {
            max_connection_distance: 8.0,
            max_height_difference: 5.0,
            max_connections_per_node: 6,
            horizontal_preference: 1.0,
            same_layer_tolerance: 0.25,
            same_layer_bonus: 0.5,
            max_visits: 100_000,
        }
    }
}

/// Flight-node placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    pub node_spacing: f32,
    pub vertical_spacing: f32,
    pub vertical_layers: u32,
    pub min_height_above_ground: f32,
    pub obstacle_check_radius: f32,
    /// Bounds are grown by this much before placement.
    pub bounds_padding: f32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            node_spacing: 2.0,
            vertical_spacing: 2.0,
            vertical_layers: 4,
            min_height_above_ground: 4.0,
            obstacle_check_radius: 1.0,
            bounds_padding: 2.0,
        }
    }
}

impl NavConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "No nav config found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> error::Result<()> {
        positive("grid.node_spacing", self.grid.node_spacing)?;
        positive("grid.node_height", self.grid.node_height)?;
        if self.grid.window_slack < 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "grid.window_slack",
                value: self.grid.window_slack,
                min: 1.0,
                max: f32::INFINITY,
            });
        }

        positive("probe.clearance_radius", self.probe.clearance_radius)?;
        positive("probe.ground_check_radius", self.probe.ground_check_radius)?;
        positive("probe.ground_check_distance", self.probe.ground_check_distance)?;
        if self.probe.probe_heights.is_empty() {
            return Err(ConfigError::Empty {
                field: "probe.probe_heights",
            });
        }

        if !(0.0..=1.0).contains(&self.field.below_preference) || self.field.below_preference == 0.0
        {
            return Err(ConfigError::OutOfRange {
                field: "field.below_preference",
                value: self.field.below_preference,
                min: f32::EPSILON,
                max: 1.0,
            });
        }
        positive("field.goal_coverage_radius", self.field.goal_coverage_radius)?;
        at_least_one("field.max_visits", self.field.max_visits)?;
        at_least_one("field.max_cached_fields", self.field.max_cached_fields)?;

        positive("maintainer.coverage_radius", self.maintainer.coverage_radius)?;
        at_least_one(
            "maintainer.update_interval_ticks",
            self.maintainer.update_interval_ticks as usize,
        )?;
        at_least_one(
            "maintainer.prune_interval_ticks",
            self.maintainer.prune_interval_ticks as usize,
        )?;
        if self.maintainer.prune_distance_factor < 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "maintainer.prune_distance_factor",
                value: self.maintainer.prune_distance_factor,
                min: 1.0,
                max: f32::INFINITY,
            });
        }

        positive(
            "waypoint.max_connection_distance",
            self.waypoint.max_connection_distance,
        )?;
        at_least_one(
            "waypoint.max_connections_per_node",
            self.waypoint.max_connections_per_node,
        )?;
        at_least_one("waypoint.max_visits", self.waypoint.max_visits)?;

        positive("flight.node_spacing", self.flight.node_spacing)?;
        positive("flight.vertical_spacing", self.flight.vertical_spacing)?;

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> error::Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn at_least_one(field: &'static str, value: usize) -> error::Result<()> {
    if value == 0 {
        Err(ConfigError::Zero { field })
    } else {
        Ok(())
    }
}
