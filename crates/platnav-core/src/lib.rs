//! Shared primitives for platform navigation (math, collision boundary, configuration).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod boxes;
pub mod cell;
pub mod config;
pub mod error;
pub mod math;
pub mod navigator;
pub mod occupancy;
pub mod tick;

pub use boxes::{Aabb, SolidBoxes};
pub use cell::GridCell;
pub use config::{
    FieldConfig, FlightConfig, GridConfig, MaintainerConfig, NavConfig, ProbeConfig,
    QueryConfig, WaypointConfig,
};
pub use error::ConfigError;
pub use math::Vec2;
pub use navigator::{NavPath, Navigator};
pub use occupancy::{CollisionWorld, Occupancy, OccupancyOracle, RayHit};
pub use tick::TickContext;
