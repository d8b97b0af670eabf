//! Umbrella crate that re-exports the `platnav-*` building blocks.
//!
//! - [`core`]: geometry, configuration and the occupancy oracle.
//! - [`grid`]: walkable cell graph, direction fields and the movement query for ground agents.
//! - [`waypoint`]: waypoint graphs, A* and flight layouts for agents in open space.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use platnav_core as core;

#[cfg(feature = "grid")]
#[cfg_attr(docsrs, doc(cfg(feature = "grid")))]
pub use platnav_grid as grid;

#[cfg(feature = "waypoint")]
#[cfg_attr(docsrs, doc(cfg(feature = "waypoint")))]
pub use platnav_waypoint as waypoint;

/// Common imports for hosts driving both navigators.
#[cfg(feature = "full")]
#[cfg_attr(docsrs, doc(cfg(feature = "full")))]
pub mod prelude {
    pub use platnav_core::{
        Aabb, CollisionWorld, NavConfig, NavPath, Navigator, Occupancy, OccupancyOracle,
        SolidBoxes, TickContext, Vec2,
    };
    pub use platnav_grid::{GridNavigator, MovementAction, MovementDecision};
    pub use platnav_waypoint::{PathFollower, WaypointGraph};
}
