//! Explicit waypoint graphs for agents that move freely in open space (e.g. flyers).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod follow;
pub mod graph;
pub mod layout;
pub mod search;

pub use follow::{FollowStatus, PathFollower};
pub use graph::{NodeId, WaypointGraph, WaypointNode};
pub use layout::flight_layout;
pub use search::{astar, SearchScratch, WaypointPath};
