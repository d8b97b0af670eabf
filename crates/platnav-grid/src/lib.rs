//! Grid-sampled navigation for platform worlds.
//!
//! [`GridNavGraph`] samples the world on a regular grid and keeps the cells that are open
//! space with ground underneath. [`ContinuousMaintainer`] keeps that graph populated around a
//! moving reference point, [`DirectionFieldCache`] turns it into per-goal step directions, and
//! [`GridNavigator`] ties the three together behind a "which way do I go" query.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod field;
pub mod graph;
pub mod maintainer;
pub mod navigator;

pub use field::{DirectionField, DirectionFieldCache};
pub use graph::{GridNavGraph, GridSnapshot, NodeClassification};
pub use maintainer::{ContinuousMaintainer, MaintenanceReport};
pub use navigator::{DecisionSource, GridNavigator, MovementAction, MovementDecision};
