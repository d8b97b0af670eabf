//! Level loading and command implementations behind the `platnav` binary.

#![forbid(unsafe_code)]

pub mod commands;
pub mod level;

pub use level::{parse_point, Level};
