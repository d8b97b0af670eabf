use thiserror::Error;

/// Invalid navigation configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be > 0 (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must be in [{min}, {max}] (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be at least 1")]
    Zero { field: &'static str },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
