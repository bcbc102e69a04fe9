//! Construction-time validation errors
//!
//! Misconfiguration fails fast here. Runtime anomalies (out-of-bounds grid
//! writes, degenerate IK geometry) are handled in place and never surface as
//! errors.

use thiserror::Error;

/// Invalid host-supplied configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("probability `{name}` must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f32 },

    #[error("max_walkers must be at least 1")]
    NoWalkers,

    #[error("kinematic chain needs at least 2 joints, got {0}")]
    ChainTooShort(usize),

    #[error("tolerance must be positive and finite, got {0}")]
    InvalidTolerance(f32),

    #[error("fade duration must be positive and finite, got {0}")]
    InvalidDuration(f32),
}
