//! Configuration errors raised when an engine is built or reconfigured.
//!
//! Nothing in the per-tick path returns these: bodies with bad state are
//! skipped instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WaterConfigError {
    #[error("wave direction must be a finite, non-zero vector")]
    ZeroWaveDirection,
    #[error("fluid density must be positive, got {0}")]
    InvalidDensity(f32),
    #[error("{name} must not be negative, got {value}")]
    NegativeCoefficient { name: &'static str, value: f32 },
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },
    #[error("sub_steps must be at least 1")]
    ZeroSubSteps,
}
