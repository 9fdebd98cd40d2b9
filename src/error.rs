//! Error types for trajectory simulation.

use thiserror::Error;

/// Errors raised while validating inputs or integrating a trajectory.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BallisticsError {
    /// Bullet profile has a non-positive mass or area, a negative drag
    /// coefficient, or a non-finite field
    #[error("Invalid bullet profile: {0}")]
    InvalidProfile(String),

    /// Simulation parameters or integrator settings are out of range
    #[error("Invalid simulation parameters: {0}")]
    InvalidParameters(String),

    /// Altitude or velocity became NaN or infinite mid-flight
    #[error("Numeric divergence at tick {tick} (t = {time:.3} s)")]
    NumericDivergence { tick: u64, time: f64 },

    /// Integration hit the configured tick ceiling before ground impact
    #[error("No ground impact within {max_ticks} ticks")]
    TickLimitExceeded { max_ticks: u64 },

    /// Preset name did not match any built-in profile
    #[error("Unknown bullet preset: {0}")]
    UnknownPreset(String),

    /// Scenario file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for BallisticsError {
    fn from(err: serde_json::Error) -> Self {
        BallisticsError::Config(err.to_string())
    }
}

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, BallisticsError>;
