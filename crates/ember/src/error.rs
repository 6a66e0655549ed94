//! Errors raised while loading or validating emitter configuration.
//!
//! The simulation itself never fails; bad numbers only produce odd visuals.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The JSON could not be parsed into an emitter description.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("max_particles must be at least 1")]
    ZeroCapacity,

    #[error("lifespan must be at least 1 tick")]
    ZeroLifespan,

    #[error("emission_rate must be a finite, non-negative number (got {0})")]
    InvalidEmissionRate(f32),

    #[error("ticks_per_second must be at least 1")]
    InvalidTickRate,
}
