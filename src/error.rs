//! Error types for the simulation core.
//!
//! Neither failure kind is recoverable: setup failures abort startup and step
//! failures abort the run.

use thiserror::Error;

use crate::physics::BodyHandle;

/// Errors raised by the simulation and its physics engine.
#[derive(Debug, Error)]
pub enum SimError {
    /// The engine could not build the arena or pegs, or the settings are degenerate.
    #[error("setup failed: {0}")]
    Setup(String),
    /// The engine failed while advancing the world.
    #[error("physics step failed at tick {tick}: {reason}")]
    Step { tick: u64, reason: String },
    /// A handle that this engine never issued.
    #[error("unknown body {0}")]
    UnknownBody(BodyHandle),
    /// Tick requested before setup ran.
    #[error("simulation is not running")]
    NotRunning,
    /// Malformed settings document.
    #[error("invalid settings document: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Convenient result alias.
pub type Result<T> = std::result::Result<T, SimError>;
