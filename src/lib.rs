//! Peg Board - a Galton-style board of pegs that balls fall through
//!
//! Core modules:
//! - `sim`: Deterministic simulation (layout, arena, spawning, fixed-step loop)
//! - `physics`: Rigid-body engine capability and its rapier2d backend
//! - `renderer`: Camera projection, draw commands and circle tessellation
//! - `settings`: Board configuration constants

pub mod error;
pub mod physics;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use physics::{BodyHandle, PhysicsEngine, RapierWorld};
pub use settings::Settings;
pub use sim::{SimPhase, Simulation};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Fixed ticks per simulated second
    pub const TICKS_PER_SECOND: u64 = 60;
    /// Solver velocity iterations per step
    pub const VELOCITY_ITERATIONS: usize = 6;
    /// Solver position iterations per step
    pub const POSITION_ITERATIONS: usize = 2;
    /// A ball is dropped every this many ticks (once per simulated second)
    pub const SPAWN_INTERVAL_TICKS: u64 = 60;

    /// Arena dimensions (simulation units)
    pub const ARENA_WIDTH: f32 = 9.0;
    pub const ARENA_HEIGHT: f32 = 6.0;
    /// Thickness of the floor and side walls
    pub const WALL_THICKNESS: f32 = 0.01;

    /// Board shape
    pub const ROW_COUNT: u32 = 15;
    pub const PEGS_IN_FIRST_ROW: u32 = 3;
    /// Fractions of the arena used by the peg area
    pub const PEG_AREA_HEIGHT_FRAC: f32 = 0.8;
    pub const PEG_AREA_START_FRAC: f32 = 0.9;
    pub const PEG_AREA_WIDTH_FRAC: f32 = 0.7;
    /// Peg radius as a fraction of the vertical row spacing
    pub const PEG_RADIUS_FRAC: f32 = 0.2;

    /// Restitution shared by pegs and balls
    pub const BOUNCINESS: f32 = 0.4;
    /// Downward gravity (units/s²)
    pub const GRAVITY: f32 = 6.5;
    pub const BALL_DENSITY: f32 = 1.0;
    pub const PEG_DENSITY: f32 = 1.0;

    /// Half-width of the uniform horizontal spawn jitter
    pub const SPAWN_JITTER: f32 = 0.05;
    /// Spawn height above the top row, in row spacings
    pub const SPAWN_HEIGHT_ROWS: f32 = 1.5;

    /// Segments used to tessellate a filled circle
    pub const CIRCLE_SEGMENTS: u32 = 30;
}

/// Rotate a local offset by `angle` radians and translate it to `origin`
#[inline]
pub fn local_to_world(origin: Vec2, angle: f32, local: Vec2) -> Vec2 {
    origin + Vec2::from_angle(angle).rotate(local)
}
