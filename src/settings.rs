//! Board settings
//!
//! Load-time constants for a run. Defaults reproduce the classic 15-row board.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};

/// Board, spawn and stepping configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    pub wall_thickness: f32,

    // === Board ===
    /// Number of peg rows (must be > 1)
    pub rows: u32,
    /// Pegs in the top row (must be >= 1)
    pub first_row_pegs: u32,
    /// Fraction of the arena height spanned by the rows
    pub peg_area_height_frac: f32,
    /// Height of the top row as a fraction of the arena height
    pub peg_area_start_frac: f32,
    /// Width of the widest row as a fraction of the arena width
    pub peg_area_width_frac: f32,

    // === Materials ===
    pub bounciness: f32,
    pub peg_density: f32,
    pub ball_density: f32,
    /// Magnitude of downward gravity
    pub gravity: f32,

    // === Spawning ===
    pub spawn_interval_ticks: u64,
    pub spawn_jitter: f32,
    pub spawn_height_rows: f32,
    /// Seed for the spawn jitter RNG
    pub seed: u64,

    // === Stepping ===
    pub timestep: f32,
    pub velocity_iterations: usize,
    pub position_iterations: usize,

    // === Rendering ===
    pub circle_segments: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            wall_thickness: WALL_THICKNESS,

            rows: ROW_COUNT,
            first_row_pegs: PEGS_IN_FIRST_ROW,
            peg_area_height_frac: PEG_AREA_HEIGHT_FRAC,
            peg_area_start_frac: PEG_AREA_START_FRAC,
            peg_area_width_frac: PEG_AREA_WIDTH_FRAC,

            bounciness: BOUNCINESS,
            peg_density: PEG_DENSITY,
            ball_density: BALL_DENSITY,
            gravity: GRAVITY,

            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
            spawn_jitter: SPAWN_JITTER,
            spawn_height_rows: SPAWN_HEIGHT_ROWS,
            seed: 0x5EED_0F_BA11,

            timestep: SIM_DT,
            velocity_iterations: VELOCITY_ITERATIONS,
            position_iterations: POSITION_ITERATIONS,

            circle_segments: CIRCLE_SEGMENTS,
        }
    }
}

impl Settings {
    /// Parse a JSON settings document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Vertical span covered by the peg rows
    pub fn peg_area_height(&self) -> f32 {
        self.arena_height * self.peg_area_height_frac
    }

    /// Height of the top peg row
    pub fn peg_area_start(&self) -> f32 {
        self.arena_height * self.peg_area_start_frac
    }

    /// Horizontal span of the widest row
    pub fn peg_area_width(&self) -> f32 {
        self.arena_width * self.peg_area_width_frac
    }

    /// Horizontal midline of the arena
    pub fn center_x(&self) -> f32 {
        self.arena_width / 2.0
    }

    /// Gravity vector (pointing down)
    pub fn gravity_vector(&self) -> Vec2 {
        Vec2::new(0.0, -self.gravity)
    }

    /// Reject settings that would produce a degenerate board or world
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: &str| Err(SimError::Setup(msg.to_string()));

        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return fail("arena dimensions must be positive");
        }
        if self.rows < 2 {
            return fail("a board needs at least two rows");
        }
        if self.first_row_pegs < 1 {
            return fail("the first row needs at least one peg");
        }
        if !(self.peg_area_height_frac > 0.0 && self.peg_area_width_frac > 0.0) {
            return fail("peg area fractions must be positive");
        }
        if !(self.peg_area_start_frac > 0.0 && self.peg_area_start_frac < 1.0) {
            return fail("peg area start must lie inside the arena");
        }
        if self.spawn_interval_ticks == 0 {
            return fail("spawn interval must be at least one tick");
        }
        if !(self.spawn_jitter >= 0.0) {
            return fail("spawn jitter must be non-negative");
        }
        if !(self.timestep > 0.0) {
            return fail("timestep must be positive");
        }
        if self.velocity_iterations == 0 || self.position_iterations == 0 {
            return fail("solver iteration counts must be non-zero");
        }
        if self.circle_segments < 3 {
            return fail("circles need at least three segments");
        }
        Ok(())
    }
}
