//! Rigid-body engine capability
//!
//! The simulation only ever talks to the world through [`PhysicsEngine`]:
//! body creation, fixture attachment, stepping and transform queries.

pub mod rapier;
#[cfg(test)]
pub(crate) mod testing;

pub use rapier::RapierWorld;

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::settings::Settings;

/// Opaque, index-stable reference to a body owned by an engine.
///
/// Handles are issued in creation order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Circle fixture material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleFixture {
    pub radius: f32,
    pub density: f32,
    pub restitution: f32,
}

/// Shape of an attached fixture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixtureShape {
    Circle { radius: f32 },
    Box { half_extents: Vec2 },
}

/// A fixture as seen from its body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixtureInfo {
    pub shape: FixtureShape,
    /// Offset from the body origin, in body space
    pub local_position: Vec2,
}

/// Parameters for one fixed step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepParams {
    pub dt: f32,
    pub velocity_iterations: usize,
    pub position_iterations: usize,
}

impl StepParams {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            dt: settings.timestep,
            velocity_iterations: settings.velocity_iterations,
            position_iterations: settings.position_iterations,
        }
    }
}

impl Default for StepParams {
    fn default() -> Self {
        use crate::consts::*;
        Self {
            dt: SIM_DT,
            velocity_iterations: VELOCITY_ITERATIONS,
            position_iterations: POSITION_ITERATIONS,
        }
    }
}

/// The subset of a 2D rigid-body engine the board needs
pub trait PhysicsEngine {
    /// Create an immovable body at `position`
    fn create_static_body(&mut self, position: Vec2) -> Result<BodyHandle>;

    /// Create a body affected by gravity and contacts at `position`
    fn create_dynamic_body(&mut self, position: Vec2) -> Result<BodyHandle>;

    fn attach_circle_fixture(&mut self, body: BodyHandle, fixture: CircleFixture) -> Result<()>;

    /// Attach an axis-aligned box centred on the body origin
    fn attach_polygon_fixture(
        &mut self,
        body: BodyHandle,
        half_width: f32,
        half_height: f32,
        density: f32,
    ) -> Result<()>;

    /// Advance the world by one fixed timestep
    fn step(&mut self, params: &StepParams) -> Result<()>;

    fn query_fixtures(&self, body: BodyHandle) -> Result<Vec<FixtureInfo>>;

    fn body_position(&self, body: BodyHandle) -> Result<Vec2>;

    /// Body rotation in radians
    fn body_angle(&self, body: BodyHandle) -> Result<f32>;

    /// Number of bodies created so far
    fn body_count(&self) -> usize;
}
