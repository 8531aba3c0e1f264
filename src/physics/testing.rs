//! Recording engine for orchestration tests
//!
//! Bodies never move; every call is recorded so tests can check what the
//! simulation asked for.

use glam::Vec2;

use super::{BodyHandle, CircleFixture, FixtureInfo, FixtureShape, PhysicsEngine, StepParams};
use crate::error::{Result, SimError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Static,
    Dynamic,
}

#[derive(Debug, Clone)]
pub struct FakeBody {
    pub kind: BodyKind,
    pub position: Vec2,
    pub fixtures: Vec<FixtureInfo>,
    pub densities: Vec<f32>,
    pub restitutions: Vec<f32>,
}

#[derive(Debug, Default)]
pub struct FakeEngine {
    pub bodies: Vec<FakeBody>,
    pub steps: Vec<StepParams>,
    /// Step number (1-based) that fails
    pub fail_on_step: Option<usize>,
    /// Refuse to create more than this many bodies
    pub body_limit: Option<usize>,
}

impl FakeEngine {
    pub fn count(&self, kind: BodyKind) -> usize {
        self.bodies.iter().filter(|b| b.kind == kind).count()
    }

    fn create(&mut self, kind: BodyKind, position: Vec2) -> Result<BodyHandle> {
        if self.body_limit.is_some_and(|limit| self.bodies.len() >= limit) {
            return Err(SimError::Setup("body limit reached".to_string()));
        }
        self.bodies.push(FakeBody {
            kind,
            position,
            fixtures: Vec::new(),
            densities: Vec::new(),
            restitutions: Vec::new(),
        });
        Ok(BodyHandle(self.bodies.len() as u32 - 1))
    }

    fn get(&self, body: BodyHandle) -> Result<&FakeBody> {
        self.bodies
            .get(body.0 as usize)
            .ok_or(SimError::UnknownBody(body))
    }

    fn get_mut(&mut self, body: BodyHandle) -> Result<&mut FakeBody> {
        self.bodies
            .get_mut(body.0 as usize)
            .ok_or(SimError::UnknownBody(body))
    }
}

impl PhysicsEngine for FakeEngine {
    fn create_static_body(&mut self, position: Vec2) -> Result<BodyHandle> {
        self.create(BodyKind::Static, position)
    }

    fn create_dynamic_body(&mut self, position: Vec2) -> Result<BodyHandle> {
        self.create(BodyKind::Dynamic, position)
    }

    fn attach_circle_fixture(&mut self, body: BodyHandle, fixture: CircleFixture) -> Result<()> {
        let body = self.get_mut(body)?;
        body.fixtures.push(FixtureInfo {
            shape: FixtureShape::Circle {
                radius: fixture.radius,
            },
            local_position: Vec2::ZERO,
        });
        body.densities.push(fixture.density);
        body.restitutions.push(fixture.restitution);
        Ok(())
    }

    fn attach_polygon_fixture(
        &mut self,
        body: BodyHandle,
        half_width: f32,
        half_height: f32,
        density: f32,
    ) -> Result<()> {
        let body = self.get_mut(body)?;
        body.fixtures.push(FixtureInfo {
            shape: FixtureShape::Box {
                half_extents: Vec2::new(half_width, half_height),
            },
            local_position: Vec2::ZERO,
        });
        body.densities.push(density);
        body.restitutions.push(0.0);
        Ok(())
    }

    fn step(&mut self, params: &StepParams) -> Result<()> {
        self.steps.push(*params);
        let tick = self.steps.len();
        if self.fail_on_step == Some(tick) {
            return Err(SimError::Step {
                tick: tick as u64,
                reason: "injected solver failure".to_string(),
            });
        }
        Ok(())
    }

    fn query_fixtures(&self, body: BodyHandle) -> Result<Vec<FixtureInfo>> {
        Ok(self.get(body)?.fixtures.clone())
    }

    fn body_position(&self, body: BodyHandle) -> Result<Vec2> {
        Ok(self.get(body)?.position)
    }

    fn body_angle(&self, body: BodyHandle) -> Result<f32> {
        self.get(body).map(|_| 0.0)
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}
