//! rapier2d-backed physics world

use std::num::NonZeroUsize;

use glam::Vec2;
use rapier2d::prelude::{
    CCDSolver, ColliderBuilder, ColliderSet, DefaultBroadPhase, ImpulseJointSet,
    IntegrationParameters, IslandManager, MultibodyJointSet, NarrowPhase, PhysicsPipeline, Real,
    RigidBody, RigidBodyBuilder, RigidBodyHandle, RigidBodySet, Vector,
};

use super::{BodyHandle, CircleFixture, FixtureInfo, FixtureShape, PhysicsEngine, StepParams};
use crate::error::{Result, SimError};

/// Fixture friction, matching Box2D's fixture default
const FRICTION: f32 = 0.2;

/// A complete rapier world plus the handle table mapping [`BodyHandle`]s to bodies
pub struct RapierWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    /// Indexed by `BodyHandle.0`
    handles: Vec<RigidBodyHandle>,
    steps: u64,
}

impl RapierWorld {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: Vector::new(gravity.x, gravity.y),
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            handles: Vec::new(),
            steps: 0,
        }
    }

    /// Gravity currently applied to dynamic bodies
    pub fn gravity(&self) -> Vec2 {
        Vec2::new(self.gravity.x, self.gravity.y)
    }

    /// Linear velocity of a body
    pub fn body_velocity(&self, body: BodyHandle) -> Result<Vec2> {
        let v = self.body(body)?.linvel();
        Ok(Vec2::new(v.x, v.y))
    }

    fn insert(&mut self, body: RigidBody) -> Result<BodyHandle> {
        let index = u32::try_from(self.handles.len())
            .map_err(|_| SimError::Setup("body table is full".to_string()))?;
        let handle = self.bodies.insert(body);
        self.handles.push(handle);
        Ok(BodyHandle(index))
    }

    fn raw(&self, body: BodyHandle) -> Result<RigidBodyHandle> {
        self.handles
            .get(body.0 as usize)
            .copied()
            .ok_or(SimError::UnknownBody(body))
    }

    fn body(&self, body: BodyHandle) -> Result<&RigidBody> {
        let raw = self.raw(body)?;
        self.bodies.get(raw).ok_or(SimError::UnknownBody(body))
    }

    /// First body whose transform is no longer finite, if any
    fn first_corrupt_body(&self) -> Option<BodyHandle> {
        self.handles.iter().enumerate().find_map(|(index, raw)| {
            let body = self.bodies.get(*raw)?;
            let t = body.translation();
            let finite = t.x.is_finite() && t.y.is_finite() && body.rotation().angle().is_finite();
            (!finite).then_some(BodyHandle(index as u32))
        })
    }

    fn check_transforms(&self, tick: u64) -> Result<()> {
        match self.first_corrupt_body() {
            Some(body) => Err(SimError::Step {
                tick,
                reason: format!("body {body} has a non-finite transform"),
            }),
            None => Ok(()),
        }
    }
}

impl PhysicsEngine for RapierWorld {
    fn create_static_body(&mut self, position: Vec2) -> Result<BodyHandle> {
        let body = RigidBodyBuilder::fixed()
            .translation(Vector::new(position.x, position.y))
            .build();
        self.insert(body)
    }

    fn create_dynamic_body(&mut self, position: Vec2) -> Result<BodyHandle> {
        // CCD: walls are thinner than a ball travels in one step
        let body = RigidBodyBuilder::dynamic()
            .translation(Vector::new(position.x, position.y))
            .ccd_enabled(true)
            .build();
        self.insert(body)
    }

    fn attach_circle_fixture(&mut self, body: BodyHandle, fixture: CircleFixture) -> Result<()> {
        let raw = self.raw(body)?;
        let collider = ColliderBuilder::ball(fixture.radius)
            .density(fixture.density)
            .restitution(fixture.restitution)
            .friction(FRICTION)
            .build();
        self.colliders
            .insert_with_parent(collider, raw, &mut self.bodies);
        Ok(())
    }

    fn attach_polygon_fixture(
        &mut self,
        body: BodyHandle,
        half_width: f32,
        half_height: f32,
        density: f32,
    ) -> Result<()> {
        let raw = self.raw(body)?;
        let collider = ColliderBuilder::cuboid(half_width, half_height)
            .density(density)
            .friction(FRICTION)
            .build();
        self.colliders
            .insert_with_parent(collider, raw, &mut self.bodies);
        Ok(())
    }

    fn step(&mut self, params: &StepParams) -> Result<()> {
        let tick = self.steps + 1;
        let fail = |reason: &str| SimError::Step {
            tick,
            reason: reason.to_string(),
        };

        if !(params.dt.is_finite() && params.dt > 0.0) {
            return Err(fail("timestep must be positive"));
        }
        self.integration_parameters.dt = params.dt;
        self.integration_parameters.num_solver_iterations =
            NonZeroUsize::new(params.velocity_iterations)
                .ok_or_else(|| fail("velocity iterations must be non-zero"))?;
        self.integration_parameters.num_internal_stabilization_iterations =
            params.position_iterations;

        // A body with a non-finite transform poisons the broad phase
        self.check_transforms(tick)?;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
        self.steps = tick;
        self.check_transforms(tick)
    }

    fn query_fixtures(&self, body: BodyHandle) -> Result<Vec<FixtureInfo>> {
        let fixtures = self
            .body(body)?
            .colliders()
            .iter()
            .filter_map(|handle| self.colliders.get(*handle))
            .filter_map(|collider| {
                let shape = collider.shape();
                let shape = if let Some(ball) = shape.as_ball() {
                    FixtureShape::Circle {
                        radius: ball.radius,
                    }
                } else if let Some(cuboid) = shape.as_cuboid() {
                    FixtureShape::Box {
                        half_extents: Vec2::new(cuboid.half_extents.x, cuboid.half_extents.y),
                    }
                } else {
                    return None;
                };
                let local_position = collider
                    .position_wrt_parent()
                    .map(|iso| Vec2::new(iso.translation.x, iso.translation.y))
                    .unwrap_or(Vec2::ZERO);
                Some(FixtureInfo {
                    shape,
                    local_position,
                })
            })
            .collect();
        Ok(fixtures)
    }

    fn body_position(&self, body: BodyHandle) -> Result<Vec2> {
        let t = self.body(body)?.translation();
        Ok(Vec2::new(t.x, t.y))
    }

    fn body_angle(&self, body: BodyHandle) -> Result<f32> {
        Ok(self.body(body)?.rotation().angle())
    }

    fn body_count(&self) -> usize {
        self.handles.len()
    }
}

impl Drop for RapierWorld {
    fn drop(&mut self) {
        log::debug!(
            "Releasing physics world ({} bodies, {} colliders)",
            self.bodies.len(),
            self.colliders.len()
        );
    }
}
