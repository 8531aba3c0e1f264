//! Ball spawner
//!
//! Drops balls just above the top row with a small seeded horizontal jitter,
//! so successive balls take different paths but whole runs stay reproducible.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::layout::BoardLayout;
use super::registry::BodyRegistry;
use super::state::RngState;
use crate::error::Result;
use crate::physics::{BodyHandle, CircleFixture, PhysicsEngine};
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    center_x: f32,
    spawn_y: f32,
    jitter: f32,
    fixture: CircleFixture,
    spawned: u64,
}

impl Spawner {
    pub fn new(settings: &Settings, layout: &BoardLayout) -> Self {
        Self {
            rng: RngState::new(settings.seed).to_rng(),
            center_x: layout.center_x,
            spawn_y: layout.spawn_height(settings.spawn_height_rows),
            jitter: settings.spawn_jitter,
            fixture: CircleFixture {
                radius: layout.peg_radius,
                density: settings.ball_density,
                restitution: settings.bounciness,
            },
            spawned: 0,
        }
    }

    /// Fixed drop height
    pub fn spawn_y(&self) -> f32 {
        self.spawn_y
    }

    /// True if every possible drop position, ball radius included, lies
    /// strictly inside the arena
    pub fn fits_within(&self, width: f32, height: f32) -> bool {
        let r = self.fixture.radius;
        let left = self.center_x - self.jitter - r;
        let right = self.center_x + self.jitter + r;
        left > 0.0 && right < width && self.spawn_y - r > 0.0 && self.spawn_y + r < height
    }

    /// Balls dropped so far
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Draw the next drop position
    pub fn next_position(&mut self) -> Vec2 {
        let jitter = if self.jitter > 0.0 {
            self.rng.random_range(-self.jitter..=self.jitter)
        } else {
            0.0
        };
        Vec2::new(self.center_x + jitter, self.spawn_y)
    }

    /// Create one ball and append it to the registry
    pub fn drop_ball<E: PhysicsEngine>(
        &mut self,
        engine: &mut E,
        registry: &mut BodyRegistry,
    ) -> Result<BodyHandle> {
        let position = self.next_position();
        let ball = engine.create_dynamic_body(position)?;
        engine.attach_circle_fixture(ball, self.fixture)?;
        registry.add_ball(ball);
        self.spawned += 1;
        log::debug!(
            "Dropped ball {ball} at ({:.3}, {:.3}), {} total",
            position.x,
            position.y,
            self.spawned
        );
        Ok(ball)
    }
}
