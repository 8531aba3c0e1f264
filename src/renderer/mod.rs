//! Render adapter contract
//!
//! The simulation is turned into a [`Frame`] of plain draw commands; callers
//! with a GPU upload [`Frame::tessellate`] output as a triangle list drawn with
//! [`Frame::camera`]'s view-projection.

pub mod camera;
pub mod shapes;
pub mod vertex;

pub use camera::{Camera2d, CameraUniform};
pub use vertex::{Vertex, colors};

use glam::Vec2;

use crate::error::Result;
use crate::local_to_world;
use crate::physics::{BodyHandle, FixtureShape, PhysicsEngine};
use crate::sim::Simulation;

/// A filled circle in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCircle {
    pub center: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
}

/// Outline of one physics shape, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugShape {
    pub body: BodyHandle,
    pub center: Vec2,
    pub angle: f32,
    pub shape: FixtureShape,
    pub dynamic: bool,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub clear_color: [f32; 4],
    pub camera: Camera2d,
    /// Balls in creation order, then pegs
    pub circles: Vec<DrawCircle>,
    pub debug: Vec<DebugShape>,
}

impl Frame {
    /// Triangle list for the whole frame: debug outlines first, filled circles on top
    pub fn tessellate(&self, segments: u32) -> Vec<Vertex> {
        let outline = self.camera.width / 600.0;
        let mut vertices = Vec::new();

        for shape in &self.debug {
            let color = if shape.dynamic {
                colors::DEBUG_DYNAMIC
            } else {
                colors::DEBUG_STATIC
            };
            match shape.shape {
                FixtureShape::Circle { radius } => vertices.extend(shapes::ring(
                    shape.center,
                    (radius - outline).max(0.0),
                    radius,
                    color,
                    segments,
                )),
                FixtureShape::Box { half_extents } => vertices.extend(shapes::box_outline(
                    shape.center,
                    half_extents,
                    shape.angle,
                    outline,
                    color,
                )),
            }
        }

        for circle in &self.circles {
            vertices.extend(shapes::circle(
                circle.center,
                circle.radius,
                circle.color,
                segments,
            ));
        }
        vertices
    }
}

/// Build the draw commands for the current state of `sim`
pub fn render<E: PhysicsEngine>(sim: &Simulation<E>, debug_overlay: bool) -> Result<Frame> {
    let engine = sim.engine();
    let registry = sim.registry();

    let mut circles = Vec::with_capacity(registry.balls().len() + registry.pegs().len());
    for (bodies, color) in [(registry.balls(), colors::BALL), (registry.pegs(), colors::PEG)] {
        for body in bodies {
            let position = engine.body_position(*body)?;
            let angle = engine.body_angle(*body)?;
            for fixture in engine.query_fixtures(*body)? {
                if let FixtureShape::Circle { radius } = fixture.shape {
                    circles.push(DrawCircle {
                        center: local_to_world(position, angle, fixture.local_position),
                        radius,
                        color,
                    });
                }
            }
        }
    }

    let mut debug = Vec::new();
    if debug_overlay {
        let walls: Vec<BodyHandle> = sim.arena().map(|a| a.walls().to_vec()).unwrap_or_default();
        let balls = registry.balls();
        for body in walls.into_iter().chain(registry.iter()) {
            let position = engine.body_position(body)?;
            let angle = engine.body_angle(body)?;
            for fixture in engine.query_fixtures(body)? {
                debug.push(DebugShape {
                    body,
                    center: local_to_world(position, angle, fixture.local_position),
                    angle,
                    shape: fixture.shape,
                    dynamic: balls.contains(&body),
                });
            }
        }
    }

    Ok(Frame {
        clear_color: colors::BACKGROUND,
        camera: Camera2d::ortho(sim.settings().arena_width, sim.settings().arena_height),
        circles,
        debug,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::testing::FakeEngine;
    use crate::settings::Settings;

    fn running() -> Simulation<FakeEngine> {
        let mut sim = Simulation::with_engine(Settings::default(), FakeEngine::default()).unwrap();
        sim.start().unwrap();
        sim
    }

    #[test]
    fn test_frame_lists_balls_then_pegs() {
        let mut sim = running();
        sim.advance(120).unwrap();
        let frame = render(&sim, false).unwrap();

        assert_eq!(frame.circles.len(), 3 + 150);
        assert!(frame.debug.is_empty());
        for (circle, ball) in frame.circles.iter().zip(sim.registry().balls()) {
            assert_eq!(circle.center, sim.engine().body_position(*ball).unwrap());
            assert_eq!(circle.radius, sim.layout().peg_radius);
        }
        let first_peg = frame.circles[3];
        assert_eq!(first_peg.center, sim.layout().rows[0].positions[0]);
        assert_eq!(frame.clear_color, colors::BACKGROUND);
    }

    #[test]
    fn test_debug_overlay_includes_walls() {
        let sim = running();
        let frame = render(&sim, true).unwrap();

        assert_eq!(frame.debug.len(), 3 + 1 + 150);
        let boxes = frame
            .debug
            .iter()
            .filter(|d| matches!(d.shape, FixtureShape::Box { .. }))
            .count();
        assert_eq!(boxes, 3);
        assert_eq!(frame.debug.iter().filter(|d| d.dynamic).count(), 1);
    }

    #[test]
    fn test_tessellate_counts() {
        let sim = running();
        let frame = render(&sim, false).unwrap();
        let vertices = frame.tessellate(30);
        assert_eq!(vertices.len(), 151 * 30 * 3);
    }

    #[test]
    fn test_render_with_rapier() {
        let mut sim = Simulation::new(Settings::default()).unwrap();
        sim.advance(60).unwrap();
        let frame = render(&sim, true).unwrap();
        assert_eq!(frame.circles.len(), 2 + 150);
        for circle in &frame.circles {
            let ndc = frame.camera.project(circle.center);
            assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0);
        }
    }
}
