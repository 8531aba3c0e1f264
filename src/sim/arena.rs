//! Static arena boundaries
//!
//! Floor and side walls; the top stays open so balls can be dropped in.

use glam::Vec2;

use crate::error::{Result, SimError};
use crate::physics::{BodyHandle, PhysicsEngine};

/// Handles of the three boundary bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arena {
    pub bottom: BodyHandle,
    pub left: BodyHandle,
    pub right: BodyHandle,
}

impl Arena {
    pub fn walls(&self) -> [BodyHandle; 3] {
        [self.bottom, self.left, self.right]
    }
}

/// Build the floor and both side walls.
///
/// Walls have zero density and no restitution of their own.
pub fn build_arena<E: PhysicsEngine>(
    engine: &mut E,
    width: f32,
    height: f32,
    thickness: f32,
) -> Result<Arena> {
    let arena = build_walls(engine, width, height, thickness)
        .map_err(|e| SimError::Setup(format!("could not build arena: {e}")))?;
    log::debug!("Arena built: {width}x{height}, walls {:?}", arena.walls());
    Ok(arena)
}

fn build_walls<E: PhysicsEngine>(
    engine: &mut E,
    width: f32,
    height: f32,
    thickness: f32,
) -> Result<Arena> {
    Ok(Arena {
        bottom: create_wall(engine, Vec2::new(width / 2.0, 0.0), Vec2::new(width, thickness))?,
        left: create_wall(engine, Vec2::new(0.0, height / 2.0), Vec2::new(thickness, height))?,
        right: create_wall(engine, Vec2::new(width, height / 2.0), Vec2::new(thickness, height))?,
    })
}

fn create_wall<E: PhysicsEngine>(engine: &mut E, center: Vec2, size: Vec2) -> Result<BodyHandle> {
    let body = engine.create_static_body(center)?;
    engine.attach_polygon_fixture(body, size.x / 2.0, size.y / 2.0, 0.0)?;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::FixtureShape;
    use crate::physics::testing::{BodyKind, FakeEngine};

    #[test]
    fn test_builds_three_static_walls() {
        let mut engine = FakeEngine::default();
        let arena = build_arena(&mut engine, 9.0, 6.0, 0.01).unwrap();

        assert_eq!(engine.count(BodyKind::Static), 3);
        assert_eq!(engine.count(BodyKind::Dynamic), 0);
        assert_eq!(engine.bodies[arena.bottom.0 as usize].position, Vec2::new(4.5, 0.0));
        assert_eq!(engine.bodies[arena.left.0 as usize].position, Vec2::new(0.0, 3.0));
        assert_eq!(engine.bodies[arena.right.0 as usize].position, Vec2::new(9.0, 3.0));
    }

    #[test]
    fn test_wall_fixtures() {
        let mut engine = FakeEngine::default();
        let arena = build_arena(&mut engine, 9.0, 6.0, 0.01).unwrap();

        let floor = &engine.bodies[arena.bottom.0 as usize];
        assert_eq!(
            floor.fixtures[0].shape,
            FixtureShape::Box {
                half_extents: Vec2::new(4.5, 0.005)
            }
        );
        let left = &engine.bodies[arena.left.0 as usize];
        assert_eq!(
            left.fixtures[0].shape,
            FixtureShape::Box {
                half_extents: Vec2::new(0.005, 3.0)
            }
        );
        for wall in arena.walls() {
            assert_eq!(engine.bodies[wall.0 as usize].densities, vec![0.0]);
        }
    }

    #[test]
    fn test_engine_failure_is_setup_failure() {
        let mut engine = FakeEngine {
            body_limit: Some(2),
            ..Default::default()
        };
        assert!(matches!(
            build_arena(&mut engine, 9.0, 6.0, 0.01),
            Err(SimError::Setup(_))
        ));
    }
}
