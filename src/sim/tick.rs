//! Fixed timestep simulation tick
//!
//! Spawn cadence is driven by the tick counter alone, so a run behaves the
//! same no matter how fast frames are rendered.

use super::state::{SimPhase, Simulation};
use crate::error::{Result, SimError};
use crate::physics::{BodyHandle, PhysicsEngine};

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Tick number after the step (1-based)
    pub tick: u64,
    /// Ball dropped on this tick, if any
    pub spawned: Option<BodyHandle>,
}

impl<E: PhysicsEngine> Simulation<E> {
    /// Advance the world by one fixed timestep
    pub fn tick(&mut self) -> Result<TickReport> {
        if self.phase != SimPhase::Running {
            return Err(SimError::NotRunning);
        }

        let tick = self.time_ticks + 1;
        self.engine.step(&self.step_params).map_err(|e| {
            log::error!("Physics step {tick} failed: {e}");
            match e {
                SimError::Step { reason, .. } => SimError::Step { tick, reason },
                other => SimError::Step {
                    tick,
                    reason: other.to_string(),
                },
            }
        })?;
        self.time_ticks = tick;

        let spawned = if tick % self.settings.spawn_interval_ticks == 0 {
            Some(
                self.spawner
                    .drop_ball(&mut self.engine, &mut self.registry)?,
            )
        } else {
            None
        };

        log::trace!("Tick {tick}: {} balls", self.registry.balls().len());
        Ok(TickReport { tick, spawned })
    }

    /// Run `ticks` fixed steps, returning how many balls were dropped
    pub fn advance(&mut self, ticks: u64) -> Result<usize> {
        let mut spawned = 0;
        for _ in 0..ticks {
            if self.tick()?.spawned.is_some() {
                spawned += 1;
            }
        }
        Ok(spawned)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::consts::*;
    use crate::physics::StepParams;
    use crate::physics::testing::FakeEngine;
    use crate::settings::Settings;

    fn fake_sim() -> Simulation<FakeEngine> {
        let mut sim = Simulation::with_engine(Settings::default(), FakeEngine::default()).unwrap();
        sim.start().unwrap();
        sim
    }

    #[test]
    fn test_tick_before_setup() {
        let mut sim = Simulation::with_engine(Settings::default(), FakeEngine::default()).unwrap();
        assert!(matches!(sim.tick(), Err(SimError::NotRunning)));
        assert!(sim.engine().steps.is_empty());
    }

    #[test]
    fn test_step_parameters_are_fixed() {
        let mut sim = fake_sim();
        sim.advance(3).unwrap();
        let expected = StepParams {
            dt: SIM_DT,
            velocity_iterations: 6,
            position_iterations: 2,
        };
        assert_eq!(sim.engine().steps, vec![expected; 3]);
    }

    #[test]
    fn test_spawn_on_sixtieth_tick() {
        let mut sim = fake_sim();
        assert_eq!(sim.advance(59).unwrap(), 0);
        assert_eq!(sim.registry().balls().len(), 1);

        let report = sim.tick().unwrap();
        assert_eq!(report.tick, 60);
        assert!(report.spawned.is_some());
        assert_eq!(sim.registry().balls().len(), 2);
        assert_eq!(sim.registry().balls()[1], report.spawned.unwrap());
    }

    #[test]
    fn test_spawn_cadence() {
        for ticks in [0u64, 1, 59, 60, 61, 119, 120, 599, 1000] {
            let mut sim = fake_sim();
            sim.advance(ticks).unwrap();
            assert_eq!(sim.time_ticks(), ticks);
            assert_eq!(
                sim.registry().balls().len() as u64,
                1 + ticks / SPAWN_INTERVAL_TICKS,
                "after {ticks} ticks"
            );
        }
    }

    #[test]
    fn test_step_failure_is_fatal() {
        let engine = FakeEngine {
            fail_on_step: Some(5),
            ..Default::default()
        };
        let mut sim = Simulation::with_engine(Settings::default(), engine).unwrap();
        sim.start().unwrap();

        let err = sim.advance(10).unwrap_err();
        assert!(matches!(err, SimError::Step { tick: 5, .. }));
        assert_eq!(sim.time_ticks(), 4);
    }

    #[test]
    fn test_end_to_end_fifteen_seconds() {
        let mut sim = Simulation::new(Settings::default()).unwrap();
        let spawned = sim.advance(900).unwrap();

        assert_eq!(spawned, 15);
        assert_eq!(sim.registry().balls().len(), 16);
        assert_eq!(sim.registry().pegs().len(), 150);
        assert_eq!(sim.engine().body_count(), 3 + 150 + 16);

        // Every ball is still inside the arena
        for ball in sim.registry().balls() {
            let pos = sim.engine().body_position(*ball).unwrap();
            assert!(pos.x > 0.0 && pos.x < 9.0, "ball {ball} escaped at {pos}");
            assert!(pos.y > 0.0 && pos.y < 6.5, "ball {ball} escaped at {pos}");
        }
        // The first ball has had fifteen seconds to fall into the pegs
        let first = sim.engine().body_position(sim.registry().balls()[0]).unwrap();
        assert!(first.y < sim.layout().top_y);
    }

    #[test]
    fn test_ball_rests_without_gravity() {
        let settings = Settings {
            gravity: 0.0,
            spawn_jitter: 0.0,
            ..Default::default()
        };
        let mut sim = Simulation::new(settings.clone()).unwrap();
        let ball = sim.registry().balls()[0];
        let spawn = Vec2::new(settings.center_x(), sim.spawner().spawn_y());
        assert_eq!(sim.engine().body_position(ball).unwrap(), spawn);

        sim.tick().unwrap();
        let pos = sim.engine().body_position(ball).unwrap();
        assert!((pos - spawn).length() < 1e-6, "ball moved to {pos}");
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = Simulation::new(Settings::default()).unwrap();
        let mut b = Simulation::new(Settings::default()).unwrap();
        a.advance(240).unwrap();
        b.advance(240).unwrap();

        for (ba, bb) in a.registry().balls().iter().zip(b.registry().balls()) {
            assert_eq!(
                a.engine().body_position(*ba).unwrap(),
                b.engine().body_position(*bb).unwrap()
            );
        }
    }
}
