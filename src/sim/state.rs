//! Simulation context
//!
//! Everything a run owns lives in one [`Simulation`] value: the physics world,
//! the board layout, the body registry, the spawner and the tick counter.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, build_arena};
use super::layout::BoardLayout;
use super::registry::BodyRegistry;
use super::spawner::Spawner;
use crate::error::{Result, SimError};
use crate::physics::{CircleFixture, PhysicsEngine, RapierWorld, StepParams};
use crate::settings::Settings;

/// Lifecycle of a simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    /// Constructed; no bodies exist yet
    Uninitialized,
    /// Arena and pegs built, ticking allowed
    Running,
}

/// Seed wrapper for the spawn RNG
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// A peg board run
pub struct Simulation<E: PhysicsEngine = RapierWorld> {
    pub(super) settings: Settings,
    pub(super) step_params: StepParams,
    pub(super) engine: E,
    pub(super) layout: BoardLayout,
    pub(super) registry: BodyRegistry,
    pub(super) spawner: Spawner,
    pub(super) arena: Option<Arena>,
    /// Fixed ticks since setup; gates spawn cadence
    pub(super) time_ticks: u64,
    pub(super) phase: SimPhase,
}

impl Simulation<RapierWorld> {
    /// Build a running simulation on a rapier world
    pub fn new(settings: Settings) -> Result<Self> {
        let engine = RapierWorld::new(settings.gravity_vector());
        let mut sim = Self::with_engine(settings, engine)?;
        sim.start()?;
        Ok(sim)
    }
}

impl<E: PhysicsEngine> Simulation<E> {
    /// Wrap `engine` without creating any bodies yet
    pub fn with_engine(settings: Settings, engine: E) -> Result<Self> {
        settings.validate()?;
        let layout = BoardLayout::generate(&settings);
        if !layout.fits_within(settings.arena_width, settings.arena_height) {
            return Err(SimError::Setup(
                "peg layout does not fit inside the arena".to_string(),
            ));
        }
        let spawner = Spawner::new(&settings, &layout);
        if !spawner.fits_within(settings.arena_width, settings.arena_height) {
            return Err(SimError::Setup(format!(
                "drop point y={:.3} (jitter ±{}) is outside the arena",
                spawner.spawn_y(),
                settings.spawn_jitter
            )));
        }

        Ok(Self {
            step_params: StepParams::from_settings(&settings),
            settings,
            engine,
            layout,
            registry: BodyRegistry::new(),
            spawner,
            arena: None,
            time_ticks: 0,
            phase: SimPhase::Uninitialized,
        })
    }

    /// Build the arena, materialize the pegs and drop the first ball.
    ///
    /// Runs once; later calls leave the world untouched.
    pub fn start(&mut self) -> Result<()> {
        if self.phase == SimPhase::Running {
            log::warn!("Simulation already running, ignoring repeated setup");
            return Ok(());
        }

        let arena = build_arena(
            &mut self.engine,
            self.settings.arena_width,
            self.settings.arena_height,
            self.settings.wall_thickness,
        )?;
        self.arena = Some(arena);
        self.add_pegs()?;
        self.spawner
            .drop_ball(&mut self.engine, &mut self.registry)
            .map_err(|e| SimError::Setup(format!("initial drop failed: {e}")))?;

        self.phase = SimPhase::Running;
        log::info!(
            "Board ready: {} rows, {} pegs, seed {}",
            self.layout.rows.len(),
            self.registry.pegs().len(),
            self.settings.seed
        );
        Ok(())
    }

    fn add_pegs(&mut self) -> Result<()> {
        let fixture = CircleFixture {
            radius: self.layout.peg_radius,
            density: self.settings.peg_density,
            restitution: self.settings.bounciness,
        };
        for position in self.layout.positions() {
            let peg = self
                .engine
                .create_static_body(position)
                .and_then(|peg| {
                    self.engine.attach_circle_fixture(peg, fixture)?;
                    Ok(peg)
                })
                .map_err(|e| SimError::Setup(format!("could not place peg: {e}")))?;
            self.registry.add_peg(peg);
        }
        Ok(())
    }

    /// Release the world and everything in it
    pub fn shutdown(self) {
        log::info!(
            "Shutting down after {} ticks ({} balls, {} pegs)",
            self.time_ticks,
            self.registry.balls().len(),
            self.registry.pegs().len()
        );
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn arena(&self) -> Option<&Arena> {
        self.arena.as_ref()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }
}
