//! Deterministic simulation module
//!
//! Board orchestration lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Spawn cadence tied to the tick counter, never to wall-clock time
//! - No rendering dependencies

pub mod arena;
pub mod layout;
pub mod registry;
pub mod spawner;
pub mod state;
pub mod tick;

pub use arena::{Arena, build_arena};
pub use layout::{BoardLayout, PegRow};
pub use registry::BodyRegistry;
pub use spawner::Spawner;
pub use state::{RngState, SimPhase, Simulation};
pub use tick::TickReport;
