//! Headless peg board runner
//!
//! Runs the default board for a fixed stretch of simulated time, building and
//! tessellating a frame every tick the way a windowed front end would.

use anyhow::Context;
use peg_board::consts::TICKS_PER_SECOND;
use peg_board::renderer::{self, Vertex};
use peg_board::{Settings, Simulation};

/// Simulated seconds to run
const RUN_SECONDS: u64 = 15;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Peg board (headless) starting...");

    let settings = Settings::default();
    let segments = settings.circle_segments;
    let mut sim = Simulation::new(settings).context("board setup failed")?;

    let total_ticks = RUN_SECONDS * TICKS_PER_SECOND;
    let mut vertex_bytes = 0usize;
    for _ in 0..total_ticks {
        let report = sim.tick().context("simulation aborted")?;
        let frame = renderer::render(&sim, true)?;
        let vertices = frame.tessellate(segments);
        vertex_bytes = Vertex::as_bytes(&vertices).len();

        if report.tick % TICKS_PER_SECOND == 0 {
            log::info!(
                "t={}s: {} balls, {} draw calls, {} vertex bytes",
                report.tick / TICKS_PER_SECOND,
                sim.registry().balls().len(),
                frame.circles.len(),
                vertex_bytes
            );
        }
    }

    println!(
        "{} ticks, {} balls, {} pegs, last frame {} vertex bytes",
        sim.time_ticks(),
        sim.registry().balls().len(),
        sim.registry().pegs().len(),
        vertex_bytes
    );
    sim.shutdown();
    Ok(())
}
