//! Headless frame driver
//!
//! Steps a simulation on a fixed cadence and writes sampled frames as JSON
//! lines, for plotting or for a renderer running in another process.

use bounce_core::{snapshot, step_simulation, ScenarioError, SimulationContext};
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error("failed to write frame: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Drives a simulation context and emits every `every`-th frame
pub struct FrameDriver {
    ctx: SimulationContext,
    every: usize,
}

impl FrameDriver {
    pub fn new(ctx: SimulationContext, every: usize) -> Self {
        Self {
            ctx,
            every: every.max(1),
        }
    }

    /// Run the context's configured number of steps.
    ///
    /// The initial state and the final state are always written; returns the
    /// number of frames written.
    pub fn run(&mut self, out: &mut impl Write) -> Result<usize, DriverError> {
        let total = self.ctx.steps;
        self.emit(out)?;
        let mut written = 1;

        for step in 1..=total {
            step_simulation(&mut self.ctx)?;
            if step % self.every == 0 || step == total {
                self.emit(out)?;
                written += 1;
            }
        }

        out.flush()?;
        log::info!(
            "{} steps done, {} frames written, {:?}",
            total,
            written,
            self.ctx.simulation.stats()
        );
        Ok(written)
    }

    fn emit(&self, out: &mut impl Write) -> Result<(), DriverError> {
        serde_json::to_writer(&mut *out, &snapshot(&self.ctx))?;
        writeln!(out)?;
        Ok(())
    }
}
