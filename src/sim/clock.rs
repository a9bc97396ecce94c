//! Fixed timestep accumulator
//!
//! Decouples the simulation rate from the host's frame rate: frame time is
//! banked and paid out in whole ticks of `dt`.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, PartialEq)]
pub struct FixedTimestep {
    dt: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedTimestep {
    pub fn new(dt: f32, max_substeps: u32) -> Self {
        Self {
            dt,
            max_substeps,
            accumulator: 0.0,
        }
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Time banked but not yet simulated
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Bank a frame's elapsed time and return how many ticks to run now.
    ///
    /// Long frames (tab switch, debugger pause) are capped so the loop never
    /// spirals; time beyond `max_substeps` ticks is dropped.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt.min(MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= self.dt && ticks < self.max_substeps {
            self.accumulator -= self.dt;
            ticks += 1;
        }
        if ticks == self.max_substeps && self.accumulator >= self.dt {
            log::warn!(
                "Dropping {:.3}s of simulation time after {} substeps",
                self.accumulator,
                ticks
            );
            self.accumulator = 0.0;
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
