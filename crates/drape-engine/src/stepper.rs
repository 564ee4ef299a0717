//! Fixed-timestep accumulator.
//!
//! Frame times vary; the simulation only ever advances by its fixed `dt`.
//! The stepper banks elapsed frame time and tells the caller how many
//! ticks to run this frame.

use drape_types::constants::DEFAULT_DT;

/// Converts variable frame times into whole fixed ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStepper {
    dt: f64,
    accumulator: f64,
    /// Upper bound on ticks per frame. Time beyond it is discarded.
    max_substeps: u32,
}

impl Default for FixedStepper {
    fn default() -> Self {
        Self::new(DEFAULT_DT, 4)
    }
}

impl FixedStepper {
    /// `dt` must be positive; `max_substeps` is raised to at least 1.
    pub fn new(dt: f32, max_substeps: u32) -> Self {
        Self {
            dt: dt.max(f32::EPSILON) as f64,
            accumulator: 0.0,
            max_substeps: max_substeps.max(1),
        }
    }

    /// Banks `frame_time` seconds and returns the number of ticks to run.
    pub fn advance(&mut self, frame_time: f64) -> u32 {
        self.accumulator += frame_time.max(0.0);
        let due = (self.accumulator / self.dt).floor();
        let ticks = (due as u64).min(self.max_substeps as u64) as u32;
        self.accumulator -= ticks as f64 * self.dt;

        if due as u64 > self.max_substeps as u64 {
            tracing::debug!(
                due = due as u64,
                ran = ticks,
                dropped_s = self.accumulator,
                "frame over tick budget; dropping backlog"
            );
            self.accumulator = 0.0;
        }
        ticks
    }

    /// Fraction of a tick left in the accumulator, for interpolation.
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn max_substeps(&self) -> u32 {
        self.max_substeps
    }

    /// Discards banked time.
    pub fn clear(&mut self) {
        self.accumulator = 0.0;
    }
}
