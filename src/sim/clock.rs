//! Fixed timestep accumulator
//!
//! Converts variable frame time into a whole number of simulation ticks.
//! The engines never see wall-clock time; the presentation layer feeds frame
//! deltas in here and calls `tick` as many times as returned.

/// Accumulates elapsed time and releases ticks at a fixed interval
#[derive(Debug, Clone)]
pub struct FixedStep {
    interval_ms: f64,
    accumulator: f64,
    /// Maximum ticks per frame to prevent spiral of death
    max_substeps: u32,
}

impl FixedStep {
    pub fn new(interval_ms: u32, max_substeps: u32) -> Self {
        Self {
            interval_ms: f64::from(interval_ms.max(1)),
            accumulator: 0.0,
            max_substeps: max_substeps.max(1),
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Drop any partially accumulated time (on restart)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Feed elapsed frame time, returns how many ticks are due
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.accumulator += elapsed_ms;
        }

        let mut ticks = 0;
        while self.accumulator >= self.interval_ms && ticks < self.max_substeps {
            self.accumulator -= self.interval_ms;
            ticks += 1;
        }

        // Backlog beyond the cap is dropped rather than replayed next frame
        if self.accumulator >= self.interval_ms {
            log::debug!(
                "Frame fell behind, dropping {:.1}ms of backlog",
                self.accumulator
            );
            self.accumulator %= self.interval_ms;
        }

        ticks
    }
}
