use std::time::{Duration, Instant};

use crate::config::{RunConfig, FPS_STEP_FACTOR, MAX_FPS, MIN_FPS};

/// Discrete input the driver loop reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Quit,
    SkipUp,
    SkipDown,
    FpsUp,
    FpsDown,
    Reseed,
}

/// Pacing state adjustable at runtime.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeParameters {
    /// Render every `skip`th step
    pub skip: u32,
    /// Upper bound on steps per second, within `MIN_FPS..=MAX_FPS`
    pub fps: f64,
}

impl RuntimeParameters {
    pub fn new(run: &RunConfig) -> Self {
        Self {
            skip: run.skip.max(1),
            fps: run.fps.clamp(MIN_FPS, MAX_FPS),
        }
    }

    /// Apply a skip or fps change. Other controls are left to the caller.
    pub fn adjust(&mut self, control: Control) {
        match control {
            Control::SkipUp => {
                self.skip += 1;
                log::info!("New skip: {}", self.skip);
            }
            Control::SkipDown => {
                if self.skip > 1 {
                    self.skip -= 1;
                }
                log::info!("New skip: {}", self.skip);
            }
            Control::FpsUp => {
                self.fps = (self.fps * FPS_STEP_FACTOR).min(MAX_FPS);
                log::info!("New max fps: {:.1}", self.fps);
            }
            Control::FpsDown => {
                self.fps = (self.fps / FPS_STEP_FACTOR).max(MIN_FPS);
                log::info!("New max fps: {:.1}", self.fps);
            }
            Control::Quit | Control::Reseed => {}
        }
    }

    /// Whether step number `step` (0-based) should be drawn.
    pub fn should_render(&self, step: u64) -> bool {
        step % u64::from(self.skip) == 0
    }

    /// Minimum wall time per step.
    pub fn step_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps)
    }

    /// When the step that started at `started` may be followed by the next.
    pub fn next_step_at(&self, started: Instant) -> Instant {
        started + self.step_interval()
    }
}

/// Simple rate counter
pub struct RateCounter {
    last_update: Instant,
    count: u32,
}

impl RateCounter {
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
            count: 0,
        }
    }

    /// Tick the counter, returns Some(rate per second) every second
    pub fn tick(&mut self) -> Option<f64> {
        self.count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f64() >= 1.0 {
            let rate = self.count as f64 / elapsed.as_secs_f64();
            self.count = 0;
            self.last_update = Instant::now();
            Some(rate)
        } else {
            None
        }
    }
}

/// Totals reported when the run ends.
pub struct RunStats {
    started: Instant,
}

impl RunStats {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn report(&self, steps: u64, reseeds: u64) {
        let elapsed = self.started.elapsed().as_secs_f64();
        let rate = if elapsed > 0.0 { steps as f64 / elapsed } else { 0.0 };
        log::info!(
            "Ran {} steps in {:.3} seconds: {:.0} steps/second ({} reseeds)",
            steps,
            elapsed,
            rate,
            reseeds
        );
    }
}
