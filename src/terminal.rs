use std::io;
use std::thread;
use std::time::Instant;

use crate::config::Config;
use crate::controls::{RunStats, RuntimeParameters};
use crate::error::PresentError;
use crate::present::{Present, TextPresenter};
use crate::simulation::{Simulation, StepOutcome};

/// Run the simulation in the terminal until the step limit is reached.
pub fn run(config: &Config) -> Result<(), PresentError> {
    let (rows, cols) = config.run.text_size;
    let mut sim = Simulation::new(&config.sim, rows, cols);
    let params = RuntimeParameters::new(&config.run);
    let mut presenter = TextPresenter::new(io::stdout().lock());

    log::info!("Running {} steps in the terminal", config.run.steps);
    let stats = RunStats::start();
    let result = drive(&mut sim, &params, config.run.steps, &mut presenter);
    stats.report(sim.generation(), sim.reseeds());
    result
}

/// Present-then-step loop, paced to at most `params.fps` steps per second.
pub fn drive<P: Present>(
    sim: &mut Simulation,
    params: &RuntimeParameters,
    steps: u64,
    presenter: &mut P,
) -> Result<(), PresentError> {
    for step in 0..steps {
        let started = Instant::now();
        if params.should_render(step) {
            presenter.present(sim.grid())?;
        }
        if sim.step() == StepOutcome::Reseeded {
            log::debug!("Reseeded at step {}", step);
        }
        let wait = params.next_step_at(started).saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            thread::sleep(wait);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RunConfig, SimConfig};
    use crate::simulation::Grid;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<Grid>,
    }

    impl Present for Recorder {
        fn present(&mut self, grid: &Grid) -> Result<(), PresentError> {
            self.frames.push(grid.clone());
            Ok(())
        }
    }

    fn fast_params(skip: u32) -> RuntimeParameters {
        RuntimeParameters::new(&RunConfig {
            skip,
            fps: 1_000_000.0,
            ..RunConfig::default()
        })
    }

    #[test]
    fn test_drive_renders_every_skip_steps() {
        let config = SimConfig {
            seed: Some(11),
            ..SimConfig::default()
        };
        let mut sim = Simulation::new(&config, 10, 10);
        let mut recorder = Recorder::default();
        drive(&mut sim, &fast_params(3), 10, &mut recorder).unwrap();
        assert_eq!(sim.generation(), 10);
        assert_eq!(recorder.frames.len(), 4);
    }

    #[test]
    fn test_drive_shows_state_before_step() {
        let config = SimConfig {
            seed: Some(12),
            reset_on_stabilize: false,
            ..SimConfig::default()
        };
        let mut sim = Simulation::new(&config, 8, 8);
        let first = sim.grid().clone();
        let mut recorder = Recorder::default();
        drive(&mut sim, &fast_params(1), 2, &mut recorder).unwrap();
        assert_eq!(recorder.frames[0], first);
    }
}
