use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SimConfig;
use crate::simulation::{Boundary, Grid, NoiseInjector, Rule, RuleSet, StabilizationDetector};

/// Neighbor counting plus rule application. Pure: the next grid depends
/// only on the current grid and the rule.
#[derive(Clone, Debug)]
pub struct GridEngine {
    rules: RuleSet,
}

impl GridEngine {
    pub fn new(rule: &Rule) -> Self {
        Self {
            rules: RuleSet::new(rule),
        }
    }

    #[cfg(test)]
    pub fn from_rule_set(rules: RuleSet) -> Self {
        Self { rules }
    }

    #[cfg(test)]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// One generation on the torus. Output cells are always 0 or 1.
    pub fn step(&self, grid: &Grid) -> Grid {
        let counts = grid.neighbor_counts();
        let (rows, cols) = grid.dims();
        let mut next = Grid::new(rows, cols);

        for ((out, &cell), &count) in next
            .cells_mut()
            .iter_mut()
            .zip(grid.as_bytes())
            .zip(&counts)
        {
            *out = self.rules.apply(cell != 0, count);
        }

        next
    }
}

/// What happened during a [`Simulation::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Evolved,
    /// A repeated state was found and the grid was replaced.
    Reseeded,
}

/// Owns the grid and runs the per-tick pipeline:
/// rule step, noise, boundary, then stabilization check.
pub struct Simulation {
    engine: GridEngine,
    noise: NoiseInjector,
    boundary: Boundary,
    detector: StabilizationDetector,
    start_density: f64,
    grid: Grid,
    rng: StdRng,
    generation: u64,
    reseeds: u64,
}

impl Simulation {
    /// Seed a `rows x cols` grid from the configured shape, or randomly.
    pub fn new(config: &SimConfig, rows: usize, cols: usize) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let grid = match config.shape {
            Some(shape) => {
                log::info!("Seeding with shape {}", shape.name);
                shape.stamp(rows, cols)
            }
            None => Grid::random(rows, cols, config.start_density, &mut rng),
        };

        Self::with_grid(config, grid, rng)
    }

    /// Start from an explicit grid.
    pub fn with_grid(config: &SimConfig, grid: Grid, rng: StdRng) -> Self {
        log::info!("Grid: {}x{}, rule {}", grid.rows(), grid.cols(), config.rule);

        Self {
            engine: GridEngine::new(&config.rule),
            noise: NoiseInjector::new(config.noise_density),
            boundary: Boundary::from_periodic(config.periodic),
            detector: StabilizationDetector::new(config.reset_on_stabilize),
            start_density: config.start_density,
            grid,
            rng,
            generation: 0,
            reseeds: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn reseeds(&self) -> u64 {
        self.reseeds
    }

    #[cfg(test)]
    pub fn detector(&self) -> &StabilizationDetector {
        &self.detector
    }

    pub fn step(&mut self) -> StepOutcome {
        let mut next = self.engine.step(&self.grid);
        self.noise.apply(&mut next, &mut self.rng);
        self.boundary.apply(&mut next);
        self.grid = next;
        self.generation += 1;

        if self.detector.observe(&self.grid) {
            log::debug!(
                "Stabilized at generation {} after {} distinct states, reseeding",
                self.generation,
                self.detector.tracked()
            );
            self.reset();
            return StepOutcome::Reseeded;
        }

        StepOutcome::Evolved
    }

    /// Replace the grid with a fresh random fill and forget seen states.
    pub fn reset(&mut self) {
        let (rows, cols) = self.grid.dims();
        self.grid = Grid::random(rows, cols, self.start_density, &mut self.rng);
        self.detector.clear();
        self.reseeds += 1;
        log::debug!(
            "Reseed {}: {} live cells",
            self.reseeds,
            self.grid.live_count()
        );
    }
}
