use rand::Rng;

use crate::simulation::Grid;

/// Per-step random births.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NoiseInjector {
    density: f64,
}

impl NoiseInjector {
    pub fn new(density: f64) -> Self {
        Self { density }
    }

    pub fn is_enabled(&self) -> bool {
        self.density > 0.0
    }

    /// Add 1 to each cell with probability `density`. The value is added,
    /// not stored, so a live cell can reach 2. With density 0 this draws no
    /// random numbers at all.
    pub fn apply<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) {
        if !self.is_enabled() {
            return;
        }
        for cell in grid.cells_mut() {
            if rng.gen::<f64>() < self.density {
                *cell = cell.saturating_add(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_density_is_noop() {
        let mut rng = StdRng::seed_from_u64(1);
        let original = Grid::random(20, 20, 0.3, &mut rng);
        let mut grid = original.clone();
        NoiseInjector::new(0.0).apply(&mut grid, &mut rng);
        assert_eq!(grid, original);
        assert!(!NoiseInjector::default().is_enabled());
    }

    #[test]
    fn test_zero_density_draws_nothing() {
        let mut used = StdRng::seed_from_u64(9);
        let mut fresh = StdRng::seed_from_u64(9);
        NoiseInjector::new(0.0).apply(&mut Grid::new(8, 8), &mut used);
        assert_eq!(used.gen::<u64>(), fresh.gen::<u64>());
    }

    #[test]
    fn test_full_density_adds_to_every_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = Grid::new(3, 3);
        grid.set(1, 1, 1);
        NoiseInjector::new(1.0).apply(&mut grid, &mut rng);
        assert_eq!(grid.get(0, 0), 1);
        assert_eq!(grid.get(1, 1), 2);
        assert_eq!(grid.live_count(), 9);
    }
}
