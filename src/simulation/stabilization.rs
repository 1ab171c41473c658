use std::collections::HashSet;

use crate::simulation::Grid;

/// Remembers every grid state seen since the last reseed.
///
/// A repeated fingerprint means the automaton is in a cycle (or a still
/// life), at which point the caller reseeds and calls [`clear`]. Hash
/// collisions are treated as real repeats.
///
/// [`clear`]: StabilizationDetector::clear
#[derive(Debug, Default)]
pub struct StabilizationDetector {
    enabled: bool,
    seen: HashSet<u64>,
}

impl StabilizationDetector {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            seen: HashSet::new(),
        }
    }

    /// Record `grid`. Returns true if this state was already seen in the
    /// current window. Always false when disabled, and nothing is stored.
    pub fn observe(&mut self, grid: &Grid) -> bool {
        if !self.enabled {
            return false;
        }
        !self.seen.insert(grid.fingerprint())
    }

    /// Start a new detection window.
    pub fn clear(&mut self) {
        self.seen.clear();
    }

    /// Number of states in the current window.
    pub fn tracked(&self) -> usize {
        self.seen.len()
    }
}
