use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use rand::Rng;

/// Relative offsets of the eight cells adjacent to a cell, as `(row, col)`.
#[rustfmt::skip]
pub static NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Row-major grid of cells. 0 is dead, anything else is alive.
///
/// Cells are bytes rather than bools because noise is added on top of the
/// current value, so a live cell hit by noise holds 2 until the next step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Create an all-dead grid. Both dimensions must be at least 1.
    pub fn new(rows: usize, cols: usize) -> Self {
        debug_assert!(rows > 0 && cols > 0, "grid must not be empty");
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Each cell alive independently with probability `density`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, density: f64, rng: &mut R) -> Self {
        let mut grid = Self::new(rows, cols);
        for cell in &mut grid.cells {
            *cell = (rng.gen::<f64>() < density) as u8;
        }
        grid
    }

    /// Build a grid from explicit rows of 0/1 values. Rows must be equal length.
    #[cfg(test)]
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let cols = rows.first().map_or(0, |r| r.len());
        let mut grid = Self::new(rows.len(), cols);
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), cols, "ragged rows");
            grid.cells[r * cols..(r + 1) * cols].copy_from_slice(row);
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    #[cfg(test)]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        let idx = self.index(row, col);
        self.cells[idx] = value;
    }

    #[cfg(test)]
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col) != 0
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Raw cell bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [u8] {
        let start = row * self.cols;
        &mut self.cells[start..start + self.cols]
    }

    /// Content hash of the raw bytes. Equal grids give equal fingerprints.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.rows.hash(&mut hasher);
        self.cells.hash(&mut hasher);
        hasher.finish()
    }

    /// Live neighbors of every cell on the torus, row-major. Cells are read
    /// as alive/dead, so values above 1 still count once and every count is
    /// within 0..=8.
    pub fn neighbor_counts(&self) -> Vec<u8> {
        let (rows, cols) = (self.rows as isize, self.cols as isize);
        let mut counts = vec![0u8; self.cells.len()];

        for &(dr, dc) in &NEIGHBORS {
            for r in 0..rows {
                let src_row = (r + dr).rem_euclid(rows) as usize;
                let dst_start = r as usize * self.cols;
                for c in 0..cols {
                    let src_col = (c + dc).rem_euclid(cols) as usize;
                    if self.cells[src_row * self.cols + src_col] != 0 {
                        counts[dst_start + c as usize] += 1;
                    }
                }
            }
        }

        counts
    }
}

impl fmt::Display for Grid {
    /// Framed text rendering, `#` for alive and space for dead.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "-".repeat(self.cols);
        writeln!(f, "+{border}+")?;
        for row in self.cells.chunks(self.cols) {
            write!(f, "|")?;
            for &cell in row {
                write!(f, "{}", if cell != 0 { '#' } else { ' ' })?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "+{border}+")
    }
}
