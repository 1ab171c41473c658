use crate::simulation::Grid;

/// Edge handling applied after every step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Boundary {
    /// Edges wrap. Neighbor counting is already toroidal, so nothing to do.
    #[default]
    Periodic,
    /// Kill the last row and last column so nothing crosses the wrap seam.
    /// Only one edge per axis is cleared.
    Bounded,
}

impl Boundary {
    pub fn from_periodic(periodic: bool) -> Self {
        if periodic {
            Boundary::Periodic
        } else {
            Boundary::Bounded
        }
    }

    pub fn apply(self, grid: &mut Grid) {
        if self == Boundary::Periodic {
            return;
        }

        let (rows, cols) = grid.dims();
        grid.row_mut(rows - 1).fill(0);
        for row in grid.cells_mut().chunks_mut(cols) {
            row[cols - 1] = 0;
        }
    }
}
