use std::io::Write;

use crate::error::PresentError;
use crate::simulation::Grid;

/// Something that can show a grid.
pub trait Present {
    fn present(&mut self, grid: &Grid) -> Result<(), PresentError>;
}

/// Draws the grid as framed text, redrawing in place.
pub struct TextPresenter<W: Write> {
    out: W,
}

/// Move the cursor home so each frame overwrites the last
const CURSOR_HOME: &str = "\x1b[H";

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Present for TextPresenter<W> {
    fn present(&mut self, grid: &Grid) -> Result<(), PresentError> {
        write!(self.out, "{CURSOR_HOME}{grid}")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_frame() {
        let mut grid = Grid::new(2, 4);
        grid.set(0, 1, 1);
        grid.set(1, 3, 1);

        let mut presenter = TextPresenter::new(Vec::new());
        presenter.present(&grid).unwrap();
        let out = String::from_utf8(presenter.into_inner()).unwrap();
        assert_eq!(out, "\x1b[H+----+\n| #  |\n|   #|\n+----+\n");
    }

    #[test]
    fn test_frames_accumulate() {
        let grid = Grid::new(1, 1);
        let mut presenter = TextPresenter::new(Vec::new());
        presenter.present(&grid).unwrap();
        presenter.present(&grid).unwrap();
        let out = String::from_utf8(presenter.into_inner()).unwrap();
        assert_eq!(out.matches(CURSOR_HOME).count(), 2);
    }
}
