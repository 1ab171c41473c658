use crate::error::ConfigError;
use crate::simulation::Grid;

/// Named seed pattern.
#[derive(Debug)]
pub struct Shape {
    pub name: &'static str,
    pub rows: &'static [&'static [u8]],
}

impl Shape {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }

    /// Look up a shape by name.
    pub fn find(name: &str) -> Result<&'static Shape, ConfigError> {
        SHAPES
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ConfigError::UnknownShape(name.to_string()))
    }

    /// All shape names, sorted.
    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<_> = SHAPES.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names
    }

    /// Top-left corner used when stamping into a `rows x cols` grid.
    ///
    /// This is `(grid + shape) / 2` per axis, not `(grid - shape) / 2`, so
    /// the pattern lands below and right of the center.
    pub fn offset(&self, rows: usize, cols: usize) -> (usize, usize) {
        ((rows + self.height()) / 2, (cols + self.width()) / 2)
    }

    /// A fresh dead grid with this shape stamped at [`Shape::offset`].
    /// Cells that fall past the grid edge are dropped.
    pub fn stamp(&self, rows: usize, cols: usize) -> Grid {
        let mut grid = Grid::new(rows, cols);
        let (top, left) = self.offset(rows, cols);

        if top + self.height() > rows || left + self.width() > cols {
            log::warn!(
                "Shape {} ({}x{}) does not fit a {}x{} grid at ({}, {}), clipping",
                self.name,
                self.height(),
                self.width(),
                rows,
                cols,
                top,
                left
            );
        }

        for (dr, row) in self.rows.iter().enumerate() {
            let r = top + dr;
            if r >= rows {
                break;
            }
            for (dc, &cell) in row.iter().enumerate() {
                let c = left + dc;
                if c >= cols {
                    break;
                }
                grid.set(r, c, cell);
            }
        }

        grid
    }
}

/// Registered seed patterns.
#[rustfmt::skip]
pub static SHAPES: &[Shape] = &[
    Shape {
        name: "diehard",
        rows: &[
            &[0, 0, 0, 0, 0, 0, 1, 0],
            &[1, 1, 0, 0, 0, 0, 0, 0],
            &[0, 1, 0, 0, 0, 1, 1, 1],
        ],
    },
    Shape {
        name: "boat",
        rows: &[
            &[1, 1, 0],
            &[1, 0, 1],
            &[0, 1, 0],
        ],
    },
    Shape {
        name: "r_pentomino",
        rows: &[
            &[0, 1, 1],
            &[1, 1, 0],
            &[0, 1, 0],
        ],
    },
    Shape {
        name: "beacon",
        rows: &[
            &[0, 0, 1, 1],
            &[0, 0, 1, 1],
            &[1, 1, 0, 0],
            &[1, 1, 0, 0],
        ],
    },
    Shape {
        name: "acorn",
        rows: &[
            &[0, 1, 0, 0, 0, 0, 0],
            &[0, 0, 0, 1, 0, 0, 0],
            &[1, 1, 0, 0, 1, 1, 1],
        ],
    },
    Shape {
        name: "spaceship",
        rows: &[
            &[0, 0, 1, 1, 0],
            &[1, 1, 0, 1, 1],
            &[1, 1, 1, 1, 0],
            &[0, 1, 1, 0, 0],
        ],
    },
    Shape {
        name: "block_switch_engine",
        rows: &[
            &[0, 0, 0, 0, 0, 0, 1, 0],
            &[0, 0, 0, 0, 1, 0, 1, 1],
            &[0, 0, 0, 0, 1, 0, 1, 0],
            &[0, 0, 0, 0, 1, 0, 0, 0],
            &[0, 0, 1, 0, 0, 0, 0, 0],
            &[1, 0, 1, 0, 0, 0, 0, 0],
        ],
    },
    Shape {
        name: "five_by_five",
        rows: &[
            &[1, 1, 1, 0, 1],
            &[1, 0, 0, 0, 0],
            &[0, 0, 0, 1, 1],
            &[0, 1, 1, 0, 1],
            &[1, 0, 1, 0, 1],
        ],
    },
    Shape {
        name: "narrow",
        rows: &[&[
            1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1,
            1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1,
        ]],
    },
    Shape {
        name: "glider_gun",
        rows: &[
            &[0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1,0,0,0,0,0,0,0,0,0,0,0],
            &[0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1,0,1,0,0,0,0,0,0,0,0,0,0,0],
            &[0,0,0,0,0,0,0,0,0,0,0,0,1,1,0,0,0,0,0,0,1,1,0,0,0,0,0,0,0,0,0,0,0,0,1,1],
            &[0,0,0,0,0,0,0,0,0,0,0,1,0,0,0,1,0,0,0,0,1,1,0,0,0,0,0,0,0,0,0,0,0,0,1,1],
            &[1,1,0,0,0,0,0,0,0,0,1,0,0,0,0,0,1,0,0,0,1,1,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
            &[1,1,0,0,0,0,0,0,0,0,1,0,0,0,1,0,1,1,0,0,0,0,1,0,1,0,0,0,0,0,0,0,0,0,0,0],
            &[0,0,0,0,0,0,0,0,0,0,1,0,0,0,0,0,1,0,0,0,0,0,0,0,1,0,0,0,0,0,0,0,0,0,0,0],
            &[0,0,0,0,0,0,0,0,0,0,0,1,0,0,0,1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
            &[0,0,0,0,0,0,0,0,0,0,0,0,1,1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes_are_rectangular_bitmasks() {
        for shape in SHAPES {
            assert!(shape.height() > 0, "{} is empty", shape.name);
            for row in shape.rows {
                assert_eq!(row.len(), shape.width(), "{} is ragged", shape.name);
                assert!(row.iter().all(|&c| c <= 1), "{} is not 0/1", shape.name);
            }
        }
    }

    #[test]
    fn test_names_unique_and_sorted() {
        let names = Shape::names();
        assert_eq!(names.len(), SHAPES.len());
        assert!(names.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_find_unknown_shape() {
        assert_eq!(
            Shape::find("glider").unwrap_err(),
            ConfigError::UnknownShape("glider".to_string())
        );
        assert_eq!(Shape::find("boat").unwrap().name, "boat");
    }

    #[test]
    fn test_boat_offset_in_10x10() {
        let boat = Shape::find("boat").unwrap();
        assert_eq!(boat.offset(10, 10), (6, 6));

        let grid = boat.stamp(10, 10);
        for r in 0..10 {
            for c in 0..10 {
                let expected = if (6..9).contains(&r) && (6..9).contains(&c) {
                    boat.rows[r - 6][c - 6]
                } else {
                    0
                };
                assert_eq!(grid.get(r, c), expected, "cell ({r}, {c})");
            }
        }
        assert_eq!(grid.live_count(), 5);
    }

    #[test]
    fn test_stamp_clips_at_edges() {
        // glider_gun is 9x36; in a 12x40 grid its offset is (10, 38).
        let gun = Shape::find("glider_gun").unwrap();
        assert_eq!(gun.offset(12, 40), (10, 38));
        let grid = gun.stamp(12, 40);
        assert_eq!(grid.dims(), (12, 40));
        for r in 10..12 {
            for c in 38..40 {
                assert_eq!(grid.get(r, c), gun.rows[r - 10][c - 38]);
            }
        }
        assert_eq!(grid.live_count(), 0);
    }
}
