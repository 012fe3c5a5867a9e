use crate::cells::{Coordinate, Direction};
use crate::grid::Grid;
use crate::units::{Height, Width};

/// The player's position on the maze, kept within the grid bounds.
///
/// Moving the cursor does not look at walls or change the grid in any way.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cursor {
    position: Coordinate,
    width: Width,
    height: Height,
}

impl Cursor {
    pub fn new(width: Width, height: Height) -> Cursor {
        Cursor {
            position: Coordinate::new(0, 0),
            width,
            height,
        }
    }

    pub fn for_grid(grid: &Grid) -> Cursor {
        Cursor::new(grid.width(), grid.height())
    }

    #[inline]
    pub fn position(&self) -> Coordinate {
        self.position
    }

    /// Move one cell in `direction` unless that would leave the grid.
    /// Returns true if the cursor moved.
    pub fn step(&mut self, direction: Direction) -> bool {
        let next = direction.offset(self.position).filter(|c| {
            (c.x as usize) < self.width.0 && (c.y as usize) < self.height.0
        });
        match next {
            Some(coord) => {
                self.position = coord;
                true
            }
            None => false,
        }
    }
}
