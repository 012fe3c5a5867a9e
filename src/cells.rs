use smallvec::SmallVec;

use crate::units::Width;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    pub fn new(x: u32, y: u32) -> Coordinate {
        Coordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, row_width: Width) -> Coordinate {
        let Width(width) = row_width;
        let x = index % width;
        let y = index / width;
        Coordinate::new(x as u32, y as u32)
    }
}

/// Screen directions: `Up` decreases y, `Down` increases it.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

pub type DirectionSmallVec = SmallVec<[Direction; 4]>;

impl Direction {
    /// Every direction in the fixed enumeration order used for neighbour queries.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Creates a new `Coordinate` offset 1 cell away in this direction.
    /// Returns None if the coordinate is not representable. It may still lie outside a grid.
    pub fn offset(self, coord: Coordinate) -> Option<Coordinate> {
        let (x, y) = (coord.x, coord.y);
        match self {
            Direction::Up => y.checked_sub(1).map(|y| Coordinate { x, y }),
            Direction::Down => y.checked_add(1).map(|y| Coordinate { x, y }),
            Direction::Left => x.checked_sub(1).map(|x| Coordinate { x, y }),
            Direction::Right => x.checked_add(1).map(|x| Coordinate { x, y }),
        }
    }
}

/// One grid position: a wall flag per side and whether the maze generator reached it.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    pub wall_up: bool,
    pub wall_down: bool,
    pub wall_left: bool,
    pub wall_right: bool,
    pub visited: bool,
}

impl Cell {
    /// A cell boxed in by all four walls that nothing has visited yet.
    pub fn new() -> Cell {
        Cell {
            wall_up: true,
            wall_down: true,
            wall_left: true,
            wall_right: true,
            visited: false,
        }
    }

    #[inline]
    pub fn has_wall(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.wall_up,
            Direction::Down => self.wall_down,
            Direction::Left => self.wall_left,
            Direction::Right => self.wall_right,
        }
    }

    pub fn walls_count(&self) -> usize {
        Direction::ALL.iter().filter(|&&dir| self.has_wall(dir)).count()
    }

    #[inline]
    pub(crate) fn clear_wall(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.wall_up = false,
            Direction::Down => self.wall_down = false,
            Direction::Left => self.wall_left = false,
            Direction::Right => self.wall_right = false,
        }
    }
}

impl Default for Cell {
    fn default() -> Cell {
        Cell::new()
    }
}
