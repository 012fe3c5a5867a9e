use std::error::Error;
use std::fmt;

use crate::cells::Coordinate;
use crate::units::{cells_along, Height, Pixels, Width};

/// Canvas and cell sizes as configured, plus the grid shape they imply.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct MazeConfig {
    pub canvas_width: Pixels,
    pub canvas_height: Pixels,
    pub cell_side: Pixels,
    pub grid_width: Width,
    pub grid_height: Height,
    pub start: Coordinate,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum ConfigError {
    ZeroCellSide,
    CanvasSmallerThanCell,
    StartOutsideGrid,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match *self {
            ConfigError::ZeroCellSide => "cell size must be at least one pixel",
            ConfigError::CanvasSmallerThanCell => "canvas must fit at least one whole cell",
            ConfigError::StartOutsideGrid => "start point is outside the maze grid",
        };
        write!(f, "{}", msg)
    }
}

impl Error for ConfigError {}

impl MazeConfig {
    /// The grid is as many whole cells as fit on the canvas in each direction.
    pub fn new(canvas_width: Pixels,
               canvas_height: Pixels,
               cell_side: Pixels,
               start: Coordinate)
               -> Result<MazeConfig, ConfigError> {
        if cell_side.0 == 0 {
            return Err(ConfigError::ZeroCellSide);
        }
        let columns = cells_along(canvas_width, cell_side);
        let rows = cells_along(canvas_height, cell_side);
        if columns == 0 || rows == 0 {
            return Err(ConfigError::CanvasSmallerThanCell);
        }
        if start.x as usize >= columns || start.y as usize >= rows {
            return Err(ConfigError::StartOutsideGrid);
        }

        Ok(MazeConfig {
            canvas_width,
            canvas_height,
            cell_side,
            grid_width: Width(columns),
            grid_height: Height(rows),
            start,
        })
    }
}
