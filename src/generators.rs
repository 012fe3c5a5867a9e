use log::debug;
use rand::Rng;

use crate::cells::Coordinate;
use crate::grid::Grid;

/// A uniform source of random indices.
pub trait RandomSource {
    /// An integer in `[0, n)`, each value equally likely. `n` is never zero.
    fn random_in_range(&mut self, n: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn random_in_range(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }
}

/// Apply the recursive backtracker maze generation algorithm to a fresh grid.
///
/// Starting from `start` it performs a randomised depth first walk: carve a passage to a random
/// unvisited neighbour and continue from there. When a cell has no unvisited neighbours left the
/// walk backs up to the most recent cell on the path that still has some. Every cell ends up
/// visited and the removed walls form a spanning tree, so the maze is perfect.
///
/// The path back is kept on an explicit stack rather than the call stack, so large grids cannot
/// overflow it. The order of random draws is the same as the recursive formulation.
///
/// Returns the number of walls removed.
///
/// Panics if `start` is outside the grid.
pub fn recursive_backtracker<R>(grid: &mut Grid, start: Coordinate, rng: &mut R) -> usize
    where R: RandomSource + ?Sized
{
    assert!(grid.is_valid_coordinate(start),
            "maze generation must start inside the {}x{} grid, not at {:?}",
            grid.width().0,
            grid.height().0,
            start);
    debug!("recursive backtracker from {:?} on a {}x{} grid",
           start,
           grid.width().0,
           grid.height().0);

    let mut walls_removed = 0;
    let mut stack: Vec<Coordinate> = Vec::with_capacity(grid.size());
    grid.mark_visited(start);
    stack.push(start);

    while let Some(&current) = stack.last() {
        let unvisited = grid.neighbours_unvisited(current);
        if unvisited.is_empty() {
            let _ = stack.pop();
            continue;
        }

        let direction = unvisited[rng.random_in_range(unvisited.len())];
        let next = match grid.remove_wall(current, direction) {
            Ok(neighbour) => neighbour,
            Err(e) => panic!("carving {:?} from {:?}: {}", direction, current, e),
        };
        walls_removed += 1;

        grid.mark_visited(next);
        stack.push(next);
    }

    debug!("recursive backtracker removed {} walls", walls_removed);
    walls_removed
}
