use log::trace;
use petgraph::graph::NodeIndex;
use petgraph::{Graph, Undirected};
use std::error::Error;
use std::fmt;

use crate::cells::{Cell, Coordinate, Direction, DirectionSmallVec};
use crate::units::{Height, Width};

/// A fixed size rectangle of walled cells, stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    width: Width,
    height: Height,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridError {
    OutOfBounds,
    AlreadyVisited,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GridError::OutOfBounds => write!(f, "grid coordinate out of bounds"),
            GridError::AlreadyVisited => write!(f, "neighbouring cell is already visited"),
        }
    }
}

impl Error for GridError {}

pub type PassageGraph = Graph<Coordinate, (), Undirected>;

impl Grid {
    /// Allocates a grid with every wall present and every cell unvisited.
    ///
    /// Returns None for an empty grid or one whose coordinates do not fit in a `u32`.
    pub fn new(width: Width, height: Height) -> Option<Grid> {
        let (Width(w), Height(h)) = (width, height);
        if w == 0 || h == 0 || w > u32::MAX as usize || h > u32::MAX as usize {
            return None;
        }
        let size = w.checked_mul(h)?;

        Some(Grid {
            cells: vec![Cell::new(); size],
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Coordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Coordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width.0 + coord.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn cell(&self, coord: Coordinate) -> Option<&Cell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    /// The cell next to `coord` in the given direction, if it is inside the grid.
    pub fn neighbour_at_direction(&self,
                                  coord: Coordinate,
                                  direction: Direction)
                                  -> Option<Coordinate> {
        direction.offset(coord).filter(|&neighbour| self.is_valid_coordinate(neighbour))
    }

    /// Directions from `coord` leading to an in-bounds cell that is not visited yet.
    /// Always listed in the order Up, Down, Left, Right.
    ///
    /// Panics if `coord` is outside the grid.
    pub fn neighbours_unvisited(&self, coord: Coordinate) -> DirectionSmallVec {
        self.assert_valid(coord);
        Direction::ALL
            .iter()
            .cloned()
            .filter(|&dir| {
                self.neighbour_at_direction(coord, dir)
                    .map_or(false, |neighbour| !self.cells[self.checked_index(neighbour)].visited)
            })
            .collect()
    }

    pub fn all_neighbours_visited(&self, coord: Coordinate) -> bool {
        self.neighbours_unvisited(coord).is_empty()
    }

    /// Open a passage from `coord` towards `direction`, clearing the wall on both sides of the
    /// shared edge. Returns the neighbouring coordinate the passage now leads to.
    ///
    /// Only an unvisited neighbour may be carved into, otherwise the passage could close a loop.
    /// The grid is unchanged if either cell is outside the grid or the neighbour is visited.
    pub fn remove_wall(&mut self,
                       coord: Coordinate,
                       direction: Direction)
                       -> Result<Coordinate, GridError> {
        let index = self.grid_coordinate_to_index(coord).ok_or(GridError::OutOfBounds)?;
        let neighbour = self.neighbour_at_direction(coord, direction)
            .ok_or(GridError::OutOfBounds)?;
        let neighbour_index = self.checked_index(neighbour);
        if self.cells[neighbour_index].visited {
            return Err(GridError::AlreadyVisited);
        }

        self.cells[index].clear_wall(direction);
        self.cells[neighbour_index].clear_wall(direction.opposite());
        trace!("removed wall {:?} -> {:?}", coord, neighbour);

        Ok(neighbour)
    }

    /// Panics if `coord` is outside the grid.
    pub fn mark_visited(&mut self, coord: Coordinate) {
        let index = self.checked_index(coord);
        self.cells[index].visited = true;
    }

    /// Panics if `coord` is outside the grid.
    pub fn is_visited(&self, coord: Coordinate) -> bool {
        self.cells[self.checked_index(coord)].visited
    }

    /// Panics if `coord` is outside the grid.
    pub fn has_wall(&self, coord: Coordinate, direction: Direction) -> bool {
        self.cells[self.checked_index(coord)].has_wall(direction)
    }

    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            width: self.width,
            cells_count: self.size(),
        }
    }

    /// Each carved passage exactly once, as a cell and its Down or Right neighbour.
    pub fn passages(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.iter().flat_map(move |coord| {
            [Direction::Down, Direction::Right]
                .iter()
                .filter_map(move |&dir| {
                    let neighbour = self.neighbour_at_direction(coord, dir)?;
                    if self.has_wall(coord, dir) {
                        None
                    } else {
                        Some((coord, neighbour))
                    }
                })
                .collect::<Vec<_>>()
        })
    }

    pub fn passages_count(&self) -> usize {
        self.passages().count()
    }

    /// The maze as an undirected graph: one node per cell, in row-major order, and one edge
    /// per passage.
    pub fn passage_graph(&self) -> PassageGraph {
        let mut graph = Graph::with_capacity(self.size(), self.size().saturating_sub(1));
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }
        for (a, b) in self.passages() {
            if let (Some(a_index), Some(b_index)) = (self.grid_coordinate_to_index(a),
                                                     self.grid_coordinate_to_index(b)) {
                let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
            }
        }
        graph
    }

    /// The passages as text: a `cells passages` header line, then one line per passage holding
    /// the 1-based row-major indices of the two cells it joins.
    pub fn edge_list(&self) -> String {
        let graph = self.passage_graph();
        let mut edge_list = format!("{} {}\n", graph.node_count(), graph.edge_count());
        for edge in graph.raw_edges() {
            let src_as_1_based_index = edge.source().index() + 1;
            let dst_as_1_based_index = edge.target().index() + 1;
            edge_list.push_str(&format!("{} {}\n", src_as_1_based_index, dst_as_1_based_index));
        }
        edge_list
    }

    /// Panics if `coord` is outside the grid.
    fn assert_valid(&self, coord: Coordinate) {
        assert!(self.is_valid_coordinate(coord),
                "coordinate {:?} is outside the {}x{} grid",
                coord,
                self.width.0,
                self.height.0);
    }

    fn checked_index(&self, coord: Coordinate) -> usize {
        self.grid_coordinate_to_index(coord).unwrap_or_else(|| {
            panic!("coordinate {:?} is outside the {}x{} grid",
                   coord,
                   self.width.0,
                   self.height.0)
        })
    }

    // Wall on the vertical line `x` (0..=width) within `row`.
    fn vertical_wall(&self, x: usize, row: usize) -> bool {
        if x == self.width.0 {
            self.has_wall(Coordinate::new(x as u32 - 1, row as u32), Direction::Right)
        } else {
            self.has_wall(Coordinate::new(x as u32, row as u32), Direction::Left)
        }
    }

    // Wall on the horizontal line `y` (0..=height) within `column`.
    fn horizontal_wall(&self, column: usize, y: usize) -> bool {
        if y == self.height.0 {
            self.has_wall(Coordinate::new(column as u32, y as u32 - 1), Direction::Down)
        } else {
            self.has_wall(Coordinate::new(column as u32, y as u32), Direction::Up)
        }
    }

    fn corner_glyph(&self, x: usize, y: usize) -> &'static str {
        let show_up_section = y > 0 && self.vertical_wall(x, y - 1);
        let show_down_section = y < self.height.0 && self.vertical_wall(x, y);
        let show_left_section = x > 0 && self.horizontal_wall(x - 1, y);
        let show_right_section = x < self.width.0 && self.horizontal_wall(x, y);

        match (show_left_section, show_right_section, show_up_section, show_down_section) {
            (true, true, true, true) => WALL_LRUD,
            (true, true, true, false) => WALL_LRU,
            (true, true, false, true) => WALL_LRD,
            (true, false, true, true) => WALL_LUD,
            (false, true, true, true) => WALL_RUD,
            (true, true, false, false) => WALL_LR,
            (false, false, true, true) => WALL_UD,
            (false, true, true, false) => WALL_RU,
            (true, false, false, true) => WALL_LD,
            (true, false, true, false) => WALL_LU,
            (false, true, false, true) => WALL_RD,
            (true, false, false, false) => WALL_L,
            (false, true, false, false) => WALL_R,
            (false, false, true, false) => WALL_U,
            (false, false, false, true) => WALL_D,
            (false, false, false, false) => " ",
        }
    }
}

const WALL_L: &str = "╴";
const WALL_R: &str = "╶";
const WALL_U: &str = "╵";
const WALL_D: &str = "╷";
const WALL_LR_3: &str = "───";
const WALL_LR: &str = "─";
const WALL_UD: &str = "│";
const WALL_LD: &str = "┐";
const WALL_RU: &str = "└";
const WALL_LU: &str = "┘";
const WALL_RD: &str = "┌";
const WALL_LRU: &str = "┴";
const WALL_LRD: &str = "┬";
const WALL_LRUD: &str = "┼";
const WALL_RUD: &str = "├";
const WALL_LUD: &str = "┤";

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (Width(columns_count), Height(rows_count)) = (self.width, self.height);

        // Alternate between a line of corners and horizontal walls, and a line of cell bodies
        // separated by vertical walls. The last corner line is the southern boundary.
        let mut output = String::new();
        for y in 0..(rows_count + 1) {
            for x in 0..columns_count {
                output.push_str(self.corner_glyph(x, y));
                output.push_str(if self.horizontal_wall(x, y) { WALL_LR_3 } else { "   " });
            }
            output.push_str(self.corner_glyph(columns_count, y));
            output.push('\n');

            if y == rows_count {
                break;
            }
            for x in 0..(columns_count + 1) {
                output.push_str(if self.vertical_wall(x, y) { WALL_UD } else { " " });
                if x < columns_count {
                    output.push_str("   "); // cell body, 3 spaces
                }
            }
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    width: Width,
    cells_count: usize,
}

impl Iterator for CellIter {
    type Item = Coordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Coordinate::from_row_major_index(self.current_cell_number, self.width);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()

impl<'a> IntoIterator for &'a Grid {
    type Item = Coordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use itertools::Itertools; // a trait

    fn grid(w: usize, h: usize) -> Grid {
        Grid::new(Width(w), Height(h)).expect("valid grid dimensions")
    }

    // Compare a smallvec to e.g. a vec! or &[T].
    macro_rules! assert_smallvec_eq {
        ($x:expr, $y:expr) => (assert_eq!(&*$x, &*$y))
    }

    #[test]
    fn empty_grids_are_rejected() {
        assert!(Grid::new(Width(0), Height(5)).is_none());
        assert!(Grid::new(Width(5), Height(0)).is_none());
        assert!(Grid::new(Width(1), Height(1)).is_some());
    }

    #[test]
    fn fresh_grid_is_walled_and_unvisited() {
        let g = grid(3, 2);
        assert_eq!(g.size(), 6);
        assert_eq!(g.width(), Width(3));
        assert_eq!(g.height(), Height(2));
        for coord in &g {
            let cell = g.cell(coord).expect("iter gives valid coordinates");
            assert_eq!(cell.walls_count(), 4);
            assert!(!cell.visited);
        }
        assert_eq!(g.passages_count(), 0);
    }

    #[test]
    fn grid_coordinate_as_index() {
        let g = grid(3, 3);
        let gc = |x, y| Coordinate::new(x, y);
        let coords = &[gc(0, 0), gc(1, 0), gc(2, 0), gc(0, 1), gc(1, 1), gc(2, 1), gc(0, 2),
                       gc(1, 2), gc(2, 2)];
        let indices: Vec<Option<usize>> = coords.iter()
            .map(|coord| g.grid_coordinate_to_index(*coord))
            .collect();
        let expected = (0..9).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(expected, indices);

        assert_eq!(g.grid_coordinate_to_index(gc(2, 3)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(3, 2)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(u32::MAX, u32::MAX)), None);
    }

    #[test]
    fn cell_iter() {
        let g = grid(2, 2);
        assert_eq!(g.iter().len(), 4);
        assert_eq!(g.iter().collect::<Vec<Coordinate>>(),
                   &[Coordinate::new(0, 0),
                     Coordinate::new(1, 0),
                     Coordinate::new(0, 1),
                     Coordinate::new(1, 1)]);
    }

    #[test]
    fn neighbour_at_dir() {
        let g = grid(2, 2);
        let gc = |x, y| Coordinate::new(x, y);
        let check_neighbour = |coord, dir: Direction, expected| {
            assert_eq!(g.neighbour_at_direction(coord, dir), expected);
        };
        check_neighbour(gc(0, 0), Direction::Up, None);
        check_neighbour(gc(0, 0), Direction::Down, Some(gc(0, 1)));
        check_neighbour(gc(0, 0), Direction::Right, Some(gc(1, 0)));
        check_neighbour(gc(0, 0), Direction::Left, None);

        check_neighbour(gc(1, 1), Direction::Up, Some(gc(1, 0)));
        check_neighbour(gc(1, 1), Direction::Down, None);
        check_neighbour(gc(1, 1), Direction::Right, None);
        check_neighbour(gc(1, 1), Direction::Left, Some(gc(0, 1)));
    }

    #[test]
    fn unvisited_neighbours_in_fixed_order() {
        let g = grid(10, 10);
        let gc = |x, y| Coordinate::new(x, y);

        // corners
        assert_smallvec_eq!(g.neighbours_unvisited(gc(0, 0)), &[Direction::Down, Direction::Right]);
        assert_smallvec_eq!(g.neighbours_unvisited(gc(9, 0)), &[Direction::Down, Direction::Left]);
        assert_smallvec_eq!(g.neighbours_unvisited(gc(0, 9)), &[Direction::Up, Direction::Right]);
        assert_smallvec_eq!(g.neighbours_unvisited(gc(9, 9)), &[Direction::Up, Direction::Left]);

        // side element examples
        assert_smallvec_eq!(g.neighbours_unvisited(gc(1, 0)),
                            &[Direction::Down, Direction::Left, Direction::Right]);
        assert_smallvec_eq!(g.neighbours_unvisited(gc(9, 8)),
                            &[Direction::Up, Direction::Down, Direction::Left]);

        // Some place with 4 neighbours inside the grid
        assert_smallvec_eq!(g.neighbours_unvisited(gc(1, 1)), &Direction::ALL);
    }

    #[test]
    fn visited_neighbours_are_excluded() {
        let mut g = grid(3, 3);
        let centre = Coordinate::new(1, 1);
        assert!(!g.all_neighbours_visited(centre));

        g.mark_visited(Coordinate::new(1, 0));
        g.mark_visited(Coordinate::new(2, 1));
        assert_smallvec_eq!(g.neighbours_unvisited(centre), &[Direction::Down, Direction::Left]);

        g.mark_visited(Coordinate::new(1, 2));
        g.mark_visited(Coordinate::new(0, 1));
        assert!(g.neighbours_unvisited(centre).is_empty());
        assert!(g.all_neighbours_visited(centre));

        // The cell's own visited state does not matter
        assert!(!g.is_visited(centre));
    }

    #[test]
    fn unvisited_neighbours_stay_in_bounds() {
        let g = grid(4, 3);
        for coord in &g {
            for dir in g.neighbours_unvisited(coord).iter() {
                assert!(g.neighbour_at_direction(coord, *dir).is_some());
            }
        }
    }

    #[test]
    fn single_cell_has_no_neighbours() {
        let g = grid(1, 1);
        assert!(g.all_neighbours_visited(Coordinate::new(0, 0)));
    }

    #[test]
    #[should_panic]
    fn unvisited_neighbours_of_invalid_coordinate() {
        let g = grid(2, 2);
        let _ = g.neighbours_unvisited(Coordinate::new(2, 0));
    }

    #[test]
    fn mark_visited_is_idempotent() {
        let mut once = grid(3, 3);
        let coord = Coordinate::new(2, 1);
        once.mark_visited(coord);
        let mut twice = once.clone();
        twice.mark_visited(coord);
        assert_eq!(once, twice);
        assert!(twice.is_visited(coord));
    }

    #[test]
    #[should_panic]
    fn mark_visited_invalid_coordinate() {
        let mut g = grid(2, 2);
        g.mark_visited(Coordinate::new(0, 2));
    }

    #[test]
    fn removing_walls_is_reciprocal() {
        let mut g = grid(3, 3);
        let centre = Coordinate::new(1, 1);

        for dir in &Direction::ALL {
            let neighbour = g.remove_wall(centre, *dir).expect("neighbour in bounds");
            assert_eq!(g.neighbour_at_direction(centre, *dir), Some(neighbour));
            assert!(!g.has_wall(centre, *dir));
            assert!(!g.has_wall(neighbour, dir.opposite()));
            assert_eq!(g.cell(neighbour).map(Cell::walls_count), Some(3));
        }
        assert_eq!(g.cell(centre).map(Cell::walls_count), Some(0));
        assert_eq!(g.passages_count(), 4);
    }

    #[test]
    fn removing_up_wall_clears_down_wall_above() {
        let mut g = grid(2, 2);
        let below = Coordinate::new(1, 1);
        let above = Coordinate::new(1, 0);
        let _ = g.remove_wall(below, Direction::Up).expect("wall removed");
        assert!(!g.has_wall(below, Direction::Up));
        assert!(!g.has_wall(above, Direction::Down));
        assert!(g.has_wall(above, Direction::Up));
        assert!(g.has_wall(below, Direction::Down));
    }

    #[test]
    fn no_wall_removal_past_the_edge() {
        let mut g = grid(2, 2);
        let before = g.clone();
        assert_eq!(g.remove_wall(Coordinate::new(0, 0), Direction::Up), Err(GridError::OutOfBounds));
        assert_eq!(g.remove_wall(Coordinate::new(0, 0), Direction::Left), Err(GridError::OutOfBounds));
        assert_eq!(g.remove_wall(Coordinate::new(1, 1), Direction::Right),
                   Err(GridError::OutOfBounds));
        assert_eq!(g.remove_wall(Coordinate::new(5, 5), Direction::Left),
                   Err(GridError::OutOfBounds));
        assert_eq!(g, before);
    }

    #[test]
    fn no_wall_removal_into_visited_cell() {
        let mut g = grid(2, 2);
        let gc = |x, y| Coordinate::new(x, y);
        for coord in g.iter().collect::<Vec<_>>() {
            g.mark_visited(coord);
        }
        let before = g.clone();
        assert_eq!(g.remove_wall(gc(0, 0), Direction::Down), Err(GridError::AlreadyVisited));
        assert_eq!(g.remove_wall(gc(1, 1), Direction::Left), Err(GridError::AlreadyVisited));
        assert_eq!(g, before);
        assert_eq!(g.passages_count(), 0);

        // Only the neighbour's state matters, the carving cell is normally visited
        let mut h = grid(2, 1);
        h.mark_visited(gc(0, 0));
        assert_eq!(h.remove_wall(gc(0, 0), Direction::Right), Ok(gc(1, 0)));
        h.mark_visited(gc(1, 0));
        assert_eq!(h.remove_wall(gc(1, 0), Direction::Left), Err(GridError::AlreadyVisited));
    }

    #[test]
    fn edge_list_of_fresh_grid() {
        let g = grid(3, 2);
        assert_eq!(g.edge_list(), "6 0\n");
    }

    #[test]
    fn edge_list_uses_1_based_row_major_indices() {
        let mut g = grid(2, 2);
        let _ = g.remove_wall(Coordinate::new(0, 0), Direction::Down).expect("wall removed");
        assert_eq!(g.edge_list(), "4 1\n1 3\n");

        let _ = g.remove_wall(Coordinate::new(0, 1), Direction::Right).expect("wall removed");
        let _ = g.remove_wall(Coordinate::new(1, 1), Direction::Up).expect("wall removed");
        let edge_list = g.edge_list();
        let mut lines = edge_list.lines();
        assert_eq!(lines.next(), Some("4 3"));
        let edges = lines.sorted().collect::<Vec<_>>();
        assert_eq!(edges, vec!["1 3", "2 4", "3 4"]);
    }

    #[test]
    fn passages_listed_once() {
        let mut g = grid(3, 2);
        let _ = g.remove_wall(Coordinate::new(0, 0), Direction::Right).expect("wall removed");
        let _ = g.remove_wall(Coordinate::new(1, 1), Direction::Up).expect("wall removed");
        let passages = g.passages().sorted().collect::<Vec<_>>();
        assert_eq!(passages,
                   vec![(Coordinate::new(0, 0), Coordinate::new(1, 0)),
                        (Coordinate::new(1, 0), Coordinate::new(1, 1))]);
    }

    #[test]
    fn passage_graph_mirrors_grid() {
        let mut g = grid(2, 2);
        let _ = g.remove_wall(Coordinate::new(0, 0), Direction::Down).expect("wall removed");
        let graph = g.passage_graph();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph[NodeIndex::new(2)], Coordinate::new(0, 1));
        assert!(graph.find_edge(NodeIndex::new(0), NodeIndex::new(2)).is_some());
    }

    #[test]
    fn render_single_cell() {
        let g = grid(1, 1);
        assert_eq!(format!("{}", g), "┌───┐\n│   │\n└───┘\n");
    }

    #[test]
    fn render_fresh_row() {
        let g = grid(2, 1);
        assert_eq!(format!("{}", g), "┌───┬───┐\n│   │   │\n└───┴───┘\n");
    }

    #[test]
    fn render_carved_grid() {
        let mut g = grid(2, 2);
        let _ = g.remove_wall(Coordinate::new(0, 0), Direction::Down).expect("wall removed");
        let _ = g.remove_wall(Coordinate::new(0, 1), Direction::Right).expect("wall removed");
        let _ = g.remove_wall(Coordinate::new(1, 1), Direction::Up).expect("wall removed");
        let expected = ["┌───┬───┐",
                        "│   │   │",
                        "│   ╵   │",
                        "│       │",
                        "└───────┘",
                        ""];
        assert_eq!(format!("{}", g), expected.join("\n"));
    }
}
