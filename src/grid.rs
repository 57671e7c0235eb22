//! Grid model module.
//!
//! This module contains the [`Grid`] of [`Cell`] records the visualizer edits and searches, along
//! with the [`Position`] type used to address cells and the operations that keep the start/finish
//! invariants intact while the user edits the grid.

use std::{fmt, num::ParseIntError, str::FromStr};

use log::trace;
use thiserror::Error;

use crate::types::SpecialNode;

/// Address of a cell on the grid.
///
/// Rows and columns are 0-indexed from the top-left corner. The derived ordering compares the row
/// first and the column second, which is exactly the row-major scan order used to break ties
/// between cells at equal distance during the search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Row index, counted from the top.
    pub row: usize,
    /// Column index, counted from the left.
    pub col: usize,
}

impl Position {
    /// Builds a position from a row and a column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the Manhattan distance between two positions.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Returns whether the two positions share an edge.
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Error produced when parsing a [`Position`] from its `row,col` text form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParsePositionError {
    /// The input did not contain a comma separating the two coordinates.
    #[error("expected `row,col`, found `{0}`")]
    Malformed(String),
    /// One of the coordinates was not a non-negative integer.
    #[error("invalid coordinate in `{input}`: {source}")]
    Coordinate {
        /// The full text that was being parsed.
        input: String,
        /// The underlying integer parsing failure.
        source: ParseIntError,
    },
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (row, col) = input
            .split_once(',')
            .ok_or_else(|| ParsePositionError::Malformed(input.to_owned()))?;
        let coordinate = |text: &str| {
            text.trim()
                .parse::<usize>()
                .map_err(|source| ParsePositionError::Coordinate {
                    input: input.to_owned(),
                    source,
                })
        };

        Ok(Self::new(coordinate(row)?, coordinate(col)?))
    }
}

/// Error produced when a grid cannot be created with the requested shape or special nodes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    /// One of the dimensions was zero.
    #[error("a grid needs at least one row and one column")]
    EmptyGrid,
    /// The number of cells does not fit in memory addressing.
    #[error("a {rows}x{cols} grid is too large")]
    TooLarge {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },
    /// A special node was placed outside of the grid.
    #[error("{kind} position {position} lies outside of the {rows}x{cols} grid")]
    OutOfBounds {
        /// Which special node was misplaced.
        kind: SpecialNode,
        /// The requested position.
        position: Position,
        /// Grid row count.
        rows: usize,
        /// Grid column count.
        cols: usize,
    },
    /// Start and finish were placed on the same cell.
    #[error("start and finish cannot share cell {0}")]
    Overlap(Position),
}

/// A single addressable grid cell.
///
/// The role flags (`is_start`, `is_finish`, `is_wall`) are edited by the user, while `distance`,
/// `is_visited` and `previous` are transient artifacts written by the search and cleared by
/// [`Grid::reset_transient`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    /// Whether this cell is the search start.
    pub is_start: bool,
    /// Whether this cell is the search target.
    pub is_finish: bool,
    /// Whether this cell is impassable.
    pub is_wall: bool,
    /// Tentative distance from the start; `None` stands for infinity.
    pub distance: Option<usize>,
    /// Whether the search has finalized this cell.
    pub is_visited: bool,
    /// Cell this one was reached from along the current shortest-path tree.
    pub previous: Option<Position>,
}

impl Cell {
    /// Returns whether the cell is the start or the finish.
    #[must_use]
    pub const fn is_special(&self) -> bool {
        self.is_start || self.is_finish
    }

    /// Returns whether the cell carries the given special role.
    #[must_use]
    pub const fn is(&self, kind: SpecialNode) -> bool {
        match kind {
            SpecialNode::Start => self.is_start,
            SpecialNode::Finish => self.is_finish,
        }
    }

    /// Sets or clears the given special role.
    fn set(&mut self, kind: SpecialNode, value: bool) {
        match kind {
            SpecialNode::Start => self.is_start = value,
            SpecialNode::Finish => self.is_finish = value,
        }
    }

    /// Clears the search artifacts of the cell.
    fn clear_transient(&mut self) {
        self.distance = None;
        self.is_visited = false;
        self.previous = None;
    }
}

/// Fixed-size, row-major container of cells.
///
/// The grid is owned by a single session at a time. Edits happen in place through `&mut self`
/// methods that report whether anything changed, so rejected edits leave the grid untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
    /// Cells stored row after row.
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every cell in its default state and the two special nodes placed.
    ///
    /// # Errors
    ///
    /// This function returns an error if:
    /// - Either dimension is zero or the cell count overflows
    /// - The start or the finish lies outside of the grid
    /// - The start and the finish share the same cell
    pub fn new(
        rows: usize,
        cols: usize,
        start: Position,
        finish: Position,
    ) -> Result<Self, PlacementError> {
        let mut grid = Self::blank(rows, cols)?;

        for (kind, position) in [(SpecialNode::Start, start), (SpecialNode::Finish, finish)] {
            if !grid.contains(position) {
                return Err(PlacementError::OutOfBounds {
                    kind,
                    position,
                    rows,
                    cols,
                });
            }
        }
        if start == finish {
            return Err(PlacementError::Overlap(start));
        }

        if let Some(cell) = grid.cell_mut(start) {
            cell.is_start = true;
        }
        if let Some(cell) = grid.cell_mut(finish) {
            cell.is_finish = true;
        }

        Ok(grid)
    }

    /// Creates a grid without walls and without special nodes.
    ///
    /// # Errors
    ///
    /// This function returns an error if either dimension is zero or the cell count overflows.
    pub(crate) fn blank(rows: usize, cols: usize) -> Result<Self, PlacementError> {
        if rows == 0 || cols == 0 {
            return Err(PlacementError::EmptyGrid);
        }
        let len = rows
            .checked_mul(cols)
            .ok_or(PlacementError::TooLarge { rows, cols })?;

        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::default(); len],
        })
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns whether the position addresses a cell of this grid.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    /// Maps a position to its row-major index.
    const fn index(&self, position: Position) -> Option<usize> {
        if self.contains(position) {
            Some(position.row * self.cols + position.col)
        } else {
            None
        }
    }

    /// Returns the cell at the position, if any.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.index(position).and_then(|index| self.cells.get(index))
    }

    /// Returns the cell at the position for in-crate mutation.
    pub(crate) fn cell_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.index(position).and_then(|index| self.cells.get_mut(index))
    }

    /// Iterates over every cell in row-major order, top-to-bottom then left-to-right.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| (Position::new(index / cols, index % cols), cell))
    }

    /// Returns the position of the given special node, scanning in row-major order.
    #[must_use]
    pub fn special(&self, kind: SpecialNode) -> Option<Position> {
        self.cells()
            .find_map(|(position, cell)| cell.is(kind).then_some(position))
    }

    /// Returns the position of the start cell.
    #[must_use]
    pub fn start(&self) -> Option<Position> {
        self.special(SpecialNode::Start)
    }

    /// Returns the position of the finish cell.
    #[must_use]
    pub fn finish(&self) -> Option<Position> {
        self.special(SpecialNode::Finish)
    }

    /// Returns the in-bounds neighbors of a cell, in up, down, left, right order.
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        let Position { row, col } = position;
        [
            row.checked_sub(1).map(|up| Position::new(up, col)),
            Some(Position::new(row + 1, col)),
            col.checked_sub(1).map(|left| Position::new(row, left)),
            Some(Position::new(row, col + 1)),
        ]
        .into_iter()
        .flatten()
        .filter(move |neighbor| self.contains(position) && self.contains(*neighbor))
    }

    /// Returns the number of walls on the grid.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_wall).count()
    }

    /// Flips the wall flag of a cell.
    ///
    /// Start and finish cells can never become walls, so toggling them, like toggling a position
    /// outside of the grid, leaves the grid unchanged. Returns whether the grid changed.
    pub fn toggle_wall(&mut self, position: Position) -> bool {
        match self.cell_mut(position) {
            Some(cell) if !cell.is_special() => {
                cell.is_wall = !cell.is_wall;
                true
            }
            _ => {
                trace!("wall toggle at {position} ignored");
                false
            }
        }
    }

    /// Relocates a special node to the given position.
    ///
    /// The move is rejected when the target is outside of the grid, is a wall, or holds the other
    /// special node. Moving a node onto itself is accepted but changes nothing. Returns whether
    /// the grid changed.
    pub fn move_special(&mut self, kind: SpecialNode, position: Position) -> bool {
        let Some(target) = self.cell(position) else {
            trace!("{kind} move to {position} ignored: outside of the grid");
            return false;
        };
        if target.is_wall || target.is(kind.other()) {
            trace!("{kind} move to {position} ignored: cell is occupied");
            return false;
        }
        if target.is(kind) {
            return false;
        }

        if let Some(current) = self.special(kind).and_then(|old| self.cell_mut(old)) {
            current.set(kind, false);
        }
        if let Some(target) = self.cell_mut(position) {
            target.set(kind, true);
        }

        true
    }

    /// Clears every search artifact without touching walls or special nodes.
    pub fn reset_transient(&mut self) {
        self.cells.iter_mut().for_each(Cell::clear_transient);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Creates the reference 20x50 grid.
    fn create_test_grid() -> Grid {
        Grid::new(20, 50, Position::new(10, 15), Position::new(10, 35))
            .expect("reference grid should be valid")
    }

    /// Counts the cells carrying the given special role.
    fn count_special(grid: &Grid, kind: SpecialNode) -> usize {
        grid.cells().filter(|(_, cell)| cell.is(kind)).count()
    }

    #[test]
    fn test_grid_new_places_special_nodes() {
        let grid = create_test_grid();

        assert_eq!(grid.rows(), 20);
        assert_eq!(grid.cols(), 50);
        assert_eq!(grid.cells().count(), 1000);
        assert_eq!(grid.start(), Some(Position::new(10, 15)));
        assert_eq!(grid.finish(), Some(Position::new(10, 35)));
        assert_eq!(count_special(&grid, SpecialNode::Start), 1);
        assert_eq!(count_special(&grid, SpecialNode::Finish), 1);
        assert_eq!(grid.wall_count(), 0);
    }

    #[test]
    fn test_grid_new_default_cells() {
        let grid = create_test_grid();
        let cell = grid
            .cell(Position::new(0, 0))
            .expect("corner cell should exist");

        assert_eq!(cell.distance, None, "distance should start at infinity");
        assert!(!cell.is_visited);
        assert_eq!(cell.previous, None);
        assert!(!cell.is_wall);
    }

    #[test]
    fn test_grid_new_rejects_overlap() {
        let result = Grid::new(5, 5, Position::new(2, 2), Position::new(2, 2));
        assert_eq!(result, Err(PlacementError::Overlap(Position::new(2, 2))));
    }

    #[test]
    fn test_grid_new_rejects_out_of_bounds() {
        let result = Grid::new(5, 5, Position::new(0, 0), Position::new(5, 0));
        assert!(matches!(
            result,
            Err(PlacementError::OutOfBounds {
                kind: SpecialNode::Finish,
                ..
            })
        ));
    }

    #[test]
    fn test_grid_new_rejects_empty() {
        let result = Grid::new(0, 5, Position::new(0, 0), Position::new(0, 1));
        assert_eq!(result, Err(PlacementError::EmptyGrid));
    }

    #[test]
    fn test_cells_are_row_major() {
        let grid = Grid::new(2, 3, Position::new(0, 0), Position::new(1, 2))
            .expect("grid should be valid");
        let positions: Vec<Position> = grid.cells().map(|(position, _)| position).collect();

        assert_eq!(
            positions,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(1, 0),
                Position::new(1, 1),
                Position::new(1, 2),
            ]
        );
    }

    #[test]
    fn test_neighbors_at_corner_and_center() {
        let grid = create_test_grid();

        let corner: Vec<Position> = grid.neighbors(Position::new(0, 0)).collect();
        assert_eq!(corner, vec![Position::new(1, 0), Position::new(0, 1)]);

        let center: Vec<Position> = grid.neighbors(Position::new(5, 5)).collect();
        assert_eq!(
            center,
            vec![
                Position::new(4, 5),
                Position::new(6, 5),
                Position::new(5, 4),
                Position::new(5, 6),
            ]
        );

        let far: Vec<Position> = grid.neighbors(Position::new(19, 49)).collect();
        assert_eq!(far, vec![Position::new(18, 49), Position::new(19, 48)]);
    }

    #[test]
    fn test_toggle_wall_is_its_own_inverse() {
        let mut grid = create_test_grid();
        let original = grid.clone();
        let target = Position::new(3, 4);

        assert!(grid.toggle_wall(target));
        assert!(grid.cell(target).is_some_and(|cell| cell.is_wall));
        assert!(grid.toggle_wall(target));
        assert_eq!(grid, original, "two toggles should restore the grid");
    }

    #[test]
    fn test_toggle_wall_on_special_nodes_is_noop() {
        let mut grid = create_test_grid();
        let original = grid.clone();

        assert!(!grid.toggle_wall(Position::new(10, 15)));
        assert!(!grid.toggle_wall(Position::new(10, 35)));
        assert!(!grid.toggle_wall(Position::new(20, 0)));
        assert_eq!(grid, original);
    }

    #[test]
    fn test_move_special_relocates() {
        let mut grid = create_test_grid();

        assert!(grid.move_special(SpecialNode::Start, Position::new(0, 0)));
        assert_eq!(grid.start(), Some(Position::new(0, 0)));
        assert_eq!(count_special(&grid, SpecialNode::Start), 1);
        assert!(grid
            .cell(Position::new(10, 15))
            .is_some_and(|cell| !cell.is_start));

        assert!(grid.move_special(SpecialNode::Finish, Position::new(19, 49)));
        assert_eq!(grid.finish(), Some(Position::new(19, 49)));
        assert_eq!(count_special(&grid, SpecialNode::Finish), 1);
    }

    #[test]
    fn test_move_special_rejects_illegal_targets() {
        let mut grid = create_test_grid();
        let _ = grid.toggle_wall(Position::new(1, 1));
        let original = grid.clone();

        assert!(!grid.move_special(SpecialNode::Start, Position::new(1, 1)));
        assert!(!grid.move_special(SpecialNode::Start, Position::new(10, 35)));
        assert!(!grid.move_special(SpecialNode::Finish, Position::new(10, 15)));
        assert!(!grid.move_special(SpecialNode::Finish, Position::new(0, 50)));
        assert!(!grid.move_special(SpecialNode::Start, Position::new(10, 15)));
        assert_eq!(grid, original);
    }

    #[test]
    fn test_reset_transient_keeps_roles() {
        let mut grid = create_test_grid();
        let _ = grid.toggle_wall(Position::new(2, 2));
        let expected = grid.clone();

        if let Some(cell) = grid.cell_mut(Position::new(4, 4)) {
            cell.distance = Some(3);
            cell.is_visited = true;
            cell.previous = Some(Position::new(4, 3));
        }
        grid.reset_transient();

        assert_eq!(grid, expected);
    }

    #[test]
    fn test_position_parse_and_display() {
        let position: Position = "10,15".parse().expect("position should parse");
        assert_eq!(position, Position::new(10, 15));
        assert_eq!(position.to_string(), "10,15");

        let spaced: Position = " 3 , 4 ".parse().expect("whitespace should be accepted");
        assert_eq!(spaced, Position::new(3, 4));

        assert!(matches!(
            "10".parse::<Position>(),
            Err(ParsePositionError::Malformed(_))
        ));
        assert!(matches!(
            "a,1".parse::<Position>(),
            Err(ParsePositionError::Coordinate { .. })
        ));
        assert!("-1,2".parse::<Position>().is_err());
    }

    #[test]
    fn test_position_ordering_is_row_major() {
        assert!(Position::new(0, 9) < Position::new(1, 0));
        assert!(Position::new(1, 0) < Position::new(1, 1));
        assert_eq!(Position::new(2, 3).manhattan(Position::new(5, 1)), 5);
        assert!(Position::new(2, 3).is_adjacent(Position::new(2, 4)));
        assert!(!Position::new(2, 3).is_adjacent(Position::new(3, 4)));
    }
}
