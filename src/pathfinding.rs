//! Pathfinding algorithm module.
//!
//! This module contains the uniform-cost search run over the grid and the reconstruction of the
//! shortest path from the parent links the search leaves behind. The grid is treated as an
//! implicit 4-connected graph where every step costs one.

use std::{cmp::Reverse, collections::BinaryHeap, iter};

use log::debug;
use thiserror::Error;

use crate::{
    grid::{Grid, Position},
    types::SpecialNode,
};

/// Error produced when a search cannot be started.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The grid lacks the start or the finish cell.
    #[error("cannot search a grid without a {0} cell")]
    InvalidGridState(SpecialNode),
}

/// Result of a single search run.
///
/// Both traces are produced once per run and never change afterwards. They drive the two phases
/// of the animation: exploration first, then the path reveal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Cells in the order the search finalized them, finish included when reached.
    pub visited: Vec<Position>,
    /// Cells along the shortest route from start to finish, empty when finish is unreachable.
    pub path: Vec<Position>,
}

impl SearchOutcome {
    /// Returns whether the search reached the finish cell.
    #[must_use]
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Runs Dijkstra's algorithm from the start cell to the finish cell of the grid.
///
/// Transient search state is cleared before the run and rewritten in place, leaving `distance`,
/// `is_visited` and `previous` on every reached cell for the caller to inspect. The unvisited cell
/// with the smallest distance is always finalized next; ties go to the cell that comes first in
/// row-major order. The search stops as soon as the finish is finalized or when no reachable cell
/// is left.
///
/// # Errors
///
/// This function returns [`SearchError::InvalidGridState`] if the grid has no start or no finish,
/// in which case the grid is left untouched.
pub fn dijkstra(grid: &mut Grid) -> Result<SearchOutcome, SearchError> {
    let start = grid
        .start()
        .ok_or(SearchError::InvalidGridState(SpecialNode::Start))?;
    let finish = grid
        .finish()
        .ok_or(SearchError::InvalidGridState(SpecialNode::Finish))?;

    grid.reset_transient();
    if let Some(cell) = grid.cell_mut(start) {
        cell.distance = Some(0);
    }

    // Keyed by (distance, position) so equal distances pop in row-major order.
    let mut frontier = BinaryHeap::from([Reverse((0, start))]);
    let mut visited = Vec::new();

    while let Some(Reverse((distance, position))) = frontier.pop() {
        let Some(cell) = grid.cell_mut(position) else {
            continue;
        };
        // Entries left behind by an earlier, longer relaxation.
        if cell.is_visited || cell.distance != Some(distance) {
            continue;
        }

        cell.is_visited = true;
        visited.push(position);
        if position == finish {
            break;
        }

        let candidate = distance + 1;
        let neighbors: Vec<Position> = grid.neighbors(position).collect();
        for neighbor in neighbors {
            let Some(cell) = grid.cell_mut(neighbor) else {
                continue;
            };
            if cell.is_wall || cell.is_visited {
                continue;
            }
            if cell.distance.map_or(true, |current| candidate < current) {
                cell.distance = Some(candidate);
                cell.previous = Some(position);
                frontier.push(Reverse((candidate, neighbor)));
            }
        }
    }

    let path = shortest_path(grid, finish);
    debug!(
        "search from {start} to {finish} visited {} cells, path holds {} cells",
        visited.len(),
        path.len()
    );

    Ok(SearchOutcome { visited, path })
}

/// Reconstructs the shortest path ending at `finish` from the parent links of the last search.
///
/// The links are followed backwards from the finish and the collected cells are reversed, so the
/// returned path runs from the start to the finish. The path is empty when the finish was never
/// visited.
#[must_use]
pub fn shortest_path(grid: &Grid, finish: Position) -> Vec<Position> {
    if !grid.cell(finish).is_some_and(|cell| cell.is_visited) {
        return Vec::new();
    }

    let mut path: Vec<Position> = iter::successors(Some(finish), |position| {
        grid.cell(*position).and_then(|cell| cell.previous)
    })
    .take(grid.rows() * grid.cols())
    .collect();
    path.reverse();

    path
}
