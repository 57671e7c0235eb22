//! Initial layout parsing and loading utilities.
//!
//! A layout describes a grid as plain text, one line per row:
//! - `.` is an empty cell
//! - `#` is a wall
//! - `S` is the start
//! - `F` is the finish
//!
//! Layouts are only ever read to seed a session; nothing is written back.

use std::{fs, path::Path};

use color_eyre::eyre::{eyre, Result, WrapErr as _};
use thiserror::Error;

use crate::{
    grid::{Grid, PlacementError, Position},
    types::SpecialNode,
};

/// Error produced when layout text does not describe a valid grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The layout holds no rows.
    #[error("layout is empty")]
    Empty,
    /// A row has a different length than the first one.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Offending row index.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A symbol other than `.`, `#`, `S` or `F` was found.
    #[error("unknown symbol {symbol:?} at {position}")]
    UnknownSymbol {
        /// The unexpected symbol.
        symbol: char,
        /// Where it was found.
        position: Position,
    },
    /// The start or the finish appears more than once.
    #[error("layout holds more than one {0}")]
    Duplicate(SpecialNode),
    /// The grid shape itself was rejected.
    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// Parses layout text into a grid.
///
/// Surrounding blank lines and trailing whitespace are ignored. A layout may omit the start or the
/// finish, which yields a grid the search refuses to run on; use [`load`] when both are required.
///
/// # Errors
///
/// This function returns an error if:
/// - The layout is empty
/// - Rows differ in length
/// - An unknown symbol is found
/// - The start or the finish appears more than once
pub fn parse(input: &str) -> Result<Grid, ParseError> {
    let lines: Vec<&str> = input.trim().lines().map(str::trim_end).collect();
    let expected = lines.first().map_or(0, |line| line.chars().count());
    if lines.is_empty() || expected == 0 {
        return Err(ParseError::Empty);
    }

    let mut grid = Grid::blank(lines.len(), expected)?;
    let mut start = None;
    let mut finish = None;

    for (row, line) in lines.iter().enumerate() {
        let found = line.chars().count();
        if found != expected {
            return Err(ParseError::RaggedRow {
                row,
                expected,
                found,
            });
        }

        for (col, symbol) in line.chars().enumerate() {
            let position = Position::new(row, col);
            match symbol {
                '.' => {}
                '#' => {
                    let _ = grid.toggle_wall(position);
                }
                'S' => claim(&mut start, SpecialNode::Start, position)?,
                'F' => claim(&mut finish, SpecialNode::Finish, position)?,
                _ => return Err(ParseError::UnknownSymbol { symbol, position }),
            }
        }
    }

    for (kind, slot) in [(SpecialNode::Start, start), (SpecialNode::Finish, finish)] {
        if let Some(position) = slot {
            let _ = grid.move_special(kind, position);
        }
    }

    Ok(grid)
}

/// Records the position of a special node, rejecting a second occurrence.
fn claim(
    slot: &mut Option<Position>,
    kind: SpecialNode,
    position: Position,
) -> Result<(), ParseError> {
    if slot.replace(position).is_some() {
        return Err(ParseError::Duplicate(kind));
    }

    Ok(())
}

/// Reads and parses a layout file, requiring both special nodes to be present.
///
/// # Errors
///
/// This function returns an error if the file cannot be read, does not parse, or lacks the start
/// or the finish.
pub fn load(path: &Path) -> Result<Grid> {
    let contents = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read layout file {}", path.display()))?;
    let grid = parse(&contents)
        .wrap_err_with(|| format!("failed to parse layout file {}", path.display()))?;

    for kind in [SpecialNode::Start, SpecialNode::Finish] {
        if grid.special(kind).is_none() {
            return Err(eyre!("layout file {} has no {kind} cell", path.display()));
        }
    }

    Ok(grid)
}
