//! Type definitions shared by the grid model, the search engine and the presentation layer.

use std::fmt;

/// Special node designations on the grid.
///
/// This enumeration names the two cells that carry a distinct role on every grid. It is used when
/// relocating one of them and when reporting which one is missing from a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialNode {
    /// The cell the search starts from.
    Start,
    /// The cell the search tries to reach.
    Finish,
}

impl SpecialNode {
    /// Returns the other special node.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Start => Self::Finish,
            Self::Finish => Self::Start,
        }
    }
}

impl fmt::Display for SpecialNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Finish => f.write_str("finish"),
        }
    }
}

/// Visual classification of a single cell.
///
/// This enumeration is what the presentation layer needs to decide how to draw a cell. It combines
/// the role flags stored in the grid with the animation overlay, with start, finish and walls
/// always taking precedence over the animated states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellVisual {
    /// An ordinary, untouched cell.
    Plain,
    /// The start cell.
    Start,
    /// The finish cell.
    Finish,
    /// An impassable cell.
    Wall,
    /// A cell the animation has marked as explored.
    Visited,
    /// A cell the animation has marked as part of the shortest path.
    Path,
}
