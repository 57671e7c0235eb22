//! Pointer interaction state machine.
//!
//! This module interprets pointer presses, drags and releases against the grid. A press on the
//! start or the finish picks that node up, a press anywhere else starts painting walls, and a
//! release always drops back to [`Interaction::Idle`].

use log::trace;

use crate::{
    grid::{Grid, Position},
    types::SpecialNode,
};

/// Current pointer interaction mode.
///
/// The machine starts in [`Interaction::Idle`] and lives for the whole session; it has no
/// terminal state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interaction {
    /// No button is held.
    #[default]
    Idle,
    /// The button is held and entered cells get their wall flag toggled.
    DraggingWall,
    /// The start node follows the pointer.
    MovingStart,
    /// The finish node follows the pointer.
    MovingFinish,
}

impl Interaction {
    /// Handles a pointer press on a cell.
    ///
    /// Pressing the start or the finish begins moving that node. Pressing any other cell toggles
    /// its wall flag immediately and begins a wall drag. Presses outside of the grid are ignored.
    /// Returns whether the grid changed.
    pub fn pointer_down(&mut self, grid: &mut Grid, position: Position) -> bool {
        let Some(cell) = grid.cell(position) else {
            trace!("pointer down outside of the grid at {position}");
            return false;
        };

        if cell.is_start {
            *self = Self::MovingStart;
            false
        } else if cell.is_finish {
            *self = Self::MovingFinish;
            false
        } else {
            *self = Self::DraggingWall;
            grid.toggle_wall(position)
        }
    }

    /// Handles the pointer entering a cell while the button may be held.
    ///
    /// During a wall drag every entered cell is toggled, including a cell entered a second time in
    /// the same drag. While moving a special node, the node follows the pointer unless the target
    /// is a wall or holds the other node. Nothing happens while idle. Returns whether the grid
    /// changed.
    pub fn pointer_enter(self, grid: &mut Grid, position: Position) -> bool {
        match self {
            Self::Idle => false,
            Self::DraggingWall => grid.toggle_wall(position),
            Self::MovingStart => grid.move_special(SpecialNode::Start, position),
            Self::MovingFinish => grid.move_special(SpecialNode::Finish, position),
        }
    }

    /// Handles the pointer being released anywhere.
    pub fn pointer_up(&mut self) {
        *self = Self::Idle;
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

    /// Asserts that the grid holds exactly one start and one finish.
    fn assert_single_special_nodes(grid: &Grid) {
        let starts = grid.cells().filter(|(_, cell)| cell.is_start).count();
        let finishes = grid.cells().filter(|(_, cell)| cell.is_finish).count();
        assert_eq!(starts, 1, "grid should hold exactly one start");
        assert_eq!(finishes, 1, "grid should hold exactly one finish");
    }

    #[test]
    fn test_initial_state_is_idle() {
        assert_eq!(Interaction::default(), Interaction::Idle);
    }

    #[test]
    fn test_pointer_down_on_plain_cell_toggles_wall() {
        let mut grid = create_test_grid();
        let mut interaction = Interaction::default();

        assert!(interaction.pointer_down(&mut grid, Position::new(2, 2)));
        assert_eq!(interaction, Interaction::DraggingWall);
        assert!(grid
            .cell(Position::new(2, 2))
            .is_some_and(|cell| cell.is_wall));
    }

    #[test]
    fn test_pointer_down_on_special_nodes() {
        let mut grid = create_test_grid();
        let original = grid.clone();
        let mut interaction = Interaction::default();

        assert!(!interaction.pointer_down(&mut grid, Position::new(10, 15)));
        assert_eq!(interaction, Interaction::MovingStart);

        interaction.pointer_up();
        assert!(!interaction.pointer_down(&mut grid, Position::new(10, 35)));
        assert_eq!(interaction, Interaction::MovingFinish);
        assert_eq!(grid, original, "picking a node up should not edit the grid");
    }

    #[test]
    fn test_pointer_down_outside_of_grid() {
        let mut grid = create_test_grid();
        let mut interaction = Interaction::default();

        assert!(!interaction.pointer_down(&mut grid, Position::new(20, 0)));
        assert_eq!(interaction, Interaction::Idle);
    }

    #[test]
    fn test_drag_toggles_entered_cells() {
        let mut grid = create_test_grid();
        let mut interaction = Interaction::default();

        let _ = interaction.pointer_down(&mut grid, Position::new(0, 0));
        for col in 1..5 {
            assert!(interaction.pointer_enter(&mut grid, Position::new(0, col)));
        }
        interaction.pointer_up();

        assert_eq!(grid.wall_count(), 5);
        assert_eq!(interaction, Interaction::Idle);
    }

    #[test]
    fn test_drag_reentering_cell_toggles_again() {
        let mut grid = create_test_grid();
        let mut interaction = Interaction::default();

        let _ = interaction.pointer_down(&mut grid, Position::new(0, 0));
        let _ = interaction.pointer_enter(&mut grid, Position::new(0, 1));
        let _ = interaction.pointer_enter(&mut grid, Position::new(0, 0));

        assert!(grid
            .cell(Position::new(0, 0))
            .is_some_and(|cell| !cell.is_wall));
        assert!(grid
            .cell(Position::new(0, 1))
            .is_some_and(|cell| cell.is_wall));
    }

    #[test]
    fn test_drag_over_special_nodes_keeps_them() {
        let mut grid = create_test_grid();
        let mut interaction = Interaction::default();

        let _ = interaction.pointer_down(&mut grid, Position::new(10, 14));
        assert!(!interaction.pointer_enter(&mut grid, Position::new(10, 15)));
        assert!(interaction.pointer_enter(&mut grid, Position::new(10, 16)));

        assert_eq!(grid.start(), Some(Position::new(10, 15)));
        assert_single_special_nodes(&grid);
    }

    #[test]
    fn test_moving_start_follows_pointer() {
        let mut grid = create_test_grid();
        let mut interaction = Interaction::default();

        let _ = interaction.pointer_down(&mut grid, Position::new(10, 15));
        assert!(interaction.pointer_enter(&mut grid, Position::new(10, 16)));
        assert!(interaction.pointer_enter(&mut grid, Position::new(11, 16)));
        interaction.pointer_up();

        assert_eq!(grid.start(), Some(Position::new(11, 16)));
        assert_single_special_nodes(&grid);
        assert_eq!(grid.wall_count(), 0);
    }

    #[test]
    fn test_moving_node_skips_walls_and_other_node() {
        let mut grid = create_test_grid();
        let _ = grid.toggle_wall(Position::new(10, 34));
        let mut interaction = Interaction::default();

        let _ = interaction.pointer_down(&mut grid, Position::new(10, 35));
        assert!(!interaction.pointer_enter(&mut grid, Position::new(10, 34)));
        assert_eq!(grid.finish(), Some(Position::new(10, 35)));

        interaction.pointer_up();
        let _ = interaction.pointer_down(&mut grid, Position::new(10, 15));
        assert!(!interaction.pointer_enter(&mut grid, Position::new(10, 35)));
        assert_eq!(grid.start(), Some(Position::new(10, 15)));
        assert_single_special_nodes(&grid);
    }

    #[test]
    fn test_enter_while_idle_is_noop() {
        let mut grid = create_test_grid();
        let original = grid.clone();
        let interaction = Interaction::default();

        assert!(!interaction.pointer_enter(&mut grid, Position::new(3, 3)));
        assert_eq!(grid, original);
    }

    #[test]
    fn test_pointer_up_always_returns_to_idle() {
        for mut interaction in [
            Interaction::Idle,
            Interaction::DraggingWall,
            Interaction::MovingStart,
            Interaction::MovingFinish,
        ] {
            interaction.pointer_up();
            assert_eq!(interaction, Interaction::Idle);
        }
    }

    #[test]
    fn test_special_nodes_survive_long_interaction() {
        let mut grid = create_test_grid();
        let mut interaction = Interaction::default();
        let presses = [
            Position::new(10, 15),
            Position::new(0, 0),
            Position::new(10, 35),
            Position::new(5, 5),
        ];

        for (step, press) in presses.iter().enumerate() {
            let _ = interaction.pointer_down(&mut grid, *press);
            for offset in 0..6 {
                let target =
                    Position::new((press.row + offset + step) % 20, (press.col + offset) % 50);
                let _ = interaction.pointer_enter(&mut grid, target);
                assert_single_special_nodes(&grid);
            }
            interaction.pointer_up();
        }
    }
}
