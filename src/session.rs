//! Visualizer session module.
//!
//! This module contains the [`Session`], the single owner of the grid. It exposes the pointer
//! entry points and the search/reset commands to the presentation layer, and answers how each
//! cell should currently be drawn.

use log::{info, warn};

use crate::{
    animation::{AnimationEvent, Generation, Overlay, Sequencer, Timing, VisualState},
    grid::{Grid, Position},
    interaction::Interaction,
    pathfinding::{self, SearchError, SearchOutcome},
    types::CellVisual,
};

/// State holder for one visualizer session.
///
/// The session keeps a pristine copy of the initial grid to return to on reset, the grid being
/// edited, the pointer state machine, the animation sequencer and the overlay of visual states
/// applied so far.
#[derive(Clone, Debug)]
pub struct Session {
    /// Grid restored by [`Session::reset`].
    blueprint: Grid,
    /// Grid being edited and searched.
    grid: Grid,
    /// Pointer state machine.
    interaction: Interaction,
    /// Scheduler of the current animation.
    sequencer: Sequencer,
    /// Visual states applied by the current animation.
    overlay: Overlay,
}

impl Session {
    /// Starts a session on the given initial grid.
    #[must_use]
    pub fn new(grid: Grid, timing: Timing) -> Self {
        info!("starting session on a {}x{} grid", grid.rows(), grid.cols());
        let sequencer = Sequencer::new(timing);
        let overlay = Overlay::new(grid.rows(), grid.cols(), sequencer.generation());

        Self {
            blueprint: grid.clone(),
            grid,
            interaction: Interaction::default(),
            sequencer,
            overlay,
        }
    }

    /// Returns the current grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the current pointer interaction mode.
    #[must_use]
    pub const fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Returns the generation of the current animation.
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.sequencer.generation()
    }

    /// Returns whether animation events are still waiting to fire.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.sequencer.is_pending()
    }

    /// Returns the virtual time of the last pending animation event.
    #[must_use]
    pub fn finishes_at(&self) -> Option<u64> {
        self.sequencer.finishes_at()
    }

    /// Handles a pointer press on a cell. Returns whether the grid changed.
    pub fn on_pointer_down(&mut self, position: Position) -> bool {
        self.interaction.pointer_down(&mut self.grid, position)
    }

    /// Handles the pointer entering a cell. Returns whether the grid changed.
    pub fn on_pointer_enter(&mut self, position: Position) -> bool {
        self.interaction.pointer_enter(&mut self.grid, position)
    }

    /// Handles the pointer being released.
    pub fn on_pointer_up(&mut self) {
        self.interaction.pointer_up();
    }

    /// Runs the search on the current grid and schedules its animation.
    ///
    /// Any animation still in flight is cancelled and its overlay cleared before the new one is
    /// scheduled. The returned outcome holds both traces of the run.
    ///
    /// # Errors
    ///
    /// This function returns [`SearchError::InvalidGridState`] if the grid has no start or no
    /// finish. Nothing is cancelled or scheduled in that case.
    pub fn run_search(&mut self) -> Result<SearchOutcome, SearchError> {
        let outcome = pathfinding::dijkstra(&mut self.grid).inspect_err(|err| {
            warn!("search aborted: {err}");
        })?;

        let generation = self.sequencer.schedule(&outcome, &self.grid);
        self.overlay.reset(generation);
        info!(
            "search visited {} cells, path holds {} cells, animating as {generation:?}",
            outcome.visited.len(),
            outcome.path.len()
        );

        Ok(outcome)
    }

    /// Cancels the animation and drops every search artifact, keeping walls and special nodes.
    pub fn clear_search(&mut self) {
        let generation = self.sequencer.cancel();
        self.overlay.reset(generation);
        self.grid.reset_transient();
    }

    /// Cancels the animation and restores the initial grid.
    pub fn reset(&mut self) {
        let generation = self.sequencer.cancel();
        self.overlay.reset(generation);
        self.grid.clone_from(&self.blueprint);
        info!("grid reset, now accepting {generation:?}");
    }

    /// Advances the animation to virtual time `now` and applies every event that became due.
    ///
    /// Returns the number of events applied.
    pub fn tick(&mut self, now: u64) -> usize {
        self.sequencer
            .advance(now)
            .into_iter()
            .filter(|event| self.overlay.apply(*event))
            .count()
    }

    /// Applies a single animation event, discarding it when its generation is stale.
    ///
    /// Returns whether the event was applied.
    pub fn apply(&mut self, event: AnimationEvent) -> bool {
        self.overlay.apply(event)
    }

    /// Returns how a cell should be drawn, or `None` outside of the grid.
    #[must_use]
    pub fn visual(&self, position: Position) -> Option<CellVisual> {
        let cell = self.grid.cell(position)?;

        let visual = if cell.is_start {
            CellVisual::Start
        } else if cell.is_finish {
            CellVisual::Finish
        } else if cell.is_wall {
            CellVisual::Wall
        } else {
            match self.overlay.state(position) {
                Some(VisualState::Path) => CellVisual::Path,
                Some(VisualState::Visited) => CellVisual::Visited,
                None => CellVisual::Plain,
            }
        };

        Some(visual)
    }

    /// Iterates over every cell with its visual classification, in row-major order.
    pub fn visuals(&self) -> impl Iterator<Item = (Position, CellVisual)> + '_ {
        self.grid
            .cells()
            .filter_map(|(position, _)| self.visual(position).map(|visual| (position, visual)))
    }
}
