//! Animation sequencing module.
//!
//! This module turns the traces of a search into a time-ordered schedule of abstract visual
//! updates and keeps track of which schedule is current. Every schedule is stamped with a
//! [`Generation`]; cancelling or replacing a schedule bumps the generation so that events from the
//! old one are recognised as stale and discarded instead of being applied.

use std::collections::VecDeque;

use log::{debug, trace};

use crate::{
    grid::{Grid, Position},
    pathfinding::SearchOutcome,
};

/// Default virtual time between two explored cells.
pub const VISIT_INTERVAL: u64 = 10;

/// Default virtual time between two path cells.
pub const PATH_INTERVAL: u64 = 50;

/// Visual state an animation event assigns to a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisualState {
    /// The cell was explored by the search.
    Visited,
    /// The cell lies on the shortest path.
    Path,
}

/// Token identifying one animation schedule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// Returns the generation that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// A single scheduled visual update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationEvent {
    /// Cell the update applies to.
    pub cell: Position,
    /// State the cell should be drawn in.
    pub state: VisualState,
    /// Virtual time at which the update fires.
    pub at: u64,
    /// Schedule the event belongs to.
    pub generation: Generation,
}

/// Virtual time spacing of the two animation phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// Virtual time between two consecutive explored cells.
    pub visit_interval: u64,
    /// Virtual time between two consecutive path cells.
    pub path_interval: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            visit_interval: VISIT_INTERVAL,
            path_interval: PATH_INTERVAL,
        }
    }
}

/// Converts a trace index into a number of virtual time steps.
fn steps(index: usize) -> u64 {
    u64::try_from(index).unwrap_or(u64::MAX)
}

/// Builds the complete event schedule for one search outcome.
///
/// Explored cell `i` fires at `visit_interval * i`. The path reveal begins once every explored
/// cell has fired, at `visit_interval * V`, and path cell `j` fires at
/// `visit_interval * V + path_interval * j`. The start and the finish keep their own look, so no
/// event is emitted for them, but they still occupy their slot in the timeline.
#[must_use]
pub fn build_schedule(
    outcome: &SearchOutcome,
    start: Option<Position>,
    finish: Option<Position>,
    timing: Timing,
    generation: Generation,
) -> Vec<AnimationEvent> {
    let is_special = |cell: &Position| Some(*cell) == start || Some(*cell) == finish;
    let path_phase = timing
        .visit_interval
        .saturating_mul(steps(outcome.visited.len()));

    let visited = outcome
        .visited
        .iter()
        .enumerate()
        .filter(|(_, cell)| !is_special(*cell))
        .map(|(index, cell)| AnimationEvent {
            cell: *cell,
            state: VisualState::Visited,
            at: timing.visit_interval.saturating_mul(steps(index)),
            generation,
        });
    let path = outcome
        .path
        .iter()
        .enumerate()
        .filter(|(_, cell)| !is_special(*cell))
        .map(|(index, cell)| AnimationEvent {
            cell: *cell,
            state: VisualState::Path,
            at: path_phase.saturating_add(timing.path_interval.saturating_mul(steps(index))),
            generation,
        });

    visited.chain(path).collect()
}

/// Scheduler for the events of the current animation.
///
/// The sequencer only tracks virtual time; the caller decides how virtual time maps to the wall
/// clock and feeds it through [`Sequencer::advance`].
#[derive(Clone, Debug, Default)]
pub struct Sequencer {
    /// Spacing used for new schedules.
    timing: Timing,
    /// Generation of the current schedule.
    generation: Generation,
    /// Events of the current schedule that have not fired yet, in firing order.
    pending: VecDeque<AnimationEvent>,
}

impl Sequencer {
    /// Creates an idle sequencer.
    #[must_use]
    pub fn new(timing: Timing) -> Self {
        Self {
            timing,
            generation: Generation::default(),
            pending: VecDeque::new(),
        }
    }

    /// Returns the timing used for new schedules.
    #[must_use]
    pub const fn timing(&self) -> Timing {
        self.timing
    }

    /// Returns the generation of the current schedule.
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// Returns whether any event is still waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Returns the number of events still waiting to fire.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Returns the virtual time of the last pending event.
    #[must_use]
    pub fn finishes_at(&self) -> Option<u64> {
        self.pending.back().map(|event| event.at)
    }

    /// Invalidates the current schedule and drops its pending events.
    ///
    /// Returns the new generation, under which nothing is scheduled yet.
    pub fn cancel(&mut self) -> Generation {
        if !self.pending.is_empty() {
            debug!(
                "cancelling {} pending animation events of {:?}",
                self.pending.len(),
                self.generation
            );
        }
        self.pending.clear();
        self.generation = self.generation.next();
        self.generation
    }

    /// Replaces the current schedule with one built from a search outcome.
    ///
    /// Special nodes are looked up on `grid` so that they are excluded from the schedule. Returns
    /// the generation of the new schedule.
    pub fn schedule(&mut self, outcome: &SearchOutcome, grid: &Grid) -> Generation {
        let generation = self.cancel();
        self.pending = build_schedule(
            outcome,
            grid.start(),
            grid.finish(),
            self.timing,
            generation,
        )
        .into();

        generation
    }

    /// Removes and returns every pending event due at or before `now`, in firing order.
    pub fn advance(&mut self, now: u64) -> Vec<AnimationEvent> {
        let due = self.pending.iter().take_while(|event| event.at <= now).count();
        self.pending.drain(..due).collect()
    }
}

/// Per-cell visual states applied by the current animation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overlay {
    /// Number of columns of the grid the overlay covers.
    cols: usize,
    /// Generation whose events are accepted.
    generation: Generation,
    /// Applied states, row-major.
    states: Vec<Option<VisualState>>,
}

impl Overlay {
    /// Creates an empty overlay for a grid of the given shape.
    #[must_use]
    pub fn new(rows: usize, cols: usize, generation: Generation) -> Self {
        Self {
            cols,
            generation,
            states: vec![None; rows.saturating_mul(cols)],
        }
    }

    /// Returns the generation whose events are accepted.
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// Clears every applied state and starts accepting events of another generation.
    pub fn reset(&mut self, generation: Generation) {
        self.states.fill(None);
        self.generation = generation;
    }

    /// Maps a position to its row-major index.
    fn index(&self, position: Position) -> Option<usize> {
        (position.col < self.cols)
            .then(|| position.row.checked_mul(self.cols))
            .flatten()
            .and_then(|offset| offset.checked_add(position.col))
            .filter(|index| *index < self.states.len())
    }

    /// Applies an event if it belongs to the accepted generation.
    ///
    /// Stale events are discarded silently. Returns whether the event was applied.
    pub fn apply(&mut self, event: AnimationEvent) -> bool {
        if event.generation != self.generation {
            trace!(
                "discarding stale {:?} event for {} from {:?}",
                event.state,
                event.cell,
                event.generation
            );
            return false;
        }

        match self.index(event.cell).and_then(|index| self.states.get_mut(index)) {
            Some(state) => {
                *state = Some(event.state);
                true
            }
            None => false,
        }
    }

    /// Returns the applied state of a cell.
    #[must_use]
    pub fn state(&self, position: Position) -> Option<VisualState> {
        self.index(position)
            .and_then(|index| self.states.get(index))
            .copied()
            .flatten()
    }

    /// Returns the number of cells with an applied state.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.iter().flatten().count()
    }

    /// Returns whether no cell has an applied state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
