//! Interactive shortest-path visualizer for grids of cells.
//!
//! The user edits a grid in the terminal, placing walls and moving the start and finish nodes,
//! then runs Dijkstra's algorithm over it and watches the exploration order replayed cell by
//! cell, followed by the reconstructed path.
//!
//! The core lives in the public modules: the [`grid`] model, the [`pathfinding`] engine, the
//! [`interaction`] state machine and the [`animation`] sequencer, tied together by a
//! [`session::Session`]. The terminal front end on top of them is exposed through [`App`].

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

pub mod animation;
pub mod config;
pub mod grid;
pub mod interaction;
pub mod layout;
pub mod logging;
pub mod pathfinding;
pub mod session;
pub mod types;

mod app;
mod events;
mod ui;

pub use app::App;
