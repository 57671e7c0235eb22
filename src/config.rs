//! Command-line configuration module.
//!
//! This module contains the [`Config`] parsed from the command line. The defaults reproduce the
//! reference setup: a 20x50 grid with the start at `10,15`, the finish at `10,35`, explored cells
//! revealed every 10 time units and path cells every 50.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use color_eyre::eyre::{ensure, Result};

use crate::{
    animation::{Timing, PATH_INTERVAL, VISIT_INTERVAL},
    grid::{Grid, Position},
    layout,
};

/// Runtime configuration of the visualizer.
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
#[command(name = "pathgrid", version, about)]
pub struct Config {
    /// Number of grid rows.
    #[arg(long, default_value_t = 20)]
    pub rows: usize,
    /// Number of grid columns.
    #[arg(long, default_value_t = 50)]
    pub cols: usize,
    /// Initial start cell, as `row,col`.
    #[arg(long, default_value_t = Position::new(10, 15))]
    pub start: Position,
    /// Initial finish cell, as `row,col`.
    #[arg(long, default_value_t = Position::new(10, 35))]
    pub finish: Position,
    /// Virtual time between two explored cells.
    #[arg(long, default_value_t = VISIT_INTERVAL)]
    pub visit_interval: u64,
    /// Virtual time between two path cells.
    #[arg(long, default_value_t = PATH_INTERVAL)]
    pub path_interval: u64,
    /// Milliseconds of wall-clock time per virtual time unit.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,
    /// Layout file to start from; overrides the grid shape and special nodes.
    #[arg(long, value_name = "PATH")]
    pub layout: Option<PathBuf>,
    /// File to write logs to; logging stays off without it.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 50,
            start: Position::new(10, 15),
            finish: Position::new(10, 35),
            visit_interval: VISIT_INTERVAL,
            path_interval: PATH_INTERVAL,
            tick_ms: 1,
            layout: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Builds the grid the session starts from and returns to on reset.
    ///
    /// # Errors
    ///
    /// This function returns an error if the layout file cannot be loaded, or if the configured
    /// dimensions and special nodes do not describe a valid grid.
    pub fn initial_grid(&self) -> Result<Grid> {
        if let Some(path) = &self.layout {
            return layout::load(path);
        }

        Ok(Grid::new(self.rows, self.cols, self.start, self.finish)?)
    }

    /// Returns the animation spacing.
    #[must_use]
    pub const fn timing(&self) -> Timing {
        Timing {
            visit_interval: self.visit_interval,
            path_interval: self.path_interval,
        }
    }

    /// Returns the wall-clock length of one virtual time unit.
    ///
    /// # Errors
    ///
    /// This function returns an error if the configured length is zero.
    pub fn tick(&self) -> Result<Duration> {
        ensure!(self.tick_ms > 0, "a virtual time unit must last at least 1ms");
        Ok(Duration::from_millis(self.tick_ms))
    }
}
