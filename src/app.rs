//! Core application state and logic for the terminal visualizer.

use std::{
    io,
    time::{Duration, Instant},
};

use color_eyre::eyre::Result;
use log::{info, warn};
use ratatui::{
    crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
    },
    layout::Rect,
    DefaultTerminal,
};

use crate::{config::Config, events, grid::Position, session::Session, ui};

/// Application state container for the visualizer.
///
/// This structure holds the state from which Ratatui renders the screen and into which Crossterm
/// events are fed. The grid itself lives in the [`Session`]; the application only adds the
/// terminal-specific bits around it.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It starts off `false` and is set
    /// when the user asks to quit.
    pub(crate) exit: bool,
    /// Visualizer session owning the grid.
    pub(crate) session: Session,
    /// Wall-clock length of one virtual time unit.
    pub(crate) tick: Duration,
    /// Moment the current animation started, if one is playing.
    ///
    /// This field drives the virtual clock fed to the session; it is cleared once every scheduled
    /// event has fired or the animation is cancelled.
    pub(crate) animation_started: Option<Instant>,
    /// Screen area the grid was drawn into during the last redraw.
    ///
    /// Mouse coordinates are mapped to cells through this area. It is empty when the terminal was
    /// too small to draw the grid.
    pub(crate) grid_area: Rect,
    /// Cell the pointer was last reported in while the button is held.
    pub(crate) hovered: Option<Position>,
    /// Message shown in the status line.
    pub(crate) status: String,
}

impl App {
    /// Creates the application from its configuration.
    ///
    /// # Errors
    ///
    /// This function returns an error if the configuration does not describe a valid grid.
    pub fn new(config: &Config) -> Result<Self> {
        let grid = config.initial_grid()?;

        Ok(Self {
            exit: false,
            session: Session::new(grid, config.timing()),
            tick: config.tick()?,
            animation_started: None,
            grid_area: Rect::default(),
            hovered: None,
            status: String::from("draw walls with the mouse, drag start and finish to move them"),
        })
    }

    /// Runs the main loop of the application.
    ///
    /// Mouse capture is enabled for the duration of the loop. The loop continues until the exit
    /// flag is set, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        execute!(io::stdout(), EnableMouseCapture)?;
        let result = self.event_loop(terminal);
        execute!(io::stdout(), DisableMouseCapture)?;

        result
    }

    /// Draws and handles events until the exit flag is set.
    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame)
                    .map_err(|err| io::Error::new(io::ErrorKind::Other, err))
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Runs the search and starts its animation, reporting the result in the status line.
    pub(crate) fn run_search(&mut self) {
        match self.session.run_search() {
            Ok(outcome) => {
                self.animation_started = Some(Instant::now());
                self.status = if outcome.found() {
                    format!(
                        "explored {} cells, shortest path holds {} cells",
                        outcome.visited.len(),
                        outcome.path.len()
                    )
                } else {
                    format!(
                        "finish unreachable after exploring {} cells",
                        outcome.visited.len()
                    )
                };
            }
            Err(err) => {
                warn!("search from the terminal failed: {err}");
                self.status = format!("search failed: {err}");
            }
        }
    }

    /// Cancels the animation and clears the search results, keeping walls.
    pub(crate) fn clear_search(&mut self) {
        self.session.clear_search();
        self.animation_started = None;
        self.status = String::from("search cleared");
    }

    /// Cancels the animation and restores the initial grid.
    pub(crate) fn reset(&mut self) {
        self.session.reset();
        self.animation_started = None;
        self.status = String::from("grid reset");
        info!("grid reset from the terminal");
    }

    /// Returns the virtual time elapsed since the animation started.
    pub(crate) fn virtual_now(&self) -> Option<u64> {
        let started = self.animation_started?;
        let units = started.elapsed().as_millis() / self.tick.as_millis().max(1);

        Some(u64::try_from(units).unwrap_or(u64::MAX))
    }

    /// Applies every animation event that became due since the last update.
    pub(crate) fn update_animation(&mut self) {
        let Some(now) = self.virtual_now() else {
            return;
        };

        let _ = self.session.tick(now);
        if !self.session.is_animating() {
            self.animation_started = None;
        }
    }

    /// Maps a terminal coordinate to the grid cell drawn there.
    pub(crate) fn cell_at(&self, column: u16, row: u16) -> Option<Position> {
        let area = self.grid_area;
        let col = column.checked_sub(area.x).filter(|col| *col < area.width)?;
        let row = row.checked_sub(area.y).filter(|row| *row < area.height)?;

        Some(Position::new(row.into(), col.into()))
    }
}
