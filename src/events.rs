//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{
    self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};

use crate::App;

/// Event polling timeout in milliseconds.
///
/// This constant bounds how long the loop waits for input before redrawing. It has to stay well
/// below the animation spacing so that explored cells appear smoothly.
pub(crate) const POLL_INTERVAL_MS: u64 = 16;

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard and mouse events and dispatches them to the appropriate
/// handler. It uses a timeout to avoid blocking the UI, then advances the animation.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_events(app, key.code),
            Event::Mouse(mouse) => handle_mouse_events(app, mouse),
            _ => {}
        }
    }

    app.update_animation();

    Ok(())
}

/// Handles key presses.
///
/// `Enter`, `Space` and `s` run the search, `c` clears its results, `r` restores the initial grid
/// and `q` or `Esc` quit.
pub(crate) fn handle_key_events(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.exit = true,
        KeyCode::Enter | KeyCode::Char(' ' | 's') => app.run_search(),
        KeyCode::Char('c') => app.clear_search(),
        KeyCode::Char('r') => app.reset(),
        _ => {}
    }
}

/// Handles mouse events and translates them into pointer entry points of the session.
///
/// A left press is a pointer-down on the cell under the cursor. A drag reports a pointer-enter
/// only when the cursor reaches a cell other than the last one, and dragging outside of the grid
/// forgets the last cell so that coming back re-enters it. Releasing any button is a pointer-up.
pub(crate) fn handle_mouse_events(app: &mut App, mouse: MouseEvent) {
    let cell = app.cell_at(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.hovered = cell;
            if let Some(position) = cell {
                let _ = app.session.on_pointer_down(position);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) if cell != app.hovered => {
            app.hovered = cell;
            if let Some(position) = cell {
                let _ = app.session.on_pointer_enter(position);
            }
        }
        MouseEventKind::Up(_) => {
            app.hovered = None;
            app.session.on_pointer_up();
        }
        _ => {}
    }
}
