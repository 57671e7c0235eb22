//! User interface rendering functions for the visualizer screen.

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear, Paragraph,
    },
    Frame,
};

use crate::{grid::Position, types::CellVisual, App};

/// Drawing order of the cell classes, with their colors.
///
/// Later layers are painted over earlier ones, although every cell belongs to exactly one class.
const LAYERS: [(CellVisual, Color); 6] = [
    (CellVisual::Plain, Color::DarkGray),
    (CellVisual::Visited, Color::Cyan),
    (CellVisual::Path, Color::Yellow),
    (CellVisual::Wall, Color::White),
    (CellVisual::Start, Color::Green),
    (CellVisual::Finish, Color::Red),
];

/// Key hints shown in the status line.
const KEY_HINTS: &str = "(enter) search / (c) clear / (r) reset / (q) quit";

/// Updates the application UI based on the persistent state.
///
/// This function splits the screen into the grid region and a status line at the bottom, and
/// renders both from the state stored in the [`App`] structure.
///
/// # Errors
///
/// This function may return errors from layout retrieval or data conversion failures.
pub(crate) fn draw(app: &mut App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let overall_layout = Layout::vertical([
        Constraint::Min(1),    // Grid and padding area
        Constraint::Length(3), // Status block
    ])
    .split(frame.area());

    let grid_region = *overall_layout
        .first()
        .ok_or_eyre("failed to get grid region from layout")?;
    let status_region = *overall_layout
        .last()
        .ok_or_eyre("failed to get status region from layout")?;

    grid(app, frame, grid_region)?;
    status(app, frame, status_region);

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the grid centered in the given region.
///
/// The grid is drawn on a [`Canvas`] with one terminal cell per grid cell, so the area it occupies
/// doubles as the map from mouse coordinates back to cells. When the region cannot hold the whole
/// grid, a notice is drawn instead and mouse input stops mapping to cells.
///
/// # Errors
///
/// This function may return errors if the grid dimensions do not fit in terminal coordinates.
pub(crate) fn grid(app: &mut App, frame: &mut Frame, region: Rect) -> Result<()> {
    let rows = u16::try_from(app.session.grid().rows())?;
    let cols = u16::try_from(app.session.grid().cols())?;
    let width = cols.saturating_add(2);
    let height = rows.saturating_add(2);

    let block = Block::bordered()
        .title("Dijkstra")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    if region.width < width || region.height < height {
        app.grid_area = Rect::default();
        let notice = Paragraph::new(format!(
            "terminal too small: the grid needs {width}x{height} cells"
        ))
        .centered()
        .block(block);
        frame.render_widget(notice, region);
        return Ok(());
    }

    let space = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .split(region)
        .first()
        .copied()
        .ok_or_eyre("failed to get grid space from horizontal layout")?;
    let space = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(space)
        .first()
        .copied()
        .ok_or_eyre("failed to get grid space from vertical layout")?;

    let inner_space = block.inner(space);
    frame.render_widget(block, space);
    app.grid_area = inner_space;

    // Pre-compute screen coordinates to handle errors before the paint closure
    let mut layers = Vec::with_capacity(LAYERS.len());
    for (visual, color) in LAYERS {
        let cells: Vec<Position> = app
            .session
            .visuals()
            .filter_map(|(position, current)| (current == visual).then_some(position))
            .collect();
        layers.push((transform_grid_to_screen_coords(&cells, rows, cols)?, color));
    }

    let canvas = Canvas::default()
        .x_bounds(canvas_bounds(cols))
        .y_bounds(canvas_bounds(rows))
        .marker(Marker::Block)
        .paint(|ctx| {
            for (coords, color) in &layers {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
            }
        });
    frame.render_widget(canvas, inner_space);

    Ok(())
}

/// Renders the status line with key hints and the last message.
pub(crate) fn status(app: &App, frame: &mut Frame, region: Rect) {
    let block = Block::bordered()
        .title(KEY_HINTS)
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    let message = Paragraph::new(Line::raw(app.status.as_str()).centered()).block(block);

    frame.render_widget(message, region);
}

/// Returns symmetric canvas bounds for an axis holding `cells` cells.
///
/// With bounds of `±(n - 1) / 2`, cell centers land on integer steps that the canvas maps one to
/// one onto terminal cells. A single cell still needs a non-empty range.
pub(crate) fn canvas_bounds(cells: u16) -> [f64; 2] {
    let half = ((f64::from(cells) - 1.) / 2.).max(0.5);
    [-half, half]
}

/// Transforms grid positions to screen coordinates for canvas rendering.
///
/// This function converts grid positions (row, col) to canvas coordinates (x, y) using the
/// centering formulas x = col - (cols - 1) / 2 and y = (rows - 1) / 2 - row, so rows grow
/// downwards.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations.
pub(crate) fn transform_grid_to_screen_coords(
    positions: &[Position],
    rows: u16,
    cols: u16,
) -> Result<Vec<(f64, f64)>> {
    let rows_n = f64::from(rows);
    let cols_n = f64::from(cols);

    positions
        .iter()
        .map(|position| {
            let screen_y = (rows_n - 1.) / 2. - f64::from(u16::try_from(position.row)?);
            let screen_x = f64::from(u16::try_from(position.col)?) - (cols_n - 1.) / 2.;

            Ok((screen_x, screen_y))
        })
        .collect()
}
