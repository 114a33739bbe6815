//! User interface rendering functions for the game screen.

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
    Frame,
};

use crate::{
    events::CELL_WIDTH,
    maze::{Cell, Grid},
    view::Board,
    App,
};

/// Updates the application UI based on the persistent state.
///
/// This function lays out the maze in the middle of the screen with the status block below it,
/// and records the area the maze was drawn in so mouse input can be resolved against it. When the
/// maze does not fit the terminal, a resize hint is shown instead and mouse input is dropped
/// until it fits again.
///
/// # Errors
///
/// This function may return errors if no maze has been drawn yet or from data conversion
/// failures.
pub(crate) fn draw(app: &mut App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let grid = app
        .board
        .grid
        .as_ref()
        .ok_or_eyre("no maze to render on the board")?;
    let maze_rows = u16::try_from(grid.height())?;
    let maze_columns = u16::try_from(grid.width())?.saturating_mul(CELL_WIDTH);

    // Create overall layout: maze area + status at bottom
    let overall_layout = Layout::vertical([
        Constraint::Min(1),    // Maze and padding area
        Constraint::Length(4), // Status block
    ])
    .split(frame.area());

    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let status_full_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get status area from layout")?;

    let fits = maze_columns <= maze_content_area.width && maze_rows <= maze_content_area.height;
    let status_area = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(maze_columns.max(40)),
        Constraint::Min(1),
    ])
    .split(status_full_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get centered status area from horizontal layout")?;

    if fits {
        let maze_area = centered(maze_content_area, maze_columns, maze_rows)?;
        app.tracker.area = maze_area;
        frame.render_widget(MazeView { board: &app.board, grid }, maze_area);
    } else {
        app.tracker.area = Rect::default();
        let hint_area = centered(maze_content_area, maze_content_area.width, 1)?;
        frame.render_widget(too_small(grid), hint_area);
    }
    frame.render_widget(status(&app.board), status_area);

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Builds the hint shown in place of a maze that does not fit the terminal.
fn too_small(grid: &Grid) -> Paragraph<'static> {
    Paragraph::new(format!(
        "Terminal too small for a {}x{} maze, enlarge the window",
        grid.height(),
        grid.width()
    ))
    .style(Style::default().fg(Color::Red))
    .centered()
}

/// Centers a rectangle of the given size inside an area, shrinking it if it does not fit.
fn centered(area: Rect, width: u16, height: u16) -> Result<Rect> {
    let row = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height),
        Constraint::Min(0),
    ])
    .split(area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze row from layout")?;

    Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(width),
        Constraint::Min(0),
    ])
    .split(row)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze space from horizontal layout")
}

/// Builds the status block shown below the maze.
///
/// The block switches to a highlighted style once the maze has been solved.
fn status(board: &Board) -> Paragraph<'static> {
    let style = if board.celebrating() {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };

    let block = Block::bordered()
        .title("(n) new maze / (r) reset trace / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    Paragraph::new(vec![
        Line::raw(""),
        Line::styled(board.status.text(), style).centered(),
    ])
    .block(block)
}

/// Returns the background color a cell is painted with. A winning trace is painted gold.
const fn cell_color(cell: Cell, visited: bool, won: bool) -> Color {
    match (cell, visited) {
        (Cell::Wall, _) => Color::Green,
        (Cell::Start, _) => Color::Yellow,
        (Cell::Path | Cell::End, true) if won => Color::LightYellow,
        (Cell::End, true) => Color::LightRed,
        (Cell::End, false) => Color::Magenta,
        (Cell::Path, true) => Color::Red,
        (Cell::Path, false) => Color::Reset,
    }
}

/// Widget painting the maze, one cell every [`CELL_WIDTH`] terminal columns.
struct MazeView<'board> {
    /// Visited marks to overlay.
    board: &'board Board,
    /// Maze to paint.
    grid: &'board Grid,
}

impl Widget for MazeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let won = self.board.celebrating();
        for (at, cell) in self.grid.cells() {
            let (Ok(row), Ok(col)) = (u16::try_from(at.row), u16::try_from(at.col)) else {
                continue;
            };
            let color = cell_color(cell, self.board.visited.contains(&at), won);

            let y = area.y.saturating_add(row);
            for offset in 0..CELL_WIDTH {
                let x = area
                    .x
                    .saturating_add(col.saturating_mul(CELL_WIDTH))
                    .saturating_add(offset);
                if x >= area.right() || y >= area.bottom() {
                    continue;
                }
                if let Some(target) = buf.cell_mut((x, y)) {
                    let _ = target.set_symbol(" ").set_bg(color);
                }
            }
        }
    }
}
