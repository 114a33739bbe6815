//! Event handling functions for user input and application state updates.
//!
//! Keyboard events drive the session directly, while mouse events go through the
//! [`InputTracker`], which turns terminal positions into maze cell events.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::{
    crossterm::event::{
        self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
    },
    layout::Rect,
};

use crate::{maze::Coord, tracer::InputEvent, App};

/// Width of a maze cell in terminal columns. Two columns make cells look roughly square.
pub(crate) const CELL_WIDTH: u16 = 2;

/// Converter from raw mouse events to discrete maze cell events.
///
/// The tracker knows where the maze was last drawn, resolves terminal positions against that area
/// and drops positions that fall outside the maze. Consecutive drags over the same cell are
/// collapsed into a single cell-enter event.
#[derive(Debug, Default)]
pub(crate) struct InputTracker {
    /// Screen area the maze occupied during the last redraw.
    pub(crate) area: Rect,
    /// Whether the left button is held down.
    pressed: bool,
    /// Last cell an event was emitted for while pressed.
    last: Option<Coord>,
}

impl InputTracker {
    /// Resolves a terminal position to the maze cell drawn there.
    pub(crate) fn resolve(&self, column: u16, row: u16) -> Option<Coord> {
        let inside = column >= self.area.x
            && row >= self.area.y
            && column < self.area.right()
            && row < self.area.bottom();

        inside.then(|| {
            Coord::new(
                usize::from(row - self.area.y),
                usize::from((column - self.area.x) / CELL_WIDTH),
            )
        })
    }

    /// Translates a mouse event into a maze input event, if it maps to one.
    pub(crate) fn translate(&mut self, mouse: MouseEvent) -> Option<InputEvent> {
        let cell = self.resolve(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.pressed = cell.is_some();
                self.last = cell;
                cell.map(InputEvent::start)
            }
            MouseEventKind::Drag(MouseButton::Left) if self.pressed => {
                let at = cell.filter(|at| self.last != Some(*at))?;
                self.last = Some(at);
                Some(InputEvent::moved(at))
            }
            MouseEventKind::Up(MouseButton::Left) if self.pressed => {
                self.pressed = false;
                cell.or(self.last).map(InputEvent::end)
            }
            _ => None,
        }
    }
}

/// Handles input events and updates the application state accordingly.
///
/// This function polls for terminal events and dispatches them to the appropriate handler. It uses
/// a timeout to avoid blocking the UI.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(100))? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key.code),
            Event::Mouse(mouse) => handle_mouse(app, mouse),
            _ => {}
        }
    }

    Ok(())
}

/// Handles key presses.
///
/// The 'q' key quits, 'n' draws a new maze and 'r' drops the trace in progress.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char('n') => app.session.regenerate(&mut app.board),
        KeyCode::Char('r') => {
            let _ = app.session.abandon(&mut app.board);
        }
        _ => {}
    }
}

/// Handles mouse events by forwarding the resolved cell events to the session.
pub(crate) fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if let Some(input) = app.tracker.translate(mouse) {
        let _ = app.session.handle(input, &mut app.board);
    }
}
