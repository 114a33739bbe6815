//! Terminal-side mirror of the session.
//!
//! The [`Board`] receives the notifications of a [`Session`](crate::session::Session) and keeps
//! just enough to redraw the screen: the maze, the visited cells and the status line.

use std::collections::HashSet;

use crate::{
    maze::{Coord, Grid},
    session::{Renderer, Status, StatusReporter},
    tracer::TraceState,
};

/// Render state for the in-game screen.
#[derive(Debug)]
pub(crate) struct Board {
    /// Maze being displayed, if one was drawn yet.
    pub(crate) grid: Option<Grid>,
    /// Cells marked as visited by the current trace.
    pub(crate) visited: HashSet<Coord>,
    /// Phase of the trace, as of the last mark.
    pub(crate) phase: TraceState,
    /// Status line contents.
    pub(crate) status: Status,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board waiting for its first maze.
    pub(crate) fn new() -> Self {
        Self {
            grid: None,
            visited: HashSet::new(),
            phase: TraceState::Idle,
            status: Status::TraceFromStart,
        }
    }

    /// Returns whether the winning celebration should be shown.
    ///
    /// The celebration follows the trace phase sent along with the visited marks, so it starts as
    /// soon as the end cell is marked.
    pub(crate) fn celebrating(&self) -> bool {
        self.phase == TraceState::Won
    }
}

impl Renderer for Board {
    fn draw_maze(&mut self, grid: &Grid) {
        self.grid = Some(grid.clone());
        self.visited.clear();
        self.phase = TraceState::Idle;
    }

    fn clear_trace(&mut self) {
        self.visited.clear();
        self.phase = TraceState::Idle;
    }

    fn mark_visited(&mut self, at: Coord, state: TraceState) {
        let _ = self.visited.insert(at);
        self.phase = state;
    }
}

impl StatusReporter for Board {
    fn report(&mut self, status: Status) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parses a tiny fixture board.
    fn grid() -> Grid {
        "2222\n2132\n2342\n2222".parse().expect("fixture should parse")
    }

    #[test]
    fn test_board_starts_empty() {
        let board = Board::new();

        assert!(board.grid.is_none(), "no maze yet");
        assert!(board.visited.is_empty(), "nothing visited");
        assert!(!board.celebrating(), "no celebration");
    }

    #[test]
    fn test_marks_and_clears() {
        let mut board = Board::new();
        board.draw_maze(&grid());
        board.mark_visited(Coord::new(1, 1), TraceState::Tracing);
        board.mark_visited(Coord::new(1, 2), TraceState::Tracing);

        assert_eq!(board.visited.len(), 2, "two marks");
        assert_eq!(board.phase, TraceState::Tracing, "phase follows marks");

        board.clear_trace();
        assert!(board.visited.is_empty(), "marks wiped");
        assert_eq!(board.phase, TraceState::Idle, "phase reset with the marks");
        assert!(board.grid.is_some(), "maze kept");
    }

    #[test]
    fn test_new_maze_wipes_marks() {
        let mut board = Board::new();
        board.draw_maze(&grid());
        board.mark_visited(Coord::new(1, 1), TraceState::Won);
        board.report(Status::Success);
        assert!(board.celebrating(), "celebrating the win");

        board.draw_maze(&grid());
        board.report(Status::TraceFromStart);

        assert!(board.visited.is_empty(), "marks wiped by new maze");
        assert_eq!(board.phase, TraceState::Idle, "phase reset");
        assert!(!board.celebrating(), "celebration over");
    }

    #[test]
    fn test_celebration_follows_phase() {
        let mut board = Board::new();
        board.draw_maze(&grid());
        board.report(Status::Success);
        assert!(!board.celebrating(), "status alone does not celebrate");

        board.mark_visited(Coord::new(1, 1), TraceState::Tracing);
        assert!(!board.celebrating(), "still tracing");

        board.mark_visited(Coord::new(2, 2), TraceState::Won);
        assert!(board.celebrating(), "end cell reached");
    }
}
