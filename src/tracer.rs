//! Path tracing state machine.
//!
//! This module validates the path a player traces over a maze, one cell-enter event at a time.
//! Every event that does not describe a legal move is dropped without error, which keeps stray
//! pointer positions from ruining an otherwise good trace.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::maze::{Coord, Grid};

/// Phase of the tracing state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceState {
    /// No trace is in progress.
    #[default]
    Idle,
    /// A trace started on the start cell and is being extended.
    Tracing,
    /// The trace reached the end cell. Terminal until a new maze is generated.
    Won,
}

/// Kind of pointer interaction carried by an [`InputEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// The pointer was pressed on a cell.
    Start,
    /// The pointer entered a cell while pressed.
    Move,
    /// The pointer was released.
    End,
}

/// Discrete input event, already resolved to a maze cell by the input tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputEvent {
    /// Cell the event happened on.
    pub at: Coord,
    /// What the pointer did.
    pub kind: EventKind,
}

impl InputEvent {
    /// Builds a press event.
    #[must_use]
    pub const fn start(at: Coord) -> Self {
        Self {
            at,
            kind: EventKind::Start,
        }
    }

    /// Builds a cell-enter event.
    #[must_use]
    pub const fn moved(at: Coord) -> Self {
        Self {
            at,
            kind: EventKind::Move,
        }
    }

    /// Builds a release event.
    #[must_use]
    pub const fn end(at: Coord) -> Self {
        Self {
            at,
            kind: EventKind::End,
        }
    }
}

/// Result of applying one event to a [`Tracer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The event was rejected and nothing changed.
    Ignored,
    /// A fresh trace began on the start cell, wiping any previous marks.
    Began(Coord),
    /// The trace grew by one cell.
    Extended(Coord),
    /// The trace grew onto the end cell and the game is won.
    Won(Coord),
    /// The pointer was released before reaching the end cell.
    Abandoned,
}

/// Ordered list of the cells traced so far, starting at the start cell.
///
/// Consecutive entries are always orthogonal neighbours and no entry appears twice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TracedPath {
    /// Cells in the order they were entered.
    steps: Vec<Coord>,
    /// Same cells as `steps`, for constant time membership checks.
    visited: HashSet<Coord>,
}

impl TracedPath {
    /// Returns the traced cells in order.
    #[must_use]
    pub fn steps(&self) -> &[Coord] {
        &self.steps
    }

    /// Returns the most recently traced cell.
    #[must_use]
    pub fn last(&self) -> Option<Coord> {
        self.steps.last().copied()
    }

    /// Returns whether a cell has been traced.
    #[must_use]
    pub fn contains(&self, at: Coord) -> bool {
        self.visited.contains(&at)
    }

    /// Returns the number of traced cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns whether nothing has been traced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Appends a cell to the path.
    fn push(&mut self, at: Coord) {
        self.steps.push(at);
        let _ = self.visited.insert(at);
    }

    /// Forgets every traced cell.
    fn clear(&mut self) {
        self.steps.clear();
        self.visited.clear();
    }
}

/// Path validation state machine for one maze.
///
/// The tracer only references cells by coordinate; the grid is borrowed on every call so the
/// owner can keep both in lockstep.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tracer {
    /// Current phase.
    state: TraceState,
    /// Cells traced so far. Kept after an abandoned trace until the next press on the start cell.
    path: TracedPath,
}

impl Tracer {
    /// Builds an idle tracer with an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn state(&self) -> TraceState {
        self.state
    }

    /// Returns the traced path.
    #[must_use]
    pub const fn path(&self) -> &TracedPath {
        &self.path
    }

    /// Applies an input event against a grid and reports what changed.
    ///
    /// Illegal events are silently ignored and leave the tracer untouched.
    pub fn apply(&mut self, grid: &Grid, event: InputEvent) -> Outcome {
        let outcome = match (self.state, event.kind) {
            (TraceState::Won, _) => Outcome::Ignored,
            (TraceState::Idle | TraceState::Tracing, EventKind::Start) => self.begin(grid, event.at),
            (TraceState::Tracing, EventKind::Move) => self.extend(grid, event.at),
            (TraceState::Tracing, EventKind::End) => self.abandon(),
            (TraceState::Idle, EventKind::Move | EventKind::End) => Outcome::Ignored,
        };

        if outcome == Outcome::Ignored {
            trace!(?event, state = ?self.state, "ignored trace event");
        } else {
            debug!(?event, ?outcome, state = ?self.state, "trace transition");
        }

        outcome
    }

    /// Stops the current trace as if the pointer had been released. The traced cells stay marked
    /// until the next press on the start cell.
    pub fn abandon(&mut self) -> Outcome {
        if self.state == TraceState::Tracing {
            self.state = TraceState::Idle;
            Outcome::Abandoned
        } else {
            Outcome::Ignored
        }
    }

    /// Starts a fresh trace when the press lands on the start cell.
    fn begin(&mut self, grid: &Grid, at: Coord) -> Outcome {
        if at != grid.start() {
            return Outcome::Ignored;
        }

        self.path.clear();
        self.path.push(at);
        self.state = TraceState::Tracing;
        Outcome::Began(at)
    }

    /// Extends the trace onto a cell if the move is legal.
    fn extend(&mut self, grid: &Grid, at: Coord) -> Outcome {
        let Some(last) = self.path.last() else {
            return Outcome::Ignored;
        };

        if !grid.is_open(at) || !last.is_adjacent(at) || self.path.contains(at) {
            return Outcome::Ignored;
        }

        self.path.push(at);
        if at == grid.end() {
            self.state = TraceState::Won;
            Outcome::Won(at)
        } else {
            Outcome::Extended(at)
        }
    }
}
