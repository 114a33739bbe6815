//! Game session module.
//!
//! A [`Session`] owns everything one player interacts with: the generator, the current maze and
//! the tracer validating the path drawn over it. It forwards every accepted change to the
//! [`Renderer`] and [`StatusReporter`] collaborators, which never hold game state of their own.

use rand::{rngs::StdRng, Rng};
use tracing::info;

use crate::{
    generator::Generator,
    maze::{Coord, Grid},
    tracer::{InputEvent, Outcome, TraceState, Tracer},
};

/// Status message shown to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// A maze is ready and no trace has been started.
    TraceFromStart,
    /// A trace is in progress.
    KeepGoing,
    /// The last trace was released before reaching the end.
    Retry,
    /// The end was reached.
    Success,
}

impl Status {
    /// Returns the text displayed for the status.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::TraceFromStart => "Trace a path from the start to the end!",
            Self::KeepGoing => "Keep going...",
            Self::Retry => "Oops, try again from the start!",
            Self::Success => "You reached the end!",
        }
    }
}

/// Collaborator drawing the maze and the trace.
pub trait Renderer {
    /// Draws a whole new maze, discarding anything drawn before.
    fn draw_maze(&mut self, grid: &Grid);

    /// Removes every visited mark while keeping the maze.
    fn clear_trace(&mut self);

    /// Marks a cell as visited, along with the phase the trace is now in.
    fn mark_visited(&mut self, at: Coord, state: TraceState);
}

/// Collaborator displaying status messages.
pub trait StatusReporter {
    /// Displays a new status.
    fn report(&mut self, status: Status);
}

/// One maze instance along with its trace.
#[derive(Debug)]
pub struct Session<R = StdRng> {
    /// Source of new mazes.
    generator: Generator<R>,
    /// Requested number of rows, before clamping and odd coercion.
    height: usize,
    /// Requested number of columns, before clamping and odd coercion.
    width: usize,
    /// Current maze.
    grid: Grid,
    /// Trace validated against [`grid`](Session::grid).
    tracer: Tracer,
}

impl<R: Rng> Session<R> {
    /// Starts a session by generating a first maze of the requested size.
    pub fn new(mut generator: Generator<R>, height: usize, width: usize) -> Self {
        let grid = generator.generate(height, width);

        Self {
            generator,
            height,
            width,
            grid,
            tracer: Tracer::new(),
        }
    }

    /// Returns the current maze.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the tracer of the current maze.
    pub const fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    /// Returns the current phase of the trace.
    pub const fn state(&self) -> TraceState {
        self.tracer.state()
    }

    /// Returns the status matching the current phase and trace.
    pub fn status(&self) -> Status {
        match self.tracer.state() {
            TraceState::Won => Status::Success,
            TraceState::Tracing => Status::KeepGoing,
            TraceState::Idle if self.tracer.path().is_empty() => Status::TraceFromStart,
            TraceState::Idle => Status::Retry,
        }
    }

    /// Pushes the whole session to freshly attached collaborators.
    pub fn present<V: Renderer + StatusReporter>(&self, view: &mut V) {
        view.draw_maze(&self.grid);
        for &at in self.tracer.path().steps() {
            view.mark_visited(at, self.tracer.state());
        }
        view.report(self.status());
    }

    /// Applies an input event and notifies the collaborators of any accepted change.
    pub fn handle<V: Renderer + StatusReporter>(
        &mut self,
        event: InputEvent,
        view: &mut V,
    ) -> Outcome {
        let outcome = self.tracer.apply(&self.grid, event);
        self.notify(outcome, view);
        outcome
    }

    /// Abandons the current trace as if the pointer had been released.
    pub fn abandon<V: Renderer + StatusReporter>(&mut self, view: &mut V) -> Outcome {
        let outcome = self.tracer.abandon();
        self.notify(outcome, view);
        outcome
    }

    /// Discards the maze and its trace and generates a new maze of the same requested size.
    ///
    /// This is allowed in every phase. The new maze and a blank tracer replace the old ones
    /// together, so no trace can outlive the maze it was drawn on.
    pub fn regenerate<V: Renderer + StatusReporter>(&mut self, view: &mut V) {
        let grid = self.generator.generate(self.height, self.width);
        let previous = self.tracer.state();
        (self.grid, self.tracer) = (grid, Tracer::new());
        info!(?previous, "regenerated maze");

        view.draw_maze(&self.grid);
        view.report(Status::TraceFromStart);
    }

    /// Forwards an outcome to the collaborators.
    fn notify<V: Renderer + StatusReporter>(&self, outcome: Outcome, view: &mut V) {
        let state = self.tracer.state();
        match outcome {
            Outcome::Ignored => {}
            Outcome::Began(at) => {
                view.clear_trace();
                view.mark_visited(at, state);
                view.report(Status::KeepGoing);
            }
            Outcome::Extended(at) => view.mark_visited(at, state),
            Outcome::Won(at) => {
                view.mark_visited(at, state);
                view.report(Status::Success);
            }
            Outcome::Abandoned => view.report(Status::Retry),
        }
    }
}
