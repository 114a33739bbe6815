//! Core application state and logic for the maze tracing game.

use std::io;

use color_eyre::eyre::Result;
use ratatui::{
    crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
    },
    DefaultTerminal,
};

use crate::{
    config::Cli, events, events::InputTracker, generator::Generator, session::Session, ui,
    view::Board,
};

/// Application state container for the maze tracing game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current maze and trace.
    ///
    /// This field owns the game state proper. Every change to it is pushed to the
    /// [`board`](App::board) as it happens.
    pub(crate) session: Session,
    /// Render state mirrored from the session.
    pub(crate) board: Board,
    /// Mouse to maze cell translator.
    ///
    /// This field remembers where the maze was drawn during the last redraw, so mouse positions can
    /// be resolved to cells.
    pub(crate) tracker: InputTracker,
}

impl App {
    /// Creates a new instance of the App structure from the command line configuration.
    #[must_use]
    pub fn new(cli: &Cli) -> Self {
        Self::with_seed(cli.rows, cli.cols, cli.seed)
    }

    /// Creates a new instance of the App structure with a maze of the requested size.
    ///
    /// Passing a seed makes the whole sequence of mazes of the session reproducible.
    #[must_use]
    pub fn with_seed(rows: usize, cols: usize, seed: Option<u64>) -> Self {
        let session = Session::new(Generator::seeded(seed), rows, cols);
        let mut board = Board::new();
        session.present(&mut board);

        Self {
            exit: false,
            session,
            board,
            tracker: InputTracker::default(),
        }
    }

    /// Runs the main loop of the application.
    ///
    /// This function captures the mouse, then handles user input and updates the application state.
    /// The loop continues until the exit condition is `true`, after which mouse capture is released
    /// and the function returns to the call site.
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

    /// Draws and handles events until the user quits.
    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame).map_err(|err| io::Error::new(io::ErrorKind::Other, err))
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }
}
