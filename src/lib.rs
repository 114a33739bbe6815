//! This crate contains a maze puzzle where the player traces a path with the mouse, from the start
//! cell of a randomly generated maze to its end cell.
//!
//! The engine is split into the [`maze`] grid model, the [`generator`] carving perfect mazes with a
//! randomized recursive backtracker, the [`tracer`] state machine validating traced paths and the
//! [`session`] tying one maze to its trace. The terminal front-end driving it is exposed through
//! [`App`].

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
pub mod config;
mod events;
pub mod generator;
pub mod logging;
pub mod maze;
pub mod session;
pub mod tracer;
mod ui;
mod view;

pub use app::App;
