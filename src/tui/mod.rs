//! Interactive terminal front end.
//!
//! Organized along the same boundaries as the core:
//! - `state`: app model, actions, transitions
//! - `update`: action dispatch onto the navigator (no I/O)
//! - `view`: drawing onto a ratatui frame
//! - `run`: the event loop and everything that touches the terminal

pub mod run;
pub mod state;
pub mod update;
pub mod view;
