//! Terminal front desk for the clinic patient queue.
//!
//! Reads receptionist commands line by line, validates registrations with
//! the core's intake rules, and re-renders the board after every change.

pub mod args;
pub mod command;
pub mod render;
pub mod shell;

pub use args::Args;
pub use command::{parse_line, Command, CommandError};
pub use render::{OutputFormat, Response};
pub use shell::{Flow, Shell};

use thiserror::Error;

/// Shell errors. Queue operations never fail; only I/O and encoding can.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ShellResult<T> = Result<T, ShellError>;
