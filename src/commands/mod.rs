//! Command implementations for dtwin.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Each command lives in its own module.

mod history;
mod persona;
mod run;
mod tasks;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Run(args) => run::cmd_run(args),
        Command::Tasks => tasks::cmd_tasks(),
        Command::Persona => persona::cmd_persona(),
        Command::History(args) => history::cmd_history(args),
    }
}
