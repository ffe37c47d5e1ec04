//! Dtwin: a personal digital twin CLI for networking, pitching, and
//! business development tasks.
//!
//! This is the main entry point for the `dtwin` CLI. It parses arguments,
//! dispatches to the appropriate command handler, and handles errors with
//! proper exit codes.

mod cli;
mod commands;
pub mod agent;
pub mod config;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod openai;
pub mod persona;
pub mod task;
pub mod util;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Load .env if present so OPENAI_API_KEY can live next to the project
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
