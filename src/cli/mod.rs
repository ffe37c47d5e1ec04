//! CLI argument parsing for dtwin.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};

/// Dtwin: your digital twin for networking, pitching, and outreach.
///
/// Runs persona-driven tasks against an LLM:
/// - `introduce` writes a personal introduction
/// - `pitch` prepares VC pitch content
/// - `cold_email` drafts investor outreach
/// - `search_acquisitions` reports recent market activity
#[derive(Parser, Debug)]
#[command(name = "dtwin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for dtwin.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a task.
    ///
    /// Builds the task from its template and parameters, then executes
    /// it with the configured model under the configured persona.
    Run(RunArgs),

    /// List the available task types.
    ///
    /// Shows each task type with its parameters, defaults, and an
    /// example invocation.
    Tasks,

    /// Print the active persona.
    ///
    /// Shows the exact system prompt the agent runs under, after
    /// configuration is applied.
    Persona,

    /// Show recent run history.
    ///
    /// Reads the history log and prints the most recent entries.
    History(HistoryArgs),
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Task type to run: introduce, pitch, cold_email, or
    /// search_acquisitions. Matching is case-insensitive.
    pub task_type: String,

    /// Business idea or company to pitch (pitch only).
    #[arg(long)]
    pub idea_or_company: Option<String>,

    /// Recipient of the cold email (cold_email only).
    #[arg(long)]
    pub investor_name: Option<String>,

    /// Context or reason for reaching out (cold_email only).
    #[arg(long)]
    pub context: Option<String>,

    /// Areas to search for acquisitions (search_acquisitions only).
    #[arg(long)]
    pub areas_of_interest: Option<String>,

    /// Build and print the task without executing it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `history` command.
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// Number of most recent entries to show.
    #[arg(long, default_value_t = 10)]
    pub tail: usize,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
