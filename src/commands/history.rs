//! Implementation of the `history` command.

use crate::cli::HistoryArgs;
use crate::error::Result;
use crate::events::{history_file_path, read_recent};

/// Execute the `dtwin history` command.
///
/// Prints the most recent run-history entries, oldest first.
pub fn cmd_history(args: HistoryArgs) -> Result<()> {
    let events = read_recent(args.tail)?;

    if events.is_empty() {
        println!("No run history at {}.", history_file_path().display());
        return Ok(());
    }

    for event in events {
        println!(
            "{}  {:<13}  {:<20}  {}",
            event.ts.format("%Y-%m-%d %H:%M:%S UTC"),
            event.action,
            event.task.as_deref().unwrap_or("-"),
            event.details
        );
    }

    Ok(())
}
