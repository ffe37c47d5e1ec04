//! Implementation of the `tasks` command.

use crate::error::Result;
use crate::task::TaskKind;

/// Execute the `dtwin tasks` command.
///
/// Lists each task type with its parameters, defaults, and an example
/// invocation.
pub fn cmd_tasks() -> Result<()> {
    println!("Available task types:");
    println!();

    for kind in TaskKind::ALL {
        println!("  {}", kind.as_str());
        println!("    {}", kind.summary());

        let parameters = kind.parameters();
        if parameters.is_empty() {
            println!("    Parameters: none");
        } else {
            println!("    Parameters:");
            for (name, default) in parameters {
                println!(
                    "      --{} (default: \"{}\")",
                    name.replace('_', "-"),
                    default
                );
            }
        }

        println!("    Example: {}", kind.example());
        println!();
    }

    Ok(())
}
