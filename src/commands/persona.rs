//! Implementation of the `persona` command.

use crate::config::DtwinConfig;
use crate::error::Result;

/// Execute the `dtwin persona` command.
///
/// Prints the exact system prompt the agent runs under, after
/// configuration is applied. Useful for checking a profile edit.
pub fn cmd_persona() -> Result<()> {
    let config = DtwinConfig::load()?;
    println!("{}", config.profile.system_prompt());
    Ok(())
}
