//! Task execution boundary.
//!
//! [`run_task`] is the single entry point for running a task end to end:
//! parse the tag, build the task text, derive the persona, hand off to an
//! executor. The [`TaskExecutor`] trait is the seam between task assembly
//! and the network: production uses [`super::AgentRuntime`], tests use a
//! recording stand-in.

use crate::config::DtwinConfig;
use crate::error::{DtwinError, Result};
use crate::task::{self, TaskParams, TaskRequest, TaskSpec};
use chrono::Local;

/// A single capability: turn a persona and a task into answer text.
pub trait TaskExecutor {
    fn execute(&self, persona: &str, task: &TaskSpec) -> anyhow::Result<String>;
}

/// Run one task against the given executor.
///
/// The tag is parsed before anything else, so an unsupported task type
/// fails without the executor ever being invoked. Each call performs
/// exactly one execution.
pub fn run_task<E: TaskExecutor>(
    config: &DtwinConfig,
    executor: &E,
    task_type: &str,
    params: &TaskParams,
) -> Result<String> {
    let request = TaskRequest::from_args(task_type, params)?;
    let spec = task::build(&request, &config.prompts, Local::now().date_naive())?;
    let persona = config.profile.system_prompt();
    executor
        .execute(&persona, &spec)
        .map_err(DtwinError::Execution)
}
