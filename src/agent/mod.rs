//! Agent subsystem: prompt templating, task execution, and the model loop.
//!
//! - [`render_template`] renders `{variable|fallback}` placeholders
//! - [`run_task`] parses a tag, builds the task, and hands off to a
//!   [`TaskExecutor`]
//! - [`AgentRuntime`] is the production executor: a chat loop over a
//!   [`ChatBackend`] with the local [`ToolKit`] in reach
//!
//! Execution is sequential: one task, one transcript, one final answer.

mod executor;
mod runtime;
mod template;
mod tools;

// Re-export public API
pub use executor::{TaskExecutor, run_task};
pub use runtime::{AgentRuntime, ChatBackend};
pub use template::{TemplateError, render_template};
pub use tools::ToolKit;
