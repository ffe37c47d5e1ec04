//! Exit code constants for the dtwin CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, config problems)
//! - 2: Unsupported task type
//! - 3: Agent execution failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable config, or invalid state.
pub const USER_ERROR: i32 = 1;

/// Unsupported task type: the requested tag matches no known template.
pub const UNSUPPORTED_TASK: i32 = 2;

/// Execution failure: the agent run itself failed (network, auth, API).
pub const EXECUTION_FAILURE: i32 = 3;
