//! Error types for the dtwin CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for dtwin operations.
///
/// Each variant maps to a distinct exit code so scripts can tell an
/// unknown task type apart from a failed execution.
#[derive(Error, Debug)]
pub enum DtwinError {
    /// The requested task type matches no known template.
    ///
    /// Raised before any external call is made.
    #[error(
        "unsupported task type '{0}': task type must be 'introduce', 'pitch', 'cold_email', or 'search_acquisitions'"
    )]
    UnsupportedTaskType(String),

    /// User provided invalid arguments or the configuration is invalid.
    #[error("{0}")]
    UserError(String),

    /// The agent execution call failed (network, auth, malformed response).
    ///
    /// The underlying failure is opaque to the dispatcher and propagated
    /// unchanged.
    #[error("agent execution failed: {0:#}")]
    Execution(#[from] anyhow::Error),
}

impl DtwinError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            DtwinError::UnsupportedTaskType(_) => exit_codes::UNSUPPORTED_TASK,
            DtwinError::UserError(_) => exit_codes::USER_ERROR,
            DtwinError::Execution(_) => exit_codes::EXECUTION_FAILURE,
        }
    }
}

/// Result type alias for dtwin operations.
pub type Result<T> = std::result::Result<T, DtwinError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_task_type_has_correct_exit_code() {
        let err = DtwinError::UnsupportedTaskType("banana".to_string());
        assert_eq!(err.exit_code(), exit_codes::UNSUPPORTED_TASK);
    }

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = DtwinError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn execution_error_has_correct_exit_code() {
        let err = DtwinError::Execution(anyhow::anyhow!("connection refused"));
        assert_eq!(err.exit_code(), exit_codes::EXECUTION_FAILURE);
    }

    #[test]
    fn unsupported_task_type_lists_known_types() {
        let err = DtwinError::UnsupportedTaskType("banana".to_string());
        let message = err.to_string();
        assert!(message.contains("'banana'"));
        assert!(message.contains("'introduce'"));
        assert!(message.contains("'pitch'"));
        assert!(message.contains("'cold_email'"));
        assert!(message.contains("'search_acquisitions'"));
    }

    #[test]
    fn execution_error_keeps_underlying_message() {
        let err = DtwinError::Execution(anyhow::anyhow!("OpenAI error 401: invalid key"));
        let message = err.to_string();
        assert!(message.starts_with("agent execution failed:"));
        assert!(message.contains("OpenAI error 401"));
    }

    #[test]
    fn anyhow_errors_convert_to_execution() {
        fn fails() -> anyhow::Result<()> {
            Err(anyhow::anyhow!("boom"))
        }
        fn propagates() -> Result<()> {
            fails()?;
            Ok(())
        }
        let err = propagates().unwrap_err();
        assert!(matches!(err, DtwinError::Execution(_)));
    }
}
