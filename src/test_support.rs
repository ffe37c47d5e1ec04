use crate::agent::TaskExecutor;
use crate::task::TaskSpec;
use std::cell::RefCell;
use std::sync::{LazyLock, Mutex, MutexGuard};

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Scoped environment override for tests.
///
/// Sets (or unsets) the given variables and restores the originals on drop.
pub(crate) struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    pub(crate) fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        // The process environment is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = ENV_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());

        let mut saved = Vec::with_capacity(changes.len());
        for (key, value) in changes {
            saved.push(((*key).to_string(), std::env::var(key).ok()));
            unsafe {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }

        Self {
            saved,
            _lock: lock,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, original) in self.saved.iter().rev() {
            unsafe {
                match original {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}

/// One recorded call to a [`RecordingExecutor`].
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub(crate) persona: String,
    pub(crate) task: TaskSpec,
}

enum Outcome {
    Reply(String),
    Fail(String),
}

/// Deterministic stand-in for the agent runtime.
///
/// Records every call it receives and returns a fixed reply or error.
pub(crate) struct RecordingExecutor {
    calls: RefCell<Vec<RecordedCall>>,
    outcome: Outcome,
}

impl RecordingExecutor {
    pub(crate) fn replying(reply: &str) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            outcome: Outcome::Reply(reply.to_string()),
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            outcome: Outcome::Fail(message.to_string()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }
}

impl TaskExecutor for RecordingExecutor {
    fn execute(&self, persona: &str, task: &TaskSpec) -> anyhow::Result<String> {
        self.calls.borrow_mut().push(RecordedCall {
            persona: persona.to_string(),
            task: task.clone(),
        });
        match &self.outcome {
            Outcome::Reply(reply) => Ok(reply.clone()),
            Outcome::Fail(message) => Err(anyhow::anyhow!("{}", message)),
        }
    }
}
