//! Run-history logging for dtwin.
//!
//! Every task run appends events to an NDJSON file (one JSON object per
//! line) so past runs can be reviewed with `dtwin history`. Logging is
//! best-effort: a failed append warns but never blocks the run itself.
//!
//! # Event Format
//!
//! Each event is a JSON object with the following fields:
//! - `ts`: RFC3339 timestamp
//! - `action`: The action performed (task_dispatch, task_complete)
//! - `actor`: The owner string (e.g., `user@HOST`)
//! - `task`: Optional task type for task-specific events
//! - `details`: Freeform object with action-specific details
//!
//! # File Location
//!
//! The history file is resolved in order:
//! 1. `DTWIN_HISTORY` environment variable
//! 2. the platform data directory (e.g., `~/.local/share/dtwin/history.ndjson`)
//! 3. `./.dtwin-history.ndjson` as a last resort

use crate::error::{DtwinError, Result};
use crate::util::env_first;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// Actions that can be logged as run-history events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunAction {
    /// Task handed to the agent runtime
    TaskDispatch,
    /// Agent execution finished, successfully or not
    TaskComplete,
}

impl std::fmt::Display for RunAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunAction::TaskDispatch => write!(f, "task_dispatch"),
            RunAction::TaskComplete => write!(f, "task_complete"),
        }
    }
}

/// A run-history record.
///
/// Events are serialized as single-line JSON objects and appended to
/// the history file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: RunAction,

    /// The actor who performed the action (e.g., `user@HOST`).
    pub actor: String,

    /// Optional task type for task-specific events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event with the given action.
    ///
    /// The timestamp is set to the current time, and the actor is
    /// determined from the environment (USER@HOSTNAME).
    pub fn new(action: RunAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            task: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the task type for this event.
    pub fn with_task(mut self, task_type: impl Into<String>) -> Self {
        self.task = Some(task_type.into());
        self
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| DtwinError::UserError(format!("failed to serialize event to JSON: {}", e)))
    }
}

/// Get the actor string for event metadata.
fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Get the path to the history file.
pub fn history_file_path() -> PathBuf {
    if let Some(path) = env_first(&["DTWIN_HISTORY"]) {
        return PathBuf::from(path);
    }
    if let Some(dirs) = ProjectDirs::from("", "", "dtwin") {
        return dirs.data_dir().join("history.ndjson");
    }
    PathBuf::from(".dtwin-history.ndjson")
}

/// Append an event to the history log.
///
/// The event is appended as a single JSON line; the file and its parent
/// directory are created if they don't exist. Each append results in one
/// line with a trailing newline, synced to disk.
pub fn append_event(event: &Event) -> Result<()> {
    let history_file = history_file_path();

    let json_line = event.to_ndjson_line()?;

    if let Some(parent) = history_file.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            DtwinError::UserError(format!(
                "failed to create history directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&history_file)
        .map_err(|e| {
            DtwinError::UserError(format!(
                "failed to open history file '{}': {}",
                history_file.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        DtwinError::UserError(format!(
            "failed to write event to '{}': {}",
            history_file.display(),
            e
        ))
    })?;

    // Sync to disk for durability
    file.sync_all().map_err(|e| {
        DtwinError::UserError(format!(
            "failed to sync history file '{}': {}",
            history_file.display(),
            e
        ))
    })?;

    Ok(())
}

/// Read the most recent `limit` events from the history log.
///
/// A missing file yields an empty list. Lines that fail to parse are
/// skipped so one corrupt entry does not hide the rest of the history.
pub fn read_recent(limit: usize) -> Result<Vec<Event>> {
    let history_file = history_file_path();

    let content = match fs::read_to_string(&history_file) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(DtwinError::UserError(format!(
                "failed to read history file '{}': {}",
                history_file.display(),
                e
            )));
        }
    };

    let mut events: Vec<Event> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect();

    if events.len() > limit {
        events.drain(..events.len() - limit);
    }
    Ok(events)
}
