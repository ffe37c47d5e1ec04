//! Configuration model for dtwin.
//!
//! This module defines the `DtwinConfig` struct that represents `dtwin.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are preserved),
//! sensible defaults for every field, environment overrides, and validation
//! of config values.
//!
//! # File Format
//!
//! ```yaml
//! profile:
//!   role: "Your Digital Twin - Personal AI Assistant"
//!   goal: "Represent the user authentically ..."
//!   backstory: |
//!     You are the digital twin of ...
//!
//! llm:
//!   model: gpt-4
//!   temperature: 0.7
//!   api_key_env: OPENAI_API_KEY
//!   timeout_seconds: 120
//!
//! limits:
//!   max_tool_loops: 6
//!
//! prompts:
//!   pitch: |
//!     Create a one-page pitch for: {idea_or_company|my business idea}
//! ```
//!
//! # Resolution
//!
//! The file is looked up via `DTWIN_CONFIG`, then `./dtwin.yaml`, then the
//! user config directory. `DTWIN_MODEL`/`OPENAI_MODEL` and
//! `OPENAI_BASE_URL` override the file; the API key itself is only ever
//! read from the environment.

mod model;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::{DtwinConfig, Limits, LlmSettings, ToolSettings};
