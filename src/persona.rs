//! Persona definition for the digital twin.
//!
//! The persona is the fixed identity the twin writes as: a role, a goal,
//! and a backstory. It is loaded once from config (or defaults), composed
//! into a single system prompt, and supplied unchanged to every task.

use serde::{Deserialize, Serialize};

/// The identity that conditions every task execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Persona {
    /// Who the twin is, in one line.
    pub role: String,

    /// What the twin is trying to accomplish for the user.
    pub goal: String,

    /// Background the twin draws on when writing as the user.
    pub backstory: String,
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            role: "Your Digital Twin - Personal AI Assistant".to_string(),
            goal: "Represent the user authentically and help with networking, \
                   pitching, and business development tasks"
                .to_string(),
            backstory: "You are the digital twin of a technology professional who \
                        builds software products and works with early-stage startups. \
                        You write in the user's voice: direct, warm, and concrete. \
                        You draw on their professional background, current projects, \
                        and goals when introducing them, pitching their ideas, or \
                        reaching out on their behalf."
                .to_string(),
        }
    }
}

impl Persona {
    /// Compose the persona into the system prompt used for every task.
    ///
    /// The composition is deterministic, so the prompt text is identical
    /// across task types for a given persona.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}.\n\n{}\n\nYour goal: {}",
            self.role.trim(),
            self.backstory.trim(),
            self.goal.trim()
        )
    }
}
