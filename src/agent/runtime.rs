//! Conversation loop between the model and the local toolset.
//!
//! One task produces one transcript: a system message carrying the persona,
//! a user message carrying the task, then as many tool rounds as the model
//! asks for, up to the configured cap. Past the cap a final request is sent
//! with tools withheld, which forces a text answer.

use crate::config::DtwinConfig;
use crate::openai::{ChatMessage, ChatRequest, ChatResponse, OpenAiClient, ToolCall};
use crate::task::TaskSpec;
use anyhow::{Result, anyhow};
use serde_json::{Value, json};

use super::executor::TaskExecutor;
use super::tools::ToolKit;

/// Anything that can answer a chat request. Lets tests script the model.
pub trait ChatBackend {
    fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;
}

impl ChatBackend for OpenAiClient {
    fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        OpenAiClient::chat(self, request)
    }
}

/// Drives a single task to completion against a chat backend.
pub struct AgentRuntime<C: ChatBackend> {
    backend: C,
    toolkit: ToolKit,
    model: String,
    temperature: f64,
    max_tool_loops: usize,
}

impl<C: ChatBackend> AgentRuntime<C> {
    pub fn new(backend: C, toolkit: ToolKit, config: &DtwinConfig) -> Self {
        Self {
            backend,
            toolkit,
            model: config.llm.model.clone(),
            temperature: config.llm.temperature,
            max_tool_loops: config.limits.max_tool_loops,
        }
    }

    /// Run one task. Returns the model's final text answer.
    pub fn run(&self, persona: &str, task: &TaskSpec) -> Result<String> {
        let mut messages = vec![
            ChatMessage::system(persona),
            ChatMessage::user(format_task_message(task)),
        ];

        for _ in 0..self.max_tool_loops {
            let request = ChatRequest {
                model: self.model.clone(),
                temperature: self.temperature,
                messages: messages.clone(),
                tools: Some(self.toolkit.definitions()),
            };
            let response = self.backend.chat(&request)?;
            let message = response.message()?.clone();

            if message.tool_calls.is_empty() {
                return extract_text(&message);
            }

            let calls = message.tool_calls.clone();
            messages.push(message);
            for call in &calls {
                let output = self.run_tool(call);
                messages.push(ChatMessage::tool(&call.id, output));
            }
        }

        // Tool budget exhausted. Withholding tools forces a text answer.
        let request = ChatRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            messages,
            tools: None,
        };
        let response = self.backend.chat(&request)?;
        extract_text(response.message()?)
    }

    /// Invoke one tool call. Failures go back to the model as tool output
    /// so it can adjust, rather than aborting the run.
    fn run_tool(&self, call: &ToolCall) -> String {
        let arguments: Value =
            serde_json::from_str(&call.function.arguments).unwrap_or_else(|_| json!({}));
        match self.toolkit.invoke(&call.function.name, &arguments) {
            Ok(output) => output,
            Err(err) => format!("Tool error: {err:#}"),
        }
    }
}

impl<C: ChatBackend> TaskExecutor for AgentRuntime<C> {
    fn execute(&self, persona: &str, task: &TaskSpec) -> Result<String> {
        self.run(persona, task)
    }
}

fn format_task_message(task: &TaskSpec) -> String {
    format!(
        "{}\n\nExpected output: {}",
        task.description.trim(),
        task.expected_output.trim()
    )
}

fn extract_text(message: &ChatMessage) -> Result<String> {
    let text = message.content.as_deref().unwrap_or("").trim();
    if text.is_empty() {
        return Err(anyhow!("model returned an empty answer"));
    }
    Ok(text.to_string())
}
