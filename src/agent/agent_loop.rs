//! Core agent loop implementation.

use std::collections::HashMap;

use crate::llm::{ChatMessage, Role, ToolCall};
use crate::providers::ChatModel;
use crate::tools::ToolRegistry;

use super::error::AgentError;

/// A tool-using agent bound to one model, one tool set and one system instruction.
pub struct Agent {
    model: ChatModel,
    tools: ToolRegistry,
    system_prompt: String,
    max_iterations: usize,
}

impl Agent {
    pub fn new(
        model: ChatModel,
        tools: ToolRegistry,
        system_prompt: impl Into<String>,
        max_iterations: usize,
    ) -> Self {
        Self {
            model,
            tools,
            system_prompt: system_prompt.into(),
            max_iterations,
        }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Run the loop over `history` and return the full transcript.
    ///
    /// Each history entry becomes a user message after the system instruction.
    /// The loop ends when the model answers without requesting a tool.
    pub async fn invoke(&self, history: &[String]) -> Result<Vec<ChatMessage>, AgentError> {
        if history.is_empty() {
            return Err(AgentError::EmptyHistory);
        }

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(self.system_prompt.clone()));
        messages.extend(history.iter().map(|m| ChatMessage::user(m.clone())));

        let tool_schemas = self.tools.get_tool_schemas();
        let tools = if tool_schemas.is_empty() {
            None
        } else {
            Some(tool_schemas.as_slice())
        };

        let mut calls_made: HashMap<String, usize> = HashMap::new();

        for iteration in 0..self.max_iterations {
            tracing::debug!(
                "Agent iteration {} ({} {})",
                iteration + 1,
                self.model.provider,
                self.model.model_id
            );

            let response = self
                .model
                .client
                .chat_completion(&self.model.model_id, &messages, tools)
                .await
                .map_err(AgentError::Upstream)?;

            if response.finish_reason.as_deref() == Some("length") {
                tracing::warn!("Model output truncated at the token limit");
            }

            match response.tool_calls.filter(|calls| !calls.is_empty()) {
                Some(tool_calls) => {
                    messages.push(ChatMessage {
                        role: Role::Assistant,
                        content: response.content,
                        tool_calls: Some(tool_calls.clone()),
                        tool_call_id: None,
                    });

                    for tool_call in &tool_calls {
                        tracing::info!(
                            "Calling tool: {} with args: {}",
                            tool_call.function.name,
                            tool_call.function.arguments
                        );

                        let name = &tool_call.function.name;
                        let used = calls_made.entry(name.clone()).or_insert(0);
                        let exhausted = self.tools.max_calls(name).is_some_and(|max| *used >= max);
                        let result_str = if exhausted {
                            tracing::warn!("Tool {} call limit reached", name);
                            format!("Error: call limit reached for {}", name)
                        } else {
                            *used += 1;
                            match self.execute_tool_call(tool_call).await {
                                Ok(output) => output,
                                Err(e) => {
                                    tracing::warn!("Tool {} failed: {}", name, e);
                                    format!("Error: {}", e)
                                }
                            }
                        };

                        messages.push(ChatMessage::tool_result(tool_call.id.clone(), result_str));
                    }
                }
                None => {
                    messages.push(ChatMessage {
                        role: Role::Assistant,
                        content: response.content,
                        tool_calls: None,
                        tool_call_id: None,
                    });
                    return Ok(messages);
                }
            }
        }

        Err(AgentError::IterationLimit(self.max_iterations))
    }

    /// Execute a single tool call.
    async fn execute_tool_call(&self, tool_call: &ToolCall) -> anyhow::Result<String> {
        let args: serde_json::Value = serde_json::from_str(&tool_call.function.arguments)
            .unwrap_or(serde_json::Value::Null);

        self.tools.execute(&tool_call.function.name, args).await
    }
}

/// Content of the last assistant-authored message in `transcript`.
pub fn last_assistant_reply(transcript: &[ChatMessage]) -> Result<String, AgentError> {
    transcript
        .iter()
        .rev()
        .find(|m| m.role == Role::Assistant)
        .map(|m| m.content.clone().unwrap_or_default())
        .ok_or(AgentError::EmptyResponse)
}
