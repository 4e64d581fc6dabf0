//! Test doubles shared by unit tests across the crate.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::agent::AgentError;
use crate::llm::{
    ChatMessage, ChatResponse, FunctionCall, LlmClient, Role, ToolCall, ToolSchema,
};
use crate::providers::{ChatModel, ModelFactory, Provider};
use crate::tools::Tool;

/// What the fake model saw on one call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub system_prompt: Option<String>,
    pub message_count: usize,
    pub had_tools: bool,
    pub tool_count: usize,
}

/// An `LlmClient` that replays canned responses in order and errors once exhausted.
pub struct ScriptedLlm {
    responses: Mutex<VecDeque<ChatResponse>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedLlm {
    pub fn new(responses: Vec<ChatResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A model that answers once with `text`.
    pub fn replying(text: &str) -> Self {
        Self::new(vec![ChatResponse {
            content: Some(text.to_string()),
            ..Default::default()
        }])
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[ToolSchema]>,
    ) -> anyhow::Result<ChatResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: model.to_string(),
            system_prompt: messages
                .first()
                .filter(|m| m.role == Role::System)
                .and_then(|m| m.content.clone()),
            message_count: messages.len(),
            had_tools: tools.is_some(),
            tool_count: tools.map(|t| t.len()).unwrap_or(0),
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("provider unavailable"))
    }
}

/// A `ModelFactory` that always hands out the same fake client and records requests.
pub struct FakeModelFactory {
    llm: Arc<ScriptedLlm>,
    requests: Mutex<Vec<(Provider, String)>>,
}

impl FakeModelFactory {
    pub fn new(llm: Arc<ScriptedLlm>) -> Self {
        Self {
            llm,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(Provider, String)> {
        self.requests.lock().unwrap().clone()
    }
}

impl ModelFactory for FakeModelFactory {
    fn construct_model(&self, provider: Provider, model_id: &str) -> Result<ChatModel, AgentError> {
        self.requests
            .lock()
            .unwrap()
            .push((provider, model_id.to_string()));
        Ok(ChatModel::new(provider, model_id, self.llm.clone()))
    }
}

/// A tool with a fixed outcome that counts how often it ran.
pub struct FakeTool {
    name: String,
    outcome: Result<String, String>,
    max_calls: Option<usize>,
    executions: AtomicUsize,
}

impl FakeTool {
    pub fn new(name: &str, outcome: Result<String, String>) -> Self {
        Self {
            name: name.to_string(),
            outcome,
            max_calls: None,
            executions: AtomicUsize::new(0),
        }
    }

    pub fn with_max_calls(mut self, max_calls: usize) -> Self {
        self.max_calls = Some(max_calls);
        self
    }

    pub fn executions(&self) -> usize {
        self.executions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Tool for FakeTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Fake tool for tests"
    }

    fn parameters_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    fn max_calls(&self) -> Option<usize> {
        self.max_calls
    }

    async fn execute(&self, _args: Value) -> anyhow::Result<String> {
        self.executions.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone().map_err(|e| anyhow::anyhow!(e))
    }
}

pub fn tool_call(id: &str, name: &str, arguments: &str) -> ToolCall {
    ToolCall {
        id: id.to_string(),
        kind: "function".to_string(),
        function: FunctionCall {
            name: name.to_string(),
            arguments: arguments.to_string(),
        },
    }
}
