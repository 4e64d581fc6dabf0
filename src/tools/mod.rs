//! Tool module - capabilities the agent may invoke during its loop.
//!
//! A request gets its own [`ToolRegistry`]. With search disabled the registry
//! is empty and the model is called without any tool schemas.

mod web;

pub use web::{SearchBackend, WebSearch};

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::SearchConfig;
use crate::llm::{FunctionSchema, ToolSchema};

/// A capability the agent can call by name.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON schema of the arguments object.
    fn parameters_schema(&self) -> Value;

    /// How many times one agent run may call this tool. `None` is unlimited.
    fn max_calls(&self) -> Option<usize> {
        None
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String>;
}

/// Name and description of a registered tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

/// The set of tools bound to one agent.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tools for a single request: web search when `allow_search` is set, nothing otherwise.
    pub fn for_request(allow_search: bool, search: &SearchConfig) -> Self {
        let mut registry = Self::new();
        if allow_search {
            registry.register(Arc::new(WebSearch::from_config(search)));
        }
        registry
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.push(tool);
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|t| ToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
            })
            .collect()
    }

    /// Function schemas in the chat-completions `tools` format.
    pub fn get_tool_schemas(&self) -> Vec<ToolSchema> {
        self.tools
            .iter()
            .map(|t| ToolSchema {
                kind: "function".to_string(),
                function: FunctionSchema {
                    name: t.name().to_string(),
                    description: t.description().to_string(),
                    parameters: t.parameters_schema(),
                },
            })
            .collect()
    }

    /// Per-run call budget of the named tool, if it has one.
    pub fn max_calls(&self, name: &str) -> Option<usize> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .and_then(|t| t.max_calls())
    }

    /// Run the named tool.
    pub async fn execute(&self, name: &str, args: Value) -> anyhow::Result<String> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: {}", name))?;

        tool.execute(args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the input back"
        }

        fn parameters_schema(&self) -> Value {
            json!({"type": "object", "properties": {"text": {"type": "string"}}})
        }

        async fn execute(&self, args: Value) -> anyhow::Result<String> {
            Ok(args["text"].as_str().unwrap_or_default().to_string())
        }
    }

    #[test]
    fn test_search_flag_controls_capability_set() {
        let search = SearchConfig::default();

        let with_search = ToolRegistry::for_request(true, &search);
        assert_eq!(with_search.len(), 1);
        assert_eq!(with_search.list_tools()[0].name, "web_search");

        assert_eq!(with_search.max_calls("web_search"), Some(1));

        let without_search = ToolRegistry::for_request(false, &search);
        assert!(without_search.is_empty());
        assert!(without_search.get_tool_schemas().is_empty());
    }

    #[test]
    fn test_schemas_use_function_format() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Echo));

        let schemas = serde_json::to_value(registry.get_tool_schemas()).unwrap();
        assert_eq!(schemas[0]["type"], "function");
        assert_eq!(schemas[0]["function"]["name"], "echo");
        assert_eq!(schemas[0]["function"]["parameters"]["type"], "object");
    }

    #[tokio::test]
    async fn test_execute_dispatches_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Echo));

        let out = registry.execute("echo", json!({"text": "hi"})).await.unwrap();
        assert_eq!(out, "hi");

        let err = registry.execute("missing", Value::Null).await.unwrap_err();
        assert!(err.to_string().contains("Unknown tool"));
    }

    #[test]
    fn test_tools_are_unlimited_by_default() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Echo));

        assert_eq!(registry.max_calls("echo"), None);
        assert_eq!(registry.max_calls("missing"), None);
    }
}
