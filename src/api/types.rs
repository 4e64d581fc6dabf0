//! API request and response types.

use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier; must be in the allow-list
    pub model_name: String,

    /// Provider tag, `"Groq"` or `"OpenAI"`
    pub model_provider: String,

    /// System instruction for the agent
    pub system_prompt: String,

    /// Conversation history, oldest first
    pub messages: Vec<String>,

    /// Whether the agent gets the web search tool
    pub allow_search: bool,
}

/// Error payload returned with status 200 for rejected requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Provider tags with credentials configured
    pub providers: Vec<String>,
}
