//! Client side of the gateway: form model and a small HTTP client.

mod form;

pub use form::{
    models_for, parse_model_choice, parse_provider_choice, ChatForm, MODEL_NAMES_GROQ,
    MODEL_NAMES_OPENAI,
};

use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::api::types::ChatRequest;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:9999/chat";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid gateway URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed with status {0}")]
    Status(reqwest::StatusCode),
}

/// What the gateway answered to a 200 response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentOutcome {
    /// The agent's final response
    Reply(String),
    /// The gateway's `{"error": ...}` payload
    Error(String),
}

impl AgentOutcome {
    /// Classify a decoded 200 body: an object with an `error` key is an error, anything else a reply.
    pub fn from_body(body: Value) -> Self {
        if let Some(error) = body.as_object().and_then(|o| o.get("error")) {
            return match error {
                Value::String(s) => Self::Error(s.clone()),
                other => Self::Error(other.to_string()),
            };
        }

        match body {
            Value::String(s) => Self::Reply(s),
            other => Self::Reply(other.to_string()),
        }
    }
}

/// Posts chat requests to the gateway.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    api_url: Url,
}

impl ChatClient {
    pub fn new(api_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: reqwest::Client::new(),
            api_url: Url::parse(api_url)?,
        })
    }

    /// Client for `AGENT_API_URL`, or the local gateway when unset.
    pub fn from_env() -> Result<Self, ClientError> {
        let url = std::env::var("AGENT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(&url)
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Send one request and wait for the full answer.
    pub async fn send(&self, request: &ChatRequest) -> Result<AgentOutcome, ClientError> {
        let response = self
            .http
            .post(self.api_url.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ClientError::Status(status));
        }

        let body: Value = response.json().await?;
        Ok(AgentOutcome::from_body(body))
    }
}
