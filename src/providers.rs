//! Model providers and model construction.
//!
//! A request names its provider by tag (`"Groq"` or `"OpenAI"`). The tag is
//! parsed into [`Provider`] and handed to a [`ModelFactory`], which builds a
//! fresh [`ChatModel`] for the requested model id.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::agent::AgentError;
use crate::config::Config;
use crate::llm::{LlmClient, OpenAiCompatibleClient};

/// Supported model vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    Groq,
    OpenAI,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Groq, Provider::OpenAI];

    /// Wire tag used in requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groq => "Groq",
            Self::OpenAI => "OpenAI",
        }
    }

    /// Build a model bound to this provider's endpoint.
    pub fn construct_model(&self, model_id: &str, config: &Config) -> Result<ChatModel, AgentError> {
        let settings = config.provider(*self);
        let api_key = settings
            .api_key
            .clone()
            .ok_or(AgentError::MissingCredentials(*self))?;

        tracing::info!("Initializing {} model: {}", self, model_id);

        Ok(ChatModel::new(
            *self,
            model_id,
            Arc::new(OpenAiCompatibleClient::new(settings.base_url.clone(), api_key)),
        ))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Groq" => Ok(Self::Groq),
            "OpenAI" => Ok(Self::OpenAI),
            other => Err(AgentError::UnsupportedProvider(other.to_string())),
        }
    }
}

/// A backend model: which provider serves it, its id, and the client to reach it.
#[derive(Clone)]
pub struct ChatModel {
    pub provider: Provider,
    pub model_id: String,
    pub client: Arc<dyn LlmClient>,
}

impl ChatModel {
    pub fn new(provider: Provider, model_id: impl Into<String>, client: Arc<dyn LlmClient>) -> Self {
        Self {
            provider,
            model_id: model_id.into(),
            client,
        }
    }
}

impl fmt::Debug for ChatModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatModel")
            .field("provider", &self.provider)
            .field("model_id", &self.model_id)
            .finish()
    }
}

/// Builds models on demand.
pub trait ModelFactory: Send + Sync {
    fn construct_model(&self, provider: Provider, model_id: &str) -> Result<ChatModel, AgentError>;
}

/// Default factory: one OpenAI-compatible client per call, credentials from [`Config`].
pub struct ProviderRegistry {
    config: Arc<Config>,
}

impl ProviderRegistry {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

impl ModelFactory for ProviderRegistry {
    fn construct_model(&self, provider: Provider, model_id: &str) -> Result<ChatModel, AgentError> {
        provider.construct_model(model_id, &self.config)
    }
}
