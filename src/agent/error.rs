use thiserror::Error;

use crate::providers::Provider;

/// Failures while building or running an agent.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Unsupported model provider: {0:?}")]
    UnsupportedProvider(String),

    #[error("No API key configured for provider {0}")]
    MissingCredentials(Provider),

    #[error("Message history is empty")]
    EmptyHistory,

    #[error("Agent produced no assistant message")]
    EmptyResponse,

    #[error("Max iterations ({0}) reached without completion")]
    IterationLimit(usize),

    #[error("Upstream provider error: {0}")]
    Upstream(#[source] anyhow::Error),
}
