//! `POST /chat` - validate the model name and delegate to the agent factory.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::routes::AppState;
use super::types::{ChatRequest, ErrorResponse};
use crate::agent::AgentError;

/// Model names the gateway accepts, across both providers.
pub const ALLOWED_MODEL_NAMES: [&str; 6] = [
    "llama3-70b-8192",
    "mixtral-8x7b-32768",
    "llama-3.3-70b-versatile",
    "gpt-4o-mini",
    "gpt-4-turbo",
    "gpt-3.5-turbo",
];

pub const INVALID_MODEL_MESSAGE: &str = "Invalid model name. Kindly select a valid AI model";

pub fn is_allowed_model(model_name: &str) -> bool {
    ALLOWED_MODEL_NAMES.contains(&model_name)
}

/// Chat with an agent configured by the request.
///
/// Rejected model names produce `{"error": ...}` with status 200. Factory
/// failures are not reshaped into that payload; they become a 500.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Response, ChatFailure> {
    if !is_allowed_model(&request.model_name) {
        tracing::warn!("Rejected model name: {}", request.model_name);
        return Ok(Json(ErrorResponse::new(INVALID_MODEL_MESSAGE)).into_response());
    }

    let reply = state
        .agents
        .respond(
            &request.model_name,
            &request.messages,
            request.allow_search,
            &request.system_prompt,
            &request.model_provider,
        )
        .await?;

    Ok(Json(reply).into_response())
}

/// A factory failure surfaced to the caller as an internal server error.
#[derive(Debug)]
pub struct ChatFailure(AgentError);

impl From<AgentError> for ChatFailure {
    fn from(err: AgentError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ChatFailure {
    fn into_response(self) -> Response {
        tracing::error!("Agent request failed: {}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response()
    }
}
