//! HTTP API for the agent chat gateway.
//!
//! ## Endpoints
//!
//! - `POST /chat` - Run one agent turn and return the reply as a JSON string
//! - `GET /health` - Health check
//! - `GET /` - Browser form that posts to `/chat`

mod chat;
mod routes;
pub mod types;

pub use chat::{is_allowed_model, ALLOWED_MODEL_NAMES, INVALID_MODEL_MESSAGE};
pub use routes::{router, serve, AppState};
