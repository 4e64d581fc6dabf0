//! Agent module - per-request agent construction and the tool loop.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Build context with the caller's system instruction (sent as given) and message history
//! 2. Call the LLM with the available tools (none when search is disabled)
//! 3. If the LLM requests tool calls, execute them and feed results back
//! 4. Repeat until the LLM answers without tools or max iterations is reached
//!
//! [`AgentFactory::respond`] wraps all of it and returns the last assistant message.

mod agent_loop;
mod error;
mod factory;

pub use agent_loop::{last_assistant_reply, Agent};
pub use error::AgentError;
pub use factory::AgentFactory;
