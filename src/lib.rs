//! # Agent Chat
//!
//! A minimal harness for conversing with a tool-using LLM agent.
//!
//! This library provides:
//! - An HTTP gateway (`POST /chat`) that validates requests against a model allow-list
//! - A per-request agent factory over Groq and OpenAI, with optional web search
//! - A client and form model used by the interactive terminal client
//!
//! ## Architecture
//!
//! ```text
//! client ──POST /chat──▶ api ──respond()──▶ agent ──▶ llm (Groq | OpenAI)
//!                                              └────▶ tools (web search)
//! ```
//!
//! No component keeps state between requests.
//!
//! ## Example
//!
//! ```rust,ignore
//! use agent_chat::{api, config::Config};
//!
//! let config = Config::from_env()?;
//! api::serve(config).await?;
//! ```

pub mod agent;
pub mod api;
pub mod client;
pub mod config;
pub mod llm;
pub mod providers;
pub mod tools;

#[cfg(test)]
mod testing;

pub use config::Config;
