//! Configuration management for the agent chat gateway.
//!
//! Configuration is read from environment variables (a `.env` file in the
//! working directory is loaded first by the binaries):
//! - `GROQ_API_KEY` - Optional. Credential for the Groq provider.
//! - `OPENAI_API_KEY` - Optional. Credential for the OpenAI provider.
//! - `TAVILY_API_KEY` - Optional. Enables Tavily for web search; DuckDuckGo is used otherwise.
//! - `GROQ_BASE_URL` - Optional. Defaults to `https://api.groq.com/openai/v1`.
//! - `OPENAI_BASE_URL` - Optional. Defaults to `https://api.openai.com/v1`.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `9999`.
//! - `MAX_ITERATIONS` - Optional. Maximum agent loop iterations. Defaults to `25`.
//! - `SEARCH_MAX_RESULTS` - Optional. Results returned per web search. Defaults to `2`.
//!
//! Provider keys are not required at startup: a request for a provider whose
//! key is missing fails when the model is constructed.

use thiserror::Error;

use crate::providers::Provider;

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Connection settings for one model provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API key, if one was supplied
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
}

/// Web search settings.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Tavily API key; `None` selects the keyless DuckDuckGo backend
    pub tavily_api_key: Option<String>,

    /// Maximum results returned to the agent per search
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tavily_api_key: None,
            max_results: 2,
        }
    }
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Groq provider settings
    pub groq: ProviderConfig,

    /// OpenAI provider settings
    pub openai: ProviderConfig,

    /// Web search settings
    pub search: SearchConfig,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Maximum iterations for the agent loop
    pub max_iterations: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let groq = ProviderConfig {
            api_key: non_empty_var("GROQ_API_KEY"),
            base_url: std::env::var("GROQ_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GROQ_BASE_URL.to_string()),
        };

        let openai = ProviderConfig {
            api_key: non_empty_var("OPENAI_API_KEY"),
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
        };

        let search = SearchConfig {
            tavily_api_key: non_empty_var("TAVILY_API_KEY"),
            max_results: parse_var("SEARCH_MAX_RESULTS", 2)?,
        };

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_var("PORT", 9999)?;

        let max_iterations: usize = parse_var("MAX_ITERATIONS", 25)?;
        if max_iterations == 0 {
            return Err(ConfigError::InvalidValue(
                "MAX_ITERATIONS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            groq,
            openai,
            search,
            host,
            port,
            max_iterations,
        })
    }

    /// Create a config with custom provider keys (useful for testing).
    pub fn new(groq_api_key: Option<String>, openai_api_key: Option<String>) -> Self {
        Self {
            groq: ProviderConfig {
                api_key: groq_api_key,
                base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            },
            openai: ProviderConfig {
                api_key: openai_api_key,
                base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            },
            search: SearchConfig::default(),
            host: "127.0.0.1".to_string(),
            port: 9999,
            max_iterations: 25,
        }
    }

    /// Settings for the given provider.
    pub fn provider(&self, provider: Provider) -> &ProviderConfig {
        match provider {
            Provider::Groq => &self.groq,
            Provider::OpenAI => &self.openai,
        }
    }

    /// Providers that have an API key configured, in `Provider::ALL` order.
    pub fn configured_providers(&self) -> Vec<Provider> {
        Provider::ALL
            .into_iter()
            .filter(|p| self.provider(*p).api_key.is_some())
            .collect()
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue(name.to_string(), format!("{}", e)))
}
