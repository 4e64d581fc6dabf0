//! The chat form: field values, model choices per provider, payload building.

use crate::api::types::ChatRequest;
use crate::providers::Provider;

pub const MODEL_NAMES_GROQ: [&str; 2] = ["llama-3.3-70b-versatile", "mixtral-8x7b-32768"];
pub const MODEL_NAMES_OPENAI: [&str; 3] = ["gpt-4o-mini", "gpt-4-turbo", "gpt-3.5-turbo"];

/// Models offered for `provider`, in display order.
pub fn models_for(provider: Provider) -> &'static [&'static str] {
    match provider {
        Provider::Groq => &MODEL_NAMES_GROQ,
        Provider::OpenAI => &MODEL_NAMES_OPENAI,
    }
}

/// Provider for a menu answer: its number or its tag, case-insensitively.
/// A blank answer selects Groq; anything else unrecognized is `None`.
pub fn parse_provider_choice(input: &str) -> Option<Provider> {
    match input.trim() {
        "" | "1" => Some(Provider::Groq),
        "2" => Some(Provider::OpenAI),
        other => Provider::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(other)),
    }
}

/// Model for a menu answer: its 1-based number or its exact name.
/// A blank answer selects the provider's first model.
pub fn parse_model_choice(provider: Provider, input: &str) -> Option<&'static str> {
    let models = models_for(provider);
    let input = input.trim();
    if input.is_empty() {
        return models.first().copied();
    }

    match input.parse::<usize>() {
        Ok(n) => n.checked_sub(1).and_then(|i| models.get(i)).copied(),
        Err(_) => models.iter().find(|m| **m == input).copied(),
    }
}

/// Values collected from the user for one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatForm {
    pub system_prompt: String,
    pub provider: Provider,
    pub model: String,
    pub allow_search: bool,
    pub query: String,
}

impl ChatForm {
    /// A form with the first model of `provider` selected and everything else empty.
    pub fn new(provider: Provider) -> Self {
        Self {
            system_prompt: String::new(),
            provider,
            model: models_for(provider)[0].to_string(),
            allow_search: false,
            query: String::new(),
        }
    }

    /// Switch provider, resetting the model if it is not offered by the new one.
    pub fn select_provider(&mut self, provider: Provider) {
        self.provider = provider;
        if !models_for(provider).contains(&self.model.as_str()) {
            self.model = models_for(provider)[0].to_string();
        }
    }

    /// The request to post, or `None` when the query is blank.
    pub fn to_request(&self) -> Option<ChatRequest> {
        if self.query.trim().is_empty() {
            return None;
        }

        Some(ChatRequest {
            model_name: self.model.clone(),
            model_provider: self.provider.as_str().to_string(),
            system_prompt: self.system_prompt.clone(),
            messages: vec![self.query.clone()],
            allow_search: self.allow_search,
        })
    }
}
