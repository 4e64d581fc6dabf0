//! Builds a per-request agent and runs one conversational turn.

use std::sync::Arc;

use crate::config::SearchConfig;
use crate::providers::{ModelFactory, Provider};
use crate::tools::ToolRegistry;

use super::agent_loop::{last_assistant_reply, Agent};
use super::error::AgentError;

/// Assembles agents from a model factory and search settings.
///
/// Holds no per-conversation state; every call to [`AgentFactory::respond`]
/// constructs a fresh model client and tool set.
#[derive(Clone)]
pub struct AgentFactory {
    models: Arc<dyn ModelFactory>,
    search: SearchConfig,
    max_iterations: usize,
}

impl AgentFactory {
    pub fn new(models: Arc<dyn ModelFactory>, search: SearchConfig, max_iterations: usize) -> Self {
        Self {
            models,
            search,
            max_iterations,
        }
    }

    /// Build the agent for one request without running it.
    pub fn build_agent(
        &self,
        model_id: &str,
        allow_search: bool,
        system_prompt: &str,
        provider: &str,
    ) -> Result<Agent, AgentError> {
        let provider: Provider = provider.parse()?;
        let model = self.models.construct_model(provider, model_id)?;
        let tools = ToolRegistry::for_request(allow_search, &self.search);

        Ok(Agent::new(model, tools, system_prompt, self.max_iterations))
    }

    /// Run one turn over `query` and return the final assistant message.
    pub async fn respond(
        &self,
        model_id: &str,
        query: &[String],
        allow_search: bool,
        system_prompt: &str,
        provider: &str,
    ) -> Result<String, AgentError> {
        let agent = self.build_agent(model_id, allow_search, system_prompt, provider)?;

        tracing::info!(
            "Running agent: provider={} model={} tools={} messages={}",
            provider,
            model_id,
            agent.tools().len(),
            query.len()
        );

        let transcript = agent.invoke(query).await?;
        last_assistant_reply(&transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeModelFactory, ScriptedLlm};

    fn factory_with(llm: Arc<ScriptedLlm>) -> (AgentFactory, Arc<FakeModelFactory>) {
        let models = Arc::new(FakeModelFactory::new(llm));
        let factory = AgentFactory::new(models.clone(), SearchConfig::default(), 10);
        (factory, models)
    }

    #[tokio::test]
    async fn test_respond_returns_last_assistant_message() {
        let llm = Arc::new(ScriptedLlm::replying("Hello! How can I help?"));
        let (factory, models) = factory_with(llm.clone());

        let reply = factory
            .respond("gpt-4o-mini", &["Hello".to_string()], false, "", "OpenAI")
            .await;
        let reply = tokio_test::assert_ok!(reply);
        assert!(!reply.is_empty());

        assert_eq!(
            models.requests(),
            vec![(Provider::OpenAI, "gpt-4o-mini".to_string())]
        );
        assert_eq!(llm.calls()[0].model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_search_flag_sets_tool_count() {
        let llm = Arc::new(ScriptedLlm::new(vec![]));
        let (factory, _) = factory_with(llm);

        let with_search = factory
            .build_agent("llama-3.3-70b-versatile", true, "", "Groq")
            .unwrap();
        assert_eq!(with_search.tools().len(), 1);

        let without_search = factory
            .build_agent("llama-3.3-70b-versatile", false, "", "Groq")
            .unwrap();
        assert_eq!(without_search.tools().len(), 0);
    }

    #[tokio::test]
    async fn test_search_tool_is_advertised_to_model() {
        let llm = Arc::new(ScriptedLlm::replying("done"));
        let (factory, _) = factory_with(llm.clone());

        factory
            .respond("gpt-4o-mini", &["News?".to_string()], true, "", "OpenAI")
            .await
            .unwrap();

        let calls = llm.calls();
        assert!(calls[0].had_tools);
        assert_eq!(calls[0].tool_count, 1);
    }

    #[tokio::test]
    async fn test_unknown_provider_is_rejected_before_model_construction() {
        let llm = Arc::new(ScriptedLlm::new(vec![]));
        let (factory, models) = factory_with(llm.clone());

        let err = factory
            .respond("gpt-4o-mini", &["Hello".to_string()], false, "", "Anthropic")
            .await;
        let err = tokio_test::assert_err!(err);
        assert!(matches!(err, AgentError::UnsupportedProvider(ref p) if p == "Anthropic"));
        assert!(models.requests().is_empty());
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_system_prompt_is_sent_verbatim() {
        for prompt in ["", "  Answer in French.\n"] {
            let llm = Arc::new(ScriptedLlm::replying("ok"));
            let (factory, _) = factory_with(llm.clone());

            factory
                .respond("gpt-4o-mini", &["Hello".to_string()], false, prompt, "OpenAI")
                .await
                .unwrap();

            assert_eq!(llm.calls()[0].system_prompt.as_deref(), Some(prompt));
        }
    }

    #[tokio::test]
    async fn test_empty_history_is_rejected() {
        let llm = Arc::new(ScriptedLlm::replying("unused"));
        let (factory, _) = factory_with(llm.clone());

        let err = factory
            .respond("gpt-4o-mini", &[], false, "", "OpenAI")
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::EmptyHistory));
        assert!(llm.calls().is_empty());
    }
}
