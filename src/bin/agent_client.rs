//! Agent Chat - interactive terminal client.
//!
//! Collects the chat form fields on stdin, posts them to the gateway and
//! prints the agent's reply. Each submission is independent.

use std::io::Write;

use agent_chat::client::{
    models_for, parse_model_choice, parse_provider_choice, AgentOutcome, ChatClient, ChatForm,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agent_chat=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = ChatClient::from_env()?;
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    println!("AI Chatbot Agents");
    println!("Create and Interact with the AI Agents! (Ctrl-D to quit)");
    println!("Gateway: {}\n", client.api_url());

    loop {
        let Some(form) = read_form(&mut input).await? else {
            break;
        };

        let Some(request) = form.to_request() else {
            println!("Enter a query to ask the agent.\n");
            continue;
        };

        match client.send(&request).await {
            Ok(AgentOutcome::Reply(text)) => {
                println!("\nAgent Response");
                println!("Final Response: {}\n", text);
            }
            Ok(AgentOutcome::Error(message)) => println!("\nError: {}\n", message),
            Err(e) => {
                tracing::warn!("Gateway call failed: {}", e);
                println!("\n{}\n", e);
            }
        }
    }

    Ok(())
}

/// Prompt for every form field. `None` on end of input.
async fn read_form(input: &mut Input) -> anyhow::Result<Option<ChatForm>> {
    let Some(system_prompt) = ask(input, "Define your AI Agent").await? else {
        return Ok(None);
    };

    let provider = loop {
        let Some(answer) = ask(input, "Select Provider [1] Groq [2] OpenAI").await? else {
            return Ok(None);
        };
        match parse_provider_choice(&answer) {
            Some(provider) => break provider,
            None => println!("Unknown provider {:?}, enter 1 or 2.", answer.trim()),
        }
    };
    println!("Provider: {}", provider);

    let mut form = ChatForm::new(provider);
    form.system_prompt = system_prompt;

    let models = models_for(provider);
    let menu = models
        .iter()
        .enumerate()
        .map(|(i, m)| format!("[{}] {}", i + 1, m))
        .collect::<Vec<_>>()
        .join(" ");
    let model = loop {
        let Some(answer) = ask(input, &format!("Select {} Model {}", provider, menu)).await? else {
            return Ok(None);
        };
        match parse_model_choice(provider, &answer) {
            Some(model) => break model,
            None => println!("Unknown model {:?}, enter 1-{}.", answer.trim(), models.len()),
        }
    };
    println!("Model: {}", model);
    form.model = model.to_string();

    let Some(search) = ask(input, "Allow Web Search? [y/N]").await? else {
        return Ok(None);
    };
    form.allow_search = matches!(search.trim().to_lowercase().as_str(), "y" | "yes");

    let Some(query) = ask(input, "Enter your query").await? else {
        return Ok(None);
    };
    form.query = query;

    Ok(Some(form))
}

async fn ask(input: &mut Input, label: &str) -> anyhow::Result<Option<String>> {
    print!("{}: ", label);
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}
