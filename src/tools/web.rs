//! Web search tool.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::Tool;
use crate::config::SearchConfig;

const TAVILY_SEARCH_URL: &str = "https://api.tavily.com/search";
const DDG_SEARCH_URL: &str = "https://html.duckduckgo.com/html/";

/// Where search queries are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchBackend {
    /// Tavily search API (requires a key)
    Tavily { api_key: String },
    /// DuckDuckGo HTML endpoint (no key needed)
    DuckDuckGo,
}

/// Search the web and return the top results to the agent.
pub struct WebSearch {
    backend: SearchBackend,
    max_results: usize,
    client: reqwest::Client,
}

/// One search hit as handed to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub url: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

impl WebSearch {
    pub fn new(backend: SearchBackend, max_results: usize) -> Self {
        Self {
            backend,
            max_results: max_results.max(1),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        let backend = match &config.tavily_api_key {
            Some(key) => SearchBackend::Tavily {
                api_key: key.clone(),
            },
            None => SearchBackend::DuckDuckGo,
        };
        Self::new(backend, config.max_results)
    }

    pub fn backend(&self) -> &SearchBackend {
        &self.backend
    }

    async fn search_tavily(&self, api_key: &str, query: &str) -> anyhow::Result<Vec<SearchResult>> {
        let response = self
            .client
            .post(TAVILY_SEARCH_URL)
            .json(&TavilyRequest {
                api_key,
                query,
                max_results: self.max_results,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Tavily search failed ({}): {}", status, body));
        }

        let parsed: TavilyResponse = response.json().await?;
        Ok(parsed.results.into_iter().take(self.max_results).collect())
    }

    async fn search_duckduckgo(&self, query: &str) -> anyhow::Result<Vec<SearchResult>> {
        let url = format!("{}?q={}", DDG_SEARCH_URL, urlencoding::encode(query));

        let html = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, "Mozilla/5.0 (compatible; AgentChat/0.1)")
            .send()
            .await?
            .text()
            .await?;

        Ok(extract_ddg_results(&html, self.max_results))
    }
}

#[async_trait]
impl Tool for WebSearch {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web for current information. Input should be a search query. Returns a JSON list of results with url and content."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                }
            },
            "required": ["query"]
        })
    }

    fn max_calls(&self) -> Option<usize> {
        Some(1)
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let query = args["query"]
            .as_str()
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("Missing 'query' argument"))?;

        tracing::info!("Web search: {}", query);

        let results = match &self.backend {
            SearchBackend::Tavily { api_key } => self.search_tavily(api_key, query).await?,
            SearchBackend::DuckDuckGo => self.search_duckduckgo(query).await?,
        };

        format_results(query, &results)
    }
}

/// Tool output for `query`: the results as a JSON list, or a no-results notice.
fn format_results(query: &str, results: &[SearchResult]) -> anyhow::Result<String> {
    if results.is_empty() {
        return Ok(format!("No results found for: {}", query));
    }

    Ok(serde_json::to_string(results)?)
}

/// Extract search results from DuckDuckGo HTML.
fn extract_ddg_results(html: &str, max_results: usize) -> Vec<SearchResult> {
    html.split("class=\"result__body\"")
        .skip(1)
        .filter_map(|chunk| {
            let title = inner_text_after(chunk, "class=\"result__a\"")?;
            if title.is_empty() {
                return None;
            }
            let snippet = inner_text_after(chunk, "class=\"result__snippet\"").unwrap_or_default();
            let url = inner_text_after(chunk, "class=\"result__url\"").unwrap_or_default();

            Some(SearchResult {
                url: url.trim().to_string(),
                content: format!("{}: {}", html_decode(&title), html_decode(&snippet)),
            })
        })
        .take(max_results)
        .collect()
}

/// Text of the `<a>` element carrying `marker`, with inline tags such as `<b>` removed.
fn inner_text_after(chunk: &str, marker: &str) -> Option<String> {
    let after_marker = chunk.split(marker).nth(1)?;
    let body = &after_marker[after_marker.find('>')? + 1..];
    let body = body.split("</a>").next().unwrap_or(body);
    Some(strip_tags(body).trim().to_string())
}

fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

/// Basic HTML entity decoding. `&amp;` goes last so escaped entities stay literal.
fn html_decode(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
