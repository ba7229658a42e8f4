//! Tavily-based web searcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ResearchError, Result};
use crate::traits::searcher::{SearchResult, WebSearcher};

const TAVILY_API_URL: &str = "https://api.tavily.com/search";

pub struct TavilySearcher {
    client: Client,
    api_key: String,
    search_depth: String,
}

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    search_depth: &'a str,
    max_results: usize,
    include_raw_content: bool,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    url: String,
    title: String,
    content: String,
    #[serde(default)]
    raw_content: Option<String>,
}

impl TavilySearcher {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ResearchError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            search_depth: "basic".to_string(),
        })
    }

    /// Set search depth ("basic" or "advanced").
    pub fn with_search_depth(mut self, depth: impl Into<String>) -> Self {
        self.search_depth = depth.into();
        self
    }
}

impl From<TavilyResult> for SearchResult {
    fn from(result: TavilyResult) -> Self {
        let markdown = result
            .raw_content
            .filter(|raw| !raw.trim().is_empty())
            .unwrap_or(result.content);
        SearchResult::new(result.url)
            .with_title(result.title)
            .with_markdown(markdown)
    }
}

#[async_trait]
impl WebSearcher for TavilySearcher {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let request = TavilyRequest {
            query,
            search_depth: &self.search_depth,
            max_results: limit,
            include_raw_content: true,
        };

        let response = self
            .client
            .post(TAVILY_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, query, "Tavily search failed");
            return Err(ResearchError::Api {
                provider: "Tavily",
                status: status.as_u16(),
                body,
            });
        }

        let body: TavilyResponse = response.json().await?;
        let results: Vec<SearchResult> = body.results.into_iter().map(Into::into).collect();
        debug!(query, count = results.len(), "Tavily search complete");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_raw_content() {
        let result: SearchResult = TavilyResult {
            url: "https://a.example".into(),
            title: "A".into(),
            content: "snippet".into(),
            raw_content: Some("full page".into()),
        }
        .into();
        assert_eq!(result.markdown.as_deref(), Some("full page"));
        assert_eq!(result.title.as_deref(), Some("A"));
    }

    #[test]
    fn test_falls_back_to_snippet() {
        let result: SearchResult = TavilyResult {
            url: "https://a.example".into(),
            title: "A".into(),
            content: "snippet".into(),
            raw_content: Some("   ".into()),
        }
        .into();
        assert_eq!(result.markdown.as_deref(), Some("snippet"));
    }
}
