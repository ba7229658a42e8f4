//! Firecrawl-based web searcher.
//!
//! Uses Firecrawl's search endpoint with `scrapeOptions` so every hit comes
//! back with its page content as markdown.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ResearchError, Result};
use crate::traits::searcher::{SearchResult, WebSearcher};

const FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev/v1";

/// Server-side timeout handed to Firecrawl, in milliseconds.
const SEARCH_TIMEOUT_MS: u64 = 15_000;

pub struct FirecrawlSearcher {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    query: &'a str,
    limit: usize,
    timeout: u64,
    scrape_options: ScrapeOptions,
}

#[derive(Serialize)]
struct ScrapeOptions {
    formats: Vec<&'static str>,
}

#[derive(Deserialize)]
struct SearchResponse {
    success: bool,
    #[serde(default)]
    data: Vec<SearchHit>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct SearchHit {
    url: Option<String>,
    title: Option<String>,
    markdown: Option<String>,
}

impl FirecrawlSearcher {
    /// Create a searcher. Self-hosted Firecrawl instances may run without a key.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(SEARCH_TIMEOUT_MS + 15_000))
            .build()
            .map_err(|e| ResearchError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: FIRECRAWL_API_URL.to_string(),
        })
    }

    /// Point at a self-hosted instance.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl WebSearcher for FirecrawlSearcher {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let request = SearchRequest {
            query,
            limit,
            timeout: SEARCH_TIMEOUT_MS,
            scrape_options: ScrapeOptions {
                formats: vec!["markdown"],
            },
        };

        let mut builder = self
            .client
            .post(format!("{}/search", self.base_url))
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, query, "Firecrawl search failed");
            return Err(ResearchError::Api {
                provider: "Firecrawl",
                status: status.as_u16(),
                body,
            });
        }

        let body: SearchResponse = response.json().await?;
        if !body.success {
            return Err(ResearchError::Search {
                query: query.to_string(),
                reason: body.error.unwrap_or_else(|| "unsuccessful response".into()),
            });
        }

        let results: Vec<SearchResult> = body
            .data
            .into_iter()
            .filter_map(|hit| {
                let mut result = SearchResult::new(hit.url?);
                result.title = hit.title;
                result.markdown = hit.markdown;
                Some(result)
            })
            .collect();

        debug!(query, count = results.len(), "Firecrawl search complete");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = SearchRequest {
            query: "rust async runtimes",
            limit: 5,
            timeout: SEARCH_TIMEOUT_MS,
            scrape_options: ScrapeOptions {
                formats: vec!["markdown"],
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["limit"], 5);
        assert_eq!(value["timeout"], 15_000);
        assert_eq!(value["scrapeOptions"]["formats"][0], "markdown");
    }

    #[test]
    fn test_response_skips_hits_without_url() {
        let body: SearchResponse = serde_json::from_str(
            r##"{"success":true,"data":[{"url":"https://a.example","markdown":"# A"},{"title":"no url"}]}"##,
        )
        .unwrap();
        assert!(body.success);
        assert_eq!(body.data.iter().filter(|h| h.url.is_some()).count(), 1);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let searcher = FirecrawlSearcher::new(None)
            .unwrap()
            .with_base_url("http://localhost:3002/v1/");
        assert_eq!(searcher.base_url, "http://localhost:3002/v1");
    }
}
