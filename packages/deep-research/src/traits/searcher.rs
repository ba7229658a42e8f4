//! Web searcher trait.
//!
//! The pipeline needs page content along with each hit, so implementations
//! are expected to return scraped markdown when the provider offers it.

use async_trait::async_trait;

use crate::error::Result;

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub url: String,
    pub title: Option<String>,
    /// Page content as markdown (if the provider returned it).
    pub markdown: Option<String>,
}

impl SearchResult {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            markdown: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_markdown(mut self, markdown: impl Into<String>) -> Self {
        self.markdown = Some(markdown.into());
        self
    }
}

#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Search the web, returning at most `limit` results.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>>;
}
