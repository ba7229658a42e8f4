//! Server dependencies (using traits for testability)
//!
//! Wires the `deep-research` engine into the collaborator traits the
//! streaming core depends on.

use anyhow::{Context, Result};
use async_trait::async_trait;
use deep_research::{
    ai::OpenAI,
    searchers::{FirecrawlSearcher, TavilySearcher},
    DeepResearch, ReportWriter, ResearchEventSender, ResearchOutcome, ResearchParams,
    WebSearcher,
};
use std::sync::Arc;

use crate::config::{Config, SearchProvider};
use crate::kernel::{BaseReportWriter, BaseResearcher};

// =============================================================================
// deep-research adapters
// =============================================================================

#[async_trait]
impl BaseResearcher for DeepResearch {
    async fn research(
        &self,
        params: ResearchParams,
        events: ResearchEventSender,
    ) -> Result<ResearchOutcome> {
        Ok(DeepResearch::research(self, params, events).await?)
    }
}

#[async_trait]
impl BaseReportWriter for ReportWriter {
    async fn write_report(
        &self,
        prompt: &str,
        learnings: &[String],
        visited_urls: &[String],
    ) -> Result<String> {
        Ok(self
            .write_final_report(prompt, learnings, visited_urls)
            .await?)
    }

    async fn generate_feedback(
        &self,
        query: &str,
        num_questions: Option<usize>,
    ) -> Result<Vec<String>> {
        Ok(ReportWriter::generate_feedback(self, query, num_questions).await?)
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Collaborators shared by all requests. Holds no per-request state.
#[derive(Clone)]
pub struct ServerDeps {
    pub researcher: Arc<dyn BaseResearcher>,
    pub report_writer: Arc<dyn BaseReportWriter>,
}

impl ServerDeps {
    pub fn new(
        researcher: Arc<dyn BaseResearcher>,
        report_writer: Arc<dyn BaseReportWriter>,
    ) -> Self {
        Self {
            researcher,
            report_writer,
        }
    }

    /// Build the OpenAI + web search collaborators described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let ai = Arc::new(
            OpenAI::new(config.openai_api_key.clone())
                .with_model(config.model.clone())
                .with_base_url(config.openai_endpoint.clone()),
        );

        let searcher: Arc<dyn WebSearcher> = match &config.search {
            SearchProvider::Firecrawl { api_key, base_url } => Arc::new(
                FirecrawlSearcher::new(api_key.clone())
                    .context("Failed to create Firecrawl searcher")?
                    .with_base_url(base_url.clone()),
            ),
            SearchProvider::Tavily { api_key } => Arc::new(
                TavilySearcher::new(api_key.clone())
                    .context("Failed to create Tavily searcher")?,
            ),
        };

        let researcher = DeepResearch::new(ai.clone(), searcher).with_concurrency(config.concurrency);
        let report_writer = ReportWriter::new(ai).with_context_size(config.context_size);

        Ok(Self::new(Arc::new(researcher), Arc::new(report_writer)))
    }
}
