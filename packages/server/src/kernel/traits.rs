// Trait definitions for dependency injection
//
// These are the boundaries to the research collaborators. The streaming core
// only ever talks to these traits, never to a concrete engine.
//
// Naming convention: Base* for trait names (e.g., BaseResearcher)

use anyhow::Result;
use async_trait::async_trait;
use deep_research::{ResearchEventSender, ResearchOutcome, ResearchParams};

// =============================================================================
// Research Collaborator
// =============================================================================

#[async_trait]
pub trait BaseResearcher: Send + Sync {
    /// Run research to completion.
    ///
    /// Partial results may be pushed to `events` at any time and in any order;
    /// the returned outcome is authoritative and may include values that were
    /// never sent.
    async fn research(
        &self,
        params: ResearchParams,
        events: ResearchEventSender,
    ) -> Result<ResearchOutcome>;
}

// =============================================================================
// Report Collaborator
// =============================================================================

#[async_trait]
pub trait BaseReportWriter: Send + Sync {
    /// Synthesize a markdown report. No timeout is imposed here.
    async fn write_report(
        &self,
        prompt: &str,
        learnings: &[String],
        visited_urls: &[String],
    ) -> Result<String>;

    /// Clarifying questions for a research query.
    async fn generate_feedback(
        &self,
        query: &str,
        num_questions: Option<usize>,
    ) -> Result<Vec<String>>;
}
