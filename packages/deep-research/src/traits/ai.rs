//! AI trait for LLM operations.
//!
//! Implementations wrap a specific provider and own the prompting; the
//! pipeline only decides what to ask and how much context to send.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{SerpAnalysis, SerpQuery};

#[async_trait]
pub trait ResearchAI: Send + Sync {
    /// Propose up to `num_queries` search queries for a research topic.
    ///
    /// `learnings` are results of earlier levels; queries should build on them
    /// instead of repeating what is already known.
    async fn generate_serp_queries(
        &self,
        query: &str,
        learnings: &[String],
        num_queries: usize,
    ) -> Result<Vec<SerpQuery>>;

    /// Distill learnings and follow-up questions from search result contents.
    async fn process_serp_result(
        &self,
        query: &str,
        contents: &[String],
        num_learnings: usize,
        num_follow_up_questions: usize,
    ) -> Result<SerpAnalysis>;

    /// Write a markdown report for `prompt` from pre-formatted learnings.
    async fn write_report(&self, prompt: &str, learnings: &str) -> Result<String>;

    /// Ask clarifying questions that would sharpen the research direction.
    async fn generate_feedback(&self, query: &str, num_questions: usize) -> Result<Vec<String>>;
}
