//! Testing utilities including mock implementations.
//!
//! Useful for exercising the research pipeline, and applications built on
//! it, without making real AI or network calls.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::error::{ResearchError, Result};
use crate::traits::{
    ai::ResearchAI,
    searcher::{SearchResult, WebSearcher},
};
use crate::types::{SerpAnalysis, SerpQuery};

/// A mock AI implementation for testing.
///
/// Unconfigured queries get deterministic generated answers, so a pipeline
/// run always terminates with predictable output.
#[derive(Default)]
pub struct MockAI {
    /// Predefined SERP queries by research query
    queries: Arc<RwLock<HashMap<String, Vec<SerpQuery>>>>,

    /// Predefined analyses by SERP query
    analyses: Arc<RwLock<HashMap<String, SerpAnalysis>>>,

    /// Research queries whose query generation fails
    failing_queries: Arc<RwLock<HashSet<String>>>,

    /// SERP queries whose analysis fails
    failing_analyses: Arc<RwLock<HashSet<String>>>,

    /// Fixed report body
    report: Arc<RwLock<Option<String>>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockAICall>>>,
}

/// Record of a call made to the mock AI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockAICall {
    GenerateQueries { query: String, learnings: usize },
    ProcessResult { query: String, contents: usize },
    WriteReport { prompt: String },
    Feedback { query: String },
}

impl MockAI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer query generation for `query` with these SERP queries.
    pub fn with_queries(self, query: impl Into<String>, queries: Vec<SerpQuery>) -> Self {
        self.queries.write().unwrap().insert(query.into(), queries);
        self
    }

    /// Answer result processing for `serp_query` with this analysis.
    pub fn with_analysis(self, serp_query: impl Into<String>, analysis: SerpAnalysis) -> Self {
        self.analyses
            .write()
            .unwrap()
            .insert(serp_query.into(), analysis);
        self
    }

    /// Make query generation fail for `query`.
    pub fn failing_queries_for(self, query: impl Into<String>) -> Self {
        self.failing_queries.write().unwrap().insert(query.into());
        self
    }

    /// Make result processing fail for `serp_query`.
    pub fn failing_analysis_for(self, serp_query: impl Into<String>) -> Self {
        self.failing_analyses
            .write()
            .unwrap()
            .insert(serp_query.into());
        self
    }

    /// Return this markdown from every report call.
    pub fn with_report(self, report: impl Into<String>) -> Self {
        *self.report.write().unwrap() = Some(report.into());
        self
    }

    /// Get all recorded calls.
    pub fn calls(&self) -> Vec<MockAICall> {
        self.calls.read().unwrap().clone()
    }

    fn record(&self, call: MockAICall) {
        self.calls.write().unwrap().push(call);
    }
}

fn mock_failure(what: &str, query: &str) -> ResearchError {
    ResearchError::InvalidResponse(format!("mock {what} failure for {query}"))
}

#[async_trait]
impl ResearchAI for MockAI {
    async fn generate_serp_queries(
        &self,
        query: &str,
        learnings: &[String],
        num_queries: usize,
    ) -> Result<Vec<SerpQuery>> {
        self.record(MockAICall::GenerateQueries {
            query: query.to_string(),
            learnings: learnings.len(),
        });

        if self.failing_queries.read().unwrap().contains(query) {
            return Err(mock_failure("query generation", query));
        }

        let queries = self
            .queries
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_else(|| {
                let topic = query.lines().next().unwrap_or(query);
                (1..=num_queries)
                    .map(|i| SerpQuery {
                        query: format!("{topic} #{i}"),
                        research_goal: format!("goal {i} for {topic}"),
                    })
                    .collect()
            });
        Ok(queries.into_iter().take(num_queries).collect())
    }

    async fn process_serp_result(
        &self,
        query: &str,
        contents: &[String],
        num_learnings: usize,
        num_follow_up_questions: usize,
    ) -> Result<SerpAnalysis> {
        self.record(MockAICall::ProcessResult {
            query: query.to_string(),
            contents: contents.len(),
        });

        if self.failing_analyses.read().unwrap().contains(query) {
            return Err(mock_failure("analysis", query));
        }

        let mut analysis = self
            .analyses
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_else(|| SerpAnalysis {
                learnings: vec![format!("learning about {query}")],
                follow_up_questions: vec![format!("what follows {query}?")],
            });
        analysis.learnings.truncate(num_learnings);
        analysis.follow_up_questions.truncate(num_follow_up_questions);
        Ok(analysis)
    }

    async fn write_report(&self, prompt: &str, learnings: &str) -> Result<String> {
        self.record(MockAICall::WriteReport {
            prompt: prompt.to_string(),
        });

        let report = self.report.read().unwrap().clone();
        Ok(report.unwrap_or_else(|| format!("# {prompt}\n\n{learnings}")))
    }

    async fn generate_feedback(&self, query: &str, num_questions: usize) -> Result<Vec<String>> {
        self.record(MockAICall::Feedback {
            query: query.to_string(),
        });

        Ok((1..=num_questions)
            .map(|i| format!("Question {i} about {query}?"))
            .collect())
    }
}

/// A mock web searcher for testing.
#[derive(Default)]
pub struct MockWebSearcher {
    /// Predefined results by query
    results: Arc<RwLock<HashMap<String, Vec<SearchResult>>>>,

    /// Queries that fail
    failing: Arc<RwLock<HashSet<String>>>,

    /// Queries searched, in call order
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockWebSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return these results when `query` is searched.
    pub fn with_results(self, query: impl Into<String>, results: Vec<SearchResult>) -> Self {
        self.results.write().unwrap().insert(query.into(), results);
        self
    }

    /// Make searches for `query` fail.
    pub fn failing_for(self, query: impl Into<String>) -> Self {
        self.failing.write().unwrap().insert(query.into());
        self
    }

    /// Get all searched queries.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl WebSearcher for MockWebSearcher {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        self.calls.write().unwrap().push(query.to_string());

        if self.failing.read().unwrap().contains(query) {
            return Err(ResearchError::Search {
                query: query.to_string(),
                reason: "mock search failure".into(),
            });
        }

        let results = self
            .results
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_else(|| {
                let slug: String = query
                    .chars()
                    .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
                    .collect();
                vec![SearchResult::new(format!("https://example.com/{slug}"))
                    .with_title(query)
                    .with_markdown(format!("Content about {query}"))]
            });
        Ok(results.into_iter().take(limit).collect())
    }
}
