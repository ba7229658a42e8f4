//! Research inputs and outputs.

use indexmap::IndexSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for one research run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchParams {
    pub query: String,
    /// Number of search queries generated per level.
    pub breadth: u32,
    /// Number of recursive levels.
    pub depth: u32,
}

impl ResearchParams {
    pub fn new(query: impl Into<String>, breadth: u32, depth: u32) -> Self {
        Self {
            query: query.into(),
            breadth,
            depth,
        }
    }
}

/// Authoritative result of a research run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchOutcome {
    pub learnings: Vec<String>,
    pub visited_urls: Vec<String>,
}

impl ResearchOutcome {
    pub fn new(learnings: Vec<String>, visited_urls: Vec<String>) -> Self {
        Self {
            learnings,
            visited_urls,
        }
    }

    /// Merge several branch outcomes, keeping the first occurrence of each value.
    pub fn merge(outcomes: impl IntoIterator<Item = ResearchOutcome>) -> Self {
        let mut learnings = IndexSet::new();
        let mut visited_urls = IndexSet::new();
        for outcome in outcomes {
            learnings.extend(outcome.learnings);
            visited_urls.extend(outcome.visited_urls);
        }
        Self {
            learnings: learnings.into_iter().collect(),
            visited_urls: visited_urls.into_iter().collect(),
        }
    }
}

/// A search query proposed by the model, with what it is meant to find out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SerpQuery {
    /// The SERP query
    pub query: String,
    /// First talk about the goal of the research that this query is meant to
    /// accomplish, then go deeper into how to advance the research once the
    /// results are found, mention additional research directions. Be as
    /// specific as possible, especially for additional research directions.
    pub research_goal: String,
}

/// Learnings and follow-up directions distilled from one set of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SerpAnalysis {
    /// List of learnings
    pub learnings: Vec<String>,
    /// List of follow-up questions to research the topic further
    pub follow_up_questions: Vec<String>,
}
