//! Core trait abstractions.
//!
//! - [`ResearchAI`] - LLM operations the pipeline needs
//! - [`WebSearcher`] - Open-web search with page content

pub mod ai;
pub mod searcher;

pub use ai::ResearchAI;
pub use searcher::{SearchResult, WebSearcher};
