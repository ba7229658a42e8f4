//! Recursive web research and report synthesis.
//!
//! Given a topic, [`DeepResearch`] asks a model for search queries, searches
//! the web, distills learnings from the results, and recurses on follow-up
//! questions. [`ReportWriter`] turns the learnings into a markdown report.
//!
//! Partial results stream out through a typed [`ResearchEventSender`] while
//! the run is in progress; the returned [`ResearchOutcome`] is authoritative.
//!
//! ```rust,ignore
//! use deep_research::{ai::OpenAI, searchers::FirecrawlSearcher, DeepResearch, ReportWriter};
//!
//! let ai = Arc::new(OpenAI::new(key).with_model("o3-mini"));
//! let searcher = Arc::new(FirecrawlSearcher::new(Some(firecrawl_key))?);
//! let engine = DeepResearch::new(ai.clone(), searcher).with_concurrency(2);
//!
//! let (events, mut rx) = ResearchEventSender::channel();
//! let outcome = engine.research(ResearchParams::new("topic", 3, 2), events).await?;
//! let report = ReportWriter::new(ai)
//!     .write_final_report("topic", &outcome.learnings, &outcome.visited_urls)
//!     .await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (ResearchAI, WebSearcher)
//! - [`pipeline`] - Research and report orchestration
//! - [`ai`] - OpenAI implementation of `ResearchAI`
//! - [`searchers`] - Firecrawl and Tavily implementations of `WebSearcher`
//! - [`testing`] - Mock implementations for testing

pub mod ai;
pub mod error;
pub mod events;
pub mod pipeline;
pub mod prompts;
pub mod searchers;
pub mod testing;
pub mod text;
pub mod traits;
pub mod types;

pub use error::{ResearchError, Result};
pub use events::{ResearchEvent, ResearchEventSender, ResearchProgress};
pub use pipeline::{DeepResearch, ReportWriter};
pub use traits::{ResearchAI, SearchResult, WebSearcher};
pub use types::{ResearchOutcome, ResearchParams, SerpAnalysis, SerpQuery};
