//! Recursive breadth/depth research.
//!
//! Each level asks the model for `breadth` search queries, runs them with
//! bounded concurrency, distills learnings from the results, and recurses on
//! the follow-up questions with half the breadth and one less depth.
//!
//! Branches run as futures inside the caller's task, so dropping the
//! returned future cancels every in-flight search and model call.

use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use futures::stream::{self, StreamExt};
use futures::FutureExt;
use tracing::{debug, error, info, warn};

use crate::error::Result;
use crate::events::{ResearchEventSender, ResearchProgress};
use crate::text::{trim_to_budget, RESULT_CONTENT_BUDGET};
use crate::traits::{ResearchAI, WebSearcher};
use crate::types::{ResearchOutcome, ResearchParams, SerpQuery};

const DEFAULT_CONCURRENCY: usize = 2;
const RESULTS_PER_QUERY: usize = 5;
const LEARNINGS_PER_QUERY: usize = 3;

/// Research engine combining a [`ResearchAI`] with a [`WebSearcher`].
#[derive(Clone)]
pub struct DeepResearch {
    ai: Arc<dyn ResearchAI>,
    searcher: Arc<dyn WebSearcher>,
    concurrency: usize,
}

/// Shared progress for one run; every update is also sent as an event.
struct ProgressTracker {
    progress: Mutex<ResearchProgress>,
    events: ResearchEventSender,
}

impl ProgressTracker {
    fn new(params: &ResearchParams, events: ResearchEventSender) -> Self {
        Self {
            progress: Mutex::new(ResearchProgress {
                current_depth: params.depth,
                total_depth: params.depth,
                current_breadth: params.breadth,
                total_breadth: params.breadth,
                ..Default::default()
            }),
            events,
        }
    }

    fn update(&self, apply: impl FnOnce(&mut ResearchProgress)) {
        let snapshot = {
            let mut progress = self
                .progress
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            apply(&mut progress);
            progress.clone()
        };
        self.events.progress(&snapshot);
    }
}

impl DeepResearch {
    pub fn new(ai: Arc<dyn ResearchAI>, searcher: Arc<dyn WebSearcher>) -> Self {
        Self {
            ai,
            searcher,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Maximum searches in flight per level (default: 2).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Run research to completion.
    ///
    /// Queries, URLs, learnings and progress are sent to `events` as they are
    /// found. The returned outcome is de-duplicated and includes everything.
    pub async fn research(
        &self,
        params: ResearchParams,
        events: ResearchEventSender,
    ) -> Result<ResearchOutcome> {
        info!(
            query = %params.query,
            breadth = params.breadth,
            depth = params.depth,
            "Starting deep research"
        );

        let tracker = ProgressTracker::new(&params, events);
        let outcome = self
            .explore(
                params.query,
                params.breadth,
                params.depth,
                Vec::new(),
                Vec::new(),
                &tracker,
            )
            .await?;

        info!(
            learnings = outcome.learnings.len(),
            urls = outcome.visited_urls.len(),
            "Deep research complete"
        );
        Ok(outcome)
    }

    fn explore<'a>(
        &'a self,
        query: String,
        breadth: u32,
        depth: u32,
        learnings: Vec<String>,
        visited_urls: Vec<String>,
        tracker: &'a ProgressTracker,
    ) -> BoxFuture<'a, Result<ResearchOutcome>> {
        async move {
            let serp_queries = self
                .ai
                .generate_serp_queries(&query, &learnings, breadth as usize)
                .await?;

            tracker.update(|p| {
                p.current_depth = depth;
                p.current_breadth = breadth;
                p.total_queries += serp_queries.len() as u32;
                p.current_query = serp_queries.first().map(|q| q.query.clone());
            });

            let outcomes: Vec<ResearchOutcome> = stream::iter(serp_queries)
                .map(|serp_query| {
                    self.explore_query(serp_query, breadth, depth, &learnings, &visited_urls, tracker)
                })
                .buffer_unordered(self.concurrency)
                .collect()
                .await;

            Ok(ResearchOutcome::merge(outcomes))
        }
        .boxed()
    }

    /// Run one SERP query and everything below it. Failures are contained to
    /// the branch, which then contributes nothing.
    async fn explore_query(
        &self,
        serp_query: SerpQuery,
        breadth: u32,
        depth: u32,
        learnings: &[String],
        visited_urls: &[String],
        tracker: &ProgressTracker,
    ) -> ResearchOutcome {
        let query = serp_query.query.clone();
        match self
            .run_query(serp_query, breadth, depth, learnings, visited_urls, tracker)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) if e.is_timeout() => {
                warn!(query = %query, error = %e, "Timeout running research query");
                ResearchOutcome::default()
            }
            Err(e) => {
                error!(query = %query, error = %e, "Error running research query");
                ResearchOutcome::default()
            }
        }
    }

    async fn run_query(
        &self,
        serp_query: SerpQuery,
        breadth: u32,
        depth: u32,
        learnings: &[String],
        visited_urls: &[String],
        tracker: &ProgressTracker,
    ) -> Result<ResearchOutcome> {
        tracker.events.query(&serp_query.query, &serp_query.research_goal);

        let results = self
            .searcher
            .search(&serp_query.query, RESULTS_PER_QUERY)
            .await?;

        let new_urls: Vec<String> = results.iter().map(|r| r.url.clone()).collect();
        for url in &new_urls {
            tracker.events.url(url);
        }

        let contents: Vec<String> = results
            .iter()
            .filter_map(|r| r.markdown.as_deref())
            .filter(|markdown| !markdown.trim().is_empty())
            .map(|markdown| trim_to_budget(markdown, RESULT_CONTENT_BUDGET).to_string())
            .collect();

        let new_breadth = breadth.div_ceil(2);
        let new_depth = depth.saturating_sub(1);

        debug!(
            query = %serp_query.query,
            results = results.len(),
            contents = contents.len(),
            "Processing search results"
        );
        let analysis = self
            .ai
            .process_serp_result(
                &serp_query.query,
                &contents,
                LEARNINGS_PER_QUERY,
                new_breadth as usize,
            )
            .await?;

        for learning in &analysis.learnings {
            tracker.events.learning(learning);
        }

        let all_learnings: Vec<String> = learnings
            .iter()
            .cloned()
            .chain(analysis.learnings)
            .collect();
        let all_urls: Vec<String> = visited_urls.iter().cloned().chain(new_urls).collect();

        if new_depth == 0 {
            tracker.update(|p| {
                p.current_depth = 0;
                p.completed_queries += 1;
                p.current_query = Some(serp_query.query.clone());
            });
            return Ok(ResearchOutcome::new(all_learnings, all_urls));
        }

        debug!(
            breadth = new_breadth,
            depth = new_depth,
            "Researching deeper"
        );
        tracker.update(|p| {
            p.current_depth = new_depth;
            p.current_breadth = new_breadth;
            p.completed_queries += 1;
            p.current_query = Some(serp_query.query.clone());
        });

        let directions: String = analysis
            .follow_up_questions
            .iter()
            .map(|q| format!("\n{q}"))
            .collect();
        let next_query = format!(
            "Previous research goal: {}\nFollow-up research directions: {}",
            serp_query.research_goal, directions
        )
        .trim()
        .to_string();

        self.explore(
            next_query,
            new_breadth,
            new_depth,
            all_learnings,
            all_urls,
            tracker,
        )
        .await
    }
}
