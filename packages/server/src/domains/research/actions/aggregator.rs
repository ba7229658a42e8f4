//! Deduplicates streamed learnings and URLs and reconciles them against the
//! final research outcome.

use deep_research::{ResearchEvent, ResearchOutcome};
use indexmap::IndexSet;

use crate::domains::research::events::StreamEvent;

/// Per-request record of every learning and URL already sent to the client.
#[derive(Debug, Default)]
pub struct EventAggregator {
    learnings: IndexSet<String>,
    urls: IndexSet<String>,
}

impl EventAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a learning. Returns the event to emit if it was not seen before.
    pub fn observe_learning(&mut self, learning: String) -> Option<StreamEvent> {
        if self.learnings.contains(&learning) {
            return None;
        }
        self.learnings.insert(learning.clone());
        Some(StreamEvent::Learning {
            learning,
            total_learnings: self.learnings.len(),
        })
    }

    /// Record a URL. Returns the event to emit if it was not seen before.
    pub fn observe_url(&mut self, url: String) -> Option<StreamEvent> {
        if self.urls.contains(&url) {
            return None;
        }
        self.urls.insert(url.clone());
        Some(StreamEvent::Url {
            url,
            total_urls: self.urls.len(),
        })
    }

    /// Map a collaborator event to the stream event to emit, if any.
    ///
    /// Progress and query events pass through untouched.
    pub fn observe(&mut self, event: ResearchEvent) -> Option<StreamEvent> {
        match event {
            ResearchEvent::Progress(progress) => Some(StreamEvent::Progress(progress)),
            ResearchEvent::Query {
                query,
                research_goal,
            } => Some(StreamEvent::Query {
                query,
                research_goal,
            }),
            ResearchEvent::Learning(learning) => self.observe_learning(learning),
            ResearchEvent::Url(url) => self.observe_url(url),
        }
    }

    /// Record every outcome value that was never streamed.
    ///
    /// Returns the missing `learning` events, then the missing `url` events,
    /// each in the outcome's order.
    pub fn reconcile(&mut self, outcome: &ResearchOutcome) -> Vec<StreamEvent> {
        let learnings = outcome
            .learnings
            .iter()
            .filter_map(|learning| self.observe_learning(learning.clone()))
            .collect::<Vec<_>>();
        let urls = outcome
            .visited_urls
            .iter()
            .filter_map(|url| self.observe_url(url.clone()))
            .collect::<Vec<_>>();

        learnings.into_iter().chain(urls).collect()
    }

    pub fn learnings(&self) -> Vec<String> {
        self.learnings.iter().cloned().collect()
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.iter().cloned().collect()
    }

    pub fn learnings_count(&self) -> usize {
        self.learnings.len()
    }

    pub fn urls_count(&self) -> usize {
        self.urls.len()
    }
}
