//! Typed event channel for early delivery of partial research results.
//!
//! The research pipeline pushes [`ResearchEvent`]s into a
//! [`ResearchEventSender`] while it runs. Delivery is best-effort: the final
//! [`ResearchOutcome`](crate::ResearchOutcome) stays authoritative and may
//! contain values that were never sent as events.
//!
//! ```rust,ignore
//! let (events, mut rx) = ResearchEventSender::channel();
//! let outcome = researcher.research(params, events).await?;
//! while let Ok(event) = rx.try_recv() { /* ... */ }
//! ```

use serde::Serialize;
use tokio::sync::mpsc;

/// Snapshot of how far a research run has progressed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchProgress {
    pub current_depth: u32,
    pub total_depth: u32,
    pub current_breadth: u32,
    pub total_breadth: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_query: Option<String>,
    pub total_queries: u32,
    pub completed_queries: u32,
}

/// One unit of partial output from a research run.
#[derive(Debug, Clone, PartialEq)]
pub enum ResearchEvent {
    Progress(ResearchProgress),
    Query {
        query: String,
        research_goal: String,
    },
    Learning(String),
    Url(String),
}

/// Write half of the research event channel.
///
/// Sending never blocks and never fails the caller: a disabled sender, or one
/// whose receiver is gone, silently drops events.
#[derive(Debug, Clone, Default)]
pub struct ResearchEventSender {
    tx: Option<mpsc::UnboundedSender<ResearchEvent>>,
}

impl ResearchEventSender {
    /// Create a connected sender and its receiver.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ResearchEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// A sender that drops everything (used when nobody is listening).
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn send(&self, event: ResearchEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }

    pub fn progress(&self, progress: &ResearchProgress) {
        self.send(ResearchEvent::Progress(progress.clone()));
    }

    pub fn query(&self, query: impl Into<String>, research_goal: impl Into<String>) {
        self.send(ResearchEvent::Query {
            query: query.into(),
            research_goal: research_goal.into(),
        });
    }

    pub fn learning(&self, learning: impl Into<String>) {
        self.send(ResearchEvent::Learning(learning.into()));
    }

    pub fn url(&self, url: impl Into<String>) {
        self.send(ResearchEvent::Url(url.into()));
    }
}
