//! Events written to a research stream.
//!
//! Each variant is one SSE frame: [`StreamEvent::kind`] is the `event:` name
//! and the serialized variant (which repeats the kind under `"type"`) is the
//! `data:` line.

use deep_research::ResearchProgress;
use serde::Serialize;

/// Message sent with `report_start`.
pub const REPORT_START_MESSAGE: &str = "Generating final report...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    Start {
        query: String,
        depth: u32,
        breadth: u32,
    },
    Progress(ResearchProgress),
    #[serde(rename_all = "camelCase")]
    Query {
        query: String,
        research_goal: String,
    },
    #[serde(rename_all = "camelCase")]
    Learning {
        learning: String,
        total_learnings: usize,
    },
    #[serde(rename_all = "camelCase")]
    Url { url: String, total_urls: usize },
    LearningsSummary {
        learnings: Vec<String>,
    },
    UrlsSummary {
        urls: Vec<String>,
    },
    ReportStart {
        message: String,
    },
    Report {
        report: String,
    },
    #[serde(rename_all = "camelCase")]
    Done {
        learnings_count: usize,
        urls_count: usize,
    },
    Error {
        message: String,
    },
}

impl StreamEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            StreamEvent::Start { .. } => "start",
            StreamEvent::Progress(_) => "progress",
            StreamEvent::Query { .. } => "query",
            StreamEvent::Learning { .. } => "learning",
            StreamEvent::Url { .. } => "url",
            StreamEvent::LearningsSummary { .. } => "learnings_summary",
            StreamEvent::UrlsSummary { .. } => "urls_summary",
            StreamEvent::ReportStart { .. } => "report_start",
            StreamEvent::Report { .. } => "report",
            StreamEvent::Done { .. } => "done",
            StreamEvent::Error { .. } => "error",
        }
    }

    /// `done` and `error` end the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Done { .. } | StreamEvent::Error { .. })
    }

    pub fn report_start() -> Self {
        StreamEvent::ReportStart {
            message: REPORT_START_MESSAGE.to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        StreamEvent::Error {
            message: message.into(),
        }
    }
}
