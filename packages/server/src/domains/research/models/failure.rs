use std::fmt;

use thiserror::Error;

/// Which stage of a research request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Research,
    Report,
    Feedback,
    Internal,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            FailureKind::Research => "research",
            FailureKind::Report => "report",
            FailureKind::Feedback => "feedback",
            FailureKind::Internal => "internal",
        };
        f.write_str(kind)
    }
}

/// An execution failure, normalized at the request boundary.
///
/// `message` is what the client sees; `cause` keeps the full error chain for
/// logging.
#[derive(Debug, Error)]
#[error("{kind} failed: {message}")]
pub struct ResearchFailure {
    pub kind: FailureKind,
    pub message: String,
    pub cause: Option<anyhow::Error>,
}

impl ResearchFailure {
    pub fn research(cause: anyhow::Error) -> Self {
        Self::from_cause(FailureKind::Research, cause)
    }

    pub fn report(cause: anyhow::Error) -> Self {
        Self::from_cause(FailureKind::Report, cause)
    }

    pub fn feedback(cause: anyhow::Error) -> Self {
        Self::from_cause(FailureKind::Feedback, cause)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Internal,
            message: message.into(),
            cause: None,
        }
    }

    fn from_cause(kind: FailureKind, cause: anyhow::Error) -> Self {
        Self {
            kind,
            message: cause.to_string(),
            cause: Some(cause),
        }
    }
}
