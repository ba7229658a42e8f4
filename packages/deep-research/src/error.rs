//! Typed errors for the research library.

use thiserror::Error;

/// Errors that can occur while researching or writing a report.
#[derive(Debug, Error)]
pub enum ResearchError {
    /// Configuration error (missing API key, invalid settings)
    #[error("config error: {0}")]
    Config(String),

    /// Network error talking to an upstream provider
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Upstream provider answered with a non-2xx status
    #[error("{provider} API error ({status}): {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// Upstream search reported an unsuccessful request
    #[error("search failed for {query:?}: {reason}")]
    Search { query: String, reason: String },

    /// The model answered with something we could not use
    #[error("unexpected model response: {0}")]
    InvalidResponse(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl ResearchError {
    /// Whether this error came from a request that ran out of time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ResearchError::Network(e) if e.is_timeout())
    }
}

impl From<reqwest::Error> for ResearchError {
    fn from(error: reqwest::Error) -> Self {
        ResearchError::Network(error)
    }
}

/// Result type alias for research operations.
pub type Result<T> = std::result::Result<T, ResearchError>;
