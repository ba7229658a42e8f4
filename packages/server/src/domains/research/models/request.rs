use deep_research::ResearchParams;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Depth and breadth used when the client leaves them out.
pub const DEFAULT_DEPTH: u32 = 3;
pub const DEFAULT_BREADTH: u32 = 3;

/// Request validation errors, surfaced as HTTP 400 before any work starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Query is required")]
    MissingQuery,

    #[error("{field} must be a positive integer")]
    NotPositive { field: &'static str },

    #[error("Invalid request body: {0}")]
    MalformedBody(String),
}

/// Inbound research parameters, as sent by the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResearchRequest {
    pub query: Option<String>,
    pub depth: Option<i64>,
    pub breadth: Option<i64>,
}

/// Research parameters that passed validation, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedRequest {
    pub query: String,
    pub depth: u32,
    pub breadth: u32,
}

impl ResearchRequest {
    pub fn validate(self) -> Result<ValidatedRequest, ValidationError> {
        let query = required_query(self.query)?;
        Ok(ValidatedRequest {
            query,
            depth: positive("depth", self.depth, DEFAULT_DEPTH)?,
            breadth: positive("breadth", self.breadth, DEFAULT_BREADTH)?,
        })
    }
}

impl ValidatedRequest {
    pub fn params(&self) -> ResearchParams {
        ResearchParams::new(self.query.clone(), self.breadth, self.depth)
    }
}

/// Inbound request for clarifying questions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub query: Option<String>,
    pub num_questions: Option<i64>,
}

impl FeedbackRequest {
    /// Returns the trimmed query and the optional question count.
    pub fn validate(self) -> Result<(String, Option<usize>), ValidationError> {
        let query = required_query(self.query)?;
        let num_questions = self
            .num_questions
            .map(|n| positive("numQuestions", Some(n), 0).map(|n| n as usize))
            .transpose()?;
        Ok((query, num_questions))
    }
}

fn required_query(query: Option<String>) -> Result<String, ValidationError> {
    query
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .ok_or(ValidationError::MissingQuery)
}

fn positive(field: &'static str, value: Option<i64>, default: u32) -> Result<u32, ValidationError> {
    match value {
        None => Ok(default),
        Some(n) if n > 0 => u32::try_from(n).map_err(|_| ValidationError::NotPositive { field }),
        Some(_) => Err(ValidationError::NotPositive { field }),
    }
}
