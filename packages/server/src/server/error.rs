//! HTTP error responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::domains::research::{FailureKind, ResearchFailure, ValidationError};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected before any work started (400).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A collaborator failed while handling the request (500).
    #[error(transparent)]
    Failure(#[from] ResearchFailure),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let error = match rejection {
            // No JSON body at all, so there is no query either
            JsonRejection::MissingJsonContentType(_) => ValidationError::MissingQuery,
            other => ValidationError::MalformedBody(other.body_text()),
        };
        ApiError::Validation(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(e) => {
                tracing::debug!(error = %e, "Rejected request");
                (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))).into_response()
            }
            ApiError::Failure(failure) => {
                match &failure.cause {
                    Some(cause) => tracing::error!(kind = %failure.kind, error = ?cause, "Request failed"),
                    None => tracing::error!(kind = %failure.kind, message = %failure.message, "Request failed"),
                }
                let summary = match failure.kind {
                    FailureKind::Feedback => "An error occurred while generating feedback",
                    _ => "An error occurred during research",
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": summary, "message": failure.message })),
                )
                    .into_response()
            }
        }
    }
}
