//! POST /api/feedback - clarifying questions for a research query

use axum::{
    extract::Extension,
    Json,
};

use crate::domains::research::{generate_feedback, FeedbackRequest, FeedbackResponse};
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;
use crate::server::extract::JsonBody;

pub async fn feedback_handler(
    Extension(state): Extension<AxumAppState>,
    JsonBody(request): JsonBody<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let (query, num_questions) = request.validate()?;

    let response = generate_feedback(&state.server_deps, &query, num_questions).await?;
    Ok(Json(response))
}
