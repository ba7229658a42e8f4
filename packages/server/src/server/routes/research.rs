//! Research endpoints.
//!
//! POST /api/research/stream - SSE stream of research progress and the report
//! POST /api/research        - same pipeline, one JSON response

use std::convert::Infallible;

use axum::{
    extract::Extension,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::Stream;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::domains::research::{run_research, stream_research, ResearchRequest, ResearchResponse};
use crate::kernel::sse;
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;
use crate::server::extract::JsonBody;

/// SSE stream handler.
///
/// Validation failures are answered with a plain 400 before any stream is
/// opened. After that the response is always a stream, and failures arrive as
/// a terminal `error` event.
pub async fn research_stream_handler(
    Extension(state): Extension<AxumAppState>,
    JsonBody(request): JsonBody<ResearchRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let request = request.validate()?;

    let request_id = Uuid::new_v4();
    let (emitter, rx) = sse::channel();
    let deps = state.server_deps.as_ref().clone();

    // Runs detached from the handler; dropping the response body closes the
    // channel, which the action watches for.
    tokio::spawn(
        stream_research(deps, request, emitter)
            .instrument(info_span!("research_stream", %request_id)),
    );

    Ok(Sse::new(sse::into_stream(rx)).keep_alive(KeepAlive::default()))
}

/// Synchronous research handler.
pub async fn research_handler(
    Extension(state): Extension<AxumAppState>,
    JsonBody(request): JsonBody<ResearchRequest>,
) -> Result<Json<ResearchResponse>, ApiError> {
    let request = request.validate()?;

    let request_id = Uuid::new_v4();
    let response = run_research(&state.server_deps, &request)
        .instrument(info_span!("research", %request_id))
        .await?;

    Ok(Json(response))
}
