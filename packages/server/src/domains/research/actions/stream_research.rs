//! Streaming research action - drives one research request over SSE
//!
//! Order on the wire: `start`, interleaved `progress`/`query`/`learning`/`url`,
//! reconciliation gaps, `learnings_summary`, `urls_summary`, `report_start`,
//! `report`, then exactly one of `done` or `error`.
//!
//! If the client goes away, the in-flight collaborator future is dropped at
//! its next suspension point and nothing more is written.

use std::panic::AssertUnwindSafe;

use deep_research::ResearchEventSender;
use futures::FutureExt;
use tracing::{debug, error, info};

use crate::domains::research::actions::aggregator::EventAggregator;
use crate::domains::research::events::StreamEvent;
use crate::domains::research::models::{ResearchFailure, ValidatedRequest};
use crate::kernel::{ServerDeps, SseEmitter};

/// How a stream ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamEnd {
    Completed {
        learnings_count: usize,
        urls_count: usize,
    },
    Disconnected,
}

fn emit(emitter: &mut SseEmitter, event: &StreamEvent) {
    emitter.emit(event.kind(), event);
}

/// Run research and report generation, writing every event to `emitter`.
///
/// Consumes the emitter: the stream is closed when this returns.
pub async fn stream_research(deps: ServerDeps, request: ValidatedRequest, mut emitter: SseEmitter) {
    info!(query = %request.query, depth = request.depth, breadth = request.breadth, "Starting research stream");

    let result = AssertUnwindSafe(drive(&deps, &request, &mut emitter))
        .catch_unwind()
        .await
        .unwrap_or_else(|_| Err(ResearchFailure::internal("Research task panicked")));

    match result {
        Ok(StreamEnd::Completed {
            learnings_count,
            urls_count,
        }) => {
            info!(learnings_count, urls_count, "Research stream complete");
            let done = StreamEvent::Done {
                learnings_count,
                urls_count,
            };
            emitter.finish(done.kind(), &done);
        }
        Ok(StreamEnd::Disconnected) => {
            info!(frames_sent = emitter.frames_sent(), "Client disconnected, research cancelled");
        }
        Err(failure) => {
            match &failure.cause {
                Some(cause) => error!(kind = %failure.kind, error = ?cause, "Research stream failed"),
                None => error!(kind = %failure.kind, message = %failure.message, "Research stream failed"),
            }
            let event = StreamEvent::error(failure.message);
            emitter.finish(event.kind(), &event);
        }
    }
}

async fn drive(
    deps: &ServerDeps,
    request: &ValidatedRequest,
    emitter: &mut SseEmitter,
) -> Result<StreamEnd, ResearchFailure> {
    emit(
        emitter,
        &StreamEvent::Start {
            query: request.query.clone(),
            depth: request.depth,
            breadth: request.breadth,
        },
    );

    let closed = emitter.closed();
    tokio::pin!(closed);

    let mut aggregator = EventAggregator::new();
    let (events, mut rx) = ResearchEventSender::channel();
    let research = deps.researcher.research(request.params(), events);
    tokio::pin!(research);

    let outcome = loop {
        tokio::select! {
            biased;

            _ = &mut closed => return Ok(StreamEnd::Disconnected),

            Some(event) = rx.recv() => {
                if let Some(event) = aggregator.observe(event) {
                    emit(emitter, &event);
                }
            }

            result = &mut research => break result.map_err(ResearchFailure::research)?,
        }
    };

    // Events sent just before the result resolved
    while let Ok(event) = rx.try_recv() {
        if let Some(event) = aggregator.observe(event) {
            emit(emitter, &event);
        }
    }

    let gaps = aggregator.reconcile(&outcome);
    if !gaps.is_empty() {
        debug!(count = gaps.len(), "Emitting values missed during streaming");
    }
    for event in &gaps {
        emit(emitter, event);
    }

    let learnings = aggregator.learnings();
    let urls = aggregator.urls();
    emit(
        emitter,
        &StreamEvent::LearningsSummary {
            learnings: learnings.clone(),
        },
    );
    emit(emitter, &StreamEvent::UrlsSummary { urls: urls.clone() });

    if emitter.is_closed() {
        return Ok(StreamEnd::Disconnected);
    }

    emit(emitter, &StreamEvent::report_start());
    info!(
        learnings = learnings.len(),
        urls = urls.len(),
        "Research complete, generating report"
    );

    let report = tokio::select! {
        biased;

        _ = &mut closed => return Ok(StreamEnd::Disconnected),

        report = deps.report_writer.write_report(&request.query, &learnings, &urls) => {
            report.map_err(ResearchFailure::report)?
        }
    };
    emit(emitter, &StreamEvent::Report { report });

    Ok(StreamEnd::Completed {
        learnings_count: aggregator.learnings_count(),
        urls_count: aggregator.urls_count(),
    })
}
