//! Synchronous research action - same pipeline, one JSON response

use deep_research::ResearchEventSender;
use tracing::info;

use crate::domains::research::actions::aggregator::EventAggregator;
use crate::domains::research::models::{ResearchFailure, ResearchResponse, ValidatedRequest};
use crate::kernel::ServerDeps;

/// Run research and report generation to completion.
///
/// Nobody is listening for partial results, so the collaborator gets a
/// disabled event sender.
pub async fn run_research(
    deps: &ServerDeps,
    request: &ValidatedRequest,
) -> Result<ResearchResponse, ResearchFailure> {
    info!(query = %request.query, depth = request.depth, breadth = request.breadth, "Starting research");

    let outcome = deps
        .researcher
        .research(request.params(), ResearchEventSender::disabled())
        .await
        .map_err(ResearchFailure::research)?;

    let mut aggregator = EventAggregator::new();
    aggregator.reconcile(&outcome);
    let learnings = aggregator.learnings();
    let visited_urls = aggregator.urls();

    let report = deps
        .report_writer
        .write_report(&request.query, &learnings, &visited_urls)
        .await
        .map_err(ResearchFailure::report)?;

    info!(
        learnings = learnings.len(),
        urls = visited_urls.len(),
        "Research complete"
    );

    Ok(ResearchResponse {
        success: true,
        report,
        learnings,
        visited_urls,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::research::models::FailureKind;
    use crate::kernel::{MockReportWriter, MockResearcher, TestDependencies};
    use tokio_test::{assert_err, assert_ok};

    fn request() -> ValidatedRequest {
        ValidatedRequest {
            query: "topic".into(),
            depth: 1,
            breadth: 2,
        }
    }

    #[tokio::test]
    async fn test_returns_report_and_deduplicated_sets() {
        let deps = TestDependencies::new(
            MockResearcher::new().with_outcome(&["L1", "L2", "L1"], &["https://a", "https://a"]),
            MockReportWriter::new().with_report("# Report body"),
        );

        let response = assert_ok!(run_research(&deps.server_deps(), &request()).await);

        assert_eq!(
            response,
            ResearchResponse {
                success: true,
                report: "# Report body".into(),
                learnings: vec!["L1".into(), "L2".into()],
                visited_urls: vec!["https://a".into()],
            }
        );
        assert_eq!(deps.researcher.calls()[0].breadth, 2);
    }

    #[tokio::test]
    async fn test_research_failure_is_tagged() {
        let deps = TestDependencies::new(
            MockResearcher::new().failing_with("boom"),
            MockReportWriter::new(),
        );

        let failure = assert_err!(run_research(&deps.server_deps(), &request()).await);

        assert_eq!(failure.kind, FailureKind::Research);
        assert_eq!(failure.message, "boom");
        assert!(deps.report_writer.calls().is_empty());
    }

    #[tokio::test]
    async fn test_report_failure_is_tagged() {
        let deps = TestDependencies::new(
            MockResearcher::new(),
            MockReportWriter::new().failing_with("too long"),
        );

        let failure = assert_err!(run_research(&deps.server_deps(), &request()).await);

        assert_eq!(failure.kind, FailureKind::Report);
    }
}
