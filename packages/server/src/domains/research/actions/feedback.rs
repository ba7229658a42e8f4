//! Follow-up question action

use tracing::info;

use crate::domains::research::models::{FeedbackResponse, ResearchFailure};
use crate::kernel::ServerDeps;

/// Ask for clarifying questions about a research query.
pub async fn generate_feedback(
    deps: &ServerDeps,
    query: &str,
    num_questions: Option<usize>,
) -> Result<FeedbackResponse, ResearchFailure> {
    let questions = deps
        .report_writer
        .generate_feedback(query, num_questions)
        .await
        .map_err(ResearchFailure::feedback)?;

    info!(count = questions.len(), "Generated follow-up questions");
    Ok(FeedbackResponse { questions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{MockReportWriter, MockResearcher, TestDependencies};

    #[tokio::test]
    async fn test_limits_question_count() {
        let deps = TestDependencies::new(
            MockResearcher::new(),
            MockReportWriter::new().with_questions(&["Why?", "How?", "When?"]),
        );

        let response = generate_feedback(&deps.server_deps(), "topic", Some(2))
            .await
            .unwrap();

        assert_eq!(response.questions, vec!["Why?", "How?"]);
    }
}
