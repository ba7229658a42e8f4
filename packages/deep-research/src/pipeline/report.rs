//! Final report synthesis.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::Result;
use crate::text::trim_to_budget;
use crate::traits::ResearchAI;

/// Default character budget for the learnings block of a report prompt.
const DEFAULT_CONTEXT_SIZE: usize = 128_000;

const DEFAULT_FEEDBACK_QUESTIONS: usize = 3;

/// Writes reports (and clarifying questions) from research output.
#[derive(Clone)]
pub struct ReportWriter {
    ai: Arc<dyn ResearchAI>,
    context_size: usize,
}

impl ReportWriter {
    pub fn new(ai: Arc<dyn ResearchAI>) -> Self {
        Self {
            ai,
            context_size: DEFAULT_CONTEXT_SIZE,
        }
    }

    /// Character budget for learnings sent to the model.
    pub fn with_context_size(mut self, context_size: usize) -> Self {
        self.context_size = context_size;
        self
    }

    /// Write a markdown report for `prompt`, ending with a list of sources.
    pub async fn write_final_report(
        &self,
        prompt: &str,
        learnings: &[String],
        visited_urls: &[String],
    ) -> Result<String> {
        let tagged = learnings
            .iter()
            .map(|learning| format!("<learning>\n{learning}\n</learning>"))
            .collect::<Vec<_>>()
            .join("\n");
        let tagged = trim_to_budget(&tagged, self.context_size);

        info!(
            learnings = learnings.len(),
            sources = visited_urls.len(),
            "Writing final report"
        );
        let report = self.ai.write_report(prompt, tagged).await?;
        debug!(chars = report.len(), "Report written");

        Ok(format!("{report}{}", sources_section(visited_urls)))
    }

    /// Clarifying questions for a research query (default: 3).
    pub async fn generate_feedback(
        &self,
        query: &str,
        num_questions: Option<usize>,
    ) -> Result<Vec<String>> {
        let num_questions = num_questions.unwrap_or(DEFAULT_FEEDBACK_QUESTIONS);
        let mut questions = self.ai.generate_feedback(query, num_questions).await?;
        questions.truncate(num_questions);
        Ok(questions)
    }
}

fn sources_section(visited_urls: &[String]) -> String {
    let sources = visited_urls
        .iter()
        .map(|url| format!("- {url}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("\n\n## Sources\n\n{sources}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockAI, MockAICall};
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_report_lists_sources() {
        let ai = Arc::new(MockAI::new().with_report("# Findings"));
        let writer = ReportWriter::new(ai.clone());

        let report = writer
            .write_final_report(
                "rust",
                &["fast".into()],
                &["https://a.example".into(), "https://b.example".into()],
            )
            .await
            .unwrap();

        assert_eq!(
            report,
            "# Findings\n\n## Sources\n\n- https://a.example\n- https://b.example"
        );
        assert_eq!(
            ai.calls(),
            vec![MockAICall::WriteReport {
                prompt: "rust".into()
            }]
        );
    }

    #[tokio::test]
    async fn test_learnings_are_tagged() {
        let writer = ReportWriter::new(Arc::new(MockAI::new()));
        let report = writer
            .write_final_report("topic", &["one".into(), "two".into()], &[])
            .await
            .unwrap();

        assert!(report.contains("<learning>\none\n</learning>\n<learning>\ntwo\n</learning>"));
    }

    #[tokio::test]
    async fn test_feedback_defaults_to_three_questions() {
        let writer = ReportWriter::new(Arc::new(MockAI::new()));
        let questions = assert_ok!(writer.generate_feedback("topic", None).await);
        assert_eq!(questions.len(), 3);

        let questions = assert_ok!(writer.generate_feedback("topic", Some(1)).await);
        assert_eq!(questions, vec!["Question 1 about topic?"]);
    }
}
