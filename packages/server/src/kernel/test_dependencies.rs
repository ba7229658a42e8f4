// TestDependencies - mock collaborators for testing
//
// Scripted implementations of the collaborator traits that record how they
// were called, so tests can assert on orchestration without network access.

use anyhow::Result;
use async_trait::async_trait;
use deep_research::{ResearchEvent, ResearchEventSender, ResearchOutcome, ResearchParams};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::{BaseReportWriter, BaseResearcher, ServerDeps};

// =============================================================================
// Mock Researcher
// =============================================================================

#[derive(Debug, Clone)]
enum ResearchBehavior {
    Succeed(ResearchOutcome),
    Fail(String),
    /// Never resolves; used to observe cancellation.
    Hang,
}

pub struct MockResearcher {
    events: Vec<ResearchEvent>,
    behavior: ResearchBehavior,
    calls: Arc<Mutex<Vec<ResearchParams>>>,
    cancelled: Arc<AtomicBool>,
}

impl MockResearcher {
    /// Resolves with an empty outcome and sends nothing.
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            behavior: ResearchBehavior::Succeed(ResearchOutcome::default()),
            calls: Arc::new(Mutex::new(Vec::new())),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Send these events, in order, before resolving.
    pub fn with_events(mut self, events: Vec<ResearchEvent>) -> Self {
        self.events = events;
        self
    }

    /// Resolve with this outcome.
    pub fn with_outcome(mut self, learnings: &[&str], visited_urls: &[&str]) -> Self {
        self.behavior = ResearchBehavior::Succeed(ResearchOutcome::new(
            learnings.iter().map(|s| s.to_string()).collect(),
            visited_urls.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    /// Fail with this message after sending the scripted events.
    pub fn failing_with(mut self, message: impl Into<String>) -> Self {
        self.behavior = ResearchBehavior::Fail(message.into());
        self
    }

    /// Send the scripted events, then never resolve.
    pub fn hanging(mut self) -> Self {
        self.behavior = ResearchBehavior::Hang;
        self
    }

    /// Parameters of every call, in order.
    pub fn calls(&self) -> Vec<ResearchParams> {
        self.calls.lock().unwrap().clone()
    }

    /// Whether an in-flight call was dropped before resolving.
    pub fn was_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Default for MockResearcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Flags cancellation if dropped while still armed.
struct CancelGuard {
    flag: Arc<AtomicBool>,
    armed: bool,
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        if self.armed {
            self.flag.store(true, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl BaseResearcher for MockResearcher {
    async fn research(
        &self,
        params: ResearchParams,
        events: ResearchEventSender,
    ) -> Result<ResearchOutcome> {
        self.calls.lock().unwrap().push(params);
        let mut guard = CancelGuard {
            flag: self.cancelled.clone(),
            armed: true,
        };

        for event in &self.events {
            events.send(event.clone());
            // Let the consumer observe events before the result
            tokio::task::yield_now().await;
        }

        let result = match &self.behavior {
            ResearchBehavior::Succeed(outcome) => Ok(outcome.clone()),
            ResearchBehavior::Fail(message) => Err(anyhow::anyhow!("{}", message)),
            ResearchBehavior::Hang => {
                std::future::pending::<()>().await;
                unreachable!("pending never resolves")
            }
        };
        guard.armed = false;
        result
    }
}

// =============================================================================
// Mock Report Writer
// =============================================================================

/// Arguments captured from a report call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportCallArgs {
    pub prompt: String,
    pub learnings: Vec<String>,
    pub visited_urls: Vec<String>,
}

pub struct MockReportWriter {
    report: std::result::Result<String, String>,
    questions: Vec<String>,
    calls: Arc<Mutex<Vec<ReportCallArgs>>>,
}

impl MockReportWriter {
    pub fn new() -> Self {
        Self {
            report: Ok("# Report".to_string()),
            questions: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_report(mut self, report: impl Into<String>) -> Self {
        self.report = Ok(report.into());
        self
    }

    pub fn failing_with(mut self, message: impl Into<String>) -> Self {
        self.report = Err(message.into());
        self
    }

    pub fn with_questions(mut self, questions: &[&str]) -> Self {
        self.questions = questions.iter().map(|q| q.to_string()).collect();
        self
    }

    /// Get all report calls with their arguments
    pub fn calls(&self) -> Vec<ReportCallArgs> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseReportWriter for MockReportWriter {
    async fn write_report(
        &self,
        prompt: &str,
        learnings: &[String],
        visited_urls: &[String],
    ) -> Result<String> {
        self.calls.lock().unwrap().push(ReportCallArgs {
            prompt: prompt.to_string(),
            learnings: learnings.to_vec(),
            visited_urls: visited_urls.to_vec(),
        });
        self.report.clone().map_err(|message| anyhow::anyhow!(message))
    }

    async fn generate_feedback(
        &self,
        _query: &str,
        num_questions: Option<usize>,
    ) -> Result<Vec<String>> {
        let limit = num_questions.unwrap_or(self.questions.len());
        Ok(self.questions.iter().take(limit).cloned().collect())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Mock collaborators plus the `ServerDeps` wired to them.
pub struct TestDependencies {
    pub researcher: Arc<MockResearcher>,
    pub report_writer: Arc<MockReportWriter>,
}

impl TestDependencies {
    pub fn new(researcher: MockResearcher, report_writer: MockReportWriter) -> Self {
        Self {
            researcher: Arc::new(researcher),
            report_writer: Arc::new(report_writer),
        }
    }

    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(self.researcher.clone(), self.report_writer.clone())
    }
}
