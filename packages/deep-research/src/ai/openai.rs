//! OpenAI implementation of the [`ResearchAI`] trait.
//!
//! Every call uses the `json_schema` response format so answers deserialize
//! straight into the pipeline's types.
//!
//! ```rust,ignore
//! use deep_research::ai::OpenAI;
//!
//! let ai = OpenAI::new("sk-...").with_model("o3-mini");
//! ```

use async_trait::async_trait;
use reqwest::Client;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::schema::ResponseSchema;
use crate::error::{ResearchError, Result};
use crate::prompts;
use crate::traits::ai::ResearchAI;
use crate::types::{SerpAnalysis, SerpQuery};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "o3-mini";

/// OpenAI-backed research AI.
#[derive(Clone)]
pub struct OpenAI {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct StructuredRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<&'static str>,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: JsonSchemaFormat,
}

#[derive(Serialize)]
struct JsonSchemaFormat {
    name: String,
    strict: bool,
    schema: serde_json::Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize, JsonSchema)]
struct SerpQueriesResponse {
    /// List of SERP queries
    queries: Vec<SerpQuery>,
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ReportResponse {
    /// Final report on the topic in Markdown
    report_markdown: String,
}

#[derive(Deserialize, JsonSchema)]
struct FeedbackResponse {
    /// Follow up questions to clarify the research direction
    questions: Vec<String>,
}

impl OpenAI {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set the chat model (default: o3-mini).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for proxies or compatible providers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Reasoning models reject `temperature` and take an effort level instead.
    fn is_reasoning_model(&self) -> bool {
        let mut chars = self.model.chars();
        chars.next() == Some('o') && chars.next().is_some_and(|c| c.is_ascii_digit())
    }

    /// Ask the model for a `T` under strict JSON schema.
    pub async fn generate<T: ResponseSchema>(&self, user_prompt: &str) -> Result<T> {
        let system = prompts::system_prompt();
        let reasoning = self.is_reasoning_model();
        let request = StructuredRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &system,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: (!reasoning).then_some(0.0),
            reasoning_effort: reasoning.then_some("medium"),
            response_format: ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: T::response_name(),
                    strict: true,
                    schema: T::strict_schema(),
                },
            },
        };

        let start = std::time::Instant::now();
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenAI request failed");
                ResearchError::Network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %body, "OpenAI API error");
            return Err(ResearchError::Api {
                provider: "OpenAI",
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response.json().await?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ResearchError::InvalidResponse("empty completion".into()))?;

        debug!(
            model = %self.model,
            schema = %T::response_name(),
            duration_ms = start.elapsed().as_millis(),
            "OpenAI structured completion"
        );

        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl ResearchAI for OpenAI {
    async fn generate_serp_queries(
        &self,
        query: &str,
        learnings: &[String],
        num_queries: usize,
    ) -> Result<Vec<SerpQuery>> {
        let prompt = prompts::serp_queries_prompt(query, learnings, num_queries);
        let response: SerpQueriesResponse = self.generate(&prompt).await?;
        debug!(count = response.queries.len(), "Created SERP queries");
        Ok(response.queries.into_iter().take(num_queries).collect())
    }

    async fn process_serp_result(
        &self,
        query: &str,
        contents: &[String],
        num_learnings: usize,
        num_follow_up_questions: usize,
    ) -> Result<SerpAnalysis> {
        let prompt =
            prompts::serp_result_prompt(query, contents, num_learnings, num_follow_up_questions);
        let mut analysis: SerpAnalysis = self.generate(&prompt).await?;
        analysis.learnings.truncate(num_learnings);
        analysis.follow_up_questions.truncate(num_follow_up_questions);
        Ok(analysis)
    }

    async fn write_report(&self, prompt: &str, learnings: &str) -> Result<String> {
        let response: ReportResponse = self
            .generate(&prompts::report_prompt(prompt, learnings))
            .await?;
        Ok(response.report_markdown)
    }

    async fn generate_feedback(&self, query: &str, num_questions: usize) -> Result<Vec<String>> {
        let response: FeedbackResponse = self
            .generate(&prompts::feedback_prompt(query, num_questions))
            .await?;
        Ok(response.questions.into_iter().take(num_questions).collect())
    }
}
