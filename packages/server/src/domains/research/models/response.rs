use serde::Serialize;

/// Body of a successful synchronous research call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchResponse {
    pub success: bool,
    pub report: String,
    pub learnings: Vec<String>,
    pub visited_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackResponse {
    pub questions: Vec<String>,
}
