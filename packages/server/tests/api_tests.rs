//! Integration tests for health, feedback and CORS.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;
use server_core::kernel::{MockReportWriter, MockResearcher};

use crate::common::*;

#[tokio::test]
async fn health_reports_ok() {
    let harness = TestHarness::new(MockResearcher::new(), MockReportWriter::new());

    let response = harness.get("/health").await;

    assert_status(&response, StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn feedback_returns_questions() {
    let harness = TestHarness::new(
        MockResearcher::new(),
        MockReportWriter::new().with_questions(&["Which region?", "What timeframe?", "Why now?"]),
    );

    let response = harness
        .post_json("/api/feedback", json!({"query": "abc", "numQuestions": 2}))
        .await;

    assert_status(&response, StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"questions": ["Which region?", "What timeframe?"]})
    );
}

#[tokio::test]
async fn feedback_requires_query() {
    let harness = TestHarness::new(MockResearcher::new(), MockReportWriter::new());

    let response = harness.post_json("/api/feedback", json!({})).await;

    assert_status(&response, StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({"error": "Query is required"}));
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let harness = TestHarness::new(MockResearcher::new(), MockReportWriter::new());

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/research/stream")
        .header(header::ORIGIN, "https://example.org")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = harness.send(request).await;

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let harness = TestHarness::new(MockResearcher::new(), MockReportWriter::new());

    let response = harness.get("/api/unknown").await;

    assert_status(&response, StatusCode::NOT_FOUND);
}
