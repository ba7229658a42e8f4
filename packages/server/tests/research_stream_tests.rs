//! Integration tests for POST /api/research/stream.

mod common;

use axum::http::{header, StatusCode};
use deep_research::{ResearchEvent, ResearchProgress};
use serde_json::json;
use server_core::kernel::{MockReportWriter, MockResearcher};

use crate::common::*;

const STREAM: &str = "/api/research/stream";

async fn stream_frames(harness: &TestHarness, body: serde_json::Value) -> Vec<Frame> {
    let response = harness.post_json(STREAM, body).await;
    assert_status(&response, StatusCode::OK);
    parse_sse(&body_text(response).await)
}

fn progress(completed: u32) -> ResearchEvent {
    ResearchEvent::Progress(ResearchProgress {
        current_depth: 1,
        total_depth: 1,
        current_breadth: 2,
        total_breadth: 2,
        current_query: Some("q".into()),
        total_queries: 2,
        completed_queries: completed,
    })
}

#[tokio::test]
async fn stream_responds_with_event_stream_headers() {
    let harness = TestHarness::new(MockResearcher::new(), MockReportWriter::new());

    let response = harness.post_json(STREAM, json!({"query": "abc"})).await;

    assert_status(&response, StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/event-stream"));
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
}

#[tokio::test]
async fn reconciled_learning_arrives_before_summaries() {
    let harness = TestHarness::new(
        MockResearcher::new()
            .with_events(vec![
                ResearchEvent::Learning("L1".into()),
                ResearchEvent::Learning("L2".into()),
            ])
            .with_outcome(&["L1", "L2", "L3"], &[]),
        MockReportWriter::new().with_report("# abc"),
    );

    let frames = stream_frames(&harness, json!({"query": "abc"})).await;

    assert_eq!(
        event_names(&frames),
        vec![
            "start",
            "learning",
            "learning",
            "learning",
            "learnings_summary",
            "urls_summary",
            "report_start",
            "report",
            "done",
        ]
    );
    assert_eq!(
        frames[0].data,
        json!({"type": "start", "query": "abc", "depth": 3, "breadth": 3})
    );
    for (i, frame) in frames[1..4].iter().enumerate() {
        assert_eq!(frame.data["learning"], format!("L{}", i + 1));
        assert_eq!(frame.data["totalLearnings"], i + 1);
    }
    assert_eq!(frames[4].data["learnings"], json!(["L1", "L2", "L3"]));
    assert_eq!(frames[5].data["urls"], json!([]));
    assert_eq!(frames[7].data["report"], "# abc");
}

#[tokio::test]
async fn every_stream_starts_with_start_and_ends_with_one_terminal() {
    let harness = TestHarness::new(
        MockResearcher::new()
            .with_events(vec![
                progress(0),
                ResearchEvent::Query {
                    query: "q".into(),
                    research_goal: "goal".into(),
                },
                ResearchEvent::Url("https://a".into()),
                progress(1),
            ])
            .with_outcome(&["L1"], &["https://a", "https://b"]),
        MockReportWriter::new(),
    );

    let frames = stream_frames(&harness, json!({"query": "abc", "depth": 1, "breadth": 2})).await;
    let names = event_names(&frames);

    assert_eq!(names.first(), Some(&"start"));
    assert_eq!(names.last(), Some(&"done"));
    let terminals = names.iter().filter(|n| **n == "done" || **n == "error").count();
    assert_eq!(terminals, 1);
    assert_eq!(frames_of(&frames, "progress").len(), 2);
    assert_eq!(frames_of(&frames, "query")[0].data["researchGoal"], "goal");
    assert_eq!(
        frames.last().unwrap().data,
        json!({"type": "done", "learningsCount": 1, "urlsCount": 2})
    );
}

#[tokio::test]
async fn totals_count_unique_values_and_never_repeat() {
    let harness = TestHarness::new(
        MockResearcher::new()
            .with_events(vec![
                ResearchEvent::Url("https://a".into()),
                ResearchEvent::Learning("L1".into()),
                ResearchEvent::Url("https://a".into()),
                ResearchEvent::Learning("L1".into()),
                ResearchEvent::Url("https://b".into()),
            ])
            .with_outcome(&["L1", "L2"], &["https://b", "https://c", "https://a"]),
        MockReportWriter::new(),
    );

    let frames = stream_frames(&harness, json!({"query": "abc"})).await;

    let urls = frames_of(&frames, "url");
    let url_values: Vec<_> = urls.iter().map(|f| f.data["url"].clone()).collect();
    assert_eq!(url_values, vec!["https://a", "https://b", "https://c"]);
    for (i, frame) in urls.iter().enumerate() {
        assert_eq!(frame.data["totalUrls"], i + 1);
    }

    let learnings = frames_of(&frames, "learning");
    assert_eq!(learnings.len(), 2);
    assert_eq!(learnings[1].data["totalLearnings"], 2);

    let summary = &frames_of(&frames, "urls_summary")[0].data["urls"];
    assert_eq!(*summary, json!(["https://a", "https://b", "https://c"]));
}

#[tokio::test]
async fn report_writer_gets_query_and_final_sets() {
    let harness = TestHarness::new(
        MockResearcher::new()
            .with_events(vec![ResearchEvent::Learning("L2".into())])
            .with_outcome(&["L1", "L2"], &["https://a"]),
        MockReportWriter::new(),
    );

    stream_frames(&harness, json!({"query": "  abc  "})).await;

    let calls = harness.deps.report_writer.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].prompt, "abc");
    assert_eq!(calls[0].learnings, vec!["L2", "L1"]);
    assert_eq!(calls[0].visited_urls, vec!["https://a"]);
}

#[tokio::test]
async fn research_failure_ends_stream_with_error() {
    let harness = TestHarness::new(
        MockResearcher::new()
            .with_events(vec![ResearchEvent::Learning("L1".into())])
            .failing_with("search provider unavailable"),
        MockReportWriter::new(),
    );

    let frames = stream_frames(&harness, json!({"query": "abc"})).await;

    assert_eq!(event_names(&frames), vec!["start", "learning", "error"]);
    assert_eq!(
        frames[2].data,
        json!({"type": "error", "message": "search provider unavailable"})
    );
    assert!(harness.deps.report_writer.calls().is_empty());
}

#[tokio::test]
async fn report_failure_follows_report_start() {
    let harness = TestHarness::new(
        MockResearcher::new().with_outcome(&["L1"], &[]),
        MockReportWriter::new().failing_with("context length exceeded"),
    );

    let frames = stream_frames(&harness, json!({"query": "abc"})).await;
    let names = event_names(&frames);

    assert_eq!(&names[names.len() - 2..], &["report_start", "error"]);
    assert!(!names.contains(&"report"));
    assert!(!names.contains(&"done"));
    assert_eq!(frames.last().unwrap().data["message"], "context length exceeded");
}

#[tokio::test]
async fn missing_query_is_rejected_without_stream() {
    let harness = TestHarness::new(MockResearcher::new(), MockReportWriter::new());

    for body in [json!({}), json!({"query": ""}), json!({"query": "   ", "depth": 2})] {
        let response = harness.post_json(STREAM, body).await;
        assert_status(&response, StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "Query is required"}));
    }
    assert!(harness.deps.researcher.calls().is_empty());
}

#[tokio::test]
async fn non_positive_depth_is_rejected() {
    let harness = TestHarness::new(MockResearcher::new(), MockReportWriter::new());

    let response = harness
        .post_json(STREAM, json!({"query": "abc", "depth": 0}))
        .await;

    assert_status(&response, StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "depth must be a positive integer"})
    );
    assert!(harness.deps.researcher.calls().is_empty());
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let harness = TestHarness::new(MockResearcher::new(), MockReportWriter::new());

    let response = harness
        .post_raw(STREAM, Some("application/json"), "{not json")
        .await;
    assert_status(&response, StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());

    let response = harness.post_raw(STREAM, None, "").await;
    assert_status(&response, StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({"error": "Query is required"}));
}

#[tokio::test]
async fn empty_json_body_is_missing_query() {
    let harness = TestHarness::new(MockResearcher::new(), MockReportWriter::new());

    for body in ["", "   "] {
        let response = harness
            .post_raw(STREAM, Some("application/json"), body)
            .await;
        assert_status(&response, StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "Query is required"}));
    }
    assert!(harness.deps.researcher.calls().is_empty());
}

#[tokio::test]
async fn defaults_reach_the_researcher() {
    let harness = TestHarness::new(MockResearcher::new(), MockReportWriter::new());

    stream_frames(&harness, json!({"query": "abc", "breadth": 5})).await;

    let calls = harness.deps.researcher.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].query, "abc");
    assert_eq!(calls[0].breadth, 5);
    assert_eq!(calls[0].depth, 3);
}
