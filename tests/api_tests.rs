//! HTTP contract tests for the gateway endpoints.

use axum_test::TestServer;
use learnflow::{api, AgentRegistry, AppState, Config, DEGRADED_MESSAGE};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test server wired to the given agent base URL, with no fallback model.
fn test_server(agent_base: &str) -> TestServer {
    let mut config = Config::default();
    config.agents.triage_url = format!("{agent_base}/triage");
    config.agents.concepts_url = format!("{agent_base}/explain");
    config.agents.code_review_url = format!("{agent_base}/review");
    config.agents.debug_url = format!("{agent_base}/debug");
    config.agents.exercise_url = format!("{agent_base}/generate");
    config.agents.progress_url = format!("{agent_base}/progress");
    config.execution.service_url = format!("{agent_base}/execute");
    // Keep failure paths fast.
    config.dispatch.timeout_ms = 500;

    let registry = Arc::new(AgentRegistry::from_config(&config));
    let state = AppState {
        config: Arc::new(config),
        registry,
        http: reqwest::Client::new(),
        fallback_model: None,
    };

    let app = api::routes::create_router().with_state(state);
    TestServer::new(app).expect("test server")
}

#[tokio::test]
async fn missing_message_is_a_400() {
    let server = test_server("http://127.0.0.1:9");

    let response = server.post("/api/tutor").json(&json!({})).await;
    response.assert_status_bad_request();
    response.assert_json(&json!({ "error": "message is required" }));
}

#[tokio::test]
async fn whitespace_message_is_a_400() {
    let server = test_server("http://127.0.0.1:9");

    let response = server
        .post("/api/tutor")
        .json(&json!({ "message": "   " }))
        .await;
    response.assert_status_bad_request();
    response.assert_json(&json!({ "error": "message is required" }));
}

#[tokio::test]
async fn end_to_end_debug_routing_with_struggle_detection() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/debug"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "your range is off by one",
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let server = test_server(&upstream.uri());
    let response = server
        .post("/api/tutor")
        .json(&json!({
            "message": "why does my for loop throw an error",
            "userId": "u1",
            "context": { "history": [] },
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["agent"], "debug");
    assert_eq!(body["source"], "primary");
    assert_eq!(body["response"]["message"], "your range is off by one");
    // "why" + "error" = two indicators at 0.3 each.
    let score = body["struggleDetection"]["score"].as_f64().unwrap();
    assert!((score - 0.6).abs() < 1e-9);
    assert_eq!(body["struggleDetection"]["isStruggling"], true);
    assert_eq!(body["struggleDetection"]["requiresIntervention"], false);
    assert!(body["responseTime"].is_number());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn unreachable_specialist_without_credential_degrades_with_200() {
    let server = test_server("http://127.0.0.1:9");

    let response = server
        .post("/api/tutor")
        .json(&json!({ "message": "explain closures" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["agent"], "concepts");
    assert_eq!(body["source"], "degraded");
    assert_eq!(body["response"], json!(DEGRADED_MESSAGE));
}

#[tokio::test]
async fn agents_listing_covers_the_closed_set() {
    let server = test_server("http://127.0.0.1:9");

    let response = server.get("/api/agents").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let agents: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|info| info["agent"].as_str().unwrap())
        .collect();

    assert_eq!(agents.len(), 6);
    for expected in ["triage", "concepts", "debug", "exercise", "progress", "code-review"] {
        assert!(agents.contains(&expected), "missing {expected}");
    }
}

#[tokio::test]
async fn health_reports_the_service_name() {
    let server = test_server("http://127.0.0.1:9");

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({
        "status": "healthy",
        "service": "learnflow-gateway",
    }));
}

#[tokio::test]
async fn execute_requires_code() {
    let server = test_server("http://127.0.0.1:9");

    let response = server.post("/api/execute").json(&json!({})).await;
    response.assert_status_bad_request();
    response.assert_json(&json!({ "error": "code is required" }));
}

#[tokio::test]
async fn execute_rejects_non_python_submissions() {
    let server = test_server("http://127.0.0.1:9");

    let response = server
        .post("/api/execute")
        .json(&json!({ "code": "SELECT * FROM users" }))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn execute_proxies_to_the_sandbox() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/execute"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": "42\n",
            "error": "",
            "execution_time": 0.01,
            "success": true,
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let server = test_server(&upstream.uri());
    let response = server
        .post("/api/execute")
        .json(&json!({
            "code": "print(42)",
            "userId": "u1",
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["output"], "42\n");
    assert_eq!(body["success"], true);
    assert!(body["executionTime"].is_number());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn execute_maps_unreachable_sandbox_to_503() {
    let server = test_server("http://127.0.0.1:9");

    let response = server
        .post("/api/execute")
        .json(&json!({ "code": "print(1)" }))
        .await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Unable to reach code execution service");
}
