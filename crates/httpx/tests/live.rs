//! Integration tests for the live executor against a local server.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashMap;
use std::time::Duration;

use axum::extract::{Form, Path, Query};
use axum::http::HeaderMap;
use axum::http::header::USER_AGENT;
use axum::routing::{get, post};
use axum::{Json, Router};
use httpx::prelude::*;
use httpx::{ExecutorConfig, builders};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

const NO_BUILDERS: [RequestBuilder; 0] = [];

async fn get_user(Path(id): Path<u64>) -> ([(&'static str, &'static str); 1], Json<Value>) {
    (
        [("x-served-by", "test-server")],
        Json(json!({ "id": id, "roles": ["admin"] })),
    )
}

async fn search(Query(params): Query<HashMap<String, String>>) -> String {
    params.get("q").cloned().unwrap_or_default()
}

async fn login(Form(fields): Form<HashMap<String, String>>) -> String {
    format!("welcome {}", fields.get("user").cloned().unwrap_or_default())
}

async fn whoami(headers: HeaderMap) -> String {
    headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(5)).await;
    "late"
}

/// Serves the test app on an ephemeral port and returns its base URL.
async fn serve() -> String {
    let app = Router::new()
        .route("/users/{id}", get(get_user))
        .route("/search", get(search))
        .route("/login", post(login))
        .route("/whoami", get(whoami))
        .route("/slow", get(slow));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{address}")
}

#[tokio::test]
async fn test_live_round_trip() {
    let base = serve().await;
    let t = TestReporter::named("test_live_round_trip");

    httpx::live()
        .unwrap()
        .make_request(
            &t,
            "GET",
            format!("{base}/users/7"),
            [accept("application/json")],
        )
        .await
        .expect_it([
            status(200),
            header_equals("x-served-by", "test-server"),
            content_type("application/json"),
            json_path("$.id", &7),
            json_path("$.roles[0]", "admin"),
        ]);
}

#[tokio::test]
async fn test_query_and_form_builders() {
    let base = serve().await;
    let reporter = RecordingReporter::new();
    let pipeline = httpx::live().unwrap();

    pipeline
        .make_request(
            &reporter,
            "GET",
            format!("{base}/search"),
            [query(&[("q", "rust testing")])],
        )
        .await
        .expect_it([body_equals("rust testing")]);

    pipeline
        .make_request(
            &reporter,
            "POST",
            format!("{base}/login"),
            [form_body(&[("user", "ada")])],
        )
        .await
        .expect_it([body_equals("welcome ada")]);

    assert!(reporter.messages().is_empty());
}

#[tokio::test]
async fn test_user_agent_from_config() {
    let base = serve().await;
    let reporter = RecordingReporter::new();
    let config = ExecutorConfig {
        user_agent: "probe/2.0".to_string(),
        ..ExecutorConfig::default()
    };
    let pipeline = httpx::live_with(&config).unwrap();

    pipeline
        .make_request(&reporter, "GET", format!("{base}/whoami"), NO_BUILDERS)
        .await
        .expect_it([body_equals("probe/2.0")]);

    pipeline
        .make_request(
            &reporter,
            "GET",
            format!("{base}/whoami"),
            [builders::user_agent("override/1.0")],
        )
        .await
        .expect_it([body_equals("override/1.0")]);

    assert!(reporter.messages().is_empty());
}

#[tokio::test]
async fn test_deadline_poisons_assertable() {
    let base = serve().await;
    let reporter = RecordingReporter::new();

    httpx::live()
        .unwrap()
        .make_request(
            &reporter,
            "GET",
            format!("{base}/slow"),
            [timeout(Duration::from_millis(50))],
        )
        .await
        .expect_it([status(200)]);

    assert_eq!(
        reporter.messages(),
        vec!["httpx: failed to execute request: request timed out after 50ms"]
    );
    assert_eq!(reporter.abort_count(), 1);
}

#[tokio::test]
async fn test_refused_connection_poisons_assertable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    let reporter = RecordingReporter::new();

    httpx::live()
        .unwrap()
        .make_request(&reporter, "GET", format!("http://{address}/"), NO_BUILDERS)
        .await
        .expect_it([status(200)]);

    let messages = reporter.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("httpx: failed to execute request:"));
    assert_eq!(reporter.abort_count(), 1);
}
