//! `HttpCompletionProvider` against a local stub of the completions API.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use brainbytes_core::error::ClientCode;
use brainbytes_core::protocol::chat::ChatRequest;
use brainbytes_gateway::config::AiSection;
use brainbytes_gateway::services::{CompletionProvider, HttpCompletionProvider};

async fn echo(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer test-key") {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad key" })));
    }
    let system = body["messages"][0]["content"].as_str().unwrap_or_default();
    let user = body["messages"][1]["content"].as_str().unwrap_or_default();
    let model = body["model"].as_str().unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!({
            "choices": [{
                "message": { "role": "assistant", "content": format!("{model}|{system}|{user}") }
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
        })),
    )
}

async fn no_usage() -> Json<Value> {
    Json(json!({ "choices": [{ "message": { "content": "plain" } }] }))
}

async fn empty_choices() -> Json<Value> {
    Json(json!({ "choices": [] }))
}

async fn overloaded() -> (StatusCode, &'static str) {
    (StatusCode::SERVICE_UNAVAILABLE, "try later")
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({ "choices": [{ "message": { "content": "late" } }] }))
}

async fn spawn_stub() -> SocketAddr {
    let app = Router::new()
        .route("/echo", post(echo))
        .route("/no-usage", post(no_usage))
        .route("/empty", post(empty_choices))
        .route("/overloaded", post(overloaded))
        .route("/slow", post(slow));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn provider(addr: SocketAddr, path: &str) -> HttpCompletionProvider {
    let cfg = AiSection {
        endpoint: format!("http://{addr}{path}"),
        model: "tutor-test".into(),
        system_prompt: "be kind".into(),
        timeout_ms: 1000,
        ..AiSection::default()
    };
    HttpCompletionProvider::new(&cfg, Some("test-key".into())).unwrap()
}

#[tokio::test]
async fn sends_system_prompt_and_transcript() {
    let addr = spawn_stub().await;
    let req = ChatRequest::new("why is the sky blue?").with_history("User: hi\nAI: hello");

    let done = provider(addr, "/echo").complete(&req).await.unwrap();
    assert_eq!(
        done.text,
        "tutor-test|be kind|User: hi\nAI: hello\nUser: why is the sky blue?"
    );
    assert_eq!(done.total_tokens, Some(15));
}

#[tokio::test]
async fn usage_is_optional() {
    let addr = spawn_stub().await;
    let done = provider(addr, "/no-usage")
        .complete(&ChatRequest::new("hi"))
        .await
        .unwrap();
    assert_eq!(done.text, "plain");
    assert_eq!(done.total_tokens, None);
}

#[tokio::test]
async fn missing_content_is_upstream_error() {
    let addr = spawn_stub().await;
    let err = provider(addr, "/empty")
        .complete(&ChatRequest::new("hi"))
        .await
        .expect_err("must fail");
    assert_eq!(err.client_code(), ClientCode::Upstream);
    assert!(err.to_string().contains("choices[0].message.content"));
}

#[tokio::test]
async fn provider_status_is_reported() {
    let addr = spawn_stub().await;
    let err = provider(addr, "/overloaded")
        .complete(&ChatRequest::new("hi"))
        .await
        .expect_err("must fail");
    assert_eq!(err.client_code(), ClientCode::Upstream);
    assert!(err.to_string().contains("503"));
    assert!(err.to_string().contains("try later"));
}

#[tokio::test]
async fn slow_provider_times_out() {
    let addr = spawn_stub().await;
    let err = provider(addr, "/slow")
        .complete(&ChatRequest::new("hi"))
        .await
        .expect_err("must fail");
    assert_eq!(err.client_code(), ClientCode::Timeout);
}

#[tokio::test]
async fn unreachable_provider_is_upstream_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = provider(addr, "/echo")
        .complete(&ChatRequest::new("hi"))
        .await
        .expect_err("must fail");
    assert_eq!(err.client_code(), ClientCode::Upstream);
}
