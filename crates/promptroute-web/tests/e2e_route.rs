//! End-to-end tests for the HTTP API.
//!
//! These tests spin up the **real** Axum server on an OS-assigned ephemeral
//! port with stub adapters, make actual HTTP requests via `reqwest`, and
//! verify the full request/response cycle.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use promptroute_kernel::{AdapterSet, PromptRouter, ProviderAdapter, ProviderKind, ProviderPayload};
use promptroute_web::{WebConfig, WebServer};

// ── helpers ──────────────────────────────────────────────────────────────────

struct Stub {
    kind: ProviderKind,
    answer: ProviderPayload,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ProviderAdapter for Stub {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn generate(&self, _prompt: &str) -> ProviderPayload {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }
}

fn stub(kind: ProviderKind, answer: ProviderPayload, calls: &Arc<AtomicUsize>) -> Arc<Stub> {
    Arc::new(Stub {
        kind,
        answer,
        calls: Arc::clone(calls),
    })
}

/// Bind to 127.0.0.1:0, start the server, return (base_url, adapter call counter).
async fn start_test_server() -> (String, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let adapters = AdapterSet {
        code: stub(
            ProviderKind::Code,
            ProviderPayload::PlainResponse {
                response: "def reverse(s):\n    return s[::-1]".into(),
            },
            &calls,
        ),
        conversational: stub(
            ProviderKind::Conversational,
            ProviderPayload::PlainOutput {
                output: "Hi! How can I help?".into(),
            },
            &calls,
        ),
        image: stub(
            ProviderKind::Image,
            ProviderPayload::ImageResult {
                image_url: "https://img.test/cat.png".into(),
            },
            &calls,
        ),
        reasoning: stub(
            ProviderKind::Reasoning,
            ProviderPayload::error_with_raw("reasoning backend returned invalid JSON", "oops"),
            &calls,
        ),
    };

    let server = WebServer::new(WebConfig::default(), Arc::new(PromptRouter::new(adapters)));
    let app = server.router();

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind to port 0");
    let addr: SocketAddr = listener.local_addr().expect("get local addr");
    let base = format!("http://127.0.0.1:{}", addr.port());

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    // Small yield so the listener is ready.
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    (base, calls)
}

async fn post_json(base: &str, path: &str, body: Value) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{base}{path}"))
        .json(&body)
        .send()
        .await
        .expect("request failed");
    let status = resp.status().as_u16();
    let json = resp.json().await.expect("invalid JSON");
    (status, json)
}

// ── GET /health ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_healthy() {
    let (base, _) = start_test_server().await;
    let resp = reqwest::get(format!("{base}/health"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), 200);
    let json: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(json, json!({"status": "healthy"}));
}

// ── POST /route ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn coding_prompt_end_to_end() {
    let (base, calls) = start_test_server().await;
    let (status, json) = post_json(
        &base,
        "/route",
        json!({"prompt": "write a function to reverse a string"}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(json["model"], "claude");
    assert!(json["response"].as_str().unwrap().contains("return s[::-1]"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_prompt_is_input_error_with_or_without_model() {
    let (base, calls) = start_test_server().await;

    for body in [
        json!({"prompt": ""}),
        json!({"prompt": "", "model": "claude"}),
        json!({"model": "chatgpt"}),
        json!({"prompt": null}),
        json!({"prompt": null, "model": "claude"}),
        json!({}),
    ] {
        let (status, json) = post_json(&base, "/route", body).await;
        assert_eq!(status, 400);
        assert_eq!(json, json!({"error": "No input provided"}));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_provider_is_rejected() {
    let (base, calls) = start_test_server().await;
    let (status, json) =
        post_json(&base, "/route", json!({"prompt": "hi", "model": "bard"})).await;

    assert_eq!(status, 400);
    assert_eq!(json["error"], "unknown provider: bard");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn provider_failure_is_still_success() {
    let (base, _) = start_test_server().await;
    let (status, json) =
        post_json(&base, "/route", json!({"prompt": "x", "model": "gemini-llama"})).await;

    assert_eq!(status, 200);
    assert_eq!(json["model"], "llama");
    let text = json["response"].as_str().unwrap();
    assert!(text.contains("invalid JSON"), "{text}");
    assert!(text.contains("oops"), "{text}");
}

#[tokio::test]
async fn explicit_models_and_labels() {
    let (base, _) = start_test_server().await;

    let cases = [
        ("deepseek", "deepseek"),
        ("chatgpt", "chatgpt"),
        ("gemini", "gemini + Dall-E"),
        ("coding", "claude"),
    ];
    for (model, label) in cases {
        let (status, json) =
            post_json(&base, "/route", json!({"prompt": "hello", "model": model})).await;
        assert_eq!(status, 200, "{model}");
        assert_eq!(json["model"], label, "{model}");
    }
}

#[tokio::test]
async fn empty_model_string_means_classify() {
    let (base, _) = start_test_server().await;
    let (status, json) =
        post_json(&base, "/route", json!({"prompt": "generate a cat", "model": ""})).await;
    assert_eq!(status, 200);
    assert_eq!(json["model"], "gemini + Dall-E");
    assert!(json["response"].as_str().unwrap().ends_with("https://img.test/cat.png"));
}

#[tokio::test]
async fn legacy_aliases_behave_like_route() {
    let (base, _) = start_test_server().await;
    for path in ["/api/chat", "/api/predict"] {
        let (status, json) = post_json(&base, path, json!({"prompt": "hello"})).await;
        assert_eq!(status, 200, "{path}");
        assert_eq!(json["model"], "chatgpt", "{path}");
        assert_eq!(json["response"], "Hi! How can I help?", "{path}");
    }
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let (base, _) = start_test_server().await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/route"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), 400);
    let json: Value = resp.json().await.expect("invalid JSON");
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .starts_with("invalid request body:")
    );
}
