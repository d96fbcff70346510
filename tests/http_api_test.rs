use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use data_validator::domain::ports::CompletionClient;
use data_validator::{build_router, AppError, AppState, ServerConfig};
use clap::Parser;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

enum Reply {
    Text(&'static str),
    Status(u16),
    Unauthorized,
    Unreachable,
    Hang,
    Panic,
}

struct FakeUpstream {
    reply: Reply,
    calls: AtomicUsize,
}

impl FakeUpstream {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for FakeUpstream {
    async fn complete(&self, _prompt: &str) -> data_validator::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.reply {
            Reply::Text(text) => Ok(text.to_string()),
            Reply::Status(status) => Err(AppError::UpstreamError { status }),
            Reply::Unauthorized => Err(AppError::AuthError { status: 401 }),
            Reply::Unreachable => Err(AppError::TransportError {
                message: "connection refused".to_string(),
            }),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok("CORRECT".to_string())
            }
            Reply::Panic => panic!("fake upstream exploded"),
        }
    }
}

fn config(extra: &[&str]) -> ServerConfig {
    let mut argv = vec![
        "data-validator",
        "--api-key",
        "sk-or-test",
        "--timeout-seconds",
        "1",
        "--price-per-request",
        "0.10",
    ];
    argv.extend_from_slice(extra);
    ServerConfig::try_parse_from(argv).unwrap()
}

fn router_with(fake: Arc<FakeUpstream>, extra: &[&str]) -> Router {
    build_router(AppState::with_client(fake, &config(extra)))
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_check_returns_trimmed_result_with_price() {
    let fake = FakeUpstream::new(Reply::Text("  CORRECT \n"));
    let app = router_with(fake.clone(), &[]);

    let resp = app
        .oneshot(post_json("/check", r#"{"data": "Bitcoin price is $100,000"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json, serde_json::json!({"result": "CORRECT", "price": 0.1}));
    assert_eq!(fake.calls(), 1);
}

#[tokio::test]
async fn test_check_without_price_echo() {
    let fake = FakeUpstream::new(Reply::Text("WRONG: date is invalid"));
    let app = router_with(fake, &["--omit-price"]);

    let resp = app
        .oneshot(post_json("/check", r#"{"data": "Today is February 30th"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json, serde_json::json!({"result": "WRONG: date is invalid"}));
}

#[tokio::test]
async fn test_missing_data_is_422_without_upstream_call() {
    let fake = FakeUpstream::new(Reply::Text("CORRECT"));
    let app = router_with(fake.clone(), &[]);

    let resp = app
        .oneshot(post_json("/check", r#"{"text": "wrong field"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(resp).await;
    assert!(json["detail"].as_str().unwrap().contains("data"));
    assert_eq!(fake.calls(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_422() {
    let fake = FakeUpstream::new(Reply::Text("CORRECT"));
    let app = router_with(fake.clone(), &[]);

    let resp = app.oneshot(post_json("/check", "{not json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(resp).await["detail"].is_string());
    assert_eq!(fake.calls(), 0);
}

#[tokio::test]
async fn test_upstream_failures_map_to_gateway_statuses() {
    let cases = [
        (Reply::Status(500), StatusCode::BAD_GATEWAY, "AI service error"),
        (
            Reply::Unauthorized,
            StatusCode::BAD_GATEWAY,
            "AI service authentication failed",
        ),
        (
            Reply::Unreachable,
            StatusCode::SERVICE_UNAVAILABLE,
            "AI service unavailable",
        ),
    ];

    for (reply, status, detail) in cases {
        let app = router_with(FakeUpstream::new(reply), &[]);
        let resp = app
            .oneshot(post_json("/check", r#"{"data": "x"}"#))
            .await
            .unwrap();

        assert_eq!(resp.status(), status);
        assert_eq!(body_json(resp).await, serde_json::json!({"detail": detail}));
    }
}

#[tokio::test]
async fn test_hanging_upstream_is_504() {
    let fake = FakeUpstream::new(Reply::Hang);
    let state = AppState::with_client(fake, &config(&[]));
    let validator = Arc::clone(&state.validator);
    let app = build_router(state);

    let resp = app
        .oneshot(post_json("/check", r#"{"data": "x"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(
        body_json(resp).await,
        serde_json::json!({"detail": "AI service timeout"})
    );
    assert_eq!(validator.gate().in_flight(), 0);
}

#[tokio::test]
async fn test_panicking_handler_is_generic_500() {
    let fake = FakeUpstream::new(Reply::Panic);
    let app = router_with(fake, &[]);

    let resp = app
        .oneshot(post_json("/check", r#"{"data": "x"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(resp).await;
    assert_eq!(json, serde_json::json!({"detail": "Internal server error"}));
}

#[tokio::test]
async fn test_health_is_independent_of_upstream() {
    let app = router_with(FakeUpstream::new(Reply::Unreachable), &[]);

    let resp = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, serde_json::json!({"status": "healthy"}));
}

#[tokio::test]
async fn test_landing_page_shows_price() {
    let app = router_with(FakeUpstream::new(Reply::Text("CORRECT")), &[]);

    let resp = app.oneshot(get("/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["message"], "Data Validator Agent is running!");
    assert_eq!(json["price_per_request"], "$0.1");
}

#[tokio::test]
async fn test_openapi_document() {
    let app = router_with(FakeUpstream::new(Reply::Text("CORRECT")), &[]);

    let resp = app.oneshot(get("/openapi.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["openapi"], "3.0.3");
    assert!(json["paths"]["/check"]["post"]["requestBody"].is_object());
}

#[tokio::test]
async fn test_terms_page_is_html() {
    let app = router_with(FakeUpstream::new(Reply::Text("CORRECT")), &[]);

    let resp = app.oneshot(get("/terms")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("Terms of Service"));
}

#[tokio::test]
async fn test_skyfire_webhook_acknowledges() {
    let app = router_with(FakeUpstream::new(Reply::Text("CORRECT")), &[]);

    let resp = app
        .oneshot(post_json(
            "/skyfire-webhook",
            r#"{"event": "payment.completed", "amount": 0.1}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, serde_json::json!({"status": "received"}));
}

#[tokio::test]
async fn test_unknown_path_is_404_detail() {
    let app = router_with(FakeUpstream::new(Reply::Text("CORRECT")), &[]);

    let resp = app.oneshot(get("/nope")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await, serde_json::json!({"detail": "Not Found"}));
}
