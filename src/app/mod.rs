pub mod extract;
pub mod handlers;
pub mod openapi;
pub mod pages;
pub mod server;

use crate::adapters::OpenRouterClient;
use crate::config::ServerConfig;
use crate::core::gate::ConcurrencyGate;
use crate::core::validator::ValidationProxy;
use crate::domain::ports::CompletionClient;
use crate::utils::error::{ErrorBody, Result};
use axum::body::Body;
use axum::http::{Response, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::any::Any;
use std::sync::Arc;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// Per-process context handed to every handler: the validation proxy (which owns
/// the shared upstream client and the concurrency gate) plus pricing settings.
#[derive(Clone)]
pub struct AppState {
    pub validator: Arc<ValidationProxy>,
    pub price_per_request: f64,
    pub echo_price: bool,
}

impl AppState {
    pub fn new(validator: ValidationProxy, price_per_request: f64, echo_price: bool) -> Self {
        Self {
            validator: Arc::new(validator),
            price_per_request,
            echo_price,
        }
    }

    pub fn with_client(
        client: Arc<dyn CompletionClient>,
        config: &ServerConfig,
    ) -> Self {
        let gate = ConcurrencyGate::new(config.max_concurrency);
        let validator =
            ValidationProxy::new(client, gate, Duration::from_secs(config.timeout_seconds));
        Self::new(validator, config.price_per_request, !config.omit_price)
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let client = OpenRouterClient::new(config)?;
        Ok(Self::with_client(Arc::new(client), config))
    }

    pub fn response_price(&self) -> Option<f64> {
        self.echo_price.then_some(self.price_per_request)
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/check", post(handlers::check))
        .route("/openapi.json", get(handlers::openapi_json))
        .route("/terms", get(handlers::terms))
        .route("/skyfire-webhook", post(handlers::skyfire_webhook))
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!("Unexpected error: handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            detail: "Internal server error".to_string(),
        }),
    )
        .into_response()
}
