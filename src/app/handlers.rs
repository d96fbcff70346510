use crate::app::extract::ValidJson;
use crate::app::pages::{format_price, landing_message, TERMS_HTML};
use crate::app::{openapi, AppState};
use crate::domain::model::{ValidationRequest, ValidationResponse};
use crate::utils::error::{AppError, ErrorBody};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde_json::{json, Value};

pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": landing_message(),
        "price_per_request": format_price(state.price_per_request),
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({"status": "healthy"}))
}

/// Validate the provided data.
pub async fn check(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<ValidationRequest>,
) -> Result<Json<ValidationResponse>, AppError> {
    let result = state.validator.submit(&request.data).await?;
    Ok(Json(ValidationResponse {
        result,
        price: state.response_price(),
    }))
}

pub async fn openapi_json(State(state): State<AppState>) -> Json<Value> {
    Json(openapi::document(state.price_per_request, state.echo_price))
}

pub async fn terms() -> Html<&'static str> {
    Html(TERMS_HTML)
}

/// 付款通知只記錄，不做簽章驗證
pub async fn skyfire_webhook(ValidJson(payload): ValidJson<Value>) -> Json<Value> {
    tracing::info!("Skyfire webhook received: {}", payload);
    Json(json!({"status": "received"}))
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            detail: "Not Found".to_string(),
        }),
    )
}
