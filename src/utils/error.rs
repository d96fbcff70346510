use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Upstream returned status {status}")]
    UpstreamError { status: u16 },

    #[error("Upstream rejected credentials (status {status})")]
    AuthError { status: u16 },

    #[error("Upstream response could not be interpreted: {message}")]
    MalformedResponseError { message: String },

    #[error("Upstream call timed out after {seconds}s")]
    TimeoutError { seconds: u64 },

    #[error("Transport error: {message}")]
    TransportError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Upstream,
    Request,
    Configuration,
    System,
}

/// 對外回傳的錯誤主體，格式固定為 `{"detail": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UpstreamError { .. } | Self::AuthError { .. } | Self::MalformedResponseError { .. } => {
                StatusCode::BAD_GATEWAY
            }
            Self::TimeoutError { .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::TransportError { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::ValidationError { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UpstreamError { .. }
            | Self::AuthError { .. }
            | Self::MalformedResponseError { .. }
            | Self::TimeoutError { .. }
            | Self::TransportError { .. } => ErrorCategory::Upstream,
            Self::ValidationError { .. } => ErrorCategory::Request,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::InternalError { .. } | Self::IoError(_) => ErrorCategory::System,
        }
    }

    /// 給呼叫端看的訊息，不含任何上游細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::UpstreamError { .. } | Self::MalformedResponseError { .. } => {
                "AI service error".to_string()
            }
            Self::AuthError { .. } => "AI service authentication failed".to_string(),
            Self::TimeoutError { .. } => "AI service timeout".to_string(),
            Self::TransportError { .. } => "AI service unavailable".to_string(),
            Self::ValidationError { message } => message.clone(),
            Self::MissingConfigError { field } => format!("Missing required setting: {}", field),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting {}: {}", field, reason)
            }
            Self::ConfigError { message } => message.clone(),
            Self::InternalError { .. } | Self::IoError(_) => "Internal server error".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Upstream => "Check upstream availability and retry later",
            ErrorCategory::Request => "Fix the request payload and resend",
            ErrorCategory::Configuration => {
                "Set the missing values via flags, environment variables or the config file"
            }
            ErrorCategory::System => "Inspect the server logs for details",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("❌ {} (category: {:?})", self, self.category());
        } else {
            tracing::debug!("request rejected: {}", self);
        }
        let body = ErrorBody {
            detail: self.user_friendly_message(),
        };
        (status, Json(body)).into_response()
    }
}
