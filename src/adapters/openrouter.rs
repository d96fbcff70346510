use crate::domain::ports::{CompletionClient, UpstreamSettings};
use crate::utils::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const TEMPERATURE: f64 = 0.1;
pub const MAX_TOKENS: u32 = 200;
pub const APP_TITLE: &str = "Data Validator Agent";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// OpenRouter chat-completions client. The inner `reqwest::Client` is one shared
/// connection pool; cloning this struct shares it.
#[derive(Clone)]
pub struct OpenRouterClient {
    http: Client,
    endpoint: String,
    api_key: String,
    app_url: String,
    model: String,
    timeout: Duration,
}

impl OpenRouterClient {
    pub fn new<C: UpstreamSettings>(settings: &C) -> Result<Self> {
        let timeout = Duration::from_secs(settings.timeout_seconds());
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self::with_client(http, settings))
    }

    pub fn with_client<C: UpstreamSettings>(http: Client, settings: &C) -> Self {
        Self {
            http,
            endpoint: settings.upstream_url().to_string(),
            api_key: settings.api_key().to_string(),
            app_url: settings.app_url().to_string(),
            model: settings.model().to_string(),
            timeout: Duration::from_secs(settings.timeout_seconds()),
        }
    }

    fn map_request_error(&self, e: reqwest::Error) -> AppError {
        if e.is_timeout() {
            tracing::error!("OpenRouter timeout");
            AppError::TimeoutError {
                seconds: self.timeout.as_secs(),
            }
        } else if e.is_decode() {
            tracing::error!("OpenRouter returned an undecodable body: {}", e);
            AppError::MalformedResponseError {
                message: e.to_string(),
            }
        } else {
            tracing::error!("Network error: {}", e);
            AppError::TransportError {
                message: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let payload = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        tracing::debug!("Making upstream request to: {}", self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.app_url)
            .header("X-Title", APP_TITLE)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        tracing::debug!("Upstream response status: {}", status);

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(200).collect();
            tracing::error!("OpenRouter error {}: {}", status.as_u16(), snippet);

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::AuthError {
                    status: status.as_u16(),
                },
                _ => AppError::UpstreamError {
                    status: status.as_u16(),
                },
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| self.map_request_error(e))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::MalformedResponseError {
                message: "response contained no message content".to_string(),
            })
    }
}
