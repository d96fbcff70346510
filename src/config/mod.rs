pub mod toml_config;

use crate::domain::ports::UpstreamSettings;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_secret, validate_range, validate_required_field, validate_url, Validate,
};
use clap::Parser;
use std::path::PathBuf;
use toml_config::FileConfig;

pub const DEFAULT_UPSTREAM_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "mistralai/mixtral-8x7b-instruct";
pub const DEFAULT_APP_URL: &str = "https://your-app.com";

#[derive(Clone, Parser)]
#[command(name = "data-validator")]
#[command(about = "AI agent that validates data for other AI agents", version)]
pub struct ServerConfig {
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "APP_URL", default_value = DEFAULT_APP_URL)]
    pub app_url: String,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value = "8000")]
    pub port: u16,

    #[arg(long, env = "DEBUG", help = "Enable verbose output")]
    pub debug: bool,

    #[arg(long, env = "JSON_LOGS", help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, env = "UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    #[arg(long, env = "UPSTREAM_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "MAX_CONCURRENCY", default_value = "100")]
    pub max_concurrency: usize,

    #[arg(long, env = "TIMEOUT_SECONDS", default_value = "30")]
    pub timeout_seconds: u64,

    #[arg(long, env = "PRICE_PER_REQUEST", default_value = "0.10")]
    pub price_per_request: f64,

    #[arg(long, env = "OMIT_PRICE", help = "Do not echo the price in /check responses")]
    pub omit_price: bool,

    #[arg(long, env = "VALIDATOR_CONFIG", help = "Optional TOML file overriding these settings")]
    pub config: Option<PathBuf>,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("app_url", &self.app_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("debug", &self.debug)
            .field("json_logs", &self.json_logs)
            .field("upstream_url", &self.upstream_url)
            .field("model", &self.model)
            .field("max_concurrency", &self.max_concurrency)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("price_per_request", &self.price_per_request)
            .field("omit_price", &self.omit_price)
            .field("config", &self.config)
            .finish()
    }
}

impl ServerConfig {
    /// 若指定了設定檔，檔案中的值覆蓋命令列與環境變數
    pub fn load_file_overrides(mut self) -> Result<Self> {
        if let Some(path) = self.config.clone() {
            let file = FileConfig::from_file(&path)?;
            tracing::debug!("Applying config file overrides from {}", path.display());
            self.apply_file(file);
        }
        Ok(self)
    }

    pub fn apply_file(&mut self, file: FileConfig) {
        if let Some(server) = file.server {
            if let Some(host) = server.host {
                self.host = host;
            }
            if let Some(port) = server.port {
                self.port = port;
            }
            if let Some(debug) = server.debug {
                self.debug = debug;
            }
            if let Some(json_logs) = server.json_logs {
                self.json_logs = json_logs;
            }
        }

        if let Some(upstream) = file.upstream {
            if let Some(url) = upstream.url {
                self.upstream_url = url;
            }
            if upstream.api_key.is_some() {
                self.api_key = upstream.api_key;
            }
            if let Some(app_url) = upstream.app_url {
                self.app_url = app_url;
            }
            if let Some(model) = upstream.model {
                self.model = model;
            }
            if let Some(max_concurrency) = upstream.max_concurrency {
                self.max_concurrency = max_concurrency;
            }
            if let Some(timeout_seconds) = upstream.timeout_seconds {
                self.timeout_seconds = timeout_seconds;
            }
        }

        if let Some(pricing) = file.pricing {
            if let Some(price) = pricing.price_per_request {
                self.price_per_request = price;
            }
            if let Some(echo) = pricing.echo_price {
                self.omit_price = !echo;
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `None` 代表回應中不帶價格欄位
    pub fn response_price(&self) -> Option<f64> {
        if self.omit_price {
            None
        } else {
            Some(self.price_per_request)
        }
    }
}

impl UpstreamSettings for ServerConfig {
    fn upstream_url(&self) -> &str {
        &self.upstream_url
    }

    fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    fn app_url(&self) -> &str {
        &self.app_url
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        let api_key = validate_required_field("OPENROUTER_API_KEY", &self.api_key)?;
        validate_non_empty_secret("OPENROUTER_API_KEY", api_key)?;

        validate_url("upstream_url", &self.upstream_url)?;
        validate_url("app_url", &self.app_url)?;

        validate_range("port", self.port, 1, u16::MAX)?;
        validate_range("max_concurrency", self.max_concurrency, 1, 10_000)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 600)?;
        validate_range("price_per_request", self.price_per_request, 0.0, 1_000.0)?;

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
