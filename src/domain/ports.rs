use crate::utils::error::Result;
use async_trait::async_trait;

/// 上游補全服務的抽象，測試時可替換成假的實作
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends one prompt and returns the raw text of the model's single reply.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

pub trait UpstreamSettings: Send + Sync {
    fn upstream_url(&self) -> &str;
    fn api_key(&self) -> &str;
    fn app_url(&self) -> &str;
    fn model(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}
