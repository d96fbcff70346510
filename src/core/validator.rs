use crate::core::gate::ConcurrencyGate;
use crate::core::prompt::build_prompt;
use crate::domain::model::Verdict;
use crate::domain::ports::CompletionClient;
use crate::utils::error::{AppError, Result};
use std::sync::Arc;
use std::time::Duration;

/// 驗證代理：取得閘門名額 → 呼叫上游 → 釋放名額 → 回傳修剪後的結果
pub struct ValidationProxy {
    client: Arc<dyn CompletionClient>,
    gate: ConcurrencyGate,
    timeout: Duration,
}

impl ValidationProxy {
    pub fn new(client: Arc<dyn CompletionClient>, gate: ConcurrencyGate, timeout: Duration) -> Self {
        Self {
            client,
            gate,
            timeout,
        }
    }

    pub fn gate(&self) -> &ConcurrencyGate {
        &self.gate
    }

    /// Submits `data` to the upstream model exactly once and returns the trimmed verdict.
    pub async fn submit(&self, data: &str) -> Result<String> {
        let prompt = build_prompt(data);

        let reply = {
            let _permit = self.gate.acquire().await?;
            tracing::debug!(
                in_flight = self.gate.in_flight(),
                capacity = self.gate.capacity(),
                "Acquired upstream slot"
            );

            match tokio::time::timeout(self.timeout, self.client.complete(&prompt)).await {
                Ok(reply) => reply,
                Err(_) => Err(AppError::TimeoutError {
                    seconds: self.timeout.as_secs(),
                }),
            }
            // 名額在這裡歸還，不論成功或失敗
        };

        let reply = match reply {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("Upstream call failed: {}", e);
                return Err(e);
            }
        };

        let result = reply.trim().to_string();
        let verdict = Verdict::classify(&result);
        tracing::info!(verdict = verdict.label(), "✅ Validation completed");

        Ok(result)
    }
}
