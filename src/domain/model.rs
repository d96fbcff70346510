use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// 模型回覆的分類，只用於日誌；回應仍保留原始文字
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Wrong(String),
    Unrecognized,
}

impl Verdict {
    pub fn classify(result: &str) -> Self {
        let text = result.trim();
        if text == "CORRECT" {
            Verdict::Correct
        } else if let Some(rest) = text.strip_prefix("WRONG:") {
            Verdict::Wrong(rest.trim().to_string())
        } else {
            Verdict::Unrecognized
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Correct => "correct",
            Verdict::Wrong(_) => "wrong",
            Verdict::Unrecognized => "unrecognized",
        }
    }
}
