use crate::screening::{TxnAssessment, TxnScreener};

pub const GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Screens transaction ids through the Gemini generateContent API. The
/// model is asked for a single-word verdict; anything off-script is
/// treated as `Suspicious` rather than trusted.
pub struct GeminiScreener {
    pub base_url: String,
    pub api_key: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

#[async_trait::async_trait]
impl TxnScreener for GeminiScreener {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn assess(&self, transaction_id: &str) -> TxnAssessment {
        if self.api_key.is_empty() {
            return TxnAssessment::Error;
        }
        let txn = transaction_id.trim();
        if txn.len() < 5 {
            return TxnAssessment::Invalid;
        }

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, GEMINI_MODEL, self.api_key
        );
        let prompt = format!(
            "Analyze the following transaction ID. Is it a plausible ID for a financial payment? \
             A plausible ID is usually a long string of numbers or alphanumeric characters. \
             An invalid ID would be a common word or very short text. \
             Respond with a single word ONLY: \"Plausible\", \"Suspicious\", or \"Invalid\".\n\n\
             ID: \"{transaction_id}\""
        );
        let body = serde_json::json!({
            "contents": [ { "parts": [ { "text": prompt } ] } ]
        });

        let resp = self
            .client
            .post(url)
            .json(&body)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await;

        match resp {
            Ok(r) if r.status().is_success() => {
                let v: serde_json::Value = r.json().await.unwrap_or_default();
                let text = v
                    .pointer("/candidates/0/content/parts/0/text")
                    .and_then(|t| t.as_str())
                    .unwrap_or_default()
                    .trim()
                    .to_string();
                match text.as_str() {
                    "Plausible" => TxnAssessment::Plausible,
                    "Suspicious" => TxnAssessment::Suspicious,
                    "Invalid" => TxnAssessment::Invalid,
                    other => {
                        tracing::warn!("unexpected screening response for {}: {}", txn, other);
                        TxnAssessment::Suspicious
                    }
                }
            }
            Ok(r) => {
                tracing::warn!("screening request rejected with HTTP {}", r.status().as_u16());
                TxnAssessment::Error
            }
            Err(e) => {
                tracing::warn!("screening request failed: {}", e);
                TxnAssessment::Error
            }
        }
    }
}
