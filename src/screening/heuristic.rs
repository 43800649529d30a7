use crate::screening::{TxnAssessment, TxnScreener};

/// Offline screener used when no API key is configured. Applies the same
/// rubric the model is prompted with: payment references are long runs of
/// digits or alphanumerics, plain words and short strings are not.
pub struct HeuristicScreener;

#[async_trait::async_trait]
impl TxnScreener for HeuristicScreener {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    async fn assess(&self, transaction_id: &str) -> TxnAssessment {
        let txn = transaction_id.trim();
        if txn.len() < 5 {
            return TxnAssessment::Invalid;
        }
        if !txn.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_')) {
            return TxnAssessment::Suspicious;
        }
        if !txn.chars().any(|c| c.is_ascii_digit()) {
            // A plain word, not a payment reference.
            return TxnAssessment::Invalid;
        }
        if txn.len() >= 10 {
            TxnAssessment::Plausible
        } else {
            TxnAssessment::Suspicious
        }
    }
}
