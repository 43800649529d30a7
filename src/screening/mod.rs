use serde::{Deserialize, Serialize};

pub mod gemini;
pub mod heuristic;

/// Advisory read on a submitted transaction id, surfaced to organizers next
/// to pending bookings. Never blocks a submission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TxnAssessment {
    Plausible,
    Suspicious,
    Invalid,
    /// The screener itself could not run (no credentials, transport
    /// failure). Distinct from `Invalid`, which is a judgement on the id.
    Error,
}

impl TxnAssessment {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnAssessment::Plausible => "Plausible",
            TxnAssessment::Suspicious => "Suspicious",
            TxnAssessment::Invalid => "Invalid",
            TxnAssessment::Error => "Error",
        }
    }
}

impl std::fmt::Display for TxnAssessment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Screeners are infallible: anything that stops an assessment folds into
/// `TxnAssessment::Error` so the admin view always has something to show.
#[async_trait::async_trait]
pub trait TxnScreener: Send + Sync {
    fn name(&self) -> &'static str;

    async fn assess(&self, transaction_id: &str) -> TxnAssessment;
}
