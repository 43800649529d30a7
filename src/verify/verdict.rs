use crate::domain::booking::Booking;
use crate::domain::event::Event;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VerdictCategory {
    Success,
    /// Recoverable, informative outcome (already-used ticket), distinct
    /// from a forged or otherwise invalid one.
    Warning,
    Error,
}

/// Outcome of classifying one scanned frame. Booking and event ride along
/// only when the scan resolved to the selected event; cross-event scans
/// withhold them.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub category: VerdictCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<Booking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<Event>,
}

impl Verdict {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            category: VerdictCategory::Error,
            message: message.into(),
            booking: None,
            event: None,
        }
    }

    pub fn error_for(message: impl Into<String>, booking: &Booking, event: &Event) -> Self {
        Self {
            category: VerdictCategory::Error,
            message: message.into(),
            booking: Some(booking.clone()),
            event: Some(event.clone()),
        }
    }

    pub fn warning_for(message: impl Into<String>, booking: &Booking, event: &Event) -> Self {
        Self {
            category: VerdictCategory::Warning,
            message: message.into(),
            booking: Some(booking.clone()),
            event: Some(event.clone()),
        }
    }

    pub fn success_for(message: impl Into<String>, booking: &Booking, event: &Event) -> Self {
        Self {
            category: VerdictCategory::Success,
            message: message.into(),
            booking: Some(booking.clone()),
            event: Some(event.clone()),
        }
    }
}
