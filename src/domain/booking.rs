use crate::domain::event::Event;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Rejected => "Rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(BookingStatus::Pending),
            "Confirmed" => Some(BookingStatus::Confirmed),
            "Rejected" => Some(BookingStatus::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingCategory {
    Paid,
    Free,
}

impl BookingCategory {
    /// Paid submissions await manual approval; free ones are confirmed on
    /// creation.
    pub fn initial_status(self) -> BookingStatus {
        match self {
            BookingCategory::Paid => BookingStatus::Pending,
            BookingCategory::Free => BookingStatus::Confirmed,
        }
    }
}

/// Category-specific fields, carried as an explicit variant rather than
/// re-derived from the id string downstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum BookingDetails {
    #[serde(rename_all = "camelCase")]
    Paid {
        transaction_id: String,
        /// Public URL of the uploaded payment screenshot.
        payment_proof: String,
    },
    #[serde(rename_all = "camelCase")]
    Free { entry_number: Option<String> },
}

impl BookingDetails {
    pub fn category(&self) -> BookingCategory {
        match self {
            BookingDetails::Paid { .. } => BookingCategory::Paid,
            BookingDetails::Free { .. } => BookingCategory::Free,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub event_id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    #[serde(flatten)]
    pub details: BookingDetails,
    /// Four-digit retrieval PIN chosen by the attendee. Together with the
    /// email it is the only ticket-retrieval credential; it is not a secure
    /// authentication mechanism.
    pub pin: String,
    pub status: BookingStatus,
    pub checked_in: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Booking {
    pub fn category(&self) -> BookingCategory {
        self.details.category()
    }

    pub fn transaction_id(&self) -> Option<&str> {
        match &self.details {
            BookingDetails::Paid { transaction_id, .. } => Some(transaction_id),
            BookingDetails::Free { .. } => None,
        }
    }

    pub fn payment_proof(&self) -> Option<&str> {
        match &self.details {
            BookingDetails::Paid { payment_proof, .. } => Some(payment_proof),
            BookingDetails::Free { .. } => None,
        }
    }

    pub fn entry_number(&self) -> Option<&str> {
        match &self.details {
            BookingDetails::Paid { .. } => None,
            BookingDetails::Free { entry_number } => entry_number.as_deref(),
        }
    }
}

/// Everything the ledger needs to mint a booking record. The id, initial
/// status, `checked_in` flag, and creation timestamp are assigned by the
/// ledger itself, and the email is normalized (trimmed, lowercased) on the
/// way in.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub event_id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub pin: String,
    pub details: BookingDetails,
}

// --- HTTP request/response shapes ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub event_id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    #[serde(default)]
    pub entry_number: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    pub pin: String,
    pub confirm_pin: String,
    /// Payment screenshot for paid events, carried inline.
    #[serde(default)]
    pub payment_proof: Option<ProofUpload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofUpload {
    pub file_name: String,
    pub content_base64: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    pub booking: Booking,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketLookupRequest {
    pub email: String,
    pub pin: String,
}

/// A booking joined with its event for ticket display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketView {
    pub booking: Booking,
    pub event: Option<Event>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub event_id: String,
    /// Raw text decoded from a camera frame.
    pub raw: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_status_follows_category() {
        assert_eq!(BookingCategory::Paid.initial_status(), BookingStatus::Pending);
        assert_eq!(BookingCategory::Free.initial_status(), BookingStatus::Confirmed);
    }

    #[test]
    fn details_expose_only_their_categorys_fields() {
        let paid = BookingDetails::Paid {
            transaction_id: "TXN123".to_string(),
            payment_proof: "https://files.example/p.png".to_string(),
        };
        assert_eq!(paid.category(), BookingCategory::Paid);

        let free = BookingDetails::Free { entry_number: Some("2023CSB1123".to_string()) };
        assert_eq!(free.category(), BookingCategory::Free);
    }

    #[test]
    fn booking_serializes_flat_with_category_tag() {
        let booking = Booking {
            id: "free-booking-1-abc".to_string(),
            event_id: "fresco-2k25".to_string(),
            user_name: "Asha".to_string(),
            user_email: "asha@example.com".to_string(),
            user_phone: "9876543210".to_string(),
            details: BookingDetails::Free { entry_number: None },
            pin: "4321".to_string(),
            status: BookingStatus::Confirmed,
            checked_in: false,
            created_at: chrono::Utc::now(),
        };
        let value = serde_json::to_value(&booking).unwrap();
        assert_eq!(value["category"], "free");
        assert_eq!(value["eventId"], "fresco-2k25");
        assert_eq!(value["status"], "Confirmed");
    }
}
