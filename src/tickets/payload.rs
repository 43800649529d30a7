use crate::domain::booking::Booking;
use serde::{Deserialize, Serialize};

/// Wire format embedded in every issued QR code. The shape is deliberately
/// redundant (event and attendee name ride along with the id) so a scanner
/// can sanity-check it before any lookup. There is no version tag: every
/// ticket ever issued must keep scanning, so the decoder instead ignores
/// unknown fields, leaving room to add one later without invalidating old
/// codes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TicketPayload {
    pub booking_id: String,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
}

impl TicketPayload {
    pub fn for_booking(booking: &Booking) -> Self {
        Self {
            booking_id: booking.id.clone(),
            event_id: Some(booking.event_id.clone()),
            user_name: Some(booking.user_name.clone()),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid QR Code format.")]
pub struct ScanDecodeError;

/// Serializes the payload a ticket QR encodes. Pure: the same booking
/// fields always produce the same string.
pub fn ticket_payload_json(booking: &Booking) -> String {
    serde_json::to_string(&TicketPayload::for_booking(booking)).unwrap_or_default()
}

/// Parses raw camera-decoded text. Anything that is not JSON carrying a
/// non-empty `bookingId` is a decode failure; extra fields are ignored.
pub fn parse_scan(raw: &str) -> Result<TicketPayload, ScanDecodeError> {
    let payload: TicketPayload = serde_json::from_str(raw).map_err(|_| ScanDecodeError)?;
    if payload.booking_id.is_empty() {
        return Err(ScanDecodeError);
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::{BookingDetails, BookingStatus};

    fn booking() -> Booking {
        Booking {
            id: "free-booking-1733000000000-k3j9x2m4q".to_string(),
            event_id: "fresco-2k25".to_string(),
            user_name: "Asha Rao".to_string(),
            user_email: "asha@example.com".to_string(),
            user_phone: "9876543210".to_string(),
            details: BookingDetails::Free { entry_number: None },
            pin: "4321".to_string(),
            status: BookingStatus::Confirmed,
            checked_in: false,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn payload_matches_issued_wire_shape() {
        let json = ticket_payload_json(&booking());
        assert_eq!(
            json,
            r#"{"bookingId":"free-booking-1733000000000-k3j9x2m4q","eventId":"fresco-2k25","userName":"Asha Rao"}"#
        );
    }

    #[test]
    fn payload_derivation_is_deterministic() {
        let b = booking();
        assert_eq!(ticket_payload_json(&b), ticket_payload_json(&b));
    }

    #[test]
    fn parse_round_trips_and_ignores_unknown_fields() {
        let parsed = parse_scan(r#"{"bookingId":"x","eventId":"e1","userName":"A","v":2}"#).unwrap();
        assert_eq!(parsed.booking_id, "x");
        assert_eq!(parsed.event_id.as_deref(), Some("e1"));
    }

    #[test]
    fn parse_accepts_bare_booking_id() {
        let parsed = parse_scan(r#"{"bookingId":"paid-booking-1-a"}"#).unwrap();
        assert_eq!(parsed.booking_id, "paid-booking-1-a");
        assert_eq!(parsed.event_id, None);
    }

    #[test]
    fn parse_rejects_garbage_and_missing_id() {
        assert!(parse_scan("not json at all").is_err());
        assert!(parse_scan(r#"{"eventId":"e1"}"#).is_err());
        assert!(parse_scan(r#"{"bookingId":""}"#).is_err());
        assert!(parse_scan("https://example.com/some-other-qr").is_err());
    }
}
