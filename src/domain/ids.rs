use crate::domain::booking::BookingCategory;
use rand::Rng;

const ID_SUFFIX_LEN: usize = 9;
const ID_SUFFIX_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Mints a booking id in the wire format carried inside issued QR codes:
/// `paid-booking-{millis}-{suffix}` or `free-booking-{millis}-{suffix}`.
/// The prefix encodes the category so that ids scanned off old tickets can
/// still be routed to the right collection.
pub fn new_booking_id(category: BookingCategory) -> String {
    let prefix = match category {
        BookingCategory::Paid => "paid-booking",
        BookingCategory::Free => "free-booking",
    };
    let millis = chrono::Utc::now().timestamp_millis();
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_SUFFIX_CHARS[rng.gen_range(0..ID_SUFFIX_CHARS.len())] as char)
        .collect();
    format!("{prefix}-{millis}-{suffix}")
}

/// Routing rule for raw ids, identical for every id ever issued: a `free-`
/// prefix means the free collection, anything else (including legacy
/// `booking-` ids) the paid one. Parsed once at the boundary; downstream
/// code carries the resulting [`BookingCategory`] instead of re-inspecting
/// the string.
pub fn category_of_id(id: &str) -> BookingCategory {
    if id.starts_with("free-") {
        BookingCategory::Free
    } else {
        BookingCategory::Paid
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PinError {
    #[error("PINs do not match.")]
    Mismatch,
    #[error("PIN must be exactly 4 digits.")]
    Format,
}

/// Attendee-chosen retrieval PIN: exactly four ASCII digits, entered twice.
/// The mismatch check runs first so a typo is reported as such rather than
/// as a format problem.
pub fn validate_pin(pin: &str, confirm_pin: &str) -> Result<(), PinError> {
    if pin != confirm_pin {
        return Err(PinError::Mismatch);
    }
    if pin.len() != 4 || !pin.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PinError::Format);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_ids_carry_category_prefix() {
        let paid = new_booking_id(BookingCategory::Paid);
        let free = new_booking_id(BookingCategory::Free);
        assert!(paid.starts_with("paid-booking-"));
        assert!(free.starts_with("free-booking-"));
        assert_eq!(category_of_id(&paid), BookingCategory::Paid);
        assert_eq!(category_of_id(&free), BookingCategory::Free);
    }

    #[test]
    fn suffix_is_lowercase_alphanumeric() {
        let id = new_booking_id(BookingCategory::Paid);
        let suffix = id.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), ID_SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
    }

    #[test]
    fn legacy_ids_route_to_the_paid_collection() {
        assert_eq!(category_of_id("booking-1733-abc"), BookingCategory::Paid);
        assert_eq!(category_of_id("free-booking-1733-abc"), BookingCategory::Free);
    }

    #[test]
    fn pin_mismatch_reported_before_format() {
        assert_eq!(validate_pin("123", "124"), Err(PinError::Mismatch));
        assert_eq!(validate_pin("123", "123"), Err(PinError::Format));
        assert_eq!(validate_pin("12a4", "12a4"), Err(PinError::Format));
        assert_eq!(validate_pin("0412", "0412"), Ok(()));
    }
}
