use qrgo::domain::booking::{Booking, BookingDetails, BookingStatus};
use qrgo::domain::event::{Event, EventStatus};
use qrgo::tickets::payload::{parse_scan, ticket_payload_json};
use qrgo::verify::engine::classify;
use qrgo::verify::verdict::VerdictCategory;

#[test]
fn garbled_frame_is_a_format_error() {
    let verdict = classify(None, None, &event("fresco-2k25"));
    assert_eq!(verdict.category, VerdictCategory::Error);
    assert_eq!(verdict.message, "Invalid QR Code format.");
    assert!(verdict.booking.is_none());
}

#[test]
fn unknown_booking_is_not_found() {
    let payload = parse_scan(r#"{"bookingId":"free-booking-1-gone"}"#).unwrap();
    let verdict = classify(Some(&payload), None, &event("fresco-2k25"));
    assert_eq!(verdict.category, VerdictCategory::Error);
    assert_eq!(verdict.message, "Invalid QR Code. Booking not found.");
}

#[test]
fn cross_event_ticket_is_rejected_without_details() {
    let booking = confirmed_booking("film-fest");
    let payload = parse_scan(&ticket_payload_json(&booking)).unwrap();

    let verdict = classify(Some(&payload), Some(&booking), &event("fresco-2k25"));
    assert_eq!(verdict.category, VerdictCategory::Error);
    assert_eq!(verdict.message, "Ticket is for a different event!");
    assert!(verdict.booking.is_none());
    assert!(verdict.event.is_none());
}

#[test]
fn used_ticket_warns_before_any_status_check() {
    let mut booking = confirmed_booking("fresco-2k25");
    booking.checked_in = true;
    booking.status = BookingStatus::Rejected;

    let payload = parse_scan(&ticket_payload_json(&booking)).unwrap();
    let verdict = classify(Some(&payload), Some(&booking), &event("fresco-2k25"));
    assert_eq!(verdict.category, VerdictCategory::Warning);
    assert_eq!(verdict.message, "This ticket has already been used.");
    assert!(verdict.booking.is_some());
}

#[test]
fn unconfirmed_booking_names_its_status() {
    for (status, expected) in [
        (BookingStatus::Pending, "Booking is Pending. Not valid for entry."),
        (BookingStatus::Rejected, "Booking is Rejected. Not valid for entry."),
    ] {
        let mut booking = confirmed_booking("fresco-2k25");
        booking.status = status;
        let payload = parse_scan(&ticket_payload_json(&booking)).unwrap();

        let verdict = classify(Some(&payload), Some(&booking), &event("fresco-2k25"));
        assert_eq!(verdict.category, VerdictCategory::Error);
        assert_eq!(verdict.message, expected);
    }
}

#[test]
fn confirmed_unused_ticket_is_ready() {
    let booking = confirmed_booking("fresco-2k25");
    let payload = parse_scan(&ticket_payload_json(&booking)).unwrap();

    let verdict = classify(Some(&payload), Some(&booking), &event("fresco-2k25"));
    assert_eq!(verdict.category, VerdictCategory::Success);
    assert_eq!(verdict.message, "Valid ticket. Ready for check-in.");
    assert_eq!(verdict.booking.as_ref().map(|b| b.id.as_str()), Some(booking.id.as_str()));
    assert!(verdict.event.is_some());
}

#[test]
fn event_lifecycle_does_not_gate_classification() {
    // A closed event stops ticket rendering, not gate-side verification.
    let booking = confirmed_booking("fresco-2k25");
    let payload = parse_scan(&ticket_payload_json(&booking)).unwrap();
    let mut closed = event("fresco-2k25");
    closed.status = EventStatus::Closed;

    let verdict = classify(Some(&payload), Some(&booking), &closed);
    assert_eq!(verdict.category, VerdictCategory::Success);
}

#[test]
fn same_inputs_always_yield_the_same_verdict() {
    let booking = confirmed_booking("fresco-2k25");
    let payload = parse_scan(&ticket_payload_json(&booking)).unwrap();
    let selected = event("fresco-2k25");

    let first = classify(Some(&payload), Some(&booking), &selected);
    let second = classify(Some(&payload), Some(&booking), &selected);
    assert_eq!(first, second);
}

fn confirmed_booking(event_id: &str) -> Booking {
    Booking {
        id: "free-booking-1733000000000-k3j9x2m4q".to_string(),
        event_id: event_id.to_string(),
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

fn event(id: &str) -> Event {
    Event {
        id: id.to_string(),
        organizer_id: "org-2".to_string(),
        name: "Freshers Party".to_string(),
        date: chrono::Utc::now(),
        venue: "Main Ground".to_string(),
        venue_map_link: None,
        description: String::new(),
        image: String::new(),
        status: EventStatus::Ongoing,
        price: None,
        requires_entry_number: false,
        upi_id: None,
        upi_link: None,
        qr_code_image: None,
    }
}
