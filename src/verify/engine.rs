use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::event::Event;
use crate::tickets::payload::TicketPayload;
use crate::verify::verdict::Verdict;

/// Classifies one decoded frame against the event the scanner is scoped to.
///
/// Pure: given the decode outcome, the ledger lookup outcome, and the
/// selected event, the verdict is fully determined. Checks run in a fixed
/// order: payload shape, booking existence, event match, already-used,
/// booking status. A cross-event scan is rejected before any state checks
/// and withholds the booking from the verdict; an already-used ticket is
/// reported as used (warning) rather than re-judged on status, since
/// check-in does not change the booking's status.
pub fn classify(
    decoded: Option<&TicketPayload>,
    booking: Option<&Booking>,
    selected_event: &Event,
) -> Verdict {
    if decoded.is_none() {
        return Verdict::error("Invalid QR Code format.");
    }

    let Some(booking) = booking else {
        return Verdict::error("Invalid QR Code. Booking not found.");
    };

    if booking.event_id != selected_event.id {
        return Verdict::error("Ticket is for a different event!");
    }

    if booking.checked_in {
        return Verdict::warning_for("This ticket has already been used.", booking, selected_event);
    }

    if booking.status != BookingStatus::Confirmed {
        return Verdict::error_for(
            format!("Booking is {}. Not valid for entry.", booking.status),
            booking,
            selected_event,
        );
    }

    Verdict::success_for("Valid ticket. Ready for check-in.", booking, selected_event)
}
