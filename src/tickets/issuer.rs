use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::event::{Event, EventStatus};
use crate::tickets::payload::ticket_payload_json;
use anyhow::Context;
use base64::Engine;
use std::io::Cursor;

/// Rendered QR edge length in pixels, matching the size tickets were
/// originally issued at.
const QR_MIN_DIMENSION: u32 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketAvailability {
    Available,
    /// Booking exists but is Pending or Rejected.
    NotConfirmed,
    /// The event was closed after issuance; the ticket stays on record but
    /// is display-only.
    EventConcluded,
}

/// Whether a QR may be rendered for this booking right now. Closing the
/// event invalidates rendering even for confirmed bookings.
pub fn ticket_availability(booking: &Booking, event: &Event) -> TicketAvailability {
    if booking.status != BookingStatus::Confirmed {
        return TicketAvailability::NotConfirmed;
    }
    if event.status == EventStatus::Closed {
        return TicketAvailability::EventConcluded;
    }
    TicketAvailability::Available
}

/// Renders the booking's QR ticket as a PNG, or `None` when the ticket is
/// not currently available. The payload content is deterministic per
/// booking; only the raster encoding is an implementation detail.
pub fn render_qr_png(booking: &Booking, event: &Event) -> anyhow::Result<Option<Vec<u8>>> {
    if ticket_availability(booking, event) != TicketAvailability::Available {
        return Ok(None);
    }

    let payload = ticket_payload_json(booking);
    let code = qrcode::QrCode::new(payload.as_bytes()).context("encoding ticket payload as QR")?;
    let img = code
        .render::<image::Luma<u8>>()
        .quiet_zone(true)
        .min_dimensions(QR_MIN_DIMENSION, QR_MIN_DIMENSION)
        .build();

    let mut png = Cursor::new(Vec::new());
    image::DynamicImage::ImageLuma8(img)
        .write_to(&mut png, image::ImageFormat::Png)
        .context("writing ticket QR as PNG")?;
    Ok(Some(png.into_inner()))
}

/// Same image as a `data:` URL for clients that inline the ticket.
pub fn qr_data_url(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}
