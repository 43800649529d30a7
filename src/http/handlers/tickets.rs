use crate::domain::booking::Booking;
use crate::domain::event::Event;
use crate::service::errors::err;
use crate::tickets::issuer::{qr_data_url, render_qr_png, ticket_availability, TicketAvailability};
use crate::tickets::payload::ticket_payload_json;
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketIssueView {
    pub booking: Booking,
    pub event: Option<Event>,
    /// Inline PNG as a `data:` URL; absent while the ticket is unavailable.
    pub qr_data_url: Option<String>,
    /// The encoded payload text, so clients can re-render the code locally.
    pub qr_payload: Option<String>,
}

/// Ticket JSON for one booking: the record, its event, and the QR when the
/// booking is confirmed and the event has not concluded.
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> impl IntoResponse {
    let (booking, event) = match state.booking_service.get_booking(&booking_id).await {
        Ok(found) => found,
        Err((status, body)) => return (status, Json(body)).into_response(),
    };

    let qr_data_url = match &event {
        Some(event) => match render_qr_png(&booking, event) {
            Ok(png) => png.as_deref().map(qr_data_url),
            Err(e) => {
                return (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    Json(err("INTERNAL_ERROR", &e.to_string())),
                )
                    .into_response()
            }
        },
        None => None,
    };
    let qr_payload = qr_data_url.as_ref().map(|_| ticket_payload_json(&booking));

    (axum::http::StatusCode::OK, Json(TicketIssueView { booking, event, qr_data_url, qr_payload }))
        .into_response()
}

/// The QR alone, as raw PNG bytes. Unavailable tickets answer with the
/// reason instead of an image.
pub async fn get_ticket_png(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> impl IntoResponse {
    let (booking, event) = match state.booking_service.get_booking(&booking_id).await {
        Ok(found) => found,
        Err((status, body)) => return (status, Json(body)).into_response(),
    };

    let Some(event) = event else {
        return (
            axum::http::StatusCode::NOT_FOUND,
            Json(err("NOT_FOUND", "Event details not found for this booking.")),
        )
            .into_response();
    };

    match ticket_availability(&booking, &event) {
        TicketAvailability::NotConfirmed => {
            return (
                axum::http::StatusCode::CONFLICT,
                Json(err("TICKET_NOT_CONFIRMED", "Your booking is not yet confirmed.")),
            )
                .into_response();
        }
        TicketAvailability::EventConcluded => {
            return (
                axum::http::StatusCode::GONE,
                Json(err("EVENT_CONCLUDED", "This event has concluded.")),
            )
                .into_response();
        }
        TicketAvailability::Available => {}
    }

    match render_qr_png(&booking, &event) {
        Ok(Some(png)) => (
            axum::http::StatusCode::OK,
            [(axum::http::header::CONTENT_TYPE, "image/png")],
            png,
        )
            .into_response(),
        Ok(None) => (
            axum::http::StatusCode::CONFLICT,
            Json(err("TICKET_NOT_CONFIRMED", "Your booking is not yet confirmed.")),
        )
            .into_response(),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(err("INTERNAL_ERROR", &e.to_string())),
        )
            .into_response(),
    }
}
