use crate::domain::booking::{CreateBookingRequest, TicketLookupRequest};
use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

pub async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> impl IntoResponse {
    match state.booking_service.submit(req).await {
        Ok(resp) => (axum::http::StatusCode::CREATED, Json(resp)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

/// Ticket retrieval with the attendee's email and PIN. Always a list; an
/// unknown pair is just an empty one.
pub async fn my_tickets(
    State(state): State<AppState>,
    Json(req): Json<TicketLookupRequest>,
) -> impl IntoResponse {
    match state.booking_service.my_tickets(req).await {
        Ok(tickets) => (axum::http::StatusCode::OK, Json(tickets)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}
