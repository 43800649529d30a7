use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::service::errors::{from_ledger, not_found};

pub async fn list_events(State(state): State<AppState>) -> impl IntoResponse {
    match state.booking_service.events.all().await {
        Ok(events) => (axum::http::StatusCode::OK, Json(events)).into_response(),
        Err(e) => {
            let (status, body) = from_ledger(e);
            (status, Json(body)).into_response()
        }
    }
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> impl IntoResponse {
    match state.booking_service.events.get(&event_id).await {
        Ok(Some(event)) => (axum::http::StatusCode::OK, Json(event)).into_response(),
        Ok(None) => {
            let (status, body) = not_found("Event not found.");
            (status, Json(body)).into_response()
        }
        Err(e) => {
            let (status, body) = from_ledger(e);
            (status, Json(body)).into_response()
        }
    }
}
