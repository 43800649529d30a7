use crate::domain::booking::UpdateBookingStatusRequest;
use crate::domain::organizer::Organizer;
use crate::service::errors::err;
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub secret_id: String,
}

/// Credential check for the organizer console. The same header pair is
/// re-verified by the middleware on every admin call; this endpoint just
/// lets a client confirm credentials and fetch the profile.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    match state.organizers.authenticate(&req.username, &req.secret_id) {
        Some(organizer) => (axum::http::StatusCode::OK, Json(organizer.clone())).into_response(),
        None => (
            axum::http::StatusCode::UNAUTHORIZED,
            Json(err("UNAUTHORIZED", "Invalid organizer credentials.")),
        )
            .into_response(),
    }
}

pub async fn list_events(
    State(state): State<AppState>,
    Extension(organizer): Extension<Organizer>,
) -> impl IntoResponse {
    match state.admin_service.events_for(&organizer).await {
        Ok(events) => (axum::http::StatusCode::OK, Json(events)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

pub async fn advance_event_status(
    State(state): State<AppState>,
    Extension(organizer): Extension<Organizer>,
    Path(event_id): Path<String>,
) -> impl IntoResponse {
    match state.admin_service.advance_event_status(&organizer, &event_id).await {
        Ok(event) => (axum::http::StatusCode::OK, Json(event)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

pub async fn list_bookings(
    State(state): State<AppState>,
    Extension(organizer): Extension<Organizer>,
) -> impl IntoResponse {
    match state.admin_service.bookings_overview(&organizer).await {
        Ok(bookings) => (axum::http::StatusCode::OK, Json(bookings)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

pub async fn list_event_bookings(
    State(state): State<AppState>,
    Extension(organizer): Extension<Organizer>,
    Path(event_id): Path<String>,
) -> impl IntoResponse {
    match state.admin_service.bookings_for_event(&organizer, &event_id).await {
        Ok(bookings) => (axum::http::StatusCode::OK, Json(bookings)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

pub async fn update_booking_status(
    State(state): State<AppState>,
    Extension(organizer): Extension<Organizer>,
    Path(booking_id): Path<String>,
    Json(req): Json<UpdateBookingStatusRequest>,
) -> impl IntoResponse {
    match state
        .admin_service
        .set_booking_status(&organizer, &booking_id, req.status)
        .await
    {
        Ok(booking) => (axum::http::StatusCode::OK, Json(booking)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenRequest {
    pub transaction_id: String,
}

#[derive(Debug, Serialize)]
pub struct ScreenResponse {
    pub assessment: crate::screening::TxnAssessment,
}

/// Advisory screening of a transaction id for the approval view.
pub async fn screen_transaction(
    State(state): State<AppState>,
    Extension(_organizer): Extension<Organizer>,
    Json(req): Json<ScreenRequest>,
) -> impl IntoResponse {
    let assessment = state.admin_service.screen_transaction(&req.transaction_id).await;
    (axum::http::StatusCode::OK, Json(ScreenResponse { assessment })).into_response()
}
