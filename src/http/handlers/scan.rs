use crate::domain::booking::ScanRequest;
use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

/// Read-only verification of one scanned frame. Every outcome, including a
/// rejected ticket, is a 200 with a verdict body.
pub async fn verify(
    State(state): State<AppState>,
    Json(req): Json<ScanRequest>,
) -> impl IntoResponse {
    match state.scan_service.verify(req).await {
        Ok(verdict) => (axum::http::StatusCode::OK, Json(verdict)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    pub booking_id: String,
}

pub async fn check_in(
    State(state): State<AppState>,
    Json(req): Json<CheckInRequest>,
) -> impl IntoResponse {
    match state.scan_service.check_in(&req.booking_id).await {
        Ok(verdict) => (axum::http::StatusCode::OK, Json(verdict)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}
