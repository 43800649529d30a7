//! Error envelope plumbing shared by the services. Handlers return
//! `Result<T, (StatusCode, ErrorEnvelope)>` and serialize whichever side
//! they get.

use axum::http::StatusCode;

use crate::domain::booking::{ErrorEnvelope, ErrorPayload};
use crate::ledger::{DuplicateRule, LedgerError};

pub fn err(code: &str, message: &str) -> ErrorEnvelope {
    ErrorEnvelope {
        error: ErrorPayload {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        },
    }
}

pub fn internal(e: anyhow::Error) -> (StatusCode, ErrorEnvelope) {
    (StatusCode::INTERNAL_SERVER_ERROR, err("INTERNAL_ERROR", &e.to_string()))
}

pub fn invalid(message: &str) -> (StatusCode, ErrorEnvelope) {
    (StatusCode::BAD_REQUEST, err("VALIDATION_FAILED", message))
}

pub fn not_found(message: &str) -> (StatusCode, ErrorEnvelope) {
    (StatusCode::NOT_FOUND, err("NOT_FOUND", message))
}

/// Ledger failures carry their own user-facing text; everything else is
/// internal.
pub fn from_ledger(e: LedgerError) -> (StatusCode, ErrorEnvelope) {
    match e {
        LedgerError::Duplicate(DuplicateRule::TransactionId) => (
            StatusCode::CONFLICT,
            err("DUPLICATE_TRANSACTION_ID", DuplicateRule::TransactionId.message()),
        ),
        LedgerError::Duplicate(DuplicateRule::EmailForEvent) => (
            StatusCode::CONFLICT,
            err("DUPLICATE_EMAIL_FOR_EVENT", DuplicateRule::EmailForEvent.message()),
        ),
        LedgerError::NotFound => not_found("Booking not found."),
        LedgerError::AlreadyCheckedIn => {
            (StatusCode::CONFLICT, err("ALREADY_CHECKED_IN", "This ticket has already been used."))
        }
        LedgerError::NotConfirmed => {
            (StatusCode::CONFLICT, err("TICKET_NOT_CONFIRMED", "Booking is not confirmed."))
        }
        LedgerError::Storage(e) => internal(e),
    }
}
