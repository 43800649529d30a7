use std::sync::Arc;

use axum::http::StatusCode;
use base64::Engine;

use crate::domain::booking::{
    Booking, BookingDetails, BookingDraft, BookingStatus, CreateBookingRequest,
    CreateBookingResponse, ErrorEnvelope, TicketLookupRequest, TicketView,
};
use crate::domain::event::{Event, EventStatus};
use crate::domain::ids::validate_pin;
use crate::ledger::Ledger;
use crate::proofs::ProofStore;
use crate::service::errors::{err, from_ledger, invalid, not_found};
use crate::service::event_directory::EventDirectory;

/// Booking submission and ticket retrieval.
#[derive(Clone)]
pub struct BookingService {
    pub ledger: Arc<dyn Ledger>,
    pub events: EventDirectory,
    pub proof_store: Arc<dyn ProofStore>,
}

/// Category-specific submission content after validation, before any side
/// effects. Holding the decoded proof bytes here keeps the upload after
/// the duplicate pre-check.
enum PreparedDetails {
    Paid { transaction_id: String, file_name: String, bytes: Vec<u8> },
    Free { entry_number: Option<String> },
}

impl BookingService {
    pub async fn submit(
        &self,
        req: CreateBookingRequest,
    ) -> Result<CreateBookingResponse, (StatusCode, ErrorEnvelope)> {
        let event = self
            .events
            .get(&req.event_id)
            .await
            .map_err(from_ledger)?
            .ok_or_else(|| not_found("Event not found."))?;

        match event.status {
            EventStatus::Ongoing => {}
            EventStatus::Upcoming => {
                return Err((
                    StatusCode::CONFLICT,
                    err("EVENT_NOT_OPEN", "Booking for this event is not open yet."),
                ));
            }
            EventStatus::BookingStopped | EventStatus::Closed => {
                return Err((
                    StatusCode::CONFLICT,
                    err("EVENT_NOT_OPEN", "Booking for this event has closed."),
                ));
            }
        }

        validate_pin(&req.pin, &req.confirm_pin).map_err(|e| invalid(&e.to_string()))?;
        let prepared = prepare_details(&req, &event)?;

        let category = event.booking_category();
        let transaction_id = match &prepared {
            PreparedDetails::Paid { transaction_id, .. } => Some(transaction_id.as_str()),
            PreparedDetails::Free { .. } => None,
        };
        self.ledger
            .precheck_duplicates(category, &event.id, &req.user_email, transaction_id)
            .await
            .map_err(from_ledger)?;

        let details = match prepared {
            PreparedDetails::Paid { transaction_id, file_name, bytes } => {
                let payment_proof =
                    self.proof_store.store(&file_name, bytes).await.map_err(|e| {
                        tracing::warn!("payment proof upload failed: {}", e);
                        (
                            StatusCode::BAD_GATEWAY,
                            err("STORAGE_FAILURE", "Failed to upload payment proof."),
                        )
                    })?;
                BookingDetails::Paid { transaction_id, payment_proof }
            }
            PreparedDetails::Free { entry_number } => BookingDetails::Free { entry_number },
        };

        let booking = self
            .ledger
            .create(BookingDraft {
                event_id: event.id.clone(),
                user_name: req.user_name.trim().to_string(),
                user_email: req.user_email,
                user_phone: req.user_phone.trim().to_string(),
                pin: req.pin,
                details,
            })
            .await
            .map_err(from_ledger)?;

        tracing::info!("booking {} created for event {}", booking.id, booking.event_id);
        let message = match booking.status {
            BookingStatus::Confirmed => "Booking confirmed! Your ticket is ready.",
            _ => "Booking submitted for approval!",
        };
        Ok(CreateBookingResponse { booking, message: message.to_string() })
    }

    /// Every ticket held by the (email, PIN) pair, newest first, each
    /// joined with its event when the event still exists.
    pub async fn my_tickets(
        &self,
        req: TicketLookupRequest,
    ) -> Result<Vec<TicketView>, (StatusCode, ErrorEnvelope)> {
        let mut bookings: Vec<Booking> = self
            .ledger
            .find_by_email_and_pin(&req.email, &req.pin)
            .await
            .map_err(from_ledger)?;
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let events = self.events.all().await.map_err(from_ledger)?;
        Ok(bookings
            .into_iter()
            .map(|booking| {
                let event = events.iter().find(|e| e.id == booking.event_id).cloned();
                TicketView { booking, event }
            })
            .collect())
    }

    pub async fn get_booking(
        &self,
        id: &str,
    ) -> Result<(Booking, Option<Event>), (StatusCode, ErrorEnvelope)> {
        let booking = self
            .ledger
            .get(id)
            .await
            .map_err(from_ledger)?
            .ok_or_else(|| not_found("Booking not found."))?;
        let event = self.events.get(&booking.event_id).await.map_err(from_ledger)?;
        Ok((booking, event))
    }
}

fn prepare_details(
    req: &CreateBookingRequest,
    event: &Event,
) -> Result<PreparedDetails, (StatusCode, ErrorEnvelope)> {
    if event.is_free() {
        // Payment fields on a free submission are dropped, not rejected.
        let entry_number = if event.requires_entry_number {
            let entry = req.entry_number.as_deref().unwrap_or("").trim().to_string();
            if entry.is_empty() {
                return Err(invalid("Entry number is required."));
            }
            Some(entry)
        } else {
            None
        };
        validate_contact(req)?;
        return Ok(PreparedDetails::Free { entry_number });
    }

    let upload = req
        .payment_proof
        .as_ref()
        .ok_or_else(|| invalid("Please upload proof of payment."))?;
    let transaction_id = req.transaction_id.as_deref().unwrap_or("").trim().to_string();
    if transaction_id.is_empty() {
        return Err(invalid("Transaction ID is required."));
    }
    validate_contact(req)?;

    let file_name = upload.file_name.trim();
    if file_name.is_empty() {
        return Err(invalid("Payment proof file name is required."));
    }
    let bytes = decode_proof(&upload.content_base64)?;
    Ok(PreparedDetails::Paid { transaction_id, file_name: file_name.to_string(), bytes })
}

fn validate_contact(req: &CreateBookingRequest) -> Result<(), (StatusCode, ErrorEnvelope)> {
    if req.user_name.trim().is_empty() {
        return Err(invalid("Name is required."));
    }
    if !req.user_email.contains('@') {
        return Err(invalid("A valid email address is required."));
    }
    if req.user_phone.trim().is_empty() {
        return Err(invalid("Phone number is required."));
    }
    Ok(())
}

/// Accepts raw base64 or a full `data:` URL.
fn decode_proof(content: &str) -> Result<Vec<u8>, (StatusCode, ErrorEnvelope)> {
    let raw = content.split_once("base64,").map(|(_, rest)| rest).unwrap_or(content);
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(raw.trim())
        .map_err(|_| invalid("Payment proof must be base64 encoded."))?;
    if bytes.is_empty() {
        return Err(invalid("Payment proof file is empty."));
    }
    Ok(bytes)
}
