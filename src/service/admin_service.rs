use std::collections::HashSet;
use std::sync::Arc;

use axum::http::StatusCode;

use crate::domain::booking::{Booking, BookingStatus, ErrorEnvelope};
use crate::domain::event::Event;
use crate::domain::organizer::Organizer;
use crate::ledger::Ledger;
use crate::screening::{TxnAssessment, TxnScreener};
use crate::service::errors::{err, from_ledger, not_found};
use crate::service::event_directory::EventDirectory;

/// Organizer-facing operations. Every call is scoped to the authenticated
/// organizer: the super admin sees everything, everyone else only their
/// own events and those events' bookings.
#[derive(Clone)]
pub struct AdminService {
    pub ledger: Arc<dyn Ledger>,
    pub events: EventDirectory,
    pub screener: Arc<dyn TxnScreener>,
}

impl AdminService {
    pub async fn events_for(
        &self,
        organizer: &Organizer,
    ) -> Result<Vec<Event>, (StatusCode, ErrorEnvelope)> {
        let all = self.events.all().await.map_err(from_ledger)?;
        if organizer.is_super_admin() {
            return Ok(all);
        }
        Ok(all.into_iter().filter(|e| e.organizer_id == organizer.id).collect())
    }

    /// All bookings visible to this organizer, newest first.
    pub async fn bookings_overview(
        &self,
        organizer: &Organizer,
    ) -> Result<Vec<Booking>, (StatusCode, ErrorEnvelope)> {
        let bookings = self.ledger.list_all().await.map_err(from_ledger)?;
        if organizer.is_super_admin() {
            return Ok(bookings);
        }
        let owned: HashSet<String> = self
            .events_for(organizer)
            .await?
            .into_iter()
            .map(|e| e.id)
            .collect();
        Ok(bookings.into_iter().filter(|b| owned.contains(&b.event_id)).collect())
    }

    pub async fn bookings_for_event(
        &self,
        organizer: &Organizer,
        event_id: &str,
    ) -> Result<Vec<Booking>, (StatusCode, ErrorEnvelope)> {
        let event = self
            .events
            .get(event_id)
            .await
            .map_err(from_ledger)?
            .ok_or_else(|| not_found("Event not found."))?;
        ensure_scope(organizer, &event)?;
        self.ledger.list_for_event(event_id).await.map_err(from_ledger)
    }

    /// Approves or rejects a submission. Scope is checked against the
    /// booking's event when that event still exists.
    pub async fn set_booking_status(
        &self,
        organizer: &Organizer,
        booking_id: &str,
        status: BookingStatus,
    ) -> Result<Booking, (StatusCode, ErrorEnvelope)> {
        let booking = self
            .ledger
            .get(booking_id)
            .await
            .map_err(from_ledger)?
            .ok_or_else(|| not_found("Booking not found."))?;
        if let Some(event) = self.events.get(&booking.event_id).await.map_err(from_ledger)? {
            ensure_scope(organizer, &event)?;
        }
        let updated = self.ledger.set_status(booking_id, status).await.map_err(from_ledger)?;
        tracing::info!("booking {} set to {}", updated.id, updated.status);
        Ok(updated)
    }

    /// Advances the event one step along its cycle and returns the updated
    /// event.
    pub async fn advance_event_status(
        &self,
        organizer: &Organizer,
        event_id: &str,
    ) -> Result<Event, (StatusCode, ErrorEnvelope)> {
        let event = self
            .events
            .get(event_id)
            .await
            .map_err(from_ledger)?
            .ok_or_else(|| not_found("Event not found."))?;
        ensure_scope(organizer, &event)?;
        let next = event.status.next();
        let updated = self.events.set_status(event_id, next).await.map_err(from_ledger)?;
        tracing::info!("event {} moved to {}", updated.id, updated.status);
        Ok(updated)
    }

    /// Advisory screening of a submitted transaction id.
    pub async fn screen_transaction(&self, transaction_id: &str) -> TxnAssessment {
        self.screener.assess(transaction_id).await
    }
}

fn ensure_scope(
    organizer: &Organizer,
    event: &Event,
) -> Result<(), (StatusCode, ErrorEnvelope)> {
    if organizer.is_super_admin() || event.organizer_id == organizer.id {
        return Ok(());
    }
    Err((StatusCode::FORBIDDEN, err("FORBIDDEN", "This event belongs to another organizer.")))
}
