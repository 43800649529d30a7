use std::sync::Arc;

use axum::http::StatusCode;

use crate::domain::booking::{ErrorEnvelope, ScanRequest};
use crate::ledger::{Ledger, LedgerError};
use crate::service::errors::{from_ledger, not_found};
use crate::service::event_directory::EventDirectory;
use crate::tickets::payload::parse_scan;
use crate::verify::engine::classify;
use crate::verify::verdict::{Verdict, VerdictCategory};

/// Gate-side verification and check-in. Scan outcomes, including rejections,
/// are verdicts rather than HTTP errors; the scanner renders whatever comes
/// back.
#[derive(Clone)]
pub struct ScanService {
    pub ledger: Arc<dyn Ledger>,
    pub events: EventDirectory,
}

impl ScanService {
    /// Classifies one raw frame against the event the scanner is scoped to.
    /// Read-only; nothing is marked used here.
    pub async fn verify(
        &self,
        req: ScanRequest,
    ) -> Result<Verdict, (StatusCode, ErrorEnvelope)> {
        let event = self
            .events
            .get(&req.event_id)
            .await
            .map_err(from_ledger)?
            .ok_or_else(|| not_found("Event not found."))?;

        let decoded = parse_scan(&req.raw).ok();
        let booking = match &decoded {
            Some(payload) => {
                self.ledger.get(&payload.booking_id).await.map_err(from_ledger)?
            }
            None => None,
        };

        Ok(classify(decoded.as_ref(), booking.as_ref(), &event))
    }

    /// Applies the check-in the operator confirmed. The conditional write in
    /// the ledger makes this exactly-once: a lost race comes back as the
    /// same already-used warning a re-scan would produce.
    pub async fn check_in(
        &self,
        booking_id: &str,
    ) -> Result<Verdict, (StatusCode, ErrorEnvelope)> {
        match self.ledger.check_in(booking_id).await {
            Ok(booking) => {
                tracing::info!("booking {} checked in", booking.id);
                let event = self.events.get(&booking.event_id).await.map_err(from_ledger)?;
                Ok(Verdict {
                    category: VerdictCategory::Success,
                    message: "Check-in successful!".to_string(),
                    booking: Some(booking),
                    event,
                })
            }
            Err(LedgerError::AlreadyCheckedIn) => {
                let booking = self.ledger.get(booking_id).await.map_err(from_ledger)?;
                Ok(Verdict {
                    category: VerdictCategory::Warning,
                    message: "This ticket has already been used.".to_string(),
                    booking,
                    event: None,
                })
            }
            Err(LedgerError::NotConfirmed) => {
                let booking = self.ledger.get(booking_id).await.map_err(from_ledger)?;
                let message = match &booking {
                    Some(b) => format!("Booking is {}. Not valid for entry.", b.status),
                    None => "Invalid QR Code. Booking not found.".to_string(),
                };
                Ok(Verdict {
                    category: VerdictCategory::Error,
                    message,
                    booking,
                    event: None,
                })
            }
            Err(LedgerError::NotFound) => {
                Ok(Verdict::error("Invalid QR Code. Booking not found."))
            }
            Err(other) => Err(from_ledger(other)),
        }
    }
}
