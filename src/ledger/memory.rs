//! In-memory ledger and event store. Backs the test suites and local runs
//! without a database; applies the same rules as the Postgres
//! implementation, including the conditional check-in write.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::booking::{Booking, BookingCategory, BookingDraft, BookingStatus};
use crate::domain::event::{Event, EventStatus};
use crate::domain::ids::category_of_id;
use crate::ledger::{
    mint_booking, normalize_email, DuplicateRule, EventStore, Ledger, LedgerError,
};

#[derive(Clone, Default)]
pub struct MemoryLedger {
    inner: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    paid: Vec<Booking>,
    free: Vec<Booking>,
}

impl State {
    fn shelf_mut(&mut self, category: BookingCategory) -> &mut Vec<Booking> {
        match category {
            BookingCategory::Paid => &mut self.paid,
            BookingCategory::Free => &mut self.free,
        }
    }

    fn duplicate_of(
        &self,
        category: BookingCategory,
        event_id: &str,
        email: &str,
        transaction_id: Option<&str>,
    ) -> Option<DuplicateRule> {
        if let Some(txn) = transaction_id {
            if self.paid.iter().any(|b| b.transaction_id() == Some(txn)) {
                return Some(DuplicateRule::TransactionId);
            }
        }
        let shelf = match category {
            BookingCategory::Paid => &self.paid,
            BookingCategory::Free => &self.free,
        };
        if shelf.iter().any(|b| b.event_id == event_id && b.user_email == email) {
            return Some(DuplicateRule::EmailForEvent);
        }
        None
    }
}

#[async_trait::async_trait]
impl Ledger for MemoryLedger {
    async fn precheck_duplicates(
        &self,
        category: BookingCategory,
        event_id: &str,
        user_email: &str,
        transaction_id: Option<&str>,
    ) -> Result<(), LedgerError> {
        let email = normalize_email(user_email);
        let txn = transaction_id.map(str::trim);
        let state = self.inner.lock().await;
        match state.duplicate_of(category, event_id, &email, txn) {
            Some(rule) => Err(LedgerError::Duplicate(rule)),
            None => Ok(()),
        }
    }

    async fn create(&self, draft: BookingDraft) -> Result<Booking, LedgerError> {
        let record = mint_booking(draft);
        // Check and insert happen under one lock, so two racing creations
        // cannot both pass the duplicate guard.
        let mut state = self.inner.lock().await;
        if let Some(rule) = state.duplicate_of(
            record.category(),
            &record.event_id,
            &record.user_email,
            record.transaction_id(),
        ) {
            return Err(LedgerError::Duplicate(rule));
        }
        state.shelf_mut(record.category()).push(record.clone());
        Ok(record)
    }

    async fn get(&self, id: &str) -> Result<Option<Booking>, LedgerError> {
        let state = self.inner.lock().await;
        let shelf = match category_of_id(id) {
            BookingCategory::Paid => &state.paid,
            BookingCategory::Free => &state.free,
        };
        Ok(shelf.iter().find(|b| b.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Booking>, LedgerError> {
        let state = self.inner.lock().await;
        let mut all: Vec<Booking> = state.paid.iter().chain(state.free.iter()).cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn list_for_event(&self, event_id: &str) -> Result<Vec<Booking>, LedgerError> {
        let state = self.inner.lock().await;
        let mut hits: Vec<Booking> = state
            .paid
            .iter()
            .chain(state.free.iter())
            .filter(|b| b.event_id == event_id)
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(hits)
    }

    async fn find_by_email_and_pin(
        &self,
        email: &str,
        pin: &str,
    ) -> Result<Vec<Booking>, LedgerError> {
        let email = normalize_email(email);
        let state = self.inner.lock().await;
        Ok(state
            .paid
            .iter()
            .chain(state.free.iter())
            .filter(|b| b.user_email == email && b.pin == pin)
            .cloned()
            .collect())
    }

    async fn set_status(&self, id: &str, status: BookingStatus) -> Result<Booking, LedgerError> {
        let mut state = self.inner.lock().await;
        let shelf = state.shelf_mut(category_of_id(id));
        let booking = shelf
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(LedgerError::NotFound)?;
        booking.status = status;
        Ok(booking.clone())
    }

    async fn check_in(&self, id: &str) -> Result<Booking, LedgerError> {
        let mut state = self.inner.lock().await;
        let shelf = state.shelf_mut(category_of_id(id));
        let booking = shelf
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(LedgerError::NotFound)?;
        if booking.checked_in {
            return Err(LedgerError::AlreadyCheckedIn);
        }
        if booking.status != BookingStatus::Confirmed {
            return Err(LedgerError::NotConfirmed);
        }
        booking.checked_in = true;
        Ok(booking.clone())
    }
}

#[derive(Clone, Default)]
pub struct MemoryEventStore {
    inner: Arc<Mutex<Vec<Event>>>,
}

impl MemoryEventStore {
    pub fn with_events(events: Vec<Event>) -> Self {
        Self { inner: Arc::new(Mutex::new(events)) }
    }
}

#[async_trait::async_trait]
impl EventStore for MemoryEventStore {
    async fn list(&self) -> Result<Vec<Event>, LedgerError> {
        let events = self.inner.lock().await;
        Ok(events.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Event>, LedgerError> {
        let events = self.inner.lock().await;
        Ok(events.iter().find(|e| e.id == id).cloned())
    }

    async fn set_status(&self, id: &str, status: EventStatus) -> Result<Event, LedgerError> {
        let mut events = self.inner.lock().await;
        let event = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(LedgerError::NotFound)?;
        event.status = status;
        Ok(event.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::BookingDetails;

    #[tokio::test]
    async fn create_assigns_category_defaults() {
        let ledger = MemoryLedger::default();
        let paid = ledger.create(paid_draft("tech-night", "a@x.com", "TXN1")).await.unwrap();
        assert!(paid.id.starts_with("paid-booking-"));
        assert_eq!(paid.status, BookingStatus::Pending);
        assert!(!paid.checked_in);

        let free = ledger.create(free_draft("tech-night", "b@x.com")).await.unwrap();
        assert!(free.id.starts_with("free-booking-"));
        assert_eq!(free.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn create_normalizes_email_and_transaction_id() {
        let ledger = MemoryLedger::default();
        let booking = ledger
            .create(paid_draft("tech-night", "  Asha@Example.COM ", "  TXN9  "))
            .await
            .unwrap();
        assert_eq!(booking.user_email, "asha@example.com");
        assert_eq!(booking.transaction_id(), Some("TXN9"));
    }

    #[tokio::test]
    async fn duplicate_transaction_id_is_rejected() {
        let ledger = MemoryLedger::default();
        ledger.create(paid_draft("tech-night", "a@x.com", "TXN1")).await.unwrap();
        let err = ledger
            .create(paid_draft("other-event", "b@x.com", "TXN1"))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Duplicate(DuplicateRule::TransactionId)));
    }

    #[tokio::test]
    async fn duplicate_email_is_scoped_to_the_event() {
        let ledger = MemoryLedger::default();
        ledger.create(free_draft("tech-night", "a@x.com")).await.unwrap();
        let err = ledger.create(free_draft("tech-night", " A@X.com ")).await.unwrap_err();
        assert!(matches!(err, LedgerError::Duplicate(DuplicateRule::EmailForEvent)));

        // Same address is fine for a different event.
        ledger.create(free_draft("film-fest", "a@x.com")).await.unwrap();
    }

    #[tokio::test]
    async fn precheck_matches_create_rules() {
        let ledger = MemoryLedger::default();
        ledger.create(paid_draft("tech-night", "a@x.com", "TXN1")).await.unwrap();

        let err = ledger
            .precheck_duplicates(BookingCategory::Paid, "other-event", "b@x.com", Some(" TXN1 "))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Duplicate(DuplicateRule::TransactionId)));

        let err = ledger
            .precheck_duplicates(BookingCategory::Paid, "tech-night", "A@x.com", Some("TXN2"))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Duplicate(DuplicateRule::EmailForEvent)));

        ledger
            .precheck_duplicates(BookingCategory::Free, "tech-night", "a@x.com", None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn email_guard_does_not_cross_categories() {
        let ledger = MemoryLedger::default();
        ledger.create(free_draft("tech-night", "a@x.com")).await.unwrap();
        ledger.create(paid_draft("tech-night", "a@x.com", "TXN1")).await.unwrap();
    }

    #[tokio::test]
    async fn check_in_is_exactly_once() {
        let ledger = MemoryLedger::default();
        let booking = ledger.create(free_draft("tech-night", "a@x.com")).await.unwrap();

        let updated = ledger.check_in(&booking.id).await.unwrap();
        assert!(updated.checked_in);

        let err = ledger.check_in(&booking.id).await.unwrap_err();
        assert!(matches!(err, LedgerError::AlreadyCheckedIn));
    }

    #[tokio::test]
    async fn check_in_requires_a_confirmed_booking() {
        let ledger = MemoryLedger::default();
        let booking = ledger.create(paid_draft("tech-night", "a@x.com", "TXN1")).await.unwrap();

        let err = ledger.check_in(&booking.id).await.unwrap_err();
        assert!(matches!(err, LedgerError::NotConfirmed));

        ledger.set_status(&booking.id, BookingStatus::Confirmed).await.unwrap();
        ledger.check_in(&booking.id).await.unwrap();
    }

    #[tokio::test]
    async fn lookup_spans_both_categories() {
        let ledger = MemoryLedger::default();
        ledger.create(free_draft("tech-night", "a@x.com")).await.unwrap();
        ledger.create(paid_draft("film-fest", "a@x.com", "TXN1")).await.unwrap();

        let tickets = ledger.find_by_email_and_pin("A@x.com", "1234").await.unwrap();
        assert_eq!(tickets.len(), 2);

        let none = ledger.find_by_email_and_pin("a@x.com", "0000").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn unknown_ids_miss_without_error() {
        let ledger = MemoryLedger::default();
        assert!(ledger.get("paid-booking-1-missing").await.unwrap().is_none());
        assert!(matches!(
            ledger.set_status("free-booking-1-missing", BookingStatus::Rejected).await,
            Err(LedgerError::NotFound)
        ));
    }

    fn paid_draft(event_id: &str, email: &str, txn: &str) -> BookingDraft {
        BookingDraft {
            event_id: event_id.to_string(),
            user_name: "Asha".to_string(),
            user_email: email.to_string(),
            user_phone: "9876543210".to_string(),
            pin: "1234".to_string(),
            details: BookingDetails::Paid {
                transaction_id: txn.to_string(),
                payment_proof: "https://files.example/proof.png".to_string(),
            },
        }
    }

    fn free_draft(event_id: &str, email: &str) -> BookingDraft {
        BookingDraft {
            event_id: event_id.to_string(),
            user_name: "Asha".to_string(),
            user_email: email.to_string(),
            user_phone: "9876543210".to_string(),
            pin: "1234".to_string(),
            details: BookingDetails::Free { entry_number: None },
        }
    }
}
