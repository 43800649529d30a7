use crate::domain::booking::{Booking, BookingCategory, BookingDetails, BookingDraft, BookingStatus};
use crate::domain::event::{Event, EventStatus};

pub mod memory;
pub mod postgres;

/// Which uniqueness rule a rejected creation tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateRule {
    TransactionId,
    EmailForEvent,
}

impl DuplicateRule {
    pub fn message(&self) -> &'static str {
        match self {
            DuplicateRule::TransactionId => "This Transaction ID has already been used.",
            DuplicateRule::EmailForEvent => {
                "This email address has already been used to book this event."
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("{}", .0.message())]
    Duplicate(DuplicateRule),
    #[error("record not found")]
    NotFound,
    #[error("booking is already checked in")]
    AlreadyCheckedIn,
    #[error("booking is not confirmed")]
    NotConfirmed,
    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

/// The booking record store. One conceptual schema split over two
/// collections (paid and free); every implementation routes a raw id by its
/// category prefix, exactly once, at this boundary.
///
/// `create` owns record minting: it assigns the id, stamps `created_at`,
/// applies the category's initial status, clears `checked_in`, normalizes
/// the email, and enforces the uniqueness rules before (and, for the
/// Postgres implementation, also at) the insert. After creation only
/// `status` and `checked_in` are mutable, through the two dedicated
/// mutators below.
#[async_trait::async_trait]
pub trait Ledger: Send + Sync {
    /// Duplicate guard, callable before any side effects (the proof upload
    /// in particular) are taken on a submission. Rejects a reused
    /// transaction id, then a reused email for the same event; the email
    /// rule is scoped to the submission's own category. `create` re-applies
    /// the same rules, so skipping this is safe, just later.
    async fn precheck_duplicates(
        &self,
        category: BookingCategory,
        event_id: &str,
        user_email: &str,
        transaction_id: Option<&str>,
    ) -> Result<(), LedgerError>;

    async fn create(&self, draft: BookingDraft) -> Result<Booking, LedgerError>;

    /// A miss is `Ok(None)`, not an error: unresolvable ids are an expected
    /// scanning outcome.
    async fn get(&self, id: &str) -> Result<Option<Booking>, LedgerError>;

    async fn list_all(&self) -> Result<Vec<Booking>, LedgerError>;

    async fn list_for_event(&self, event_id: &str) -> Result<Vec<Booking>, LedgerError>;

    /// Ticket retrieval by the attendee's sole credential pair, across both
    /// categories.
    async fn find_by_email_and_pin(&self, email: &str, pin: &str)
        -> Result<Vec<Booking>, LedgerError>;

    async fn set_status(&self, id: &str, status: BookingStatus) -> Result<Booking, LedgerError>;

    /// Marks the booking used. Conditional: only applies when the booking
    /// is Confirmed and not yet checked in, so a repeat (or a lost race
    /// between two gates) surfaces as `AlreadyCheckedIn` instead of a
    /// silent second write.
    async fn check_in(&self, id: &str) -> Result<Booking, LedgerError>;
}

/// Read model plus status writes for events. Status transitions are not
/// adjacency-checked here; callers decide which status to write.
#[async_trait::async_trait]
pub trait EventStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Event>, LedgerError>;

    async fn get(&self, id: &str) -> Result<Option<Event>, LedgerError>;

    async fn set_status(&self, id: &str, status: EventStatus) -> Result<Event, LedgerError>;
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Builds the full record from a draft: fresh id, category-appropriate
/// initial status, normalized email, trimmed transaction id, creation
/// timestamp. Shared by every `Ledger` implementation so the minting rules
/// cannot drift between them.
pub(crate) fn mint_booking(draft: BookingDraft) -> Booking {
    let BookingDraft { event_id, user_name, user_email, user_phone, pin, details } = draft;
    let details = match details {
        BookingDetails::Paid { transaction_id, payment_proof } => BookingDetails::Paid {
            transaction_id: transaction_id.trim().to_string(),
            payment_proof,
        },
        free => free,
    };
    let category = details.category();
    Booking {
        id: crate::domain::ids::new_booking_id(category),
        event_id,
        user_name,
        user_email: normalize_email(&user_email),
        user_phone,
        details,
        pin,
        status: category.initial_status(),
        checked_in: false,
        created_at: chrono::Utc::now(),
    }
}
