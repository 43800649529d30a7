//! Postgres-backed ledger and event store. Paid and free bookings live in
//! separate tables with matching shapes; the unique indexes on
//! `transaction_id` and `(event_id, user_email)` back the duplicate guard
//! so a race between two creations cannot slip past the pre-checks.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::booking::{
    Booking, BookingCategory, BookingDetails, BookingDraft, BookingStatus,
};
use crate::domain::event::{Event, EventStatus};
use crate::domain::ids::category_of_id;
use crate::ledger::{mint_booking, normalize_email, DuplicateRule, EventStore, Ledger, LedgerError};

const PAID_COLUMNS: &str =
    "id, event_id, user_name, user_email, user_phone, transaction_id, payment_proof_url, pin, status, checked_in, created_at";
const FREE_COLUMNS: &str =
    "id, event_id, user_name, user_email, user_phone, entry_number, pin, status, checked_in, created_at";

#[derive(Clone)]
pub struct PgLedger {
    pub pool: PgPool,
}

#[async_trait::async_trait]
impl Ledger for PgLedger {
    async fn precheck_duplicates(
        &self,
        category: BookingCategory,
        event_id: &str,
        user_email: &str,
        transaction_id: Option<&str>,
    ) -> Result<(), LedgerError> {
        if let Some(txn) = transaction_id {
            let clash = sqlx::query("SELECT id FROM paid_bookings WHERE transaction_id = $1")
                .bind(txn.trim())
                .fetch_optional(&self.pool)
                .await
                .map_err(storage)?;
            if clash.is_some() {
                return Err(LedgerError::Duplicate(DuplicateRule::TransactionId));
            }
        }

        let (table, _) = table_for(category);
        let clash =
            sqlx::query(&format!("SELECT id FROM {table} WHERE event_id = $1 AND user_email = $2"))
                .bind(event_id)
                .bind(normalize_email(user_email))
                .fetch_optional(&self.pool)
                .await
                .map_err(storage)?;
        if clash.is_some() {
            return Err(LedgerError::Duplicate(DuplicateRule::EmailForEvent));
        }
        Ok(())
    }

    async fn create(&self, draft: BookingDraft) -> Result<Booking, LedgerError> {
        let record = mint_booking(draft);
        self.precheck_duplicates(
            record.category(),
            &record.event_id,
            &record.user_email,
            record.transaction_id(),
        )
        .await?;
        match &record.details {
            BookingDetails::Paid { transaction_id, payment_proof } => {
                sqlx::query(
                    r#"
                    INSERT INTO paid_bookings (
                        id, event_id, user_name, user_email, user_phone,
                        transaction_id, payment_proof_url, pin, status, checked_in, created_at
                    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                    "#,
                )
                .bind(&record.id)
                .bind(&record.event_id)
                .bind(&record.user_name)
                .bind(&record.user_email)
                .bind(&record.user_phone)
                .bind(transaction_id)
                .bind(payment_proof)
                .bind(&record.pin)
                .bind(record.status.as_str())
                .bind(record.checked_in)
                .bind(record.created_at)
                .execute(&self.pool)
                .await
                .map_err(map_insert_error)?;
            }
            BookingDetails::Free { entry_number } => {
                sqlx::query(
                    r#"
                    INSERT INTO free_bookings (
                        id, event_id, user_name, user_email, user_phone,
                        entry_number, pin, status, checked_in, created_at
                    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                    "#,
                )
                .bind(&record.id)
                .bind(&record.event_id)
                .bind(&record.user_name)
                .bind(&record.user_email)
                .bind(&record.user_phone)
                .bind(entry_number)
                .bind(&record.pin)
                .bind(record.status.as_str())
                .bind(record.checked_in)
                .bind(record.created_at)
                .execute(&self.pool)
                .await
                .map_err(map_insert_error)?;
            }
        }
        Ok(record)
    }

    async fn get(&self, id: &str) -> Result<Option<Booking>, LedgerError> {
        match category_of_id(id) {
            BookingCategory::Paid => {
                let row = sqlx::query(&format!(
                    "SELECT {PAID_COLUMNS} FROM paid_bookings WHERE id = $1"
                ))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(storage)?;
                row.map(|r| paid_from_row(&r)).transpose().map_err(LedgerError::from)
            }
            BookingCategory::Free => {
                let row = sqlx::query(&format!(
                    "SELECT {FREE_COLUMNS} FROM free_bookings WHERE id = $1"
                ))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(storage)?;
                row.map(|r| free_from_row(&r)).transpose().map_err(LedgerError::from)
            }
        }
    }

    async fn list_all(&self) -> Result<Vec<Booking>, LedgerError> {
        let paid = sqlx::query(&format!(
            "SELECT {PAID_COLUMNS} FROM paid_bookings ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;
        let free = sqlx::query(&format!(
            "SELECT {FREE_COLUMNS} FROM free_bookings ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        let mut all = collect_paid(&paid)?;
        all.extend(collect_free(&free)?);
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn list_for_event(&self, event_id: &str) -> Result<Vec<Booking>, LedgerError> {
        let paid = sqlx::query(&format!(
            "SELECT {PAID_COLUMNS} FROM paid_bookings WHERE event_id = $1 ORDER BY created_at DESC"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;
        let free = sqlx::query(&format!(
            "SELECT {FREE_COLUMNS} FROM free_bookings WHERE event_id = $1 ORDER BY created_at DESC"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        let mut hits = collect_paid(&paid)?;
        hits.extend(collect_free(&free)?);
        hits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(hits)
    }

    async fn find_by_email_and_pin(
        &self,
        email: &str,
        pin: &str,
    ) -> Result<Vec<Booking>, LedgerError> {
        let email = normalize_email(email);
        let paid = sqlx::query(&format!(
            "SELECT {PAID_COLUMNS} FROM paid_bookings WHERE user_email = $1 AND pin = $2"
        ))
        .bind(&email)
        .bind(pin)
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;
        let free = sqlx::query(&format!(
            "SELECT {FREE_COLUMNS} FROM free_bookings WHERE user_email = $1 AND pin = $2"
        ))
        .bind(&email)
        .bind(pin)
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        let mut hits = collect_paid(&paid)?;
        hits.extend(collect_free(&free)?);
        Ok(hits)
    }

    async fn set_status(&self, id: &str, status: BookingStatus) -> Result<Booking, LedgerError> {
        let (table, columns) = table_for(category_of_id(id));
        let row = sqlx::query(&format!(
            "UPDATE {table} SET status = $2 WHERE id = $1 RETURNING {columns}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;
        match row {
            Some(r) => booking_from_row(category_of_id(id), &r).map_err(LedgerError::from),
            None => Err(LedgerError::NotFound),
        }
    }

    async fn check_in(&self, id: &str) -> Result<Booking, LedgerError> {
        let (table, columns) = table_for(category_of_id(id));
        // Conditional write: only one scanner can flip the flag, and only on
        // a Confirmed booking. Zero rows means the precondition failed, and
        // a re-read tells us which way.
        let row = sqlx::query(&format!(
            "UPDATE {table} SET checked_in = TRUE WHERE id = $1 AND checked_in = FALSE AND status = 'Confirmed' RETURNING {columns}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        if let Some(r) = row {
            return booking_from_row(category_of_id(id), &r).map_err(LedgerError::from);
        }
        match self.get(id).await? {
            None => Err(LedgerError::NotFound),
            Some(b) if b.checked_in => Err(LedgerError::AlreadyCheckedIn),
            Some(_) => Err(LedgerError::NotConfirmed),
        }
    }
}

#[derive(Clone)]
pub struct PgEventStore {
    pub pool: PgPool,
}

const EVENT_COLUMNS: &str =
    "id, organizer_id, name, date, venue, venue_map_link, description, image, status, price, requires_entry_number, upi_id, upi_link, qr_code_image";

#[async_trait::async_trait]
impl EventStore for PgEventStore {
    async fn list(&self) -> Result<Vec<Event>, LedgerError> {
        let rows = sqlx::query(&format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY date ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;
        rows.iter()
            .map(event_from_row)
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(LedgerError::from)
    }

    async fn get(&self, id: &str) -> Result<Option<Event>, LedgerError> {
        let row = sqlx::query(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        row.map(|r| event_from_row(&r)).transpose().map_err(LedgerError::from)
    }

    async fn set_status(&self, id: &str, status: EventStatus) -> Result<Event, LedgerError> {
        let row = sqlx::query(&format!(
            "UPDATE events SET status = $2 WHERE id = $1 RETURNING {EVENT_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;
        match row {
            Some(r) => event_from_row(&r).map_err(LedgerError::from),
            None => Err(LedgerError::NotFound),
        }
    }
}

fn table_for(category: BookingCategory) -> (&'static str, &'static str) {
    match category {
        BookingCategory::Paid => ("paid_bookings", PAID_COLUMNS),
        BookingCategory::Free => ("free_bookings", FREE_COLUMNS),
    }
}

fn booking_from_row(category: BookingCategory, row: &PgRow) -> anyhow::Result<Booking> {
    match category {
        BookingCategory::Paid => paid_from_row(row),
        BookingCategory::Free => free_from_row(row),
    }
}

fn paid_from_row(row: &PgRow) -> anyhow::Result<Booking> {
    Ok(Booking {
        id: row.get("id"),
        event_id: row.get("event_id"),
        user_name: row.get("user_name"),
        user_email: row.get("user_email"),
        user_phone: row.get("user_phone"),
        details: BookingDetails::Paid {
            transaction_id: row.get("transaction_id"),
            payment_proof: row.get("payment_proof_url"),
        },
        pin: row.get("pin"),
        status: parse_status(row.get("status"))?,
        checked_in: row.get("checked_in"),
        created_at: row.get("created_at"),
    })
}

fn free_from_row(row: &PgRow) -> anyhow::Result<Booking> {
    Ok(Booking {
        id: row.get("id"),
        event_id: row.get("event_id"),
        user_name: row.get("user_name"),
        user_email: row.get("user_email"),
        user_phone: row.get("user_phone"),
        details: BookingDetails::Free { entry_number: row.get("entry_number") },
        pin: row.get("pin"),
        status: parse_status(row.get("status"))?,
        checked_in: row.get("checked_in"),
        created_at: row.get("created_at"),
    })
}

fn event_from_row(row: &PgRow) -> anyhow::Result<Event> {
    let status: String = row.get("status");
    let status = EventStatus::parse(&status)
        .ok_or_else(|| anyhow::anyhow!("unknown event status in store: {status}"))?;
    Ok(Event {
        id: row.get("id"),
        organizer_id: row.get("organizer_id"),
        name: row.get("name"),
        date: row.get("date"),
        venue: row.get("venue"),
        venue_map_link: row.get("venue_map_link"),
        description: row.get("description"),
        image: row.get("image"),
        status,
        price: row.get("price"),
        requires_entry_number: row.get("requires_entry_number"),
        upi_id: row.get("upi_id"),
        upi_link: row.get("upi_link"),
        qr_code_image: row.get("qr_code_image"),
    })
}

fn parse_status(raw: String) -> anyhow::Result<BookingStatus> {
    BookingStatus::parse(&raw).ok_or_else(|| anyhow::anyhow!("unknown booking status in store: {raw}"))
}

fn collect_paid(rows: &[PgRow]) -> Result<Vec<Booking>, LedgerError> {
    rows.iter().map(paid_from_row).collect::<anyhow::Result<Vec<_>>>().map_err(LedgerError::from)
}

fn collect_free(rows: &[PgRow]) -> Result<Vec<Booking>, LedgerError> {
    rows.iter().map(free_from_row).collect::<anyhow::Result<Vec<_>>>().map_err(LedgerError::from)
}

fn storage(err: sqlx::Error) -> LedgerError {
    LedgerError::Storage(err.into())
}

fn map_insert_error(err: sqlx::Error) -> LedgerError {
    if let sqlx::Error::Database(db) = &err {
        if db.code().as_deref() == Some("23505") {
            let rule = match db.constraint() {
                Some(name) if name.contains("transaction_id") => DuplicateRule::TransactionId,
                _ => DuplicateRule::EmailForEvent,
            };
            return LedgerError::Duplicate(rule);
        }
    }
    LedgerError::Storage(err.into())
}
