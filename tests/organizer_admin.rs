use std::sync::Arc;

use axum::http::StatusCode;
use qrgo::domain::booking::{BookingDetails, BookingDraft, BookingStatus};
use qrgo::domain::event::{Event, EventStatus};
use qrgo::domain::organizer::{Organizer, SUPER_ADMIN_ID};
use qrgo::ledger::memory::{MemoryEventStore, MemoryLedger};
use qrgo::ledger::Ledger;
use qrgo::screening::heuristic::HeuristicScreener;
use qrgo::screening::TxnAssessment;
use qrgo::service::admin_service::AdminService;
use qrgo::service::event_directory::EventDirectory;

#[tokio::test]
async fn organizers_see_only_their_own_events() {
    let (svc, _ledger) = admin(vec![
        event("tech-night", "org-1", EventStatus::Upcoming),
        event("film-fest", "org-2", EventStatus::Ongoing),
    ]);

    let mine = svc.events_for(&organizer("org-1")).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, "tech-night");

    let all = svc.events_for(&super_admin()).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn advancing_walks_the_cycle_one_step_at_a_time() {
    let (svc, _ledger) = admin(vec![event("tech-night", "org-1", EventStatus::Upcoming)]);
    let org = organizer("org-1");

    let expected = [
        EventStatus::Ongoing,
        EventStatus::BookingStopped,
        EventStatus::Closed,
        EventStatus::Upcoming,
    ];
    for status in expected {
        let updated = svc.advance_event_status(&org, "tech-night").await.unwrap();
        assert_eq!(updated.status, status);
    }
}

#[tokio::test]
async fn advancing_someone_elses_event_is_forbidden() {
    let (svc, _ledger) = admin(vec![event("film-fest", "org-2", EventStatus::Upcoming)]);

    let err = svc.advance_event_status(&organizer("org-1"), "film-fest").await.unwrap_err();
    assert_eq!(err.0, StatusCode::FORBIDDEN);
    assert_eq!(err.1.error.message, "This event belongs to another organizer.");

    svc.advance_event_status(&super_admin(), "film-fest").await.unwrap();
}

#[tokio::test]
async fn approving_a_paid_booking_confirms_it() {
    let (svc, ledger) = admin(vec![event("tech-night", "org-1", EventStatus::Ongoing)]);
    let booking = seed_paid(&ledger, "tech-night", "a@x.com", "TXN12345678").await;
    assert_eq!(booking.status, BookingStatus::Pending);

    let updated = svc
        .set_booking_status(&organizer("org-1"), &booking.id, BookingStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(updated.status, BookingStatus::Confirmed);

    let err = svc
        .set_booking_status(&organizer("org-2"), &booking.id, BookingStatus::Rejected)
        .await
        .unwrap_err();
    assert_eq!(err.0, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn bookings_overview_is_scoped_like_events() {
    let (svc, ledger) = admin(vec![
        event("tech-night", "org-1", EventStatus::Ongoing),
        event("film-fest", "org-2", EventStatus::Ongoing),
    ]);
    seed_paid(&ledger, "tech-night", "a@x.com", "TXN12345678").await;
    seed_paid(&ledger, "film-fest", "b@x.com", "TXN87654321").await;

    let mine = svc.bookings_overview(&organizer("org-1")).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].event_id, "tech-night");

    let all = svc.bookings_overview(&super_admin()).await.unwrap();
    assert_eq!(all.len(), 2);

    let per_event = svc
        .bookings_for_event(&organizer("org-2"), "film-fest")
        .await
        .unwrap();
    assert_eq!(per_event.len(), 1);

    let err = svc
        .bookings_for_event(&organizer("org-2"), "tech-night")
        .await
        .unwrap_err();
    assert_eq!(err.0, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn screening_flags_implausible_transaction_ids() {
    let (svc, _ledger) = admin(vec![]);

    assert_eq!(svc.screen_transaction("ab1").await, TxnAssessment::Invalid);
    assert_eq!(
        svc.screen_transaction("T2405161210345698761234").await,
        TxnAssessment::Plausible
    );
}

fn admin(events: Vec<Event>) -> (AdminService, MemoryLedger) {
    let ledger = MemoryLedger::default();
    let svc = AdminService {
        ledger: Arc::new(ledger.clone()),
        events: EventDirectory::new(
            Arc::new(MemoryEventStore::with_events(events)),
            std::time::Duration::from_secs(60),
        ),
        screener: Arc::new(HeuristicScreener),
    };
    (svc, ledger)
}

async fn seed_paid(
    ledger: &MemoryLedger,
    event_id: &str,
    email: &str,
    txn: &str,
) -> qrgo::domain::booking::Booking {
    ledger
        .create(BookingDraft {
            event_id: event_id.to_string(),
            user_name: "Asha Rao".to_string(),
            user_email: email.to_string(),
            user_phone: "9876543210".to_string(),
            pin: "1234".to_string(),
            details: BookingDetails::Paid {
                transaction_id: txn.to_string(),
                payment_proof: "https://files.example/proof.png".to_string(),
            },
        })
        .await
        .unwrap()
}

fn organizer(id: &str) -> Organizer {
    Organizer {
        id: id.to_string(),
        username: id.to_string(),
        name: "Cultural Club".to_string(),
        logo_url: "https://img.example/logo.png".to_string(),
        secret_id: "secret".to_string(),
    }
}

fn super_admin() -> Organizer {
    organizer(SUPER_ADMIN_ID)
}

fn event(id: &str, organizer_id: &str, status: EventStatus) -> Event {
    Event {
        id: id.to_string(),
        organizer_id: organizer_id.to_string(),
        name: "Tech Night".to_string(),
        date: chrono::Utc::now(),
        venue: "Auditorium".to_string(),
        venue_map_link: None,
        description: String::new(),
        image: String::new(),
        status,
        price: Some(150),
        requires_entry_number: false,
        upi_id: Some("club@upi".to_string()),
        upi_link: None,
        qr_code_image: None,
    }
}
