pub mod config;
pub mod domain {
    pub mod booking;
    pub mod event;
    pub mod ids;
    pub mod organizer;
}
pub mod http {
    pub mod handlers {
        pub mod admin;
        pub mod bookings;
        pub mod events;
        pub mod ops;
        pub mod scan;
        pub mod tickets;
    }
    pub mod middleware {
        pub mod organizer_auth;
        pub mod rate_limit;
    }
}
pub mod ledger;
pub mod proofs;
pub mod screening;
pub mod service {
    pub mod admin_service;
    pub mod booking_service;
    pub mod errors;
    pub mod event_directory;
    pub mod scan_service;
}
pub mod tickets {
    pub mod issuer;
    pub mod payload;
}
pub mod verify {
    pub mod engine;
    pub mod verdict;
}

#[derive(Clone)]
pub struct AppState {
    pub booking_service: service::booking_service::BookingService,
    pub scan_service: service::scan_service::ScanService,
    pub admin_service: service::admin_service::AdminService,
    pub organizers: domain::organizer::OrganizerRegistry,
    pub pool: sqlx::PgPool,
    pub redis_client: redis::Client,
}
