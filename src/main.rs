use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch, post};
use axum::Router;
use qrgo::config::AppConfig;
use qrgo::domain::organizer::OrganizerRegistry;
use qrgo::ledger::postgres::{PgEventStore, PgLedger};
use qrgo::proofs::http::HttpProofStore;
use qrgo::proofs::ProofStore;
use qrgo::screening::gemini::GeminiScreener;
use qrgo::screening::heuristic::HeuristicScreener;
use qrgo::screening::TxnScreener;
use qrgo::service::admin_service::AdminService;
use qrgo::service::booking_service::BookingService;
use qrgo::service::event_directory::EventDirectory;
use qrgo::service::scan_service::ScanService;
use qrgo::AppState;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let ledger = Arc::new(PgLedger { pool: pool.clone() });
    let event_store = Arc::new(PgEventStore { pool: pool.clone() });
    let events = EventDirectory::new(
        event_store,
        std::time::Duration::from_secs(cfg.events_cache_ttl_secs),
    );

    let proof_store: Arc<dyn ProofStore> = Arc::new(HttpProofStore {
        base_url: cfg.storage_base_url.clone(),
        bucket: cfg.storage_bucket.clone(),
        api_key: cfg.storage_api_key.clone(),
        timeout_ms: 10_000,
        client: reqwest::Client::new(),
    });

    // Without credentials the remote screener would answer `Error` for
    // every id, so fall back to the offline heuristic instead.
    let screener: Arc<dyn TxnScreener> = if cfg.gemini_api_key.is_empty() {
        Arc::new(HeuristicScreener)
    } else {
        Arc::new(GeminiScreener {
            base_url: cfg.gemini_base_url.clone(),
            api_key: cfg.gemini_api_key.clone(),
            timeout_ms: 8_000,
            client: reqwest::Client::new(),
        })
    };
    tracing::info!("transaction screener: {}", screener.name());

    let organizers = OrganizerRegistry::from_json(&cfg.organizers_json)?;
    if organizers.is_empty() {
        tracing::warn!("no organizers configured, admin login will reject everyone");
    }

    let booking_service = BookingService {
        ledger: ledger.clone(),
        events: events.clone(),
        proof_store,
    };
    let scan_service = ScanService {
        ledger: ledger.clone(),
        events: events.clone(),
    };
    let admin_service = AdminService {
        ledger,
        events,
        screener,
    };

    let state = AppState {
        booking_service,
        scan_service,
        admin_service,
        organizers: organizers.clone(),
        pool,
        redis_client: redis::Client::open(cfg.redis_url.clone())?,
    };

    let admin_routes = Router::new()
        .route("/admin/events", get(qrgo::http::handlers::admin::list_events))
        .route(
            "/admin/events/:event_id/advance-status",
            post(qrgo::http::handlers::admin::advance_event_status),
        )
        .route("/admin/bookings", get(qrgo::http::handlers::admin::list_bookings))
        .route(
            "/admin/events/:event_id/bookings",
            get(qrgo::http::handlers::admin::list_event_bookings),
        )
        .route(
            "/admin/bookings/:booking_id/status",
            patch(qrgo::http::handlers::admin::update_booking_status),
        )
        .route(
            "/admin/screen-transaction",
            post(qrgo::http::handlers::admin::screen_transaction),
        )
        .route("/scan/verify", post(qrgo::http::handlers::scan::verify))
        .route("/scan/check-in", post(qrgo::http::handlers::scan::check_in))
        .layer(from_fn_with_state(
            organizers,
            qrgo::http::middleware::organizer_auth::require_organizer,
        ));

    let app = Router::new()
        .route("/health", get(qrgo::http::handlers::ops::health))
        .route("/events", get(qrgo::http::handlers::events::list_events))
        .route("/events/:event_id", get(qrgo::http::handlers::events::get_event))
        .route("/bookings", post(qrgo::http::handlers::bookings::create_booking))
        .route("/my-tickets", post(qrgo::http::handlers::bookings::my_tickets))
        .route(
            "/bookings/:booking_id/ticket",
            get(qrgo::http::handlers::tickets::get_ticket),
        )
        .route(
            "/bookings/:booking_id/qr.png",
            get(qrgo::http::handlers::tickets::get_ticket_png),
        )
        .route("/admin/login", post(qrgo::http::handlers::admin::login))
        .route("/ops/readiness", get(qrgo::http::handlers::ops::readiness))
        .route("/ops/liveness", get(qrgo::http::handlers::ops::liveness))
        .merge(admin_routes)
        .layer(from_fn_with_state(
            qrgo::http::middleware::rate_limit::RateLimitState {
                redis_client: redis::Client::open(cfg.redis_url.clone())?,
                max_per_minute: 300,
                scan_max_per_minute: 900,
            },
            qrgo::http::middleware::rate_limit::enforce,
        ))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
