use crate::domain::organizer::OrganizerRegistry;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

/// Admin routes authenticate with the organizer's username and secret on
/// every request. On success the matched organizer rides along as a
/// request extension for the handlers' scoping checks.
pub async fn require_organizer(
    State(registry): State<OrganizerRegistry>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let username = header_value(&request, "X-Organizer-Username");
    let secret = header_value(&request, "X-Organizer-Secret");

    match registry.authenticate(username, secret) {
        Some(organizer) => {
            request.extensions_mut().insert(organizer.clone());
            next.run(request).await
        }
        None => Response::builder()
            .status(StatusCode::UNAUTHORIZED)
            .body(Body::from("unauthorized"))
            .unwrap_or_else(|_| Response::new(Body::from("unauthorized"))),
    }
}

fn header_value<'a>(request: &'a Request<Body>, name: &str) -> &'a str {
    request.headers().get(name).and_then(|h| h.to_str().ok()).unwrap_or("")
}
