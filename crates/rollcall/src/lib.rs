//! HTTP API for `Rollcall`.
//!
//! Translates JSON requests into [`rollcall_core`] operations and their
//! results into status codes. The store is opened once by the binary and
//! shared with every handler through router state.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod config;
mod error;
mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use axum::routing::{get, post};
use rollcall_core::SqliteStore;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;

pub use config::Args;
pub use error::{ApiError, MessageResponse};
pub use handlers::{
    CommonStudentsResponse, CreateRequest, CreatedResponse, NotificationRequest,
    RecipientsResponse, RegisterRequest, SuspendRequest,
};

/// Security headers added to every response that does not already set them.
const SECURITY_HEADERS: [(&str, &str); 6] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "SAMEORIGIN"),
    ("referrer-policy", "no-referrer"),
    ("x-xss-protection", "0"),
    ("x-dns-prefetch-control", "off"),
    ("strict-transport-security", "max-age=15552000; includeSubDomains"),
];

/// Build the HTTP API router backed by the given store.
///
/// Every route allows cross-origin requests and sets the usual security
/// headers (`x-content-type-options: nosniff` and friends).
pub fn build_router(store: Arc<SqliteStore>) -> Router {
    let router = Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/teachers",
            get(handlers::list_teachers).post(handlers::create_teacher),
        )
        .route(
            "/api/students",
            get(handlers::list_students).post(handlers::create_student),
        )
        .route("/api/register", post(handlers::register_students))
        .route("/api/commonstudents", get(handlers::common_students))
        .route("/api/suspend", post(handlers::suspend_student))
        .route(
            "/api/retrievefornotifications",
            post(handlers::retrieve_for_notifications),
        )
        .with_state(store);

    SECURITY_HEADERS
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            ))
        })
        .layer(CorsLayer::permissive())
}
