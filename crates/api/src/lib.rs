//! OctoCAT Supply REST API.
//!
//! Serves the supply-chain CRUD resources, server-side carts, and session
//! authentication consumed by the frontend and the CLI.
//!
//! # Architecture
//!
//! - Axum web framework, JSON request/response bodies throughout
//! - `PostgreSQL` via sqlx for all persistent state, sessions included
//! - tower-sessions for cookie sessions, argon2 for password hashing
//! - CSRF double-submit cookie on every mutating `/api` request
//! - governor rate limiting, strict on auth routes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{AppError, Result};
pub use state::AppState;

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
    routing::get,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the full application router.
///
/// Layer order matters: requests pass CORS, tracing, then the session layer
/// before the CSRF check runs, and rate limiting sits closest to the routes.
#[must_use]
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.pool(), state.config());

    let mut router = Router::new()
        .route("/health", get(routes::health::health))
        .route("/health/ready", get(routes::health::readiness))
        .nest("/api", routes::api_routes())
        .layer(axum::middleware::from_fn(middleware::csrf_protection))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = state.config().cors_origin.as_deref().and_then(cors_layer) {
        router = router.layer(cors);
    }

    router.with_state(state)
}

/// Browser CORS layer for the configured frontend origin.
///
/// Credentials are allowed so the session cookie travels; the CSRF header
/// must be listed or the double-submit check would fail from the browser.
fn cors_layer(origin: &str) -> Option<CorsLayer> {
    let origin = origin.parse::<HeaderValue>().ok()?;
    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([
                header::CONTENT_TYPE,
                HeaderName::from_static("x-csrf-token"),
            ])
            .allow_credentials(true),
    )
}
