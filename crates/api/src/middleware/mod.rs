//! HTTP middleware stack for the API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. CORS (when a browser origin is configured)
//! 4. Session layer (tower-sessions with `PostgreSQL` store)
//! 5. CSRF double-submit check (mutating `/api` requests)
//! 6. Rate limiting (governor, per route group)

pub mod auth;
pub mod csrf;
pub mod rate_limit;
pub mod session;

pub use auth::{OptionalAuth, RequireAuth, clear_current_user, set_current_user};
pub use csrf::{CSRF_COOKIE_NAME, CSRF_HEADER_NAME, csrf_protection, generate_csrf_token};
pub use rate_limit::{api_rate_limiter, auth_rate_limiter};
pub use session::create_session_layer;
