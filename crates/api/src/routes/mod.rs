//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (pings the database)
//!
//! # Auth (strict rate limit)
//! GET  /api/auth/csrf-token             - Issue a CSRF token (cookie + body)
//! POST /api/auth/register               - Register a new user
//! POST /api/auth/login                  - Login, establishes a session
//! POST /api/auth/logout                 - Logout, destroys the session
//! GET  /api/auth/me                     - Current user (requires auth)
//!
//! # CRUD resources (one block per entity, relaxed rate limit)
//! GET    /api/suppliers                 - List (optional ?name= filter)
//! POST   /api/suppliers                 - Create (201)
//! GET    /api/suppliers/{id}            - Get one (404 if absent)
//! PUT    /api/suppliers/{id}            - Partial update
//! DELETE /api/suppliers/{id}            - Delete (204)
//! ... same shape for /api/products (?supplierId=, ?name=),
//!     /api/headquarters, /api/branches (?headquartersId=),
//!     /api/orders (?branchId=), /api/order-details (?orderId=),
//!     /api/deliveries (?supplierId=),
//!     /api/order-detail-deliveries (?deliveryId=)
//!
//! # Carts
//! POST   /api/carts                           - Create an empty cart (201)
//! GET    /api/carts/{id}                      - Cart with its lines
//! POST   /api/carts/{id}/items                - Add quantity (merges lines)
//! PUT    /api/carts/{id}/items/{productId}    - Set quantity (<= 0 removes)
//! DELETE /api/carts/{id}/items/{productId}    - Remove a line
//! DELETE /api/carts/{id}                      - Clear the cart (204)
//! ```

pub mod auth;
pub mod branches;
pub mod carts;
pub mod deliveries;
pub mod headquarters;
pub mod health;
pub mod order_detail_deliveries;
pub mod order_details;
pub mod orders;
pub mod products;
pub mod suppliers;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{api_rate_limiter, auth_rate_limiter};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/csrf-token", get(auth::csrf_token))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .layer(auth_rate_limiter())
}

/// Create one CRUD resource router.
macro_rules! resource_routes {
    ($module:ident) => {
        Router::new()
            .route("/", get($module::list).post($module::create))
            .route(
                "/{id}",
                get($module::get_one)
                    .put($module::update)
                    .delete($module::delete),
            )
    };
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(carts::create))
        .route("/{id}", get(carts::get_one).delete(carts::clear))
        .route("/{id}/items", post(carts::add_item))
        .route(
            "/{id}/items/{product_id}",
            axum::routing::put(carts::set_quantity).delete(carts::remove_item),
        )
}

/// Create the `/api` router: auth plus every resource, each rate limited.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/suppliers", resource_routes!(suppliers))
        .nest("/products", resource_routes!(products))
        .nest("/headquarters", resource_routes!(headquarters))
        .nest("/branches", resource_routes!(branches))
        .nest("/orders", resource_routes!(orders))
        .nest("/order-details", resource_routes!(order_details))
        .nest("/deliveries", resource_routes!(deliveries))
        .nest(
            "/order-detail-deliveries",
            resource_routes!(order_detail_deliveries),
        )
        .nest("/carts", cart_routes())
        .layer(api_rate_limiter())
        .nest("/auth", auth_routes())
}
