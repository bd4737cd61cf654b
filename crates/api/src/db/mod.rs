//! Database layer for the OctoCAT Supply API.
//!
//! # Tables
//!
//! - `suppliers`, `products` - catalog (Supplier -> Product)
//! - `headquarters`, `branches` - organization (Headquarters -> Branch)
//! - `orders`, `order_details` - purchasing (Branch -> Order -> OrderDetail)
//! - `deliveries`, `order_detail_deliveries` - fulfilment
//! - `users` - session authentication
//! - `carts`, `cart_items` - server-backed carts
//!
//! Migrations live in `crates/api/migrations/` and are run via:
//! ```bash
//! cargo run -p octocat-supply-cli -- migrate
//! ```
//!
//! Repositories are constructed per-request from the pool in `AppState`; the
//! shared generic plumbing lives in [`crud`].

pub mod branches;
pub mod carts;
pub mod crud;
pub mod deliveries;
pub mod headquarters;
pub mod order_detail_deliveries;
pub mod order_details;
pub mod orders;
pub mod products;
pub mod suppliers;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use crud::{CrudRepository, Entity};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored data failed to decode into domain types.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Row not found.
    #[error("not found")]
    NotFound,

    /// Unique constraint violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Foreign key constraint violated (the referenced row does not exist).
    #[error("invalid reference: {0}")]
    InvalidReference(String),
}

/// Translate a write-path sqlx error into the repository contract:
/// unique violations become `Conflict`, foreign-key violations become
/// `InvalidReference`, everything else stays `Database`.
pub(crate) fn translate_constraint(err: sqlx::Error, resource: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return RepositoryError::Conflict(format!("{resource} already exists"));
        }
        if db_err.is_foreign_key_violation() {
            return RepositoryError::InvalidReference(format!(
                "{resource} references a row that does not exist"
            ));
        }
    }
    RepositoryError::Database(err)
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
