//! Database migration command.
//!
//! Runs the API schema migrations, then lets the session store create its
//! own `tower_sessions` table.
//!
//! # Environment Variables
//!
//! - `OCTOCAT_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string

use sqlx::PgPool;
use thiserror::Error;
use tower_sessions_sqlx_store::PostgresStore;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: OCTOCAT_DATABASE_URL")]
    MissingDatabaseUrl,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run all database migrations.
///
/// # Errors
///
/// Returns `MigrateError` if the database URL is missing or a migration fails.
pub async fn run() -> Result<(), MigrateError> {
    dotenvy::dotenv().ok();

    let database_url = super::database_url().ok_or(MigrateError::MissingDatabaseUrl)?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running schema migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Running session store migration...");
    PostgresStore::new(pool).migrate().await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
