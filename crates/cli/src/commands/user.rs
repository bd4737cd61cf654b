//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a regular user
//! octocat-supply user create -e dev@example.com -p 'Str0ng!pass'
//!
//! # Create an admin
//! octocat-supply user create -e admin@example.com -p 'Str0ng!pass' --admin
//! ```

use sqlx::PgPool;
use thiserror::Error;

use octocat_supply_core::Email;

use octocat_supply_api::db::RepositoryError;
use octocat_supply_api::db::users::UserRepository;
use octocat_supply_api::services::auth::{AuthError, hash_password, validate_password};

/// Errors that can occur during user management.
#[derive(Debug, Error)]
pub enum UserCommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: OCTOCAT_DATABASE_URL")]
    MissingDatabaseUrl,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Password fails the policy.
    #[error("Weak password: {0}")]
    WeakPassword(String),

    /// User already exists.
    #[error("User already exists with email: {0}")]
    UserExists(String),

    /// Other auth failure.
    #[error("Auth error: {0}")]
    Auth(AuthError),

    /// Repository failure.
    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

/// Create a new user.
///
/// # Errors
///
/// Returns `UserCommandError` if validation fails or the insert fails.
pub async fn create(email: &str, password: &str, is_admin: bool) -> Result<(), UserCommandError> {
    dotenvy::dotenv().ok();

    let parsed = Email::parse(email).map_err(|e| UserCommandError::InvalidEmail(e.to_string()))?;

    validate_password(password).map_err(|e| match e {
        AuthError::WeakPassword(msg) => UserCommandError::WeakPassword(msg),
        other => UserCommandError::Auth(other),
    })?;

    let password_hash = hash_password(password).map_err(UserCommandError::Auth)?;

    let database_url = super::database_url().ok_or(UserCommandError::MissingDatabaseUrl)?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Creating user: {} (admin: {})", parsed.as_str(), is_admin);
    let repo = UserRepository::new(&pool);
    let user = repo
        .create(&parsed, &password_hash, is_admin)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => UserCommandError::UserExists(email.to_owned()),
            other => UserCommandError::Repository(other),
        })?;

    tracing::info!("Created user {}", user.id.as_i32());
    Ok(())
}
