//! Authentication service.
//!
//! Password authentication with account lockout after repeated failures.
//! Lockout is reported as `InvalidCredentials` so callers cannot probe which
//! accounts exist or are locked.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use sqlx::PgPool;

use octocat_supply_core::Email;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Failed attempts that trigger a lockout.
const MAX_LOGIN_ATTEMPTS: i32 = 5;

/// How long a lockout lasts.
const LOCKOUT_MINUTES: i64 = 15;

/// Special characters accepted by the password policy.
const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Authentication service.
///
/// Handles user registration, login, and lockout bookkeeping.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        is_admin: bool,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(&email, &password_hash, is_admin)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with email and password.
    ///
    /// A wrong password increments the user's failure counter; the fifth
    /// consecutive failure locks the account for fifteen minutes. A correct
    /// password against a locked account still fails.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong
    /// or the account is locked.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        let (user, password_hash) = self
            .users
            .find_with_password(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let now = Utc::now();
        if user.is_locked(now) {
            tracing::warn!(user_id = user.id.as_i32(), "login attempt on locked account");
            return Err(AuthError::InvalidCredentials);
        }

        if verify_password(password, &password_hash).is_err() {
            // An expired lock restarts the counter rather than re-locking
            // on the first wrong password.
            let lock_expired = user.locked_until.is_some_and(|until| until <= now);
            let attempts = if lock_expired {
                1
            } else {
                user.failed_login_attempts + 1
            };
            let locked_until = (attempts >= MAX_LOGIN_ATTEMPTS)
                .then(|| now + Duration::minutes(LOCKOUT_MINUTES));
            self.users
                .record_failed_login(user.id, attempts, locked_until)
                .await?;
            return Err(AuthError::InvalidCredentials);
        }

        self.users.record_successful_login(user.id).await?;

        Ok(user)
    }
}

/// Validate password meets requirements.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` naming every failed rule.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    let mut problems = Vec::new();

    if password.len() < MIN_PASSWORD_LENGTH {
        problems.push(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        ));
    }
    if !password.chars().any(char::is_uppercase) {
        problems.push("password must contain an uppercase letter".to_string());
    }
    if !password.chars().any(char::is_lowercase) {
        problems.push("password must contain a lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        problems.push("password must contain a digit".to_string());
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        problems.push("password must contain a special character".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AuthError::WeakPassword(problems.join("; ")))
    }
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the password does not match.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_password_passes() {
        assert!(validate_password("Str0ng!pass").is_ok());
    }

    #[test]
    fn short_password_rejected() {
        let err = validate_password("S0r!t").unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword(msg) if msg.contains("8 characters")));
    }

    #[test]
    fn missing_classes_all_reported() {
        let err = validate_password("alllowercase").unwrap_err();
        let AuthError::WeakPassword(msg) = err else {
            panic!("expected WeakPassword");
        };
        assert!(msg.contains("uppercase"));
        assert!(msg.contains("digit"));
        assert!(msg.contains("special character"));
        assert!(!msg.contains("lowercase letter"));
    }

    #[test]
    fn hash_then_verify_round_trip() {
        let hash = hash_password("Str0ng!pass").unwrap();
        assert!(verify_password("Str0ng!pass", &hash).is_ok());
        assert!(verify_password("Wr0ng!pass", &hash).is_err());
    }
}
