//! User models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use octocat_supply_core::{Email, UserId};

/// A registered user, as stored.
///
/// Never serialized to clients; route responses use [`CurrentUser`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub is_admin: bool,
    pub failed_login_attempts: i32,
    pub locked_until: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether the account is currently locked out.
    #[must_use]
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.locked_until.is_some_and(|until| until > now)
    }
}

/// The authenticated user, as stored in the session and returned by
/// `GET /api/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub user_id: UserId,
    pub email: String,
    pub is_admin: bool,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.as_str().to_string(),
            is_admin: user.is_admin,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user(locked_until: Option<DateTime<Utc>>) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(1),
            email: Email::parse("shopper@example.com").unwrap(),
            is_admin: false,
            failed_login_attempts: 0,
            locked_until,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_is_locked() {
        let now = Utc::now();
        assert!(!user(None).is_locked(now));
        assert!(user(Some(now + chrono::Duration::minutes(5))).is_locked(now));
        assert!(!user(Some(now - chrono::Duration::minutes(5))).is_locked(now));
    }

    #[test]
    fn test_current_user_wire_format() {
        let current = CurrentUser::from(&user(None));
        let json = serde_json::to_value(&current).unwrap();
        assert_eq!(json["userId"], 1);
        assert_eq!(json["email"], "shopper@example.com");
        assert_eq!(json["isAdmin"], false);
    }
}
