use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Usernames longer than this are rejected before reaching the store
pub const MAX_USERNAME_LEN: usize = 100;

/// A registered account. Only the bcrypt hash of the password is ever kept.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Hand-written so the hash never ends up in log lines
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)
    }
}

/// Insert-side shape for a user
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_hash() {
        let now = Utc::now();
        let user = User {
            id: 1,
            username: "alice".to_string(),
            password_hash: "$2b$04$abcdefghijklmnopqrstuv".to_string(),
            created_at: now,
            updated_at: now,
        };

        let rendered = format!("{:?}", user);
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("$2b$"));

        let new_user = NewUser::new("bob", "$2b$04$secret");
        assert!(!format!("{:?}", new_user).contains("$2b$"));
    }
}
