//! Account records and their public projection.

use serde::Serialize;

/// Role assigned to every freshly registered account.
pub const DEFAULT_ROLE: &str = "viewer";

/// Stored account. The password is kept as presented (no hashing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl Account {
    /// Build a registration record with the default role.
    pub fn viewer(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: DEFAULT_ROLE.to_string(),
        }
    }

    /// Public view of the account; never carries the password.
    pub fn profile(&self) -> Profile {
        Profile {
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

/// What `/me` returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub username: String,
    pub email: String,
    pub role: String,
}
