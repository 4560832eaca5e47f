//! Bearer token resolution for protected resources.
//!
//! The gate is read-only: it never mutates the store. Every protected handler
//! (`/me`, `/metrics/current`) goes through `AuthGate::resolve`.

use std::sync::Arc;

use crate::account::Account;
use crate::error::{GatehouseError, Result};
use crate::store::{AuthStore, TokenKind};

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization` header value.
///
/// The prefix match is exact and case-sensitive with a single space; the token
/// itself is not validated beyond being non-empty.
pub fn parse_bearer(header: &str) -> Option<&str> {
    header.strip_prefix(BEARER_PREFIX).filter(|t| !t.is_empty())
}

#[derive(Clone)]
pub struct AuthGate {
    store: Arc<AuthStore>,
    access_only: bool,
}

impl AuthGate {
    /// `access_only` rejects refresh tokens presented as bearer credentials.
    pub fn new(store: Arc<AuthStore>, access_only: bool) -> Self {
        Self { store, access_only }
    }

    /// Resolve an optional header value to the owning account.
    pub fn resolve(&self, header: Option<&str>) -> Result<Account> {
        let token = header.and_then(parse_bearer).ok_or(GatehouseError::AuthFailed)?;

        let (record, account) = self.store.resolve(token).ok_or(GatehouseError::AuthFailed)?;
        if self.access_only && record.kind != TokenKind::Access {
            tracing::debug!(kind = record.kind.as_str(), "bearer token of wrong kind");
            return Err(GatehouseError::AuthFailed);
        }

        tracing::debug!(username = %account.username, "bearer token resolved");
        Ok(account)
    }
}
