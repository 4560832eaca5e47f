//! Account flows: register, login, refresh, logout, who-am-i.
//!
//! Token minting always happens before the store is touched, so write-lock
//! hold time stays a fixed handful of map operations.

use std::sync::Arc;

use serde::Serialize;
use subtle::ConstantTimeEq;

use crate::account::{Account, Profile};
use crate::error::{GatehouseError, Result};
use crate::gate::AuthGate;
use crate::issuer::TokenIssuer;
use crate::store::{AuthStore, TokenKind};

/// Response body of login and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct AccountService {
    store: Arc<AuthStore>,
    issuer: Arc<dyn TokenIssuer>,
    strict_kinds: bool,
}

impl AccountService {
    /// `strict_kinds` scopes each endpoint to its token kind and makes logout
    /// revoke the whole login session. Off keeps the shared-namespace
    /// behaviour where any live token works anywhere.
    pub fn new(store: Arc<AuthStore>, issuer: Arc<dyn TokenIssuer>, strict_kinds: bool) -> Self {
        Self { store, issuer, strict_kinds }
    }

    pub fn store(&self) -> &Arc<AuthStore> {
        &self.store
    }

    pub fn gate(&self) -> AuthGate {
        AuthGate::new(Arc::clone(&self.store), self.strict_kinds)
    }

    /// Create or overwrite `username` with role "viewer".
    pub fn register(&self, username: &str, email: &str, password: &str) -> Result<()> {
        if username.is_empty() {
            return Err(GatehouseError::Validation("username is required".into()));
        }
        if password.is_empty() {
            return Err(GatehouseError::Validation("password is required".into()));
        }

        self.store.put_account(Account::viewer(username, email, password));
        tracing::info!(%username, "account registered");
        Ok(())
    }

    pub fn login(&self, username: &str, password: &str) -> Result<TokenPair> {
        let Some(account) = self.store.account(username) else {
            tracing::warn!(%username, "login for unknown account");
            return Err(GatehouseError::AuthFailed);
        };
        if !bool::from(account.password.as_bytes().ct_eq(password.as_bytes())) {
            tracing::warn!(%username, "login with wrong password");
            return Err(GatehouseError::AuthFailed);
        }

        let access = self.issuer.issue()?;
        let refresh = self.issuer.issue()?;
        let session = self.store.open_session(&account.username, access.clone(), refresh.clone());

        tracing::info!(%username, session = session.0, "login succeeded");
        Ok(TokenPair { access_token: access, refresh_token: refresh })
    }

    /// Mint a new access token; the refresh token is echoed, not rotated.
    pub fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        // Cheap read first so unknown tokens never cost entropy.
        let known = self
            .store
            .token(refresh_token)
            .filter(|r| !self.strict_kinds || r.kind == TokenKind::Refresh);
        if known.is_none() {
            return Err(GatehouseError::AuthFailed);
        }

        let access = self.issuer.issue()?;
        let record = self
            .store
            .extend_session(refresh_token, access.clone(), self.strict_kinds)
            .ok_or(GatehouseError::AuthFailed)?;

        tracing::debug!(username = %record.owner, session = record.session.0, "access token refreshed");
        Ok(TokenPair {
            access_token: access,
            refresh_token: refresh_token.to_string(),
        })
    }

    /// Always succeeds; unknown tokens are ignored.
    pub fn logout(&self, refresh_token: &str) {
        let removed = if self.strict_kinds {
            self.store.revoke_session_of(refresh_token)
        } else {
            usize::from(self.store.delete_token(refresh_token).is_some())
        };
        tracing::info!(removed, "logout");
    }

    pub fn who_am_i(&self, authorization: Option<&str>) -> Result<Profile> {
        self.gate().resolve(authorization).map(|a| a.profile())
    }
}
