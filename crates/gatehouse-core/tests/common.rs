//! Shared fixtures for core tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::Arc;

use gatehouse_core::{AccountService, AuthStore, GatehouseError, OsRngIssuer, Result, TokenIssuer};

/// Issuer whose entropy source is always exhausted.
pub struct DeadIssuer;

impl TokenIssuer for DeadIssuer {
    fn issue(&self) -> Result<String> {
        Err(GatehouseError::EntropyUnavailable("test source drained".into()))
    }
}

pub fn service(strict: bool) -> AccountService {
    AccountService::new(Arc::new(AuthStore::new()), Arc::new(OsRngIssuer::default()), strict)
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
