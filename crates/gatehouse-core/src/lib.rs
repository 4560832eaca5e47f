//! gatehouse core: credential/token store, token issuance, account flows and
//! the bearer gate.
//!
//! This crate owns every invariant of the gateway (username uniqueness, token
//! validity, atomic pair inserts) and carries no transport or runtime
//! dependencies, so the HTTP layer and tests drive it directly.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `GatehouseError`/`Result`; the one fatal
//! condition (entropy exhaustion) is a typed error the caller escalates.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod account;
pub mod error;
pub mod gate;
pub mod issuer;
pub mod service;
pub mod store;

/// Shared result type.
pub use error::{GatehouseError, Result};

pub use account::{Account, Profile, DEFAULT_ROLE};
pub use gate::AuthGate;
pub use issuer::{OsRngIssuer, TokenIssuer};
pub use service::{AccountService, TokenPair};
pub use store::{AuthStore, SessionId, TokenKind, TokenRecord};
