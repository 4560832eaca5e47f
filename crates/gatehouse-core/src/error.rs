//! Shared error type across gatehouse crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Missing or empty required field.
    Validation,
    /// Bad credentials, unknown token or malformed bearer header.
    AuthFailed,
    /// Wrong HTTP verb for the resource.
    MethodNotAllowed,
    /// Configuration rejected at load time.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Secure randomness could not be produced.
    EntropyUnavailable,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::Validation => "VALIDATION",
            ClientCode::AuthFailed => "AUTH_FAILED",
            ClientCode::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ClientCode::BadConfig => "BAD_CONFIG",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::EntropyUnavailable => "ENTROPY_UNAVAILABLE",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, GatehouseError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum GatehouseError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("auth failed")]
    AuthFailed,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl GatehouseError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            GatehouseError::Validation(_) => ClientCode::Validation,
            GatehouseError::AuthFailed => ClientCode::AuthFailed,
            GatehouseError::MethodNotAllowed => ClientCode::MethodNotAllowed,
            GatehouseError::BadConfig(_) => ClientCode::BadConfig,
            GatehouseError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            GatehouseError::EntropyUnavailable(_) => ClientCode::EntropyUnavailable,
            GatehouseError::Internal(_) => ClientCode::Internal,
        }
    }

    /// Errors the process must not survive. A token minted without entropy
    /// would be predictable, so callers escalate instead of answering.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GatehouseError::EntropyUnavailable(_))
    }
}
