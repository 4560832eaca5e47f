//! Opaque bearer token generation.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{GatehouseError, Result};

/// Source of fresh opaque tokens.
pub trait TokenIssuer: Send + Sync {
    /// Mint a new token. The only error is entropy exhaustion, which is fatal.
    fn issue(&self) -> Result<String>;
}

/// Lowercase hex over `bytes` bytes read from the OS CSPRNG.
#[derive(Debug, Clone)]
pub struct OsRngIssuer {
    bytes: usize,
}

impl OsRngIssuer {
    /// Smallest accepted width (192 bits).
    pub const MIN_BYTES: usize = 24;
    pub const MAX_BYTES: usize = 64;

    pub fn new(bytes: usize) -> Result<Self> {
        if !(Self::MIN_BYTES..=Self::MAX_BYTES).contains(&bytes) {
            return Err(GatehouseError::BadConfig(format!(
                "token width must be between {} and {} bytes",
                Self::MIN_BYTES,
                Self::MAX_BYTES
            )));
        }
        Ok(Self { bytes })
    }

    pub fn bytes(&self) -> usize {
        self.bytes
    }
}

impl Default for OsRngIssuer {
    fn default() -> Self {
        Self { bytes: Self::MIN_BYTES }
    }
}

impl TokenIssuer for OsRngIssuer {
    fn issue(&self) -> Result<String> {
        let mut buf = vec![0u8; self.bytes];
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| GatehouseError::EntropyUnavailable(e.to_string()))?;
        Ok(hex::encode(buf))
    }
}
