//! Credential + token state behind a single reader/writer lock.
//!
//! `CredentialStore` and `TokenStore` are plain maps; only `AuthStore` owns the
//! lock, and it exposes whole operations rather than guards. Every method takes
//! the lock exactly once, so a reader never sees half of a multi-key write
//! (e.g. a login's access token without its refresh token).
//!
//! Nothing here generates tokens. Callers mint them before calling in, which
//! keeps the randomness source out of every critical section.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::account::Account;

/// Which half of a login a token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

/// Identifier shared by every token minted from one login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

/// Value side of the token map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub owner: String,
    pub kind: TokenKind,
    pub session: SessionId,
}

/// username -> account. Last write wins.
#[derive(Debug, Default)]
pub struct CredentialStore {
    accounts: HashMap<String, Account>,
}

impl CredentialStore {
    pub fn put(&mut self, account: Account) {
        self.accounts.insert(account.username.clone(), account);
    }

    pub fn get(&self, username: &str) -> Option<&Account> {
        self.accounts.get(username)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// token -> owning record. Access and refresh tokens share one namespace.
#[derive(Debug, Default)]
pub struct TokenStore {
    tokens: HashMap<String, TokenRecord>,
}

impl TokenStore {
    pub fn put(&mut self, token: String, record: TokenRecord) {
        self.tokens.insert(token, record);
    }

    pub fn get(&self, token: &str) -> Option<&TokenRecord> {
        self.tokens.get(token)
    }

    /// No-op when absent.
    pub fn delete(&mut self, token: &str) -> Option<TokenRecord> {
        self.tokens.remove(token)
    }

    /// Drop every token minted under `session`. Linear in the token count.
    pub fn delete_session(&mut self, session: SessionId) -> usize {
        let before = self.tokens.len();
        self.tokens.retain(|_, r| r.session != session);
        before - self.tokens.len()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    credentials: CredentialStore,
    tokens: TokenStore,
    next_session: u64,
}

/// Shared gateway state. Construct once, then share via `Arc`.
#[derive(Debug, Default)]
pub struct AuthStore {
    inner: RwLock<StoreInner>,
}

impl AuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the account keyed by its username.
    pub fn put_account(&self, account: Account) {
        self.inner.write().credentials.put(account);
    }

    pub fn account(&self, username: &str) -> Option<Account> {
        self.inner.read().credentials.get(username).cloned()
    }

    pub fn token(&self, token: &str) -> Option<TokenRecord> {
        self.inner.read().tokens.get(token).cloned()
    }

    /// Record a login's token pair under a fresh session, in one write.
    pub fn open_session(&self, owner: &str, access: String, refresh: String) -> SessionId {
        let mut g = self.inner.write();
        g.next_session += 1;
        let session = SessionId(g.next_session);

        g.tokens.put(
            access,
            TokenRecord {
                owner: owner.to_string(),
                kind: TokenKind::Access,
                session,
            },
        );
        g.tokens.put(
            refresh,
            TokenRecord {
                owner: owner.to_string(),
                kind: TokenKind::Refresh,
                session,
            },
        );
        session
    }

    /// Attach a new access token to the session of `presented`.
    ///
    /// The presented token is looked up again under the write lock, so a
    /// logout racing with this call can never leave an access token behind
    /// for a revoked token. With `require_refresh`, only refresh tokens are
    /// accepted. Returns the presented token's record on success.
    pub fn extend_session(
        &self,
        presented: &str,
        access: String,
        require_refresh: bool,
    ) -> Option<TokenRecord> {
        let mut g = self.inner.write();
        let record = g.tokens.get(presented)?.clone();
        if require_refresh && record.kind != TokenKind::Refresh {
            return None;
        }

        g.tokens.put(
            access,
            TokenRecord {
                owner: record.owner.clone(),
                kind: TokenKind::Access,
                session: record.session,
            },
        );
        Some(record)
    }

    /// Remove a single token. No-op when absent.
    pub fn delete_token(&self, token: &str) -> Option<TokenRecord> {
        self.inner.write().tokens.delete(token)
    }

    /// Remove `token` and, if it is a refresh token, every sibling of its
    /// session. Returns how many tokens were dropped.
    pub fn revoke_session_of(&self, token: &str) -> usize {
        let mut g = self.inner.write();
        let session = match g.tokens.get(token) {
            Some(r) if r.kind == TokenKind::Refresh => r.session,
            _ => return 0,
        };
        g.tokens.delete_session(session)
    }

    /// token -> record -> account under one read lock.
    pub fn resolve(&self, token: &str) -> Option<(TokenRecord, Account)> {
        let g = self.inner.read();
        let record = g.tokens.get(token)?;
        let account = g.credentials.get(&record.owner)?;
        Some((record.clone(), account.clone()))
    }

    pub fn account_count(&self) -> usize {
        self.inner.read().credentials.len()
    }

    pub fn token_count(&self) -> usize {
        self.inner.read().tokens.len()
    }
}
