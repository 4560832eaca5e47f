//! Shared application state for the gatehouse gateway.
//!
//! Built once at startup from the validated config; handlers receive clones
//! (cheap `Arc` bumps).

use std::sync::Arc;

use gatehouse_core::error::Result;
use gatehouse_core::{AccountService, AuthStore, OsRngIssuer, TokenIssuer};

use crate::config::GatewayConfig;
use crate::obs::GatewayMetrics;
use crate::telemetry::{GatewayStatus, MetricsSnapshot};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    accounts: Arc<AccountService>,
    metrics: Arc<GatewayMetrics>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    snapshot: MetricsSnapshot,
    status: GatewayStatus,
}

impl AppState {
    /// Build application state with the OS-backed token issuer.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let issuer = OsRngIssuer::new(cfg.auth.token_bytes)?;
        Ok(Self::with_issuer(cfg, Arc::new(issuer)))
    }

    /// Build application state around a caller-supplied issuer.
    pub fn with_issuer(cfg: GatewayConfig, issuer: Arc<dyn TokenIssuer>) -> Self {
        let store = Arc::new(AuthStore::new());
        let accounts = AccountService::new(store, issuer, cfg.auth.strict_token_kinds);

        let snapshot = MetricsSnapshot::capture(&cfg.telemetry);
        let status = GatewayStatus::from(&cfg.status);

        tracing::info!(
            strict_token_kinds = cfg.auth.strict_token_kinds,
            token_bytes = cfg.auth.token_bytes,
            "account service ready"
        );

        Self {
            inner: Arc::new(AppStateInner { cfg, snapshot, status }),
            accounts: Arc::new(accounts),
            metrics: Arc::new(GatewayMetrics::default()),
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn accounts(&self) -> &AccountService {
        &self.accounts
    }

    pub fn snapshot(&self) -> &MetricsSnapshot {
        &self.inner.snapshot
    }

    pub fn status(&self) -> &GatewayStatus {
        &self.inner.status
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        &self.metrics
    }

    pub fn set_draining(&self) {
        self.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }

    /// Store-size gauges appended to the `/metrics` output.
    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        let store = self.accounts.store();
        vec![
            ("gatehouse_accounts", store.account_count() as u64),
            ("gatehouse_tokens", store.token_count() as u64),
        ]
    }
}
