//! Unauthenticated operational endpoints.
//!
//! `/healthz` only proves the process answers. `/readyz` reports the draining
//! flag together with store sizes so a load balancer and an operator read the
//! same document. `/metrics` is the Prometheus text rendering of `obs`.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::app_state::AppState;

const PROMETHEUS_TEXT: &str = "text/plain; version=0.0.4; charset=utf-8";

#[derive(Debug, Serialize)]
pub struct Readiness {
    pub status: &'static str,
    pub accounts: usize,
    pub tokens: usize,
}

impl Readiness {
    fn of(state: &AppState) -> Self {
        let store = state.accounts().store();
        Self {
            status: if state.is_draining() { "draining" } else { "ready" },
            accounts: store.account_count(),
            tokens: store.token_count(),
        }
    }
}

pub async fn healthz() -> &'static str {
    "ok"
}

/// 503 once shutdown has begun, 200 otherwise.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    let readiness = Readiness::of(&state);
    let code = if state.is_draining() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    (code, Json(readiness))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.metrics().render(&state.metrics_extra());
    ([(header::CONTENT_TYPE, PROMETHEUS_TEXT)], body).into_response()
}
