//! Axum router wiring.
//!
//! Auth endpoints are POST-only; any other verb lands on the 405 fallback so
//! the error body matches the rest of the API.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{api, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/auth/register",
            post(api::auth::register).fallback(api::method_not_allowed),
        )
        .route(
            "/api/v1/auth/login",
            post(api::auth::login).fallback(api::method_not_allowed),
        )
        .route(
            "/api/v1/auth/refresh",
            post(api::auth::refresh).fallback(api::method_not_allowed),
        )
        .route(
            "/api/v1/auth/logout",
            post(api::auth::logout).fallback(api::method_not_allowed),
        )
        .route("/api/v1/auth/me", get(api::auth::me))
        .route("/api/v1/metrics/current", get(api::resources::current_metrics))
        .route("/api/v1/gateway/status", get(api::resources::gateway_status))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
