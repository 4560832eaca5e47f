//! HTTP handlers for the `/api/v1` surface.
//!
//! Bodies are taken as raw bytes and decoded leniently. A body that is not a
//! JSON object becomes an all-empty request; inside an object, a field that is
//! not a string reads as empty on its own. Either way normal validation
//! decides the outcome, never an extractor rejection.

pub mod auth;
pub mod resources;

use std::time::Instant;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{json, Value};

use gatehouse_core::error::{ClientCode, GatehouseError};

use crate::app_state::AppState;

/// Core error carried to the HTTP boundary.
#[derive(Debug)]
pub struct ApiError(pub GatehouseError);

impl From<GatehouseError> for ApiError {
    fn from(e: GatehouseError) -> Self {
        Self(e)
    }
}

pub fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::Validation => StatusCode::BAD_REQUEST,
        ClientCode::AuthFailed => StatusCode::UNAUTHORIZED,
        ClientCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        ClientCode::BadConfig
        | ClientCode::UnsupportedVersion
        | ClientCode::EntropyUnavailable
        | ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_fatal() {
            // Answering would mean handing out (or retrying with) tokens from
            // a broken entropy source.
            tracing::error!(error = %self.0, "fatal error, aborting");
            std::process::abort();
        }

        let code = self.0.client_code();
        let body = Json(json!({
            "error": code.as_str(),
            "message": self.0.to_string(),
        }));
        (status_for(code), body).into_response()
    }
}

pub async fn method_not_allowed() -> ApiError {
    ApiError(GatehouseError::MethodNotAllowed)
}

fn decode_body<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "request body not decodable, using empty fields");
        T::default()
    })
}

/// Field-level leniency: `null`, numbers, objects and so on read as `""`
/// without discarding the sibling fields of the same body.
fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn authorization(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

/// Count the outcome and latency of one API call.
fn record<T>(state: &AppState, op: &'static str, started: Instant, res: &Result<T, GatehouseError>) {
    let outcome = match res {
        Ok(_) => "ok",
        Err(e) => e.client_code().as_str(),
    };
    let m = state.metrics();
    m.auth_requests.inc(&[("op", op), ("outcome", outcome)]);
    m.request_duration.observe(&[("op", op)], started.elapsed());
}
