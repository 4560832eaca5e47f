//! `/api/v1/auth/*` handlers.

use std::time::Instant;

use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::{json, Value};

use gatehouse_core::{Profile, TokenPair};

use super::{authorization, decode_body, lenient_string, record, ApiError};
use crate::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RegisterReq {
    #[serde(deserialize_with = "lenient_string")]
    username: String,
    #[serde(deserialize_with = "lenient_string")]
    email: String,
    #[serde(deserialize_with = "lenient_string")]
    password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoginReq {
    #[serde(deserialize_with = "lenient_string")]
    username: String,
    #[serde(deserialize_with = "lenient_string")]
    password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TokenReq {
    #[serde(rename = "refreshToken", deserialize_with = "lenient_string")]
    refresh_token: String,
}

pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let started = Instant::now();
    let req: RegisterReq = decode_body(&body);

    let res = state.accounts().register(&req.username, &req.email, &req.password);
    record(&state, "register", started, &res);
    res?;
    Ok(Json(json!({ "status": "registered" })))
}

pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TokenPair>, ApiError> {
    let started = Instant::now();
    let req: LoginReq = decode_body(&body);

    let res = state.accounts().login(&req.username, &req.password);
    record(&state, "login", started, &res);
    Ok(Json(res?))
}

pub async fn refresh(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TokenPair>, ApiError> {
    let started = Instant::now();
    let req: TokenReq = decode_body(&body);

    let res = state.accounts().refresh(&req.refresh_token);
    record(&state, "refresh", started, &res);
    Ok(Json(res?))
}

/// Always 200 with an empty body.
pub async fn logout(State(state): State<AppState>, body: Bytes) -> StatusCode {
    let started = Instant::now();
    let req: TokenReq = decode_body(&body);

    state.accounts().logout(&req.refresh_token);
    record::<()>(&state, "logout", started, &Ok(()));
    StatusCode::OK
}

pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Profile>, ApiError> {
    let started = Instant::now();

    let res = state.accounts().who_am_i(authorization(&headers));
    record(&state, "me", started, &res);
    if res.is_err() {
        state.metrics().gate_rejections.inc(&[("resource", "me")]);
    }
    Ok(Json(res?))
}
