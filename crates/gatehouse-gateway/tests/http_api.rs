//! End-to-end HTTP tests against the axum router (no socket).

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use gatehouse_gateway::{app_state::AppState, config, router};

fn app_with(yaml: &str) -> (Router, AppState) {
    let cfg = config::load_from_str(yaml).unwrap();
    let state = AppState::new(cfg).unwrap();
    (router::build_router(state.clone()), state)
}

fn app() -> Router {
    app_with("version: 1\n").0
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, path, body.to_string()).await
}

async fn post_raw(app: &Router, path: &str, body: String) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    let (status, bytes) = send(app, req).await;
    let v = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, v)
}

async fn get(app: &Router, path: &str, auth: Option<&str>) -> (StatusCode, Value) {
    let mut b = Request::builder().method(Method::GET).uri(path);
    if let Some(a) = auth {
        b = b.header(header::AUTHORIZATION, a);
    }
    let (status, bytes) = send(app, b.body(Body::empty()).unwrap()).await;
    let v = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, v)
}

async fn register_and_login(app: &Router, user: &str, pw: &str) -> (String, String) {
    let (s, _) = post_json(app, "/api/v1/auth/register", json!({"username": user, "email": format!("{user}@x.com"), "password": pw})).await;
    assert_eq!(s, StatusCode::OK);
    let (s, v) = post_json(app, "/api/v1/auth/login", json!({"username": user, "password": pw})).await;
    assert_eq!(s, StatusCode::OK);
    (
        v["accessToken"].as_str().unwrap().to_string(),
        v["refreshToken"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn alice_walkthrough() {
    let app = app();

    let (s, v) = post_json(&app, "/api/v1/auth/register", json!({"username": "alice", "email": "a@x.com", "password": "pw1"})).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(v, json!({"status": "registered"}));

    let (s, v) = post_json(&app, "/api/v1/auth/login", json!({"username": "alice", "password": "pw1"})).await;
    assert_eq!(s, StatusCode::OK);
    let t1 = v["accessToken"].as_str().unwrap().to_string();
    let t2 = v["refreshToken"].as_str().unwrap().to_string();
    assert_ne!(t1, t2);

    let (s, v) = get(&app, "/api/v1/auth/me", Some(&format!("Bearer {t1}"))).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(v, json!({"username": "alice", "email": "a@x.com", "role": "viewer"}));

    let (s, v) = post_json(&app, "/api/v1/auth/refresh", json!({"refreshToken": t2})).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(v["refreshToken"], json!(t2));
    let t3 = v["accessToken"].as_str().unwrap();
    assert_ne!(t3, t1);

    let (s, v) = post_json(&app, "/api/v1/auth/logout", json!({"refreshToken": t2})).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(v, Value::Null);

    let (s, v) = post_json(&app, "/api/v1/auth/refresh", json!({"refreshToken": t2})).await;
    assert_eq!(s, StatusCode::UNAUTHORIZED);
    assert_eq!(v["error"], "AUTH_FAILED");
}

#[tokio::test]
async fn register_validation_and_malformed_bodies() {
    let app = app();

    let (s, v) = post_json(&app, "/api/v1/auth/register", json!({"username": "", "password": "pw"})).await;
    assert_eq!(s, StatusCode::BAD_REQUEST);
    assert_eq!(v["error"], "VALIDATION");

    let (s, _) = post_json(&app, "/api/v1/auth/register", json!({"username": "bob"})).await;
    assert_eq!(s, StatusCode::BAD_REQUEST);

    for raw in ["{not json", "", "[]", "{\"username\": 5, \"password\": \"x\"}"] {
        let (s, _) = post_raw(&app, "/api/v1/auth/register", raw.to_string()).await;
        assert_eq!(s, StatusCode::BAD_REQUEST, "body={raw:?}");
    }

    let (s, _) = post_raw(&app, "/api/v1/auth/login", "garbage".to_string()).await;
    assert_eq!(s, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_verbs_are_405() {
    let app = app();
    let paths = [
        "/api/v1/auth/register",
        "/api/v1/auth/login",
        "/api/v1/auth/refresh",
        "/api/v1/auth/logout",
    ];
    for path in paths {
        let (s, v) = get(&app, path, None).await;
        assert_eq!(s, StatusCode::METHOD_NOT_ALLOWED, "path={path}");
        assert_eq!(v["error"], "METHOD_NOT_ALLOWED");

        let req = Request::builder().method(Method::PUT).uri(path).body(Body::empty()).unwrap();
        let (s, _) = send(&app, req).await;
        assert_eq!(s, StatusCode::METHOD_NOT_ALLOWED, "PUT path={path}");
    }
}

#[tokio::test]
async fn non_string_fields_read_as_empty_without_dropping_siblings() {
    let app = app();

    for email in [Value::Null, json!(5), json!({"x": 1})] {
        let (s, v) = post_json(&app, "/api/v1/auth/register", json!({"username": "alice", "password": "pw1", "email": email})).await;
        assert_eq!(s, StatusCode::OK, "email={email}");
        assert_eq!(v, json!({"status": "registered"}));
    }

    let (s, v) = post_json(&app, "/api/v1/auth/login", json!({"username": "alice", "password": "pw1", "extra": null})).await;
    assert_eq!(s, StatusCode::OK);
    let access = v["accessToken"].as_str().unwrap().to_string();

    let (_, me) = get(&app, "/api/v1/auth/me", Some(&format!("Bearer {access}"))).await;
    assert_eq!(me, json!({"username": "alice", "email": "", "role": "viewer"}));

    // a non-string required field still fails validation on its own
    let (s, v) = post_json(&app, "/api/v1/auth/register", json!({"username": "bob", "password": null})).await;
    assert_eq!(s, StatusCode::BAD_REQUEST);
    assert_eq!(v["message"], "validation failed: password is required");
}

#[tokio::test]
async fn bad_credentials_are_401() {
    let app = app();
    register_and_login(&app, "carol", "secret").await;

    let (s, _) = post_json(&app, "/api/v1/auth/login", json!({"username": "carol", "password": "nope"})).await;
    assert_eq!(s, StatusCode::UNAUTHORIZED);
    let (s, _) = post_json(&app, "/api/v1/auth/login", json!({"username": "nobody", "password": "secret"})).await;
    assert_eq!(s, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn metrics_snapshot_requires_bearer() {
    let app = app();
    let (access, _) = register_and_login(&app, "dana", "pw").await;

    for auth in [None, Some("Bearer nope"), Some("bearer x"), Some(access.as_str())] {
        let (s, _) = get(&app, "/api/v1/metrics/current", auth).await;
        assert_eq!(s, StatusCode::UNAUTHORIZED, "auth={auth:?}");
    }

    let (s, v) = get(&app, "/api/v1/metrics/current", Some(&format!("Bearer {access}"))).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(v["temperatureC"], json!(25.1));
    assert_eq!(v["cpuLoadPercent"], json!(12.3));
    assert_eq!(v["ramLoadPercent"], json!(44.2));
    assert_eq!(v["uptimeSeconds"], json!(7));
    assert_eq!(v["supplyVoltageV"], json!(12.1));
    assert!(v["timestampUtc"].as_str().unwrap().ends_with('Z'));

    // the snapshot is fixed for the life of the process
    let (_, again) = get(&app, "/api/v1/metrics/current", Some(&format!("Bearer {access}"))).await;
    assert_eq!(again, v);
}

#[tokio::test]
async fn gateway_status_is_open() {
    let app = app();
    let (s, v) = get(&app, "/api/v1/gateway/status", None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(v, json!({"service": "ok", "opcua": "simulated", "cache": "ready"}));
}

#[tokio::test]
async fn logout_always_succeeds() {
    let app = app();
    for body in [json!({"refreshToken": "unknown"}), json!({})] {
        let (s, v) = post_json(&app, "/api/v1/auth/logout", body).await;
        assert_eq!(s, StatusCode::OK);
        assert_eq!(v, Value::Null);
    }
}

#[tokio::test]
async fn strict_mode_revokes_session_on_logout() {
    let (app, _) = app_with("version: 1\nauth:\n  strict_token_kinds: true\n");
    let (access, refresh) = register_and_login(&app, "erin", "pw").await;

    let (s, _) = get(&app, "/api/v1/auth/me", Some(&format!("Bearer {refresh}"))).await;
    assert_eq!(s, StatusCode::UNAUTHORIZED);
    let (s, _) = post_json(&app, "/api/v1/auth/refresh", json!({"refreshToken": access})).await;
    assert_eq!(s, StatusCode::UNAUTHORIZED);

    let (s, _) = post_json(&app, "/api/v1/auth/logout", json!({"refreshToken": refresh})).await;
    assert_eq!(s, StatusCode::OK);
    let (s, _) = get(&app, "/api/v1/auth/me", Some(&format!("Bearer {access}"))).await;
    assert_eq!(s, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn ops_endpoints_report_state() {
    let (app, state) = app_with("version: 1\n");
    register_and_login(&app, "fay", "pw").await;
    get(&app, "/api/v1/auth/me", None).await;

    let (s, bytes) = send(&app, Request::get("/healthz").body(Body::empty()).unwrap()).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(bytes, b"ok");

    let (s, bytes) = send(&app, Request::get("/metrics").body(Body::empty()).unwrap()).await;
    assert_eq!(s, StatusCode::OK);
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("gatehouse_auth_requests_total{op=\"login\",outcome=\"ok\"} 1"));
    assert!(text.contains("gatehouse_gate_rejections_total{resource=\"me\"} 1"));
    assert!(text.contains("gatehouse_accounts 1"));
    assert!(text.contains("gatehouse_tokens 2"));

    let (s, v) = get(&app, "/readyz", None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(v, json!({"status": "ready", "accounts": 1, "tokens": 2}));

    state.set_draining();
    let (s, v) = get(&app, "/readyz", None).await;
    assert_eq!(s, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(v["status"], "draining");
}
