#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use gatehouse_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
auth:
  token_bites: 32 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.gateway.listen, "0.0.0.0:8080");
    assert_eq!(cfg.auth.token_bytes, 24);
    assert!(!cfg.auth.strict_token_kinds);
    assert_eq!(cfg.status.opcua, "simulated");
    assert_eq!(cfg.telemetry.uptime_seconds, 7);
}

#[test]
fn version_must_be_one() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn token_width_is_bounded() {
    for bytes in [8, 23, 65] {
        let s = format!("version: 1\nauth:\n  token_bytes: {bytes}\n");
        let err = config::load_from_str(&s).expect_err("must fail");
        assert_eq!(err.client_code().as_str(), "BAD_CONFIG", "bytes={bytes}");
    }
    let cfg = config::load_from_str("version: 1\nauth:\n  token_bytes: 64\n").unwrap();
    assert_eq!(cfg.auth.token_bytes, 64);
}

#[test]
fn listen_must_be_socket_addr() {
    let err = config::load_from_str("version: 1\ngateway:\n  listen: \"localhost\"\n")
        .expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_CONFIG");
}

#[test]
fn load_percentages_are_bounded() {
    let err = config::load_from_str("version: 1\ntelemetry:\n  cpu_load_percent: 140\n")
        .expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_CONFIG");
}

#[test]
fn shipped_config_parses() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../gatehouse.yaml");
    let cfg = config::load_from_file(path).expect("shipped config must load");
    assert_eq!(cfg.auth.token_bytes, 24);
}
