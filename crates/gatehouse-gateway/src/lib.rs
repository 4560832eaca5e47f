//! gatehouse gateway library entry.
//!
//! This crate wires the core account service, the telemetry snapshot and the
//! operational endpoints into an axum HTTP stack. It is intended to be
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod telemetry;
