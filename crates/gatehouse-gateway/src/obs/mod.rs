//! Lightweight in-process metrics.
//!
//! Counters are stored as atomics in `DashMap`s and rendered by the `/metrics`
//! handler in Prometheus text format. Nothing here touches the auth store lock.

pub mod metrics;

pub use metrics::GatewayMetrics;
