//! Device snapshot and gateway status bodies.
//!
//! Both are computed once at startup and only ever cloned afterwards.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::config::{StatusSection, TelemetrySection};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub temperature_c: f64,
    pub cpu_load_percent: f64,
    pub ram_load_percent: f64,
    pub uptime_seconds: u64,
    pub supply_voltage_v: f64,
    pub timestamp_utc: String,
}

impl MetricsSnapshot {
    /// Capture the configured values, stamped with the current UTC time.
    pub fn capture(cfg: &TelemetrySection) -> Self {
        Self {
            temperature_c: cfg.temperature_c,
            cpu_load_percent: cfg.cpu_load_percent,
            ram_load_percent: cfg.ram_load_percent,
            uptime_seconds: cfg.uptime_seconds,
            supply_voltage_v: cfg.supply_voltage_v,
            timestamp_utc: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayStatus {
    pub service: String,
    pub opcua: String,
    pub cache: String,
}

impl From<&StatusSection> for GatewayStatus {
    fn from(s: &StatusSection) -> Self {
        Self {
            service: s.service.clone(),
            opcua: s.opcua.clone(),
            cache: s.cache.clone(),
        }
    }
}
