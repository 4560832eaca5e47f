use std::net::SocketAddr;

use serde::Deserialize;
use gatehouse_core::error::{GatehouseError, Result};
use gatehouse_core::OsRngIssuer;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub auth: AuthSection,

    #[serde(default)]
    pub telemetry: TelemetrySection,

    #[serde(default)]
    pub status: StatusSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(GatehouseError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        self.auth.validate()?;
        self.telemetry.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            GatehouseError::BadConfig(format!(
                "gateway.listen must be a socket address, got {:?}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthSection {
    /// Random bytes per token before hex encoding.
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,

    /// Scope tokens to their kind and revoke whole sessions on logout.
    #[serde(default)]
    pub strict_token_kinds: bool,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            token_bytes: default_token_bytes(),
            strict_token_kinds: false,
        }
    }
}

impl AuthSection {
    pub fn validate(&self) -> Result<()> {
        if !(OsRngIssuer::MIN_BYTES..=OsRngIssuer::MAX_BYTES).contains(&self.token_bytes) {
            return Err(GatehouseError::BadConfig(format!(
                "auth.token_bytes must be between {} and {}",
                OsRngIssuer::MIN_BYTES,
                OsRngIssuer::MAX_BYTES
            )));
        }
        Ok(())
    }
}

fn default_token_bytes() -> usize {
    OsRngIssuer::MIN_BYTES
}

/// Values of the device snapshot served at `/api/v1/metrics/current`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetrySection {
    #[serde(default = "default_temperature_c")]
    pub temperature_c: f64,
    #[serde(default = "default_cpu_load_percent")]
    pub cpu_load_percent: f64,
    #[serde(default = "default_ram_load_percent")]
    pub ram_load_percent: f64,
    #[serde(default = "default_uptime_seconds")]
    pub uptime_seconds: u64,
    #[serde(default = "default_supply_voltage_v")]
    pub supply_voltage_v: f64,
}

impl Default for TelemetrySection {
    fn default() -> Self {
        Self {
            temperature_c: default_temperature_c(),
            cpu_load_percent: default_cpu_load_percent(),
            ram_load_percent: default_ram_load_percent(),
            uptime_seconds: default_uptime_seconds(),
            supply_voltage_v: default_supply_voltage_v(),
        }
    }
}

impl TelemetrySection {
    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("cpu_load_percent", self.cpu_load_percent),
            ("ram_load_percent", self.ram_load_percent),
        ] {
            if !(0.0..=100.0).contains(&v) {
                return Err(GatehouseError::BadConfig(format!(
                    "telemetry.{name} must be between 0 and 100"
                )));
            }
        }
        if !self.temperature_c.is_finite() || !self.supply_voltage_v.is_finite() {
            return Err(GatehouseError::BadConfig(
                "telemetry values must be finite".into(),
            ));
        }
        Ok(())
    }
}

fn default_temperature_c() -> f64 {
    25.1
}
fn default_cpu_load_percent() -> f64 {
    12.3
}
fn default_ram_load_percent() -> f64 {
    44.2
}
fn default_uptime_seconds() -> u64 {
    7
}
fn default_supply_voltage_v() -> f64 {
    12.1
}

/// Static body of `/api/v1/gateway/status`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusSection {
    #[serde(default = "default_service")]
    pub service: String,
    #[serde(default = "default_opcua")]
    pub opcua: String,
    #[serde(default = "default_cache")]
    pub cache: String,
}

impl Default for StatusSection {
    fn default() -> Self {
        Self {
            service: default_service(),
            opcua: default_opcua(),
            cache: default_cache(),
        }
    }
}

fn default_service() -> String {
    "ok".into()
}
fn default_opcua() -> String {
    "simulated".into()
}
fn default_cache() -> String {
    "ready".into()
}
