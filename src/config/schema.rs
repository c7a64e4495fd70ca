//! Configuration schema definitions.
//!
//! Defines the structure of the configuration file using serde, with
//! defaults matching stock Marlin-class hardware.

use crate::coordinator::ConnectionSettings;
use crate::transport::Timings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Serial connection configuration
    pub serial: SerialConfig,
    /// Fixed waits the harness observes
    pub timings: TimingsConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Validate cross-field constraints that serde can't express.
    pub fn validate(&self) -> super::ConfigResult<()> {
        if self.serial.baud == 0 {
            return Err(super::ConfigError::validation(
                "serial.baud",
                "baud rate must be non-zero",
            ));
        }
        if self.timings.command_timeout_ms == 0 {
            return Err(super::ConfigError::validation(
                "timings.command_timeout_ms",
                "command timeout must be non-zero",
            ));
        }
        Ok(())
    }
}

/// Serial connection section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Serial device path
    pub port: String,
    /// Baud rate
    pub baud: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        let settings = ConnectionSettings::default();
        Self {
            port: settings.port_name,
            baud: settings.baud_rate,
        }
    }
}

impl SerialConfig {
    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            port_name: self.port.clone(),
            baud_rate: self.baud,
        }
    }
}

/// Timing section, all in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingsConfig {
    pub connect_settle_ms: u64,
    pub post_write_pause_ms: u64,
    pub poll_interval_ms: u64,
    pub command_timeout_ms: u64,
    pub actuation_settle_ms: u64,
    pub self_test_settle_ms: u64,
    pub estop_settle_ms: u64,
}

impl Default for TimingsConfig {
    fn default() -> Self {
        let t = Timings::default();
        Self {
            connect_settle_ms: t.connect_settle.as_millis() as u64,
            post_write_pause_ms: t.post_write_pause.as_millis() as u64,
            poll_interval_ms: t.poll_interval.as_millis() as u64,
            command_timeout_ms: t.command_timeout.as_millis() as u64,
            actuation_settle_ms: t.actuation_settle.as_millis() as u64,
            self_test_settle_ms: t.self_test_settle.as_millis() as u64,
            estop_settle_ms: t.estop_settle.as_millis() as u64,
        }
    }
}

impl TimingsConfig {
    pub fn timings(&self) -> Timings {
        Timings {
            connect_settle: Duration::from_millis(self.connect_settle_ms),
            post_write_pause: Duration::from_millis(self.post_write_pause_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            command_timeout: Duration::from_millis(self.command_timeout_ms),
            actuation_settle: Duration::from_millis(self.actuation_settle_ms),
            self_test_settle: Duration::from_millis(self.self_test_settle_ms),
            estop_settle: Duration::from_millis(self.estop_settle_ms),
        }
    }
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
