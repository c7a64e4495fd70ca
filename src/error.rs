//! Top-level harness errors.
//!
//! Only connection-level and configuration faults surface here; check
//! failures never become errors, they become `Failed` entries in the
//! report.

use crate::config::ConfigError;
use crate::port::PortError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    /// Tests were requested before a successful connect.
    #[error("not connected: establish the serial connection before running tests")]
    NotConnected,

    #[error(transparent)]
    Port(#[from] PortError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
