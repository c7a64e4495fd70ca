//! Configuration for the testbench.
//!
//! TOML-based configuration resolved from an explicit `--config` path,
//! `./testbench.toml`, or the user config dir, falling back to built-in
//! defaults. See [`loader::load`] for the resolution order.

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load, resolve_config_path};
pub use schema::{Config, LoggingConfig, SerialConfig, TimingsConfig};
