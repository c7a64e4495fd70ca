//! Marlin Testbench Library
//!
//! Exercises Marlin-family motion-controller firmware over a serial link
//! by issuing G-code commands and validating the returned telemetry.
//! Four subsystem agents (hardware, stepper drivers, bed probe, safety
//! interlocks) run in a fixed sequence under a coordinator, with
//! per-check failure isolation so one fault cannot corrupt later results.
//!
//! # Modules
//!
//! - `config`: TOML configuration with standard path resolution
//! - `port`: serial link abstraction (real port + scripted mock)
//! - `transport`: the command/acknowledgement exchange over a link
//! - `gcode`: the fixed Marlin command vocabulary
//! - `agents`: the four subsystem test agents
//! - `coordinator`: runs the agents and aggregates results
//! - `result`: status/result/report data model
//! - `report`: text and JSON rendering of a finished run
//! - `error`: top-level error handling

pub mod agents;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod gcode;
pub mod port;
pub mod report;
pub mod result;
pub mod transport;

// Re-export commonly used types for convenience
pub use agents::{
    CheckError, HardwareAgent, ProbeAgent, SafetyAgent, StepperDriverAgent, TestAgent,
};
pub use config::{Config, ConfigError, ConfigResult};
pub use coordinator::{ConnectionSettings, TestCoordinator};
pub use error::HarnessError;
pub use port::{MockSerialPort, PortError, SerialLink, SyncSerialPort};
pub use result::{AgentReport, SuiteReport, TestResult, TestStatus};
pub use transport::{GcodeTransport, Timings};
