//! Subsystem test agents.
//!
//! Each agent owns a fixed, ordered table of checks against one firmware
//! subsystem and runs them through the shared [`AgentCore`] runner.
//! Failure isolation is total: a check that returns `false` or errors
//! becomes a `Failed` result, and the agent (and the coordinator above
//! it) always carries on with the remaining checks.

pub mod hardware;
pub mod probe;
pub mod safety;
pub mod stepper;

pub use hardware::HardwareAgent;
pub use probe::ProbeAgent;
pub use safety::SafetyAgent;
pub use stepper::StepperDriverAgent;

use crate::port::PortError;
use crate::result::{TestResult, TestStatus};
use crate::transport::GcodeTransport;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};

/// Fault raised while executing a check's body.
///
/// Converted into a `Failed` result by the runner; never propagates past
/// the agent boundary.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("{0}")]
    Port(#[from] PortError),

    /// The response arrived but could not be interpreted.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// One named entry in an agent's check table.
///
/// Tables are plain data so each agent's coverage is visible at a glance
/// and testable without inheritance tricks.
pub struct Check {
    pub name: &'static str,
    pub run: fn(&GcodeTransport) -> Result<bool, CheckError>,
}

/// An agent groups related checks against one firmware subsystem.
pub trait TestAgent {
    /// Human-readable subsystem name, used as the report key.
    fn name(&self) -> &str;

    /// Run every check in table order and return their results.
    ///
    /// Each invocation reports a fresh sequence; results from earlier
    /// runs are discarded, not accumulated.
    fn run_all(&mut self) -> Vec<TestResult>;
}

/// Shared check runner embedded by every agent variant.
pub struct AgentCore {
    name: &'static str,
    transport: GcodeTransport,
    results: Vec<TestResult>,
}

impl AgentCore {
    pub fn new(name: &'static str, transport: GcodeTransport) -> Self {
        Self {
            name,
            transport,
            results: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// Execute one check and record exactly one result for it.
    ///
    /// `Ok(true)` passes, `Ok(false)` fails, and a `CheckError` fails
    /// with the fault text in the message. Wall-clock duration is
    /// recorded regardless of outcome.
    pub fn run_check(
        &mut self,
        name: &str,
        check: impl FnOnce(&GcodeTransport) -> Result<bool, CheckError>,
    ) -> TestResult {
        debug!(agent = self.name, check = name, "running check");
        let started = Instant::now();
        let (status, message) = match check(&self.transport) {
            Ok(true) => (TestStatus::Passed, format!("check {name} completed")),
            Ok(false) => (TestStatus::Failed, format!("check {name} completed")),
            Err(e) => (TestStatus::Failed, format!("check {name} failed: {e}")),
        };
        let result = TestResult {
            name: name.to_string(),
            status,
            message,
            duration: started.elapsed(),
            data: None,
        };
        if status == TestStatus::Failed {
            warn!(agent = self.name, check = name, message = %result.message, "check failed");
        }
        self.results.push(result.clone());
        result
    }

    /// Run a whole check table in order, reporting a fresh sequence.
    pub fn run_table(&mut self, checks: &[Check]) -> Vec<TestResult> {
        self.results.clear();
        for check in checks {
            self.run_check(check.name, check.run);
        }
        self.results.clone()
    }
}
