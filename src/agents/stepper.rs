//! Stepper driver checks: TMC status, drive currents, microstepping.

use super::{AgentCore, Check, CheckError, TestAgent};
use crate::gcode;
use crate::result::TestResult;
use crate::transport::GcodeTransport;

const CHECKS: &[Check] = &[
    Check {
        name: "driver status",
        run: driver_status,
    },
    Check {
        name: "current settings",
        run: current_settings,
    },
    Check {
        name: "microstepping",
        run: microstepping,
    },
];

fn driver_status(t: &GcodeTransport) -> Result<bool, CheckError> {
    let response = t.send_command(gcode::DRIVER_STATUS)?;
    Ok(response.contains("OK") && response.contains("X:"))
}

fn current_settings(t: &GcodeTransport) -> Result<bool, CheckError> {
    let response = t.send_command(gcode::DRIVER_CURRENT)?;
    Ok(response.contains("X:") && response.contains("Y:"))
}

fn microstepping(t: &GcodeTransport) -> Result<bool, CheckError> {
    let response = t.send_command(gcode::MICROSTEPPING)?;
    Ok(response.contains("X:") && response.contains("Y:"))
}

/// Agent covering the TMC stepper drivers.
pub struct StepperDriverAgent {
    core: AgentCore,
}

impl StepperDriverAgent {
    pub const AGENT_NAME: &'static str = "stepper";

    pub fn new(transport: GcodeTransport) -> Self {
        Self {
            core: AgentCore::new(Self::AGENT_NAME, transport),
        }
    }

    pub fn check_count() -> usize {
        CHECKS.len()
    }
}

impl TestAgent for StepperDriverAgent {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn run_all(&mut self) -> Vec<TestResult> {
        self.core.run_table(CHECKS)
    }
}
