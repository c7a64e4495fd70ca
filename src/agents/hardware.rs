//! General hardware checks: firmware identity, endstops, thermistors,
//! and a fire-and-forget move on each motor.

use super::{AgentCore, Check, CheckError, TestAgent};
use crate::gcode;
use crate::result::TestResult;
use crate::transport::GcodeTransport;

const CHECKS: &[Check] = &[
    Check {
        name: "firmware version",
        run: firmware_version,
    },
    Check {
        name: "endstops",
        run: endstops,
    },
    Check {
        name: "temperature sensors",
        run: temperature_sensors,
    },
    Check {
        name: "x motor",
        run: |t| motor_move(t, 'X', 10.0),
    },
    Check {
        name: "y motor",
        run: |t| motor_move(t, 'Y', 10.0),
    },
    Check {
        name: "z motor",
        run: |t| motor_move(t, 'Z', 5.0),
    },
    Check {
        name: "e motor",
        run: |t| motor_move(t, 'E', 5.0),
    },
];

fn firmware_version(t: &GcodeTransport) -> Result<bool, CheckError> {
    let response = t.send_command(gcode::FIRMWARE_INFO)?;
    Ok(response.contains("FIRMWARE_NAME"))
}

fn endstops(t: &GcodeTransport) -> Result<bool, CheckError> {
    let response = t.send_command(gcode::ENDSTOP_STATES)?;
    Ok(response.contains("X_MIN") && response.contains("Y_MIN") && response.contains("Z_MIN"))
}

fn temperature_sensors(t: &GcodeTransport) -> Result<bool, CheckError> {
    let response = t.send_command(gcode::TEMPERATURE_REPORT)?;
    Ok(response.contains("T:") && response.contains("B:"))
}

/// Home the axis, move it out, move it back.
///
/// Weak oracle, kept on purpose: movement is fire-and-forget with no
/// telemetry to confirm the motor actually turned, so the check passes
/// unless the transport faults.
fn motor_move(t: &GcodeTransport, axis: char, distance: f64) -> Result<bool, CheckError> {
    let settle = t.timings().actuation_settle;

    t.send_command(&format!("{} {axis}", gcode::AUTO_HOME))?;
    t.settle(settle);

    t.send_command(&format!("{} {axis}{distance} F1000", gcode::LINEAR_MOVE))?;
    t.settle(settle);

    t.send_command(&format!("{} {axis}0 F1000", gcode::LINEAR_MOVE))?;
    Ok(true)
}

/// Agent covering the controller's general hardware.
pub struct HardwareAgent {
    core: AgentCore,
}

impl HardwareAgent {
    pub const AGENT_NAME: &'static str = "hardware";

    pub fn new(transport: GcodeTransport) -> Self {
        Self {
            core: AgentCore::new(Self::AGENT_NAME, transport),
        }
    }

    /// Number of checks this agent runs.
    pub fn check_count() -> usize {
        CHECKS.len()
    }
}

impl TestAgent for HardwareAgent {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn run_all(&mut self) -> Vec<TestResult> {
        self.core.run_table(CHECKS)
    }
}
