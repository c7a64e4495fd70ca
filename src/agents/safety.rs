//! Safety interlock checks: emergency stop and thermal protection.

use super::{AgentCore, Check, CheckError, TestAgent};
use crate::gcode;
use crate::result::TestResult;
use crate::transport::GcodeTransport;

const CHECKS: &[Check] = &[
    Check {
        name: "emergency stop",
        run: emergency_stop,
    },
    Check {
        name: "thermal protection",
        run: thermal_protection,
    },
];

/// Fire the kill switch, then bring the controller back with M999.
///
/// M112 halts the controller immediately, so no response content can be
/// relied on; the check passes unless the transport faults.
fn emergency_stop(t: &GcodeTransport) -> Result<bool, CheckError> {
    t.send_command(gcode::EMERGENCY_STOP)?;
    t.settle(t.timings().estop_settle);
    t.send_command(gcode::RESTART)?;
    Ok(true)
}

fn thermal_protection(t: &GcodeTransport) -> Result<bool, CheckError> {
    let response = t.send_command(gcode::REPORT_SETTINGS)?;
    Ok(response.contains("THERMAL_PROTECTION") || response.contains("THERMAL_RUNAWAY"))
}

/// Agent covering the firmware's safety interlocks.
pub struct SafetyAgent {
    core: AgentCore,
}

impl SafetyAgent {
    pub const AGENT_NAME: &'static str = "safety";

    pub fn new(transport: GcodeTransport) -> Self {
        Self {
            core: AgentCore::new(Self::AGENT_NAME, transport),
        }
    }

    pub fn check_count() -> usize {
        CHECKS.len()
    }
}

impl TestAgent for SafetyAgent {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn run_all(&mut self) -> Vec<TestResult> {
        self.core.run_table(CHECKS)
    }
}
