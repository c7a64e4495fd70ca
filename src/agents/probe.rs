//! Bed-leveling probe checks: deploy, retract, self-test.
//!
//! Each command drives the probe servo and then waits out a settle delay
//! sized to the physical motion before the next command goes out.

use super::{AgentCore, Check, CheckError, TestAgent};
use crate::gcode;
use crate::result::TestResult;
use crate::transport::GcodeTransport;
use std::time::Duration;

const CHECKS: &[Check] = &[
    Check {
        name: "probe deploy",
        run: |t| probe_servo(t, gcode::PROBE_DEPLOY_ANGLE, t.timings().actuation_settle),
    },
    Check {
        name: "probe retract",
        run: |t| probe_servo(t, gcode::PROBE_RETRACT_ANGLE, t.timings().actuation_settle),
    },
    Check {
        name: "probe self test",
        run: |t| probe_servo(t, gcode::PROBE_SELF_TEST_ANGLE, t.timings().self_test_settle),
    },
];

fn probe_servo(t: &GcodeTransport, angle: u8, settle: Duration) -> Result<bool, CheckError> {
    let response = t.send_command(&gcode::probe_servo_command(angle))?;
    t.settle(settle);
    Ok(response.to_ascii_lowercase().contains(gcode::ACK_TOKEN))
}

/// Agent covering the BLTouch-style bed probe.
pub struct ProbeAgent {
    core: AgentCore,
}

impl ProbeAgent {
    pub const AGENT_NAME: &'static str = "probe";

    pub fn new(transport: GcodeTransport) -> Self {
        Self {
            core: AgentCore::new(Self::AGENT_NAME, transport),
        }
    }

    pub fn check_count() -> usize {
        CHECKS.len()
    }
}

impl TestAgent for ProbeAgent {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn run_all(&mut self) -> Vec<TestResult> {
        self.core.run_table(CHECKS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::MockSerialPort;
    use crate::result::TestStatus;
    use crate::transport::Timings;

    fn agent_over(mock: &MockSerialPort) -> ProbeAgent {
        let transport = GcodeTransport::connect(Box::new(mock.clone()), Timings::instant())
            .expect("mock connect cannot fail");
        ProbeAgent::new(transport)
    }

    #[test]
    fn test_all_probe_checks_pass_on_acknowledgement() {
        let mock = MockSerialPort::new("MOCK0");
        let mut agent = agent_over(&mock);
        mock.enqueue_read(b"ok\nok\nok\n");

        let results = agent.run_all();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.status == TestStatus::Passed));
        assert_eq!(
            mock.written_commands(),
            vec!["M280 P0 S10", "M280 P0 S90", "M280 P0 S120"]
        );
    }

    #[test]
    fn test_late_acknowledgement_within_deadline_passes() {
        let mock = MockSerialPort::new("MOCK0");
        let mut agent = agent_over(&mock);
        // Deploy and retract answer promptly; the self-test answers
        // after a delay that still fits in the command deadline.
        mock.enqueue_read(b"ok\nok\n");
        mock.enqueue_read_after(Duration::from_millis(20), b"ok\n");

        let results = agent.run_all();
        assert_eq!(results[2].name, "probe self test");
        assert_eq!(results[2].status, TestStatus::Passed);
    }

    #[test]
    fn test_acknowledgement_past_deadline_fails() {
        let mock = MockSerialPort::new("MOCK0");
        let mut agent = agent_over(&mock);
        mock.enqueue_read(b"ok\nok\n");
        // Far past the instant-timings command deadline.
        mock.enqueue_read_after(Duration::from_secs(5), b"ok\n");

        let results = agent.run_all();
        assert_eq!(results[2].status, TestStatus::Failed);
        assert_eq!(results[2].message, "check probe self test completed");
    }
}
