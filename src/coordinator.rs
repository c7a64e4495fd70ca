//! Test coordinator: owns the transport, builds the agents, runs the suite.

use crate::agents::{HardwareAgent, ProbeAgent, SafetyAgent, StepperDriverAgent, TestAgent};
use crate::error::HarnessError;
use crate::port::{PortError, SerialLink, SyncSerialPort};
use crate::result::SuiteReport;
use crate::transport::{GcodeTransport, Timings};
use tracing::info;

/// How to reach the controller.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    /// Serial device path ("/dev/ttyUSB0", "COM3", ...).
    pub port_name: String,
    /// Baud rate; Marlin-family boards default to 115200.
    pub baud_rate: u32,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            port_name: default_port_name(),
            baud_rate: 115_200,
        }
    }
}

fn default_port_name() -> String {
    if cfg!(windows) {
        "COM3".to_string()
    } else {
        "/dev/ttyUSB0".to_string()
    }
}

/// Drives the four subsystem agents over one shared transport.
///
/// Agents are constructed lazily on the first run and reused afterwards;
/// they execute strictly sequentially, so the transport sees one command
/// at a time.
pub struct TestCoordinator {
    settings: ConnectionSettings,
    timings: Timings,
    transport: Option<GcodeTransport>,
    agents: Vec<Box<dyn TestAgent>>,
}

impl TestCoordinator {
    pub fn new(settings: ConnectionSettings, timings: Timings) -> Self {
        Self {
            settings,
            timings,
            transport: None,
            agents: Vec::new(),
        }
    }

    /// Open the configured serial port and prepare the transport.
    ///
    /// Fatal on failure; there is no internal retry.
    pub fn connect(&mut self) -> Result<(), PortError> {
        let link = SyncSerialPort::open(
            &self.settings.port_name,
            self.settings.baud_rate,
            self.timings.poll_interval.max(std::time::Duration::from_millis(10)),
        )?;
        info!(port = %self.settings.port_name, baud = self.settings.baud_rate, "port opened");
        self.attach_link(Box::new(link))
    }

    /// Build the transport over an already-open link.
    ///
    /// This is the injection seam tests use to substitute a mock link;
    /// `connect` funnels through it too.
    pub fn attach_link(&mut self, link: Box<dyn SerialLink>) -> Result<(), PortError> {
        let transport = GcodeTransport::connect(link, self.timings)?;
        self.transport = Some(transport);
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    /// Run every agent in fixed order and aggregate their results.
    ///
    /// Fails with [`HarnessError::NotConnected`] if no transport is
    /// established; otherwise the run always completes with a full
    /// report, whatever the individual checks did.
    pub fn run_all_tests(&mut self) -> Result<SuiteReport, HarnessError> {
        let transport = self
            .transport
            .as_ref()
            .ok_or(HarnessError::NotConnected)?
            .clone();

        if self.agents.is_empty() {
            self.agents = vec![
                Box::new(HardwareAgent::new(transport.clone())),
                Box::new(StepperDriverAgent::new(transport.clone())),
                Box::new(ProbeAgent::new(transport.clone())),
                Box::new(SafetyAgent::new(transport.clone())),
            ];
        }

        let mut report = SuiteReport::new(transport.port_name());
        for agent in &mut self.agents {
            info!(agent = agent.name(), "running agent checks");
            let results = agent.run_all();
            report.push(agent.name().to_string(), results);
        }
        info!(
            passed = report.passed(),
            total = report.total(),
            "suite finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::MockSerialPort;

    #[test]
    fn test_run_before_connect_is_a_configuration_error() {
        let mut coordinator =
            TestCoordinator::new(ConnectionSettings::default(), Timings::instant());

        let err = coordinator.run_all_tests().unwrap_err();
        assert!(matches!(err, HarnessError::NotConnected));
        assert!(coordinator.agents.is_empty(), "no agent may be constructed");
    }

    #[test]
    fn test_agents_run_in_fixed_order() {
        let mock = MockSerialPort::new("MOCK0");
        let mut coordinator =
            TestCoordinator::new(ConnectionSettings::default(), Timings::instant());
        coordinator.attach_link(Box::new(mock)).unwrap();

        let report = coordinator.run_all_tests().unwrap();
        let order: Vec<_> = report.agents.iter().map(|a| a.agent.as_str()).collect();
        assert_eq!(order, vec!["hardware", "stepper", "probe", "safety"]);
    }
}
