//! Result model for checks, agents, and whole suite runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lifecycle state of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Pending,
    Running,
    Passed,
    Failed,
    /// Reserved; no current check produces it.
    Skipped,
}

impl TestStatus {
    /// Whether this status is a terminal state for a completed run.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Passed | Self::Failed | Self::Skipped)
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        };
        write!(f, "{s}")
    }
}

/// Outcome of one executed check. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub status: TestStatus,
    pub message: String,
    /// Wall-clock time the check took, including settle delays.
    pub duration: Duration,
    /// Optional structured telemetry captured by the check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Map<String, serde_json::Value>>,
}

impl TestResult {
    pub fn passed(&self) -> bool {
        self.status == TestStatus::Passed
    }
}

/// Ordered results of one agent's run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentReport {
    pub agent: String,
    pub results: Vec<TestResult>,
}

impl AgentReport {
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }
}

/// Aggregate results of a full coordinator run.
///
/// Agent sections appear in execution order and are never re-ordered or
/// dropped; each section's results keep the order the checks ran in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    /// UTC timestamp the run finished aggregating.
    pub generated_at: DateTime<Utc>,
    /// Port the firmware was reached on.
    pub port: String,
    pub agents: Vec<AgentReport>,
}

impl SuiteReport {
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            port: port.into(),
            agents: Vec::new(),
        }
    }

    /// Append one agent's section, preserving execution order.
    pub fn push(&mut self, agent: impl Into<String>, results: Vec<TestResult>) {
        self.agents.push(AgentReport {
            agent: agent.into(),
            results,
        });
    }

    /// Results for a named agent, if it ran.
    pub fn agent(&self, name: &str) -> Option<&[TestResult]> {
        self.agents
            .iter()
            .find(|a| a.agent == name)
            .map(|a| a.results.as_slice())
    }

    pub fn total(&self) -> usize {
        self.agents.iter().map(|a| a.results.len()).sum()
    }

    pub fn passed(&self) -> usize {
        self.agents.iter().map(|a| a.passed_count()).sum()
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, status: TestStatus) -> TestResult {
        TestResult {
            name: name.to_string(),
            status,
            message: format!("check {name} completed"),
            duration: Duration::from_millis(12),
            data: None,
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(TestStatus::Passed.is_terminal());
        assert!(TestStatus::Failed.is_terminal());
        assert!(TestStatus::Skipped.is_terminal());
        assert!(!TestStatus::Pending.is_terminal());
        assert!(!TestStatus::Running.is_terminal());
    }

    #[test]
    fn test_suite_report_counts_and_order() {
        let mut report = SuiteReport::new("/dev/ttyUSB0");
        report.push(
            "hardware",
            vec![
                result("firmware version", TestStatus::Passed),
                result("endstops", TestStatus::Failed),
            ],
        );
        report.push("safety", vec![result("thermal protection", TestStatus::Passed)]);

        assert_eq!(report.total(), 3);
        assert_eq!(report.passed(), 2);
        assert!(!report.all_passed());
        assert_eq!(report.agents[0].agent, "hardware");
        assert_eq!(report.agents[1].agent, "safety");
        assert_eq!(report.agent("safety").unwrap().len(), 1);
        assert!(report.agent("probe").is_none());
    }

    #[test]
    fn test_result_serialization_roundtrip() {
        let original = result("driver status", TestStatus::Failed);
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.contains("\"failed\""));
        // `data: None` is omitted entirely.
        assert!(!json.contains("\"data\""));

        let restored: TestResult = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.name, original.name);
        assert_eq!(restored.status, original.status);
    }
}
