//! Report rendering: human-readable summary and JSON.
//!
//! Consumes the coordinator's aggregate; decisions about exit codes stay
//! with the caller.

use crate::result::SuiteReport;
use std::io::{self, Write};

/// Print a per-agent summary with an overall tally.
pub fn print_summary(report: &SuiteReport, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out, "FIRMWARE TEST SUMMARY  ({})", report.port)?;
    writeln!(out, "{}", "=".repeat(60))?;

    for agent in &report.agents {
        writeln!(out)?;
        writeln!(out, "[{}]", agent.agent)?;
        for result in &agent.results {
            writeln!(
                out,
                "  {:4} {:<24} {:>7} ({:.2}s)",
                if result.passed() { "pass" } else { "FAIL" },
                result.name,
                result.status.to_string(),
                result.duration.as_secs_f64(),
            )?;
            if !result.passed() {
                writeln!(out, "       {}", result.message)?;
            }
        }
        writeln!(
            out,
            "  {}/{} checks passed",
            agent.passed_count(),
            agent.results.len()
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "OVERALL: {}/{} checks passed",
        report.passed(),
        report.total()
    )?;
    if report.all_passed() {
        writeln!(out, "All checks passed.")?;
    } else {
        writeln!(out, "Some checks failed; review the results above.")?;
    }
    Ok(())
}

/// Render the report as pretty JSON.
pub fn to_json(report: &SuiteReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{TestResult, TestStatus};
    use std::time::Duration;

    fn sample_report() -> SuiteReport {
        let mut report = SuiteReport::new("/dev/ttyUSB0");
        report.push(
            "hardware",
            vec![
                TestResult {
                    name: "firmware version".into(),
                    status: TestStatus::Passed,
                    message: "check firmware version completed".into(),
                    duration: Duration::from_millis(120),
                    data: None,
                },
                TestResult {
                    name: "endstops".into(),
                    status: TestStatus::Failed,
                    message: "check endstops completed".into(),
                    duration: Duration::from_millis(5030),
                    data: None,
                },
            ],
        );
        report
    }

    #[test]
    fn test_summary_contains_tallies_and_failures() {
        let report = sample_report();
        let mut buf = Vec::new();
        print_summary(&report, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("[hardware]"));
        assert!(text.contains("1/2 checks passed"));
        assert!(text.contains("OVERALL: 1/2 checks passed"));
        assert!(text.contains("FAIL endstops"));
        assert!(text.contains("Some checks failed"));
    }

    #[test]
    fn test_json_rendering() {
        let report = sample_report();
        let json = to_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["port"], "/dev/ttyUSB0");
        assert_eq!(value["agents"][0]["agent"], "hardware");
        assert_eq!(value["agents"][0]["results"][1]["status"], "failed");
    }
}
