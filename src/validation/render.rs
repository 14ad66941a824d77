//! Human- and machine-readable renderings of a [`ValidationReport`].

use super::report::{ValidationReport, Verdict};
use crate::error::Error;
use std::fmt::Write;

const RULE: &str = "============================================================";

/// Render the operator-facing text report.
pub fn render_text(report: &ValidationReport) -> String {
    let stats = report.stats();
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "\n{RULE}");
    let _ = writeln!(out, "DETERMINISTIC LOG VALIDATION REPORT");
    let _ = writeln!(out, "{RULE}");

    let _ = writeln!(out, "\nTotal Entries: {}", stats.total_entries);
    let _ = writeln!(out, "  State Entries: {}", stats.state_entries);
    let _ = writeln!(out, "  State Exits: {}", stats.state_exits);
    let _ = writeln!(out, "  Transitions: {}", stats.transitions);
    let _ = writeln!(out, "  User Actions: {}", stats.user_actions);
    let _ = writeln!(out, "  Timeouts: {}", stats.timeouts);
    let _ = writeln!(out, "  Errors: {}", stats.errors);

    if report.errors().is_empty() {
        let _ = writeln!(out, "\nNo errors found");
    } else {
        let _ = writeln!(out, "\nERRORS ({}):", report.errors().len());
        for error in report.errors() {
            let _ = writeln!(out, "  - {error}");
        }
    }

    if report.warnings().is_empty() {
        let _ = writeln!(out, "No warnings");
    } else {
        let _ = writeln!(out, "\nWARNINGS ({}):", report.warnings().len());
        for warning in report.warnings() {
            let _ = writeln!(out, "  - {warning}");
        }
    }

    let _ = writeln!(out, "\n{RULE}");
    let _ = writeln!(out, "RESULT: {}", report.verdict());
    let _ = writeln!(out, "{RULE}");
    out
}

/// Render the report as pretty-printed JSON.
pub fn render_json(report: &ValidationReport) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Process exit code for a finished run: 0 unless errors were found.
pub fn exit_code(report: &ValidationReport) -> i32 {
    match report.verdict() {
        Verdict::Passed | Verdict::PassedWithWarnings => 0,
        Verdict::Failed => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::report::{Anomaly, Violation};

    #[test]
    fn clean_report() {
        let text = render_text(&ValidationReport::default());
        assert!(text.contains("DETERMINISTIC LOG VALIDATION REPORT"));
        assert!(text.contains("\nNo errors found\nNo warnings\n"));
        assert!(text.contains("RESULT: PASSED\n"));
    }

    #[test]
    fn errors_listed_before_warnings() {
        let mut report = ValidationReport::default();
        report.errors.push(Violation::NoEntries);
        report.warnings.push(Anomaly::UnbalancedPairs { entries: 1, exits: 0 });

        let text = render_text(&report);
        let errors_at = text.find("ERRORS (1):\n  - No log entries found").unwrap();
        let warnings_at = text.find("WARNINGS (1):\n  - Unbalanced").unwrap();
        assert!(errors_at < warnings_at);
        assert!(text.contains("RESULT: FAILED"));
        assert_eq!(exit_code(&report), 1);
    }

    #[test]
    fn warnings_only_passes() {
        let mut report = ValidationReport::default();
        report.warnings.push(Anomaly::UnmatchedEntry { index: 0, state: "IDLE".into() });
        let text = render_text(&report);
        assert!(text.contains("No errors found"));
        assert!(text.contains("RESULT: PASSED WITH WARNINGS"));
        assert_eq!(exit_code(&report), 0);
    }

    #[test]
    fn json_rendering_is_parseable() {
        let json = render_json(&ValidationReport::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["verdict"], "PASSED");
        assert_eq!(value["stats"]["total_entries"], 0);
    }
}
