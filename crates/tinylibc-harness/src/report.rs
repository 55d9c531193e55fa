//! Report generation for conformance results.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::verify::VerificationSummary;

/// A conformance report over one verification run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    /// Report title.
    pub title: String,
    /// Timestamp (UTC).
    pub timestamp: String,
    /// Verification summary.
    pub summary: VerificationSummary,
}

impl ConformanceReport {
    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {}\n", self.title);
        let _ = writeln!(out, "- Timestamp: {}", self.timestamp);
        let _ = writeln!(out, "- Total: {}", self.summary.total);
        let _ = writeln!(out, "- Passed: {}", self.summary.passed);
        let _ = writeln!(out, "- Failed: {}\n", self.summary.failed);

        out.push_str("| Trace | Family | Function | Case | Section | Status |\n");
        out.push_str("|-------|--------|----------|------|---------|--------|\n");
        for r in &self.summary.results {
            let status = if r.passed { "PASS" } else { "FAIL" };
            let _ = writeln!(
                out,
                "| `{}` | {} | {} | {} | {} | {} |",
                r.trace_id, r.family, r.function, r.case_name, r.spec_section, status
            );
        }

        let mut failures = self.summary.failures().peekable();
        if failures.peek().is_some() {
            out.push_str("\n## Failures\n");
            for r in failures {
                let _ = writeln!(out, "\n### `{}`\n", r.trace_id);
                out.push_str("```\n");
                let diff = r.diff.as_deref().unwrap_or("(no diff recorded)");
                let _ = writeln!(out, "{diff}");
                out.push_str("```\n");
            }
        }
        out
    }

    /// Render the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }

    /// One `case_result` event per line, followed by a `run_summary` line.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        let mut out = String::new();
        for r in &self.summary.results {
            let event = serde_json::json!({
                "event": "case_result",
                "timestamp": self.timestamp,
                "trace_id": r.trace_id,
                "family": r.family,
                "function": r.function,
                "case": r.case_name,
                "outcome": if r.passed { "pass" } else { "fail" },
                "expected": r.expected,
                "actual": r.actual,
            });
            out.push_str(&event.to_string());
            out.push('\n');
        }
        let summary = serde_json::json!({
            "event": "run_summary",
            "timestamp": self.timestamp,
            "title": self.title,
            "total": self.summary.total,
            "passed": self.summary.passed,
            "failed": self.summary.failed,
        });
        out.push_str(&summary.to_string());
        out.push('\n');
        out
    }
}
