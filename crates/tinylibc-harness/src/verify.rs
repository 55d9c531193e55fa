//! Verification results and their aggregation.

use serde::{Deserialize, Serialize};

/// Outcome of replaying one fixture case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerificationResult {
    /// Stable identifier: `<campaign>::<family>::<case>`.
    pub trace_id: String,
    pub family: String,
    pub function: String,
    pub case_name: String,
    pub spec_section: String,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
    /// Present only for failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

/// Totals over a verification run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<VerificationResult>,
}

impl VerificationSummary {
    #[must_use]
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            results,
        }
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Failed results only.
    pub fn failures(&self) -> impl Iterator<Item = &VerificationResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}

/// Two-line expected/actual rendering used for failed cases.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    format!("- expected: {expected}\n+ actual:   {actual}")
}
