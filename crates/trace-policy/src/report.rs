//! # Test Reports
//!
//! Summarizes a set of [`TestResult`]s. An empty set is an error, never a
//! summary with a zero denominator.

use std::path::Path;

use serde::{Deserialize, Serialize};
use trace_core::{TestResult, Verdict};

use crate::error::{ReportError, StoreError};
use crate::store::write_json_pretty;

/// Counts by outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
    /// `passed / total_tests`.
    pub pass_rate: f64,
}

/// Summary plus every individual result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestReport {
    pub summary: ReportSummary,
    pub results: Vec<TestResult>,
}

/// Build a report from `results`.
///
/// # Errors
///
/// [`ReportError::NoResults`] if `results` is empty. Its
/// [`ReportError::to_json`] form is the error-shaped report object.
pub fn generate_report(results: &[TestResult]) -> Result<TestReport, ReportError> {
    if results.is_empty() {
        return Err(ReportError::NoResults);
    }

    let count = |v: Verdict| results.iter().filter(|r| r.result == v).count();
    let total_tests = results.len();
    let passed = count(Verdict::Pass);

    Ok(TestReport {
        summary: ReportSummary {
            total_tests,
            passed,
            failed: count(Verdict::Fail),
            warnings: count(Verdict::Warn),
            pass_rate: passed as f64 / total_tests as f64,
        },
        results: results.to_vec(),
    })
}

/// Write a report as indented JSON.
pub fn save_report(report: &TestReport, path: &Path) -> Result<(), StoreError> {
    write_json_pretty(report, path)?;
    tracing::info!(path = %path.display(), total = report.summary.total_tests, "saved test report");
    Ok(())
}
