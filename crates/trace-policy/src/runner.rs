//! # Test Runner
//!
//! Loads labeled cases and evaluates every rule of a pack against every
//! case. Results are returned as a fresh collection on each run; the
//! runner holds no state between runs.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use trace_core::{PolicyPack, TestCase, TestResult};

use crate::error::RunnerError;
use crate::evaluator::{KeywordEvaluator, RuleEvaluator};

/// On-disk shape of a cases file.
#[derive(Debug, Deserialize)]
struct CasesFile {
    #[serde(default)]
    cases: Vec<TestCase>,
}

/// Load test cases from a JSON document with a `cases` array.
///
/// Every case must carry all [`TestCase`] fields.
pub fn load_test_cases(path: &Path) -> Result<Vec<TestCase>, RunnerError> {
    if !path.exists() {
        return Err(RunnerError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let raw = fs::read_to_string(path).map_err(|source| RunnerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: CasesFile = serde_json::from_str(&raw).map_err(|source| RunnerError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), cases = file.cases.len(), "loaded test cases");
    Ok(file.cases)
}

/// Evaluate every rule against every case with the keyword heuristic.
pub fn run_tests(pack: &PolicyPack, cases: &[TestCase]) -> Result<Vec<TestResult>, RunnerError> {
    run_tests_with(&KeywordEvaluator, pack, cases)
}

/// Evaluate every rule against every case with `evaluator`.
///
/// Yields `cases.len() * pack.rules.len()` results, cases in the outer
/// order and rules in the inner order.
pub fn run_tests_with<E>(
    evaluator: &E,
    pack: &PolicyPack,
    cases: &[TestCase],
) -> Result<Vec<TestResult>, RunnerError>
where
    E: RuleEvaluator + ?Sized,
{
    let mut results = Vec::with_capacity(cases.len() * pack.rules.len());
    for case in cases {
        for rule in &pack.rules {
            results.push(evaluator.evaluate(rule, case)?);
        }
    }
    tracing::info!(
        pack = %pack.name,
        evaluator = evaluator.name(),
        cases = cases.len(),
        rules = pack.rules.len(),
        results = results.len(),
        "ran policy tests"
    );
    Ok(results)
}
