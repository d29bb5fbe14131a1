//! # Test Cases & Results
//!
//! [`TestCase`] is a labeled text sample loaded from a cases file.
//! [`TestResult`] is produced once per (case, rule) pair by an evaluator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Outcome of evaluating a rule against a case.
///
/// `Warn` is part of the domain but the keyword evaluator never produces
/// it; it is reserved for richer evaluators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// The case satisfies the rule.
    Pass,
    /// The case violates the rule.
    Fail,
    /// The case is borderline.
    Warn,
}

impl Verdict {
    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Warn => "warn",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass" => Ok(Self::Pass),
            "fail" => Ok(Self::Fail),
            "warn" => Ok(Self::Warn),
            _ => Err(ValidationError::UnknownVerdict(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Verdict {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A labeled text sample to evaluate against a policy pack.
///
/// All fields are required when loading from a cases file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Case identifier.
    pub id: String,
    /// What the case is meant to exercise.
    pub description: String,
    /// The text under evaluation.
    pub content: String,
    /// Expected outcome. Informational; not used in scoring.
    pub expected_result: Verdict,
    /// Free-text category tag.
    pub category: String,
}

/// Result of evaluating one rule against one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// The evaluated case.
    pub case_id: String,
    /// The evaluated rule.
    pub rule_id: String,
    /// Outcome.
    pub result: Verdict,
    /// Heuristic score in `[0, 1]`. Not a calibrated probability.
    pub confidence: f64,
    /// Human-readable explanation of the outcome.
    pub explanation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_roundtrips_through_display() {
        for v in [Verdict::Pass, Verdict::Fail, Verdict::Warn] {
            assert_eq!(v.to_string().parse::<Verdict>().unwrap(), v);
        }
    }

    #[test]
    fn verdict_rejects_unknown() {
        assert_eq!(
            "maybe".parse::<Verdict>().unwrap_err(),
            ValidationError::UnknownVerdict("maybe".into())
        );
    }

    #[test]
    fn test_case_requires_every_field() {
        let complete = serde_json::json!({
            "id": "c1",
            "description": "friendly greeting",
            "content": "hello there",
            "expected_result": "pass",
            "category": "content"
        });
        let case: TestCase = serde_json::from_value(complete.clone()).unwrap();
        assert_eq!(case.expected_result, Verdict::Pass);

        let mut missing = complete;
        missing.as_object_mut().unwrap().remove("category");
        assert!(serde_json::from_value::<TestCase>(missing).is_err());
    }

    #[test]
    fn test_result_serializes_verdict_lowercase() {
        let r = TestResult {
            case_id: "c1".into(),
            rule_id: "r1".into(),
            result: Verdict::Fail,
            confidence: 1.0,
            explanation: "x".into(),
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["result"], "fail");
        assert_eq!(v["confidence"], 1.0);
    }
}
