//! # Rule Evaluators
//!
//! A [`RuleEvaluator`] scores one rule against one case. The runner only
//! sees the trait, so a stronger evaluator (for example a model acting as
//! judge) can replace [`KeywordEvaluator`] without touching rules, cases
//! or results.
//!
//! ## Keyword Heuristic
//!
//! 1. Split the lowercased rule description on whitespace. Repeated words
//!    are kept.
//! 2. Count the words that occur anywhere in the lowercased case content.
//! 3. `confidence = min(matches / words, 1.0)`.
//! 4. Above [`DECISION_THRESHOLD`], a `forbid` rule fails and any other
//!    rule passes. At or below it, the outcome is reversed.
//!
//! The heuristic never produces [`Verdict::Warn`].

use trace_core::{PolicyRule, TestCase, TestResult, Verdict};

use crate::error::EvaluationError;

/// Confidence above which keyword overlap counts as a match.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Scores a rule against a case.
pub trait RuleEvaluator: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Produce the result for one (rule, case) pair.
    fn evaluate(&self, rule: &PolicyRule, case: &TestCase) -> Result<TestResult, EvaluationError>;
}

/// Keyword-overlap evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordEvaluator;

impl KeywordEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Keyword-overlap confidence of `content` against `rule`.
    pub fn confidence(rule: &PolicyRule, content: &str) -> Result<f64, EvaluationError> {
        let description = rule.description.to_lowercase();
        let keywords: Vec<&str> = description.split_whitespace().collect();
        if keywords.is_empty() {
            return Err(EvaluationError::EmptyDescription {
                rule_id: rule.id.clone(),
            });
        }

        let content = content.to_lowercase();
        let matches = keywords.iter().filter(|k| content.contains(**k)).count();
        Ok((matches as f64 / keywords.len() as f64).min(1.0))
    }
}

impl RuleEvaluator for KeywordEvaluator {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn evaluate(&self, rule: &PolicyRule, case: &TestCase) -> Result<TestResult, EvaluationError> {
        let confidence = Self::confidence(rule, &case.content)?;
        let forbid = rule.enforcement_type.is_forbid();
        let result = match (confidence > DECISION_THRESHOLD, forbid) {
            (true, true) | (false, false) => Verdict::Fail,
            (true, false) | (false, true) => Verdict::Pass,
        };

        Ok(TestResult {
            case_id: case.id.clone(),
            rule_id: rule.id.clone(),
            result,
            confidence,
            explanation: format!("Rule '{}' evaluation: {confidence:.2} confidence", rule.id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use trace_core::{EnforcementType, Severity};

    fn rule(description: &str, enforcement_type: EnforcementType) -> PolicyRule {
        PolicyRule {
            id: "r1".into(),
            description: description.into(),
            category: "content".into(),
            severity: Severity::High,
            enforcement_type,
            rationale: String::new(),
            test_cases: vec![],
            exceptions: vec![],
        }
    }

    fn case(content: &str) -> TestCase {
        TestCase {
            id: "c1".into(),
            description: "sample".into(),
            content: content.into(),
            expected_result: Verdict::Pass,
            category: "content".into(),
        }
    }

    #[test]
    fn forbid_rule_fully_matched_fails() {
        let r = rule("no hate speech", EnforcementType::Forbid);
        let result = KeywordEvaluator.evaluate(&r, &case("no hate speech here")).unwrap();
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.result, Verdict::Fail);
        assert_eq!(result.explanation, "Rule 'r1' evaluation: 1.00 confidence");
    }

    #[test]
    fn forbid_rule_unmatched_passes() {
        let r = rule("no hate speech", EnforcementType::Forbid);
        let result = KeywordEvaluator
            .evaluate(&r, &case("a nice friendly message"))
            .unwrap();
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.result, Verdict::Pass);
    }

    #[test]
    fn require_rule_above_threshold_passes() {
        // 3 of 5 keywords present: 0.6
        let r = rule("alpha beta gamma delta epsilon", EnforcementType::Require);
        let result = KeywordEvaluator
            .evaluate(&r, &case("Alpha, BETA and gamma only"))
            .unwrap();
        assert!((result.confidence - 0.6).abs() < f64::EPSILON);
        assert_eq!(result.result, Verdict::Pass);
        assert_eq!(result.explanation, "Rule 'r1' evaluation: 0.60 confidence");
    }

    #[test]
    fn exactly_half_is_not_a_match() {
        let r = rule("alpha beta", EnforcementType::Recommend);
        let result = KeywordEvaluator.evaluate(&r, &case("alpha")).unwrap();
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.result, Verdict::Fail);

        let r = rule("alpha beta", EnforcementType::Forbid);
        let result = KeywordEvaluator.evaluate(&r, &case("alpha")).unwrap();
        assert_eq!(result.result, Verdict::Pass);
    }

    #[test]
    fn duplicate_keywords_each_count() {
        // "spam" twice + "eggs": content has spam only -> 2/3
        let r = rule("spam spam eggs", EnforcementType::Require);
        let c = KeywordEvaluator::confidence(&r, "SPAM").unwrap();
        assert!((c - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn keywords_match_as_substrings() {
        let r = rule("hat", EnforcementType::Forbid);
        assert_eq!(KeywordEvaluator::confidence(&r, "that").unwrap(), 1.0);
    }

    #[test]
    fn empty_description_is_an_error() {
        for description in ["", "   \t\n"] {
            let r = rule(description, EnforcementType::Forbid);
            assert_eq!(
                KeywordEvaluator.evaluate(&r, &case("anything")).unwrap_err(),
                EvaluationError::EmptyDescription {
                    rule_id: "r1".into()
                }
            );
        }
    }

    #[test]
    fn never_warns() {
        let r = rule("x y", EnforcementType::Recommend);
        for content in ["", "x", "x y", "zzz"] {
            assert_ne!(KeywordEvaluator.evaluate(&r, &case(content)).unwrap().result, Verdict::Warn);
        }
    }

    fn enforcement() -> impl Strategy<Value = EnforcementType> {
        prop_oneof![
            Just(EnforcementType::Require),
            Just(EnforcementType::Forbid),
            Just(EnforcementType::Recommend),
        ]
    }

    proptest! {
        #[test]
        fn confidence_is_within_unit_interval(
            description in "[a-zA-Z ]{0,40}[a-zA-Z]",
            content in ".{0,80}",
            et in enforcement(),
        ) {
            let r = rule(&description, et);
            let result = KeywordEvaluator.evaluate(&r, &case(&content)).unwrap();
            prop_assert!((0.0..=1.0).contains(&result.confidence));
        }

        #[test]
        fn evaluation_is_deterministic(
            description in "[a-z]{1,8}( [a-z]{1,8}){0,5}",
            content in "[a-z ]{0,60}",
            et in enforcement(),
        ) {
            let r = rule(&description, et);
            let c = case(&content);
            prop_assert_eq!(
                KeywordEvaluator.evaluate(&r, &c).unwrap(),
                KeywordEvaluator.evaluate(&r, &c).unwrap()
            );
        }

        #[test]
        fn forbid_and_require_disagree(
            description in "[a-z]{1,8}( [a-z]{1,8}){0,5}",
            content in "[a-z ]{0,60}",
        ) {
            let c = case(&content);
            let forbid = KeywordEvaluator.evaluate(&rule(&description, EnforcementType::Forbid), &c).unwrap();
            let require = KeywordEvaluator.evaluate(&rule(&description, EnforcementType::Require), &c).unwrap();
            prop_assert_ne!(forbid.result, require.result);
            prop_assert_eq!(forbid.confidence, require.confidence);
        }
    }
}
