//! # Validation Errors
//!
//! Structured errors raised while constructing or parsing the core data
//! model. Uses `thiserror` for derive-based `Display` and `Error`.

use thiserror::Error;

/// Errors from validating policy and test data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Severity string is not one of `low`, `medium`, `high`.
    #[error("unknown severity '{0}': expected one of low, medium, high")]
    UnknownSeverity(String),

    /// Enforcement type string is not one of `require`, `forbid`, `recommend`.
    #[error("unknown enforcement type '{0}': expected one of require, forbid, recommend")]
    UnknownEnforcementType(String),

    /// Verdict string is not one of `pass`, `fail`, `warn`.
    #[error("unknown verdict '{0}': expected one of pass, fail, warn")]
    UnknownVerdict(String),

    /// Two rules in the same pack share an identifier.
    #[error("duplicate rule id '{id}' in policy pack '{pack}'")]
    DuplicateRuleId {
        /// The repeated rule identifier.
        id: String,
        /// Name of the pack being assembled.
        pack: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_severity_display_lists_valid_values() {
        let msg = format!("{}", ValidationError::UnknownSeverity("critical".into()));
        assert!(msg.contains("critical"));
        assert!(msg.contains("low, medium, high"));
    }

    #[test]
    fn duplicate_rule_id_display_names_pack() {
        let err = ValidationError::DuplicateRuleId {
            id: "no-spam".into(),
            pack: "content_policy".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("no-spam"));
        assert!(msg.contains("content_policy"));
    }
}
