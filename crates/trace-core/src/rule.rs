//! # Policy Rules
//!
//! A [`PolicyRule`] is the unit a compiled norm decomposes into. Rules are
//! records: once a pack is assembled they are not mutated, only replaced by
//! recompiling the norms.
//!
//! ## Enumerations
//!
//! [`Severity`] and [`EnforcementType`] serialize as lowercase strings and
//! deserialize case-insensitively, so model output such as `"High"` or
//! `"FORBID"` is accepted while unrecognized values are rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// How serious a violation of the rule is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Minor issue, informational.
    Low,
    /// Noticeable issue that should be addressed.
    Medium,
    /// Serious violation.
    High,
}

impl Severity {
    /// All severities, lowest first.
    pub const ALL: [Severity; 3] = [Self::Low, Self::Medium, Self::High];

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ValidationError::UnknownSeverity(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// EnforcementType
// ---------------------------------------------------------------------------

/// Whether a rule requires, forbids, or merely recommends a behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnforcementType {
    /// The behavior must be present.
    Require,
    /// The behavior must be absent.
    Forbid,
    /// The behavior is encouraged but not mandatory.
    Recommend,
}

impl EnforcementType {
    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Require => "require",
            Self::Forbid => "forbid",
            Self::Recommend => "recommend",
        }
    }

    /// True for [`EnforcementType::Forbid`].
    pub fn is_forbid(self) -> bool {
        matches!(self, Self::Forbid)
    }
}

impl fmt::Display for EnforcementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnforcementType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "require" => Ok(Self::Require),
            "forbid" => Ok(Self::Forbid),
            "recommend" => Ok(Self::Recommend),
            _ => Err(ValidationError::UnknownEnforcementType(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for EnforcementType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// PolicyRule
// ---------------------------------------------------------------------------

/// A single structured policy rule.
///
/// Every field is required on deserialization; a model response that omits
/// any of them is rejected rather than silently defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRule {
    /// Identifier, unique within its pack.
    pub id: String,
    /// Human-readable statement of the rule. Also the keyword source for
    /// the keyword evaluator, so it must be non-empty to be evaluable.
    pub description: String,
    /// Free-text category tag (e.g. "content", "privacy").
    pub category: String,
    /// Violation severity.
    pub severity: Severity,
    /// Require / forbid / recommend.
    pub enforcement_type: EnforcementType,
    /// Why the rule exists.
    pub rationale: String,
    /// Example cases. Advisory only; the test runner does not read them.
    pub test_cases: Vec<String>,
    /// Exception cases. Advisory only; not enforced.
    pub exceptions: Vec<String>,
}
