//! # Policy Packs
//!
//! A [`PolicyPack`] is the versioned output of compiling a body of norms.
//! It is created once per compilation, written to disk, and never patched:
//! recompiling produces a full replacement.
//!
//! ## Audit Metadata
//!
//! `metadata` is an open string-keyed map. Packs produced by the compiler
//! always carry [`METADATA_REASONING_EFFORT`], [`METADATA_GENERATED_AT`]
//! and [`METADATA_RAW_RESPONSE`]; the raw response is stored verbatim so
//! every rule can be traced back to the model output it came from.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::rule::PolicyRule;

/// Metadata key for the reasoning-effort level used at compile time.
pub const METADATA_REASONING_EFFORT: &str = "reasoning_effort";
/// Metadata key for the RFC 3339 generation timestamp.
pub const METADATA_GENERATED_AT: &str = "generated_at";
/// Metadata key for the complete, untruncated model response.
pub const METADATA_RAW_RESPONSE: &str = "raw_response";

/// A named, versioned collection of policy rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyPack {
    /// Pack name (the compiler uses `<domain>_policy`).
    pub name: String,
    /// Semantic version string.
    pub version: String,
    /// Free-text domain classification.
    pub domain: String,
    /// Rules in model order.
    pub rules: Vec<PolicyRule>,
    /// Open audit metadata.
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl PolicyPack {
    /// Assemble a pack, rejecting duplicate rule identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateRuleId`] naming the first
    /// identifier that appears twice.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        domain: impl Into<String>,
        rules: Vec<PolicyRule>,
        metadata: BTreeMap<String, serde_json::Value>,
    ) -> Result<Self, ValidationError> {
        let pack = Self {
            name: name.into(),
            version: version.into(),
            domain: domain.into(),
            rules,
            metadata,
        };
        pack.validate()?;
        Ok(pack)
    }

    /// Check pack invariants. Used after loading a pack from disk, where
    /// construction bypassed [`PolicyPack::new`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::with_capacity(self.rules.len());
        for rule in &self.rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(ValidationError::DuplicateRuleId {
                    id: rule.id.clone(),
                    pack: self.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Look up a rule by identifier.
    pub fn rule(&self, id: &str) -> Option<&PolicyRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// The raw model response recorded at compile time, if present.
    pub fn raw_response(&self) -> Option<&str> {
        self.metadata
            .get(METADATA_RAW_RESPONSE)
            .and_then(|v| v.as_str())
    }

    /// The reasoning-effort level recorded at compile time, if present.
    pub fn reasoning_effort(&self) -> Option<&str> {
        self.metadata
            .get(METADATA_REASONING_EFFORT)
            .and_then(|v| v.as_str())
    }
}
