//! # trace-core — Foundational Types for TRACE
//!
//! TRACE (Transparent Rules & Audit Compliance Engine) compiles free-text
//! organizational norms into structured policy packs and evaluates text
//! samples against them. This crate holds the data model shared by every
//! other crate in the workspace.
//!
//! ## Data Model
//!
//! - [`PolicyRule`]: a single structured rule with severity and enforcement type.
//! - [`PolicyPack`]: a versioned, named collection of rules plus audit metadata.
//! - [`TestCase`]: a labeled text sample to evaluate against a pack.
//! - [`TestResult`]: the outcome of evaluating one rule against one case.
//!
//! ## Validation
//!
//! Enumerated fields ([`Severity`], [`EnforcementType`], [`Verdict`]) are
//! parsed case-insensitively and rejected with a [`ValidationError`] when
//! they fall outside the recognized set. Rule identifiers are checked for
//! uniqueness whenever a [`PolicyPack`] is assembled.

pub mod case;
pub mod error;
pub mod pack;
pub mod rule;

pub use case::{TestCase, TestResult, Verdict};
pub use error::ValidationError;
pub use pack::{
    PolicyPack, METADATA_GENERATED_AT, METADATA_RAW_RESPONSE, METADATA_REASONING_EFFORT,
};
pub use rule::{EnforcementType, PolicyRule, Severity};
