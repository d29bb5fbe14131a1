//! # trace-policy — Compiler, Runner & Reporter
//!
//! The working half of TRACE:
//!
//! - [`PolicyCompiler`] turns free-text norms into a [`trace_core::PolicyPack`]
//!   through any [`trace_ollama_client::GenerationBackend`].
//! - [`save_policy_pack`] / [`load_policy_pack`] persist packs as indented
//!   JSON.
//! - [`run_tests`] scores every rule of a pack against every loaded case
//!   with a [`RuleEvaluator`] ([`KeywordEvaluator`] by default).
//! - [`generate_report`] summarizes the results; [`save_report`] writes
//!   them out.
//!
//! Nothing here holds state between calls. A compile produces a new pack
//! and a run produces a new result set.

pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod prompt;
pub mod report;
pub mod runner;
pub mod store;

pub use compiler::{
    extract_json_object, parse_rules, CompilerConfig, PolicyCompiler, PACK_VERSION,
};
pub use error::{CompileError, EvaluationError, ReportError, RunnerError, StoreError};
pub use evaluator::{KeywordEvaluator, RuleEvaluator, DECISION_THRESHOLD};
pub use report::{generate_report, save_report, ReportSummary, TestReport};
pub use runner::{load_test_cases, run_tests, run_tests_with};
pub use store::{load_policy_pack, save_policy_pack};
