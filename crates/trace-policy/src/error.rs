//! Error types for compilation, evaluation, test runs, reporting and
//! on-disk persistence.

use std::path::PathBuf;

use trace_core::ValidationError;
use trace_harmony::HarmonyError;
use trace_ollama_client::BackendError;

/// Errors from compiling norms into a policy pack.
///
/// Variants describing malformed model output carry the complete raw
/// response so operators can inspect what the model produced.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The service is not running or does not have the configured model.
    #[error(
        "generation service is not running or model '{model}' was not found. \
         Please run: ollama pull {model}"
    )]
    BackendUnavailable { model: String },

    /// The generation call itself failed.
    #[error("generation failed: {0}")]
    Backend(#[from] BackendError),

    /// The conversation could not be built or rendered.
    #[error("conversation error: {0}")]
    Harmony(#[from] HarmonyError),

    /// The response contains no `{ ... }` span.
    #[error("no valid JSON found in model response\nResponse: {raw_response}")]
    NoJsonObject { raw_response: String },

    /// The `{ ... }` span did not parse as JSON.
    #[error("failed to parse policy JSON: {source}\nResponse: {raw_response}")]
    InvalidJson {
        source: serde_json::Error,
        raw_response: String,
    },

    /// `rules` is present but is not an array.
    #[error("policy JSON field 'rules' is not an array\nResponse: {raw_response}")]
    RulesNotArray { raw_response: String },

    /// An entry of `rules` is missing a field or has an unrecognized value.
    #[error("invalid rule at index {index}: {source}\nResponse: {raw_response}")]
    InvalidRule {
        index: usize,
        source: serde_json::Error,
        raw_response: String,
    },

    /// The rules parsed but do not form a valid pack.
    #[error("invalid policy pack: {source}\nResponse: {raw_response}")]
    InvalidPack {
        source: ValidationError,
        raw_response: String,
    },
}

impl CompileError {
    /// The raw model response attached to this error, if any.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::NoJsonObject { raw_response }
            | Self::InvalidJson { raw_response, .. }
            | Self::RulesNotArray { raw_response }
            | Self::InvalidRule { raw_response, .. }
            | Self::InvalidPack { raw_response, .. } => Some(raw_response),
            Self::BackendUnavailable { .. } | Self::Backend(_) | Self::Harmony(_) => None,
        }
    }
}

/// Errors from scoring a rule against a case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    /// The rule has no keywords to score with.
    #[error("rule '{rule_id}' has an empty description")]
    EmptyDescription { rule_id: String },
}

/// Errors from loading cases or running them.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The cases file does not exist.
    #[error("test cases file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The cases file could not be read.
    #[error("failed to read test cases from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The cases file is not a valid cases document.
    #[error("failed to parse test cases in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A rule could not be evaluated.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

/// Errors from building a report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    /// There are no results to summarize.
    #[error("No test results available")]
    NoResults,
}

impl ReportError {
    /// The error-shaped report object, `{"error": "<message>"}`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string() })
    }
}

/// Errors reading or writing packs and reports on disk.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Filesystem failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON encoding or decoding failed.
    #[error("JSON error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A loaded pack violates pack invariants.
    #[error("invalid policy pack in {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_names_the_model() {
        let err = CompileError::BackendUnavailable {
            model: "gpt-oss:20b".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("gpt-oss:20b"));
        assert!(msg.contains("ollama pull gpt-oss:20b"));
        assert!(err.raw_response().is_none());
    }

    #[test]
    fn parse_errors_carry_raw_response() {
        let err = CompileError::NoJsonObject {
            raw_response: "I could not comply.".into(),
        };
        assert!(err.to_string().contains("I could not comply."));
        assert_eq!(err.raw_response(), Some("I could not comply."));
    }

    #[test]
    fn report_error_object_shape() {
        assert_eq!(
            ReportError::NoResults.to_json(),
            serde_json::json!({"error": "No test results available"})
        );
    }

    #[test]
    fn runner_error_names_path() {
        let err = RunnerError::FileNotFound {
            path: PathBuf::from("cases/missing.json"),
        };
        assert!(err.to_string().contains("cases/missing.json"));
    }
}
