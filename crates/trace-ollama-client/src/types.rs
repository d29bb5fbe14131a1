//! Wire types for the Ollama HTTP API.

use serde::{Deserialize, Serialize};

/// Sampling temperature sent with every generation request.
pub const TEMPERATURE: f64 = 1.0;
/// Nucleus sampling parameter sent with every generation request.
pub const TOP_P: f64 = 1.0;

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequestBody<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
    /// Skip the service's own prompt template. Only sent when set.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub raw: bool,
    pub options: SamplingOptions,
}

/// Fixed sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplingOptions {
    pub temperature: f64,
    pub top_p: f64,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE,
            top_p: TOP_P,
        }
    }
}

/// A non-streamed response, or one line of a streamed response.
///
/// Durations are reported by the service in nanoseconds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateResponseBody {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub total_duration: Option<u64>,
    #[serde(default)]
    pub load_duration: Option<u64>,
}

/// Body of `GET /api/tags`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagsResponseBody {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}

/// A model known to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model name including tag (e.g. `gpt-oss:20b`).
    #[serde(default)]
    pub name: String,
    /// On-disk size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Content digest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    /// Last modification time as reported by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
}
