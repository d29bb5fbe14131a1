//! # Generation Backend Trait
//!
//! The seam between the policy compiler and whatever serves completions.
//! [`crate::OllamaClient`] implements it against a live service; tests
//! substitute in-process fakes.

use std::future::Future;

use crate::error::BackendError;

/// A single completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Prompt text sent to the model.
    pub prompt: String,
    /// Ask the service for an incremental NDJSON stream.
    pub stream: bool,
    /// Send the prompt verbatim, bypassing the service's chat template.
    pub raw: bool,
}

impl GenerationRequest {
    /// Non-streamed, templated request.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            stream: false,
            raw: false,
        }
    }

    /// Request incremental delivery.
    pub fn streaming(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    /// Send the prompt without server-side templating.
    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }
}

/// Timing figures reported by the service, in nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationTiming {
    pub total_duration_ns: Option<u64>,
    pub load_duration_ns: Option<u64>,
}

/// Text produced by a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// Generated text. For streamed requests, the fragments concatenated
    /// in arrival order.
    pub text: String,
    /// Whether the service signalled completion. A stream that ends without
    /// a `done` fragment yields `false` with whatever text arrived.
    pub completed: bool,
    /// Timing, when the service reported it.
    pub timing: Option<GenerationTiming>,
}

/// A text-completion service.
pub trait GenerationBackend: Send + Sync {
    /// Name of the model completions are requested from.
    fn model(&self) -> &str;

    /// Whether the service is reachable and has the configured model.
    /// Never fails; any error reads as unavailable.
    fn is_available(&self) -> impl Future<Output = bool> + Send;

    /// Request a completion.
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<Generation, BackendError>> + Send;
}
