//! # Ollama HTTP Client
//!
//! [`OllamaClient`] wraps a `reqwest::Client` with the configured base URL
//! and model. It is `Send + Sync` and can be shared via `Arc`.
//!
//! ## Streaming
//!
//! Streamed responses arrive as newline-delimited JSON. Bytes are buffered
//! until a newline, each complete line is parsed as one fragment, and the
//! fragment texts are concatenated. Reading stops at the first fragment
//! with `done: true`. Waiting for the response head and for every chunk
//! is bounded by [`OllamaConfig::stream_idle_timeout_secs`].

use std::time::Duration;

use crate::backend::{Generation, GenerationBackend, GenerationRequest, GenerationTiming};
use crate::config::OllamaConfig;
use crate::error::BackendError;
use crate::types::{
    GenerateRequestBody, GenerateResponseBody, ModelInfo, SamplingOptions, TagsResponseBody,
};

/// Tag the service assumes when a model name has none.
const DEFAULT_TAG: &str = "latest";

/// Whether a listed model name satisfies the configured one.
///
/// Names must match exactly, except that an untagged configured name
/// (`llama3`) also matches the same name with the `:latest` tag.
pub fn model_matches(configured: &str, listed: &str) -> bool {
    if configured == listed {
        return true;
    }
    if configured.contains(':') {
        return false;
    }
    listed
        .strip_prefix(configured)
        .and_then(|rest| rest.strip_prefix(':'))
        .is_some_and(|tag| tag == DEFAULT_TAG)
}

/// Client for a local Ollama service.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    config: OllamaConfig,
}

impl OllamaClient {
    /// Build a client from validated configuration.
    ///
    /// The request timeout applies to non-streamed calls only; streamed
    /// calls are bounded per chunk instead.
    pub fn new(config: OllamaConfig) -> Result<Self, BackendError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| BackendError::Http {
                endpoint: config.endpoint_base().to_string(),
                source,
            })?;
        Ok(Self { http, config })
    }

    /// Client configuration.
    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint_base(), path)
    }

    /// Send a request, mapping transport failures and non-2xx statuses.
    async fn send_request(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<reqwest::Response, BackendError> {
        let resp = request.send().await.map_err(|source| BackendError::Http {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BackendError::ApiError {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }

    /// List the models known to the service.
    ///
    /// Calls `GET {base_url}/api/tags`.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, BackendError> {
        let endpoint = self.url("/api/tags");
        let resp = self
            .send_request(
                self.http
                    .get(&endpoint)
                    .timeout(Duration::from_secs(self.config.timeout_secs)),
                &endpoint,
            )
            .await?;
        let body: TagsResponseBody = resp
            .json()
            .await
            .map_err(|source| BackendError::Deserialization {
                endpoint: endpoint.clone(),
                source,
            })?;
        tracing::debug!(endpoint = %endpoint, count = body.models.len(), "listed models");
        Ok(body.models)
    }

    async fn generate_once(
        &self,
        endpoint: &str,
        body: &GenerateRequestBody<'_>,
    ) -> Result<Generation, BackendError> {
        let resp = self
            .send_request(
                self.http
                    .post(endpoint)
                    .timeout(Duration::from_secs(self.config.timeout_secs))
                    .json(body),
                endpoint,
            )
            .await?;
        let body: GenerateResponseBody = resp
            .json()
            .await
            .map_err(|source| BackendError::Deserialization {
                endpoint: endpoint.to_string(),
                source,
            })?;
        Ok(Generation {
            timing: timing_of(&body),
            completed: body.done,
            text: body.response,
        })
    }

    async fn generate_streamed(
        &self,
        endpoint: &str,
        body: &GenerateRequestBody<'_>,
    ) -> Result<Generation, BackendError> {
        let idle_secs = self.config.stream_idle_timeout_secs;
        let idle = Duration::from_secs(idle_secs);
        let timed_out = || BackendError::StreamTimeout {
            endpoint: endpoint.to_string(),
            idle_secs,
        };

        let mut resp = tokio::time::timeout(
            idle,
            self.send_request(self.http.post(endpoint).json(body), endpoint),
        )
        .await
        .map_err(|_| timed_out())??;

        let mut stream = StreamAccumulator::default();
        let mut buffer: Vec<u8> = Vec::new();

        'read: loop {
            let chunk = tokio::time::timeout(idle, resp.chunk())
                .await
                .map_err(|_| timed_out())?
                .map_err(|source| BackendError::Http {
                    endpoint: endpoint.to_string(),
                    source,
                })?;

            let Some(chunk) = chunk else {
                break;
            };
            buffer.extend_from_slice(&chunk);

            while let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=pos).collect();
                if stream.push_line(&line, endpoint)? {
                    break 'read;
                }
            }
        }

        if !stream.done && !buffer.is_empty() {
            stream.push_line(&buffer, endpoint)?;
        }
        if !stream.done {
            tracing::warn!(
                endpoint = %endpoint,
                fragments = stream.fragments,
                "stream ended without a completion fragment"
            );
        }
        Ok(stream.finish())
    }
}

fn timing_of(body: &GenerateResponseBody) -> Option<GenerationTiming> {
    if body.total_duration.is_none() && body.load_duration.is_none() {
        return None;
    }
    Some(GenerationTiming {
        total_duration_ns: body.total_duration,
        load_duration_ns: body.load_duration,
    })
}

/// Concatenates stream fragments in arrival order.
#[derive(Debug, Default)]
struct StreamAccumulator {
    text: String,
    done: bool,
    fragments: usize,
    timing: Option<GenerationTiming>,
}

impl StreamAccumulator {
    /// Parse one NDJSON line. Blank lines are skipped. Returns `true` once
    /// the completion fragment has been seen.
    fn push_line(&mut self, line: &[u8], endpoint: &str) -> Result<bool, BackendError> {
        let line = String::from_utf8_lossy(line);
        let line = line.trim();
        if line.is_empty() {
            return Ok(false);
        }
        let fragment: GenerateResponseBody =
            serde_json::from_str(line).map_err(|source| BackendError::StreamFragment {
                endpoint: endpoint.to_string(),
                line: line.to_string(),
                source,
            })?;
        self.fragments += 1;
        self.text.push_str(&fragment.response);
        if fragment.done {
            self.done = true;
            self.timing = timing_of(&fragment);
        }
        Ok(self.done)
    }

    fn finish(self) -> Generation {
        Generation {
            text: self.text,
            completed: self.done,
            timing: self.timing,
        }
    }
}

impl GenerationBackend for OllamaClient {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn is_available(&self) -> bool {
        match self.list_models().await {
            Ok(models) => {
                let found = models
                    .iter()
                    .any(|m| model_matches(&self.config.model, &m.name));
                if !found {
                    tracing::info!(
                        model = %self.config.model,
                        listed = models.len(),
                        "configured model not listed by service"
                    );
                }
                found
            }
            Err(e) => {
                tracing::info!(model = %self.config.model, error = %e, "generation service unavailable");
                false
            }
        }
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, BackendError> {
        let endpoint = self.url("/api/generate");
        let body = GenerateRequestBody {
            model: &self.config.model,
            prompt: &request.prompt,
            stream: request.stream,
            raw: request.raw,
            options: SamplingOptions::default(),
        };
        tracing::debug!(
            endpoint = %endpoint,
            model = %self.config.model,
            stream = request.stream,
            prompt_len = request.prompt.len(),
            "requesting generation"
        );

        let generation = if request.stream {
            self.generate_streamed(&endpoint, &body).await?
        } else {
            self.generate_once(&endpoint, &body).await?
        };

        tracing::debug!(
            model = %self.config.model,
            completed = generation.completed,
            text_len = generation.text.len(),
            total_duration_ns = generation.timing.and_then(|t| t.total_duration_ns),
            "generation finished"
        );
        Ok(generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_matches_exact_name() {
        assert!(model_matches("gpt-oss:20b", "gpt-oss:20b"));
    }

    #[test]
    fn model_matches_untagged_against_latest() {
        assert!(model_matches("llama3", "llama3:latest"));
        assert!(!model_matches("llama3", "llama3:8b"));
    }

    #[test]
    fn model_matches_rejects_substrings() {
        assert!(!model_matches("gpt-oss:20b", "gpt-oss:20b-q4"));
        assert!(!model_matches("gpt-oss", "my-gpt-oss:latest"));
        assert!(!model_matches("20b", "gpt-oss:20b"));
    }

    #[test]
    fn new_rejects_invalid_config() {
        let err = OllamaClient::new(OllamaConfig::new("nope", "m")).unwrap_err();
        assert!(matches!(err, BackendError::Config(_)));
    }

    #[test]
    fn accumulator_concatenates_until_done() {
        let mut acc = StreamAccumulator::default();
        assert!(!acc.push_line(br#"{"response":"Hel","done":false}"#, "e").unwrap());
        assert!(!acc.push_line(b"   \n", "e").unwrap());
        assert!(acc
            .push_line(br#"{"response":"lo","done":true,"total_duration":7}"#, "e")
            .unwrap());
        let generation = acc.finish();
        assert_eq!(generation.text, "Hello");
        assert!(generation.completed);
        assert_eq!(generation.timing.unwrap().total_duration_ns, Some(7));
    }

    #[test]
    fn accumulator_rejects_malformed_line() {
        let mut acc = StreamAccumulator::default();
        let err = acc.push_line(b"{oops", "e").unwrap_err();
        assert!(matches!(err, BackendError::StreamFragment { .. }));
    }

    #[test]
    fn timing_absent_when_not_reported() {
        assert!(timing_of(&GenerateResponseBody::default()).is_none());
    }
}
