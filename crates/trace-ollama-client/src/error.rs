//! Generation backend error types.

/// Errors from calls to the generation service.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// HTTP transport error (connection refused, DNS, timeout).
    #[error("failed to connect to generation service at {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The service returned a non-2xx status.
    #[error("generation service {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// A line of a streamed response was not valid JSON.
    #[error("malformed stream fragment from {endpoint}: {source} (line: {line})")]
    StreamFragment {
        endpoint: String,
        line: String,
        source: serde_json::Error,
    },
    /// No stream data arrived within the idle timeout.
    #[error("stream from {endpoint} produced no data for {idle_secs}s")]
    StreamTimeout { endpoint: String, idle_secs: u64 },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl BackendError {
    /// True when the service could not be reached or refused the request,
    /// as opposed to answering with unusable data.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::ApiError { .. } | Self::StreamTimeout { .. }
        )
    }
}
