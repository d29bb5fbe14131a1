//! # Backend Configuration
//!
//! [`OllamaConfig`] is handed to [`crate::OllamaClient::new`] at
//! construction so that tests and callers can target any service URL and
//! model without touching process-wide state.
//!
//! ## Environment
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `TRACE_OLLAMA_URL` | `base_url` | `http://localhost:11434` |
//! | `TRACE_OLLAMA_MODEL` | `model` | `gpt-oss:20b` |
//! | `TRACE_OLLAMA_TIMEOUT_SECS` | `timeout_secs` | `300` |

/// Environment variable for the service base URL.
pub const ENV_BASE_URL: &str = "TRACE_OLLAMA_URL";
/// Environment variable for the model name.
pub const ENV_MODEL: &str = "TRACE_OLLAMA_MODEL";
/// Environment variable for the request timeout.
pub const ENV_TIMEOUT_SECS: &str = "TRACE_OLLAMA_TIMEOUT_SECS";

/// Default service URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
/// Default model.
pub const DEFAULT_MODEL: &str = "gpt-oss:20b";
/// Default timeout for non-streamed requests. Local models can take
/// minutes on high reasoning effort.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
/// Default maximum gap between stream fragments.
pub const DEFAULT_STREAM_IDLE_TIMEOUT_SECS: u64 = 120;

/// Errors in backend configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A URL value failed to parse.
    #[error("invalid URL in {field}: '{value}': {source}")]
    InvalidUrl {
        field: String,
        value: String,
        source: url::ParseError,
    },
    /// A numeric value failed to parse.
    #[error("invalid number in {field}: '{value}'")]
    InvalidNumber { field: String, value: String },
    /// The model name is empty.
    #[error("model name must not be empty")]
    EmptyModel,
    /// A timeout is zero.
    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: String },
}

/// Connection settings for the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaConfig {
    /// Base URL of the service, without the `/api` suffix.
    pub base_url: String,
    /// Model name as known to the service (e.g. `gpt-oss:20b`).
    pub model: String,
    /// Timeout for non-streamed requests, in seconds.
    pub timeout_secs: u64,
    /// Maximum gap between streamed fragments, in seconds.
    pub stream_idle_timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            stream_idle_timeout_secs: DEFAULT_STREAM_IDLE_TIMEOUT_SECS,
        }
    }
}

impl OllamaConfig {
    /// Configuration for a service URL and model with default timeouts.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            ..Self::default()
        }
    }

    /// Read configuration from `TRACE_OLLAMA_*` environment variables,
    /// falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`OllamaConfig::from_env`] with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_lookup(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Overwrite fields whose variables are set, leaving the rest alone.
    /// Used to layer the environment over file-based settings.
    pub fn apply_lookup<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url.trim().to_string();
        }
        if let Some(model) = lookup(ENV_MODEL) {
            self.model = model;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                field: ENV_TIMEOUT_SECS.to_string(),
                value: raw.clone(),
            })?;
        }
        Ok(())
    }

    /// Check that the URL parses, the model is named, and timeouts are
    /// positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parsed_base_url()?;
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout {
                field: "timeout_secs".into(),
            });
        }
        if self.stream_idle_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout {
                field: "stream_idle_timeout_secs".into(),
            });
        }
        Ok(())
    }

    /// The base URL, parsed.
    pub fn parsed_base_url(&self) -> Result<url::Url, ConfigError> {
        url::Url::parse(self.base_url.trim()).map_err(|source| ConfigError::InvalidUrl {
            field: "base_url".to_string(),
            value: self.base_url.clone(),
            source,
        })
    }

    /// Base URL with any trailing slash removed, ready for path joining.
    pub fn endpoint_base(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_target_local_gpt_oss() {
        let config = OllamaConfig::default();
        assert_eq!(config.base_url, "http://localhost:11434");
        assert_eq!(config.model, "gpt-oss:20b");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_lookup_with_no_variables_uses_defaults() {
        let config = OllamaConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, OllamaConfig::default());
    }

    #[test]
    fn from_lookup_overrides_fields() {
        let config = OllamaConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "http://gpu-box:8080"),
            (ENV_MODEL, "gpt-oss:120b"),
            (ENV_TIMEOUT_SECS, "42"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://gpu-box:8080");
        assert_eq!(config.model, "gpt-oss:120b");
        assert_eq!(config.timeout_secs, 42);
    }

    #[test]
    fn from_lookup_rejects_bad_url() {
        let err = OllamaConfig::from_lookup(lookup(&[(ENV_BASE_URL, "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn from_lookup_rejects_bad_timeout() {
        let err = OllamaConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));
    }

    #[test]
    fn apply_lookup_keeps_unset_fields() {
        let mut config = OllamaConfig::new("http://from-file:1234", "file-model");
        config
            .apply_lookup(lookup(&[(ENV_MODEL, "env-model")]))
            .unwrap();
        assert_eq!(config.base_url, "http://from-file:1234");
        assert_eq!(config.model, "env-model");
    }

    #[test]
    fn endpoint_base_strips_trailing_slash() {
        let config = OllamaConfig::new("http://localhost:11434/", "m");
        assert_eq!(config.endpoint_base(), "http://localhost:11434");
    }

    #[test]
    fn validate_rejects_empty_model_and_zero_timeouts() {
        let mut config = OllamaConfig::default();
        config.model = "  ".into();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyModel)));

        let mut config = OllamaConfig::default();
        config.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTimeout { .. })));

        let mut config = OllamaConfig::default();
        config.stream_idle_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
