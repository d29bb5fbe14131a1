//! # CLI Configuration Layering
//!
//! Backend settings are resolved in increasing precedence:
//!
//! 1. Built-in defaults ([`OllamaConfig::default`]).
//! 2. YAML file given with `--config`.
//! 3. `TRACE_OLLAMA_*` environment variables.
//! 4. `--ollama-url` / `--model` flags.
//!
//! ```yaml
//! ollama_url: http://localhost:11434
//! model: gpt-oss:20b
//! timeout_secs: 300
//! stream_idle_timeout_secs: 120
//! reasoning_effort: high
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use trace_ollama_client::OllamaConfig;

/// Contents of a `--config` file. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub ollama_url: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub stream_idle_timeout_secs: Option<u64>,
    pub reasoning_effort: Option<String>,
}

impl FileConfig {
    /// Parse a YAML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

/// Where settings come from, as given on the command line.
#[derive(Debug, Default, Clone)]
pub struct ConfigSources {
    pub config_file: Option<PathBuf>,
    pub ollama_url: Option<String>,
    pub model: Option<String>,
}

/// Resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub ollama: OllamaConfig,
    /// Effort from the config file, if set. The `--effort` flag wins.
    pub reasoning_effort: Option<String>,
}

impl Settings {
    /// Resolve against the process environment.
    pub fn resolve(sources: &ConfigSources) -> Result<Self> {
        Self::resolve_with(sources, |key| std::env::var(key).ok())
    }

    /// Resolve with an injectable environment lookup.
    pub fn resolve_with<F>(sources: &ConfigSources, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match &sources.config_file {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let mut ollama = OllamaConfig::default();
        if let Some(url) = file.ollama_url {
            ollama.base_url = url;
        }
        if let Some(model) = file.model {
            ollama.model = model;
        }
        if let Some(secs) = file.timeout_secs {
            ollama.timeout_secs = secs;
        }
        if let Some(secs) = file.stream_idle_timeout_secs {
            ollama.stream_idle_timeout_secs = secs;
        }

        ollama
            .apply_lookup(lookup)
            .context("invalid backend setting in environment")?;

        if let Some(url) = &sources.ollama_url {
            ollama.base_url = url.clone();
        }
        if let Some(model) = &sources.model {
            ollama.model = model.clone();
        }

        ollama.validate().context("invalid backend configuration")?;
        tracing::debug!(
            url = %ollama.base_url,
            model = %ollama.model,
            timeout_secs = ollama.timeout_secs,
            "resolved backend configuration"
        );

        Ok(Self {
            ollama,
            reasoning_effort: file.reasoning_effort,
        })
    }
}
