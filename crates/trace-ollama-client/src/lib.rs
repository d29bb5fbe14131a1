//! # trace-ollama-client — Generation Backend Adapter
//!
//! Typed async HTTP client for a locally running Ollama service. The
//! policy compiler talks to the model exclusively through the
//! [`GenerationBackend`] trait; [`OllamaClient`] is the production
//! implementation.
//!
//! ## Endpoints
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST | `/api/generate` | [`OllamaClient::generate`] (streamed or not) |
//! | GET | `/api/tags` | [`OllamaClient::list_models`], [`OllamaClient::is_available`] |
//!
//! ## Configuration
//!
//! Service URL, model name, and timeouts are passed explicitly through
//! [`OllamaConfig`]; nothing is read from globals. [`OllamaConfig::from_env`]
//! is provided for binaries.
//!
//! ## Failure Model
//!
//! Transport failures and non-2xx statuses surface immediately as
//! [`BackendError`]. There is no retry layer.

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use backend::{Generation, GenerationBackend, GenerationRequest, GenerationTiming};
pub use client::{model_matches, OllamaClient};
pub use config::{ConfigError, OllamaConfig};
pub use error::BackendError;
pub use types::ModelInfo;
