//! # Policy Compiler
//!
//! Turns free-text norms into a [`PolicyPack`] by asking a generation
//! backend to emit structured rules.
//!
//! ## Pipeline
//!
//! 1. Probe backend availability. Nothing is generated if the probe fails.
//! 2. Build a Harmony conversation: a system turn carrying the reasoning
//!    level, date and compiler instructions, then one user turn with the
//!    norms.
//! 3. Render it for an assistant completion and send it non-streamed with
//!    `raw` set, so the service applies no template of its own.
//! 4. Take the span from the first `{` to the last `}` of the response and
//!    parse it as JSON.
//! 5. Build one [`PolicyRule`] per entry of `rules`; every field is
//!    required.
//! 6. Assemble the pack with audit metadata. The raw response is recorded
//!    verbatim.

use std::collections::BTreeMap;

use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::Deserialize as _;
use serde_json::Value;
use trace_core::{
    PolicyPack, PolicyRule, METADATA_GENERATED_AT, METADATA_RAW_RESPONSE,
    METADATA_REASONING_EFFORT,
};
use trace_harmony::{
    render_conversation_for_completion, ConversationBuilder, ReasoningEffort, Role,
};
use trace_ollama_client::{GenerationBackend, GenerationRequest};

use crate::error::CompileError;
use crate::prompt;

/// Version stamped on every compiled pack.
pub const PACK_VERSION: &str = "1.0.0";
/// Metadata key for the model that produced the rules.
pub const METADATA_MODEL: &str = "model";
/// Metadata key for the service-reported generation time.
pub const METADATA_TOTAL_DURATION_NS: &str = "total_duration_ns";

/// Compiler settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Reasoning level requested from the model.
    pub reasoning_effort: ReasoningEffort,
    /// Date carried in the system turn. `None` means today (UTC) at the
    /// time of compilation.
    pub conversation_start_date: Option<NaiveDate>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            reasoning_effort: ReasoningEffort::High,
            conversation_start_date: None,
        }
    }
}

impl CompilerConfig {
    /// Settings for an effort level given as text (`low`, `medium`, `high`).
    pub fn from_effort_str(effort: &str) -> Result<Self, CompileError> {
        Ok(Self {
            reasoning_effort: effort.parse()?,
            ..Self::default()
        })
    }

    /// Pin the conversation date.
    pub fn with_conversation_start_date(mut self, date: NaiveDate) -> Self {
        self.conversation_start_date = Some(date);
        self
    }
}

/// Compiles norms through a [`GenerationBackend`].
#[derive(Debug)]
pub struct PolicyCompiler<B> {
    backend: B,
    config: CompilerConfig,
}

impl<B: GenerationBackend> PolicyCompiler<B> {
    pub fn new(backend: B, config: CompilerConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// The Harmony prompt sent to the backend for these norms.
    pub fn render_prompt(&self, norms_text: &str, domain: &str) -> Result<String, CompileError> {
        let date = self
            .config
            .conversation_start_date
            .unwrap_or_else(|| Utc::now().date_naive());
        let builder = ConversationBuilder::new(self.config.reasoning_effort)
            .with_conversation_start_date(date);
        let developer = prompt::developer_message(domain, self.config.reasoning_effort);
        let conversation =
            builder.build_conversation(&[prompt::user_message(norms_text)], &developer);
        Ok(render_conversation_for_completion(
            &conversation,
            Role::Assistant,
        )?)
    }

    /// Compile `norms_text` into a pack named `<domain>_policy`.
    ///
    /// # Errors
    ///
    /// - [`CompileError::BackendUnavailable`] if the availability probe
    ///   fails. No generation request is made in that case.
    /// - [`CompileError::Backend`] if generation fails.
    /// - [`CompileError::NoJsonObject`], [`CompileError::InvalidJson`],
    ///   [`CompileError::RulesNotArray`], [`CompileError::InvalidRule`] or
    ///   [`CompileError::InvalidPack`] if the response cannot be turned
    ///   into a pack.
    pub async fn compile_norms(
        &self,
        norms_text: &str,
        domain: &str,
    ) -> Result<PolicyPack, CompileError> {
        let model = self.backend.model().to_string();
        if !self.backend.is_available().await {
            return Err(CompileError::BackendUnavailable { model });
        }

        let prompt = self.render_prompt(norms_text, domain)?;
        tracing::info!(
            domain,
            model = %model,
            effort = %self.config.reasoning_effort,
            "compiling norms"
        );

        let generation = self
            .backend
            .generate(&GenerationRequest::new(prompt).raw(true))
            .await?;
        let raw_response = generation.text;

        let rules = parse_rules(&raw_response)?;

        let mut metadata = BTreeMap::new();
        metadata.insert(
            METADATA_REASONING_EFFORT.to_string(),
            Value::from(self.config.reasoning_effort.as_str()),
        );
        metadata.insert(
            METADATA_GENERATED_AT.to_string(),
            Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        metadata.insert(METADATA_MODEL.to_string(), Value::from(model));
        if let Some(ns) = generation.timing.and_then(|t| t.total_duration_ns) {
            metadata.insert(METADATA_TOTAL_DURATION_NS.to_string(), Value::from(ns));
        }
        metadata.insert(
            METADATA_RAW_RESPONSE.to_string(),
            Value::from(raw_response.as_str()),
        );

        let pack = PolicyPack::new(
            format!("{domain}_policy"),
            PACK_VERSION,
            domain,
            rules,
            metadata,
        )
        .map_err(|source| CompileError::InvalidPack {
            source,
            raw_response,
        })?;

        tracing::info!(
            pack = %pack.name,
            rules = pack.rules.len(),
            "compiled policy pack"
        );
        Ok(pack)
    }
}

/// The span from the first `{` to the last `}` inclusive, if any.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse the `rules` array out of a raw model response.
///
/// A JSON object without a `rules` key yields no rules.
pub fn parse_rules(raw_response: &str) -> Result<Vec<PolicyRule>, CompileError> {
    let json = extract_json_object(raw_response).ok_or_else(|| CompileError::NoJsonObject {
        raw_response: raw_response.to_string(),
    })?;

    let value: Value = serde_json::from_str(json).map_err(|source| CompileError::InvalidJson {
        source,
        raw_response: raw_response.to_string(),
    })?;

    let entries = match value.get("rules") {
        None => {
            tracing::warn!("model response has no 'rules' field");
            return Ok(Vec::new());
        }
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(CompileError::RulesNotArray {
                raw_response: raw_response.to_string(),
            })
        }
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            PolicyRule::deserialize(entry).map_err(|source| CompileError::InvalidRule {
                index,
                source,
                raw_response: raw_response.to_string(),
            })
        })
        .collect()
}
