//! # `trace compile`
//!
//! Compiles a norms file into a policy pack using the configured Ollama
//! model and writes it as JSON.
//!
//! ```bash
//! trace compile norms/sample_norms.txt --domain moderation --effort high
//! trace compile norms.txt --output packs/custom.json --model gpt-oss:120b
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use trace_ollama_client::OllamaClient;
use trace_policy::{save_policy_pack, CompilerConfig, PolicyCompiler};

use crate::config::{ConfigSources, Settings};

/// Effort used when neither the flag nor the config file sets one.
pub const DEFAULT_EFFORT: &str = "high";

/// Arguments for `trace compile`.
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Free-text norms file.
    pub norms_file: PathBuf,

    /// Domain used for naming and tagging the pack.
    #[arg(long, default_value = "general")]
    pub domain: String,

    /// Reasoning effort: low, medium or high.
    #[arg(long)]
    pub effort: Option<String>,

    /// Output file. Defaults to `output/<domain>_policy.json`.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Execute `trace compile`.
pub async fn run_compile(args: &CompileArgs, sources: &ConfigSources, cwd: &Path) -> Result<u8> {
    let settings = Settings::resolve(sources)?;
    run_compile_with(args, settings, cwd).await
}

/// Execute `trace compile` with already-resolved settings.
pub async fn run_compile_with(args: &CompileArgs, settings: Settings, cwd: &Path) -> Result<u8> {
    let norms_path = resolve(&args.norms_file, cwd);
    if !norms_path.is_file() {
        bail!("norms file not found: {}", norms_path.display());
    }
    let norms = std::fs::read_to_string(&norms_path)
        .with_context(|| format!("failed to read norms file {}", norms_path.display()))?;

    let effort = args
        .effort
        .as_deref()
        .or(settings.reasoning_effort.as_deref())
        .unwrap_or(DEFAULT_EFFORT);
    let config = CompilerConfig::from_effort_str(effort)?;

    let model = settings.ollama.model.clone();
    let client = OllamaClient::new(settings.ollama).context("failed to build Ollama client")?;
    let compiler = PolicyCompiler::new(client, config);

    println!(
        "Compiling {} with {model} (domain: {}, reasoning effort: {})...",
        norms_path.display(),
        args.domain,
        compiler.config().reasoning_effort
    );
    let pack = compiler
        .compile_norms(&norms, &args.domain)
        .await
        .with_context(|| format!("failed to compile {}", norms_path.display()))?;

    let output = match &args.output {
        Some(path) => resolve(path, cwd),
        None => cwd.join("output").join(format!("{}.json", pack.name)),
    };
    save_policy_pack(&pack, &output)?;

    println!(
        "✅ Compiled {} rules into '{}' at {}",
        pack.rules.len(),
        pack.name,
        output.display()
    );
    Ok(0)
}

fn resolve(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trace_ollama_client::OllamaConfig;

    fn settings() -> Settings {
        Settings {
            ollama: OllamaConfig::new("http://127.0.0.1:1", "gpt-oss:20b"),
            reasoning_effort: None,
        }
    }

    #[tokio::test]
    async fn missing_norms_file_fails_before_contacting_backend() {
        let dir = tempfile::tempdir().unwrap();
        let args = CompileArgs {
            norms_file: PathBuf::from("norms/absent.txt"),
            domain: "general".into(),
            effort: None,
            output: None,
        };
        let err = run_compile_with(&args, settings(), dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("norms file not found"));
        assert!(err.to_string().contains("absent.txt"));
    }

    #[tokio::test]
    async fn unknown_effort_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("norms.txt"), "No spam").unwrap();
        let args = CompileArgs {
            norms_file: PathBuf::from("norms.txt"),
            domain: "general".into(),
            effort: Some("maximum".into()),
            output: None,
        };
        let err = run_compile_with(&args, settings(), dir.path()).await.unwrap_err();
        assert!(format!("{err:#}").contains("maximum"));
    }

    #[tokio::test]
    async fn unreachable_backend_reports_missing_model() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("norms.txt"), "No spam").unwrap();
        let args = CompileArgs {
            norms_file: PathBuf::from("norms.txt"),
            domain: "general".into(),
            effort: None,
            output: None,
        };
        let err = run_compile_with(&args, settings(), dir.path()).await.unwrap_err();
        assert!(format!("{err:#}").contains("ollama pull gpt-oss:20b"));
        assert!(!dir.path().join("output").exists());
    }
}
