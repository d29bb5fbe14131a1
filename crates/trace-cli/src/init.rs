//! # Project Scaffolding
//!
//! `trace init <name> [--path <dir>]` lays out a policy project:
//!
//! ```text
//! <dir>/
//!   norms/sample_norms.txt     four content-moderation norms
//!   cases/sample_cases.json    cases exercising those norms
//!   output/                    compiled packs and reports
//! ```
//!
//! Existing directories are reused and sample files are rewritten.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

/// Sample norms written by `trace init`.
pub const SAMPLE_NORMS: &str = "# Content Moderation Norms
1. No hate speech or harassment
2. No spam or excessive promotional content
3. No explicit adult content
4. Respect user privacy and data
";

/// Arguments for `trace init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project name.
    pub name: String,

    /// Project directory. Defaults to `./<name>`.
    #[arg(long)]
    pub path: Option<PathBuf>,
}

fn sample_cases() -> serde_json::Value {
    json!({
        "cases": [
            {
                "id": "hate-001",
                "description": "Direct harassment of another user",
                "content": "You people are worthless. This is hate speech and harassment.",
                "expected_result": "fail",
                "category": "content"
            },
            {
                "id": "spam-001",
                "description": "Repeated promotional content",
                "content": "BUY NOW!!! Excessive promotional content, click this spam link for free offers!!!",
                "expected_result": "fail",
                "category": "content"
            },
            {
                "id": "privacy-001",
                "description": "Sharing someone's personal data",
                "content": "Here is her home address and phone number, go find her.",
                "expected_result": "fail",
                "category": "privacy"
            },
            {
                "id": "clean-001",
                "description": "Ordinary friendly comment",
                "content": "Thanks for the write-up, the examples were really helpful.",
                "expected_result": "pass",
                "category": "content"
            }
        ]
    })
}

/// Execute `trace init`. Relative paths resolve against `cwd`.
pub fn run_init(args: &InitArgs, cwd: &Path) -> Result<u8> {
    let root = match &args.path {
        Some(path) if path.is_absolute() => path.clone(),
        Some(path) => cwd.join(path),
        None => cwd.join(&args.name),
    };

    for dir in ["norms", "cases", "output"] {
        let dir = root.join(dir);
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }

    let norms_path = root.join("norms").join("sample_norms.txt");
    fs::write(&norms_path, SAMPLE_NORMS)
        .with_context(|| format!("failed to write {}", norms_path.display()))?;

    let cases_path = root.join("cases").join("sample_cases.json");
    let cases = serde_json::to_string_pretty(&sample_cases())?;
    fs::write(&cases_path, cases)
        .with_context(|| format!("failed to write {}", cases_path.display()))?;

    tracing::info!(name = %args.name, path = %root.display(), "initialized project");
    println!(
        "✅ TRACE_OFFBEATS project '{}' initialized at {}",
        args.name,
        root.display()
    );
    Ok(0)
}
