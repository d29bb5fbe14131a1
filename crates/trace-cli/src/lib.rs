//! # trace-cli — TRACE_OFFBEATS Command Line
//!
//! Provides the `trace` binary.
//!
//! ## Subcommands
//!
//! - `trace init <name>`: scaffold a policy project.
//! - `trace compile <norms_file>`: compile norms into a policy pack.
//! - `trace test <policy_file> <cases_file>`: run cases and report.
//! - `trace version`: print the version.
//!
//! Every handler returns `anyhow::Result<u8>`; the binary maps `Ok(code)`
//! to the exit code and any error to a `❌` line and exit code 1.

pub mod compile;
pub mod config;
pub mod init;

/// Product name printed by `trace version`.
pub const PRODUCT_NAME: &str = "TRACE_OFFBEATS";

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The `trace version` line.
pub fn version_line() -> String {
    format!("{PRODUCT_NAME} v{VERSION}")
}

/// Execute `trace version`.
pub fn run_version() -> anyhow::Result<u8> {
    println!("{}", version_line());
    Ok(0)
}
