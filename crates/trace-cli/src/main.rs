//! # trace CLI entry point
//!
//! Parses arguments, installs logging, and dispatches to the subcommand
//! handlers in `trace_cli`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use trace_cli::compile::{run_compile, CompileArgs};
use trace_cli::config::ConfigSources;
use trace_cli::init::{run_init, InitArgs};
use trace_cli::policy_test::{run_policy_test, TestArgs};

/// TRACE_OFFBEATS: Transparent Rules & Audit Compliance Engine
///
/// Compiles free-text organizational norms into structured policy packs
/// with a local gpt-oss model, and tests text samples against them.
#[derive(Parser, Debug)]
#[command(name = "trace", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    /// YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ollama service URL.
    #[arg(long, global = true)]
    ollama_url: Option<String>,

    /// Model name as known to the service.
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize a new policy project.
    Init(InitArgs),

    /// Compile a norms file into a policy pack.
    Compile(CompileArgs),

    /// Run test cases against a policy pack.
    Test(TestArgs),

    /// Show the version.
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_tracing(verbose: u8, format: LogFormat) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_format);

    tracing::debug!("trace CLI v{} starting", trace_cli::VERSION);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let sources = ConfigSources {
        config_file: cli.config,
        ollama_url: cli.ollama_url,
        model: cli.model,
    };

    let result = match cli.command {
        Commands::Init(args) => run_init(&args, &cwd),
        Commands::Compile(args) => run_compile(&args, &sources, &cwd).await,
        Commands::Test(args) => run_policy_test(&args, &cwd),
        Commands::Version => trace_cli::run_version(),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("❌ {e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_init_with_path() {
        let cli = Cli::try_parse_from(["trace", "init", "demo", "--path", "/tmp/demo"]).unwrap();
        match cli.command {
            Commands::Init(args) => {
                assert_eq!(args.name, "demo");
                assert_eq!(args.path, Some(PathBuf::from("/tmp/demo")));
            }
            other => panic!("expected init, got {other:?}"),
        }
    }

    #[test]
    fn cli_parse_compile_defaults() {
        let cli = Cli::try_parse_from(["trace", "compile", "norms.txt"]).unwrap();
        match cli.command {
            Commands::Compile(args) => {
                assert_eq!(args.norms_file, PathBuf::from("norms.txt"));
                assert_eq!(args.domain, "general");
                assert!(args.effort.is_none());
                assert!(args.output.is_none());
            }
            other => panic!("expected compile, got {other:?}"),
        }
    }

    #[test]
    fn cli_parse_compile_all_flags() {
        let cli = Cli::try_parse_from([
            "trace",
            "compile",
            "norms.txt",
            "--domain",
            "healthcare",
            "--effort",
            "low",
            "--output",
            "out/pack.json",
            "--model",
            "gpt-oss:120b",
            "--ollama-url",
            "http://gpu:11434",
        ])
        .unwrap();
        assert_eq!(cli.model.as_deref(), Some("gpt-oss:120b"));
        assert_eq!(cli.ollama_url.as_deref(), Some("http://gpu:11434"));
        if let Commands::Compile(args) = cli.command {
            assert_eq!(args.domain, "healthcare");
            assert_eq!(args.effort.as_deref(), Some("low"));
            assert_eq!(args.output, Some(PathBuf::from("out/pack.json")));
        } else {
            panic!("expected compile");
        }
    }

    #[test]
    fn cli_parse_test_command() {
        let cli = Cli::try_parse_from(["trace", "test", "pack.json", "cases.json", "--output", "r.json"])
            .unwrap();
        if let Commands::Test(args) = cli.command {
            assert_eq!(args.policy_file, PathBuf::from("pack.json"));
            assert_eq!(args.cases_file, PathBuf::from("cases.json"));
            assert_eq!(args.output, Some(PathBuf::from("r.json")));
        } else {
            panic!("expected test");
        }
    }

    #[test]
    fn cli_parse_global_flags() {
        let cli = Cli::try_parse_from(["trace", "-vv", "--log-format", "json", "version"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["trace"]).is_err());
        assert!(Cli::try_parse_from(["trace", "test", "pack.json"]).is_err());
    }
}
