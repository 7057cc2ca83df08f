// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! SocialCount CLI - follower counts across social platforms.
//!
//! # Examples
//!
//! ```bash
//! # Count followers on every enabled platform
//! socialcount someone
//!
//! # Only some platforms
//! socialcount --platform yt,twitter someone
//!
//! # Give up after 15 seconds, keeping whatever finished
//! socialcount --deadline 15 someone
//!
//! # JSON output
//! socialcount --format json --pretty someone
//!
//! # List platforms
//! socialcount platforms
//! ```

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{count, platforms};
use config::Config;

// ============================================================================
// CLI Definition
// ============================================================================

/// SocialCount CLI - follower counts across social platforms.
#[derive(Parser)]
#[command(name = "socialcount")]
#[command(about = "Follower and subscriber counts aggregated across social platforms")]
#[command(long_about = r#"
SocialCount fetches the public follower count of a handle from several
platforms at once and reports each count alongside the total.

Supported platforms:
  • YouTube (youtube, yt)
  • Instagram (instagram, ig)
  • X (x, twitter)
  • TikTok (tiktok)
  • Facebook (facebook, fb)
  • LinkedIn (linkedin)

Examples:
  socialcount someone                    # All enabled platforms
  socialcount -p yt,ig someone           # Selected platforms
  socialcount --deadline 15 someone      # Stop waiting after 15s
  socialcount --format json someone      # JSON output
  socialcount platforms                  # List platforms
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, counts the given handle.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Handle to count (shorthand for `count <HANDLE>`).
    pub handle: Option<String>,

    /// Path to the configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Platforms to query (comma-separated, or "all").
    #[arg(long, short, global = true)]
    pub platform: Option<String>,

    /// Stop waiting after this many seconds and report what finished.
    #[arg(long, global = true)]
    pub deadline: Option<u64>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch follower counts for a handle (default).
    #[command(visible_alias = "c")]
    Count(count::CountArgs),

    /// List available platforms.
    #[command(visible_alias = "p")]
    Platforms,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// No platform produced a count.
    NoCounts = 2,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool, level: &str) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("socialcount=debug,info")
    } else {
        EnvFilter::try_new(format!("socialcount={level}"))
            .unwrap_or_else(|_| EnvFilter::new("socialcount=warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let code = match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            ExitCode::Error
        }
    };

    std::process::exit(code as i32);
}

async fn run(cli: &Cli) -> Result<ExitCode> {
    // Logging needs the configured level, so a config error is reported
    // before any subscriber exists.
    let config = Config::load(cli.config.as_deref())?;
    setup_logging(cli.verbose, cli.quiet, &config.general.log_level);

    match &cli.command {
        Some(Commands::Count(args)) => count::run(&args.handle, cli, &config).await,
        Some(Commands::Platforms) => platforms::run(cli, &config),
        None => match &cli.handle {
            Some(handle) => count::run(handle, cli, &config).await,
            None => anyhow::bail!("no handle given; try `socialcount <HANDLE>`"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bare_handle() {
        let cli = Cli::try_parse_from(["socialcount", "@someone"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.handle.as_deref(), Some("@someone"));
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_count_subcommand_with_globals() {
        let cli = Cli::try_parse_from([
            "socialcount",
            "count",
            "someone",
            "--platform",
            "yt,ig",
            "--deadline",
            "5",
            "-f",
            "json",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Count(args)) => assert_eq!(args.handle, "someone"),
            _ => panic!("expected count"),
        }
        assert_eq!(cli.platform.as_deref(), Some("yt,ig"));
        assert_eq!(cli.deadline, Some(5));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_platforms_subcommand() {
        let cli = Cli::try_parse_from(["socialcount", "platforms", "--no-color"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Platforms)));
        assert!(cli.no_color);
    }
}
