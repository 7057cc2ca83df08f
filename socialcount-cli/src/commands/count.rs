//! Count command - fetch follower counts for a handle.

use anyhow::{Result, bail};
use clap::Args;
use socialcount_core::{AggregateReport, PlatformKind};
use socialcount_fetch::{Aggregator, CancelSignal, normalize_handle};
use socialcount_sources::PlatformRegistry;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the count command.
#[derive(Args, Debug)]
pub struct CountArgs {
    /// Handle to count, with or without a leading '@'.
    pub handle: String,
}

/// Runs the count command.
pub async fn run(handle: &str, cli: &Cli, config: &Config) -> Result<ExitCode> {
    if normalize_handle(handle).is_empty() {
        bail!("handle must not be empty");
    }

    let kinds = select_platforms(cli.platform.as_deref(), config)?;
    let aggregator = build_aggregator(&kinds, config)?;
    info!(handle = %handle, platforms = aggregator.len(), "Counting followers");

    let cancel = CancelSignal::new();
    if let Some(secs) = cli.deadline {
        cancel.cancel_after(Duration::from_secs(secs));
    }
    watch_ctrl_c(cancel.clone());

    let report = aggregator.query(handle, &cancel).await;
    if report.cancelled {
        warn!(finished = report.len(), "Query stopped before every platform finished");
    }

    print_report(&report, cli)?;
    Ok(exit_code(&report))
}

/// Platforms named on the command line, else the enabled ones.
pub fn select_platforms(selection: Option<&str>, config: &Config) -> Result<Vec<PlatformKind>> {
    let kinds = match selection {
        Some(selection) => PlatformRegistry::resolve(selection)?,
        None => config.enabled_platforms(),
    };

    if kinds.is_empty() {
        bail!("no platforms enabled");
    }
    debug!(?kinds, "Selected platforms");
    Ok(kinds)
}

/// Builds the aggregator for `kinds` from the configuration.
pub fn build_aggregator(kinds: &[PlatformKind], config: &Config) -> Result<Aggregator> {
    let settings = config.settings_map(kinds);
    Ok(PlatformRegistry::build_aggregator(kinds, &settings)?)
}

/// Cancels the query on the first Ctrl-C.
fn watch_ctrl_c(cancel: CancelSignal) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Interrupted");
            cancel.cancel();
        }
    });
}

fn print_report(report: &AggregateReport, cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_report(report));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_report(report)?);
        }
    }
    Ok(())
}

/// [`ExitCode::NoCounts`] when no platform produced a count.
pub fn exit_code(report: &AggregateReport) -> ExitCode {
    if report.successes().next().is_some() {
        ExitCode::Success
    } else {
        ExitCode::NoCounts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlatformConfig;
    use socialcount_core::CountResult;

    #[test]
    fn test_select_from_flag() {
        let kinds = select_platforms(Some("ig,twitter"), &Config::default()).unwrap();
        assert_eq!(kinds, vec![PlatformKind::Instagram, PlatformKind::X]);
    }

    #[test]
    fn test_select_unknown_platform() {
        let err = select_platforms(Some("myspace"), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("myspace"), "{err}");
    }

    #[test]
    fn test_select_from_config() {
        let mut config = Config::default();
        for name in ["youtube", "instagram", "x", "tiktok", "facebook"] {
            config.platforms.insert(
                name.to_string(),
                PlatformConfig {
                    enabled: false,
                    ..PlatformConfig::default()
                },
            );
        }

        assert_eq!(
            select_platforms(None, &config).unwrap(),
            vec![PlatformKind::LinkedIn]
        );

        config.platforms.insert(
            "linkedin".to_string(),
            PlatformConfig {
                enabled: false,
                ..PlatformConfig::default()
            },
        );
        assert!(select_platforms(None, &config).is_err());
        // An explicit selection still wins over the config.
        assert_eq!(select_platforms(Some("fb"), &config).unwrap().len(), 1);
    }

    #[test]
    fn test_build_aggregator() {
        let aggregator =
            build_aggregator(&[PlatformKind::Youtube, PlatformKind::TikTok], &Config::default())
                .unwrap();
        assert_eq!(aggregator.platforms(), vec!["Youtube", "TikTok"]);
    }

    #[test]
    fn test_exit_code() {
        let failed = AggregateReport::new(
            "someone",
            vec![CountResult::failed("X", "someone", "HTTP 404")],
            false,
        );
        assert_eq!(exit_code(&failed), ExitCode::NoCounts);

        let empty = AggregateReport::new("someone", vec![], true);
        assert_eq!(exit_code(&empty), ExitCode::NoCounts);

        let partial = AggregateReport::new(
            "someone",
            vec![
                CountResult::failed("X", "someone", "HTTP 404"),
                CountResult::ok("Instagram", "someone", 0),
            ],
            false,
        );
        assert_eq!(exit_code(&partial), ExitCode::Success);
    }
}
