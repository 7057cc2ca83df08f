//! Platforms command - list available platforms.

use anyhow::Result;
use socialcount_sources::PlatformRegistry;
use tracing::info;

use crate::config::Config;
use crate::output::{JsonFormatter, PlatformInfoOutput, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the platforms command.
pub fn run(cli: &Cli, config: &Config) -> Result<ExitCode> {
    info!("Listing platforms");

    let platforms = PlatformRegistry::all();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);

            println!("{}", formatter.format_platforms_header());
            println!("{}", "─".repeat(70));

            for desc in platforms {
                println!(
                    "{}",
                    formatter.format_platform_line(desc, config.is_platform_enabled(desc.id))
                );
            }

            println!();
            println!(
                "Total: {} platforms ({} enabled)",
                platforms.len(),
                config.enabled_platforms().len()
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let infos: Vec<PlatformInfoOutput> = platforms
                .iter()
                .map(|desc| PlatformInfoOutput::new(desc, config.is_platform_enabled(desc.id)))
                .collect();
            println!("{}", formatter.format_platforms(&infos)?);
        }
    }

    Ok(ExitCode::Success)
}
