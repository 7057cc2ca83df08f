//! Text output formatting with colors.

use socialcount_core::{AggregateReport, CountResult, CountStatus, PlatformKind};
use socialcount_sources::{PlatformDescriptor, PlatformRegistry};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats an aggregate report.
    pub fn format_report(&self, report: &AggregateReport) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Counts for {}", self.bold(&report.handle)));
        lines.push("─".repeat(40));

        for result in report.sorted() {
            lines.push(self.format_result(result));
        }

        lines.push("─".repeat(40));

        let succeeded = report.successes().count();
        lines.push(format!(
            "{} {}  {}",
            self.bold(&format!("{:<12}", "Total")),
            self.bold(&format_count(report.total())),
            self.dim(&format!("({} of {} platforms)", succeeded, report.len()))
        ));

        if report.cancelled {
            lines.push(self.yellow("Stopped early; unfinished platforms are not listed."));
        }

        lines.join("\n")
    }

    /// Formats a single platform's line.
    fn format_result(&self, result: &CountResult) -> String {
        let name = format!("{:<12}", result.source);

        match result.status {
            CountStatus::Ok => {
                let label = count_label(&result.source);
                format!(
                    "{} {} {}",
                    name,
                    self.green(&format_count(result.count)),
                    self.dim(&label)
                )
            }
            CountStatus::Failed => format!(
                "{} {} {}",
                name,
                self.red("failed"),
                self.dim(result.error.as_deref().unwrap_or("unknown error"))
            ),
            CountStatus::Unknown => format!("{} {}", name, self.yellow("unknown")),
        }
    }

    /// Formats platform list header.
    pub fn format_platforms_header(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.bold(&format!("{:<12}", "Platform")),
            self.bold(&format!("{:<10}", "CLI")),
            self.bold(&format!("{:<16}", "Aliases")),
            self.bold(&format!("{:<8}", "Enabled")),
            self.bold("Origin")
        )
    }

    /// Formats a single platform line.
    pub fn format_platform_line(&self, desc: &PlatformDescriptor, enabled: bool) -> String {
        // Pad before painting; escape codes would count toward the width.
        let enabled_str = if enabled {
            self.green(&format!("{:<8}", "✓"))
        } else {
            self.dim(&format!("{:<8}", "−"))
        };

        let aliases = if desc.cli.aliases.is_empty() {
            "−".to_string()
        } else {
            desc.cli.aliases.join(", ")
        };

        format!(
            "{:<12} {:<10} {:<16} {} {}",
            desc.display_name(),
            desc.cli_name(),
            aliases,
            enabled_str,
            self.cyan(desc.base_url())
        )
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

/// What a platform's count measures, "followers" when unknown.
fn count_label(source: &str) -> String {
    PlatformKind::from_display_name(source)
        .and_then(PlatformRegistry::get)
        .map_or_else(|| "followers".to_string(), |d| d.metadata.count_label.clone())
}

/// Formats a count with thousands separators.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}
