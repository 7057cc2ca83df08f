//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use socialcount_core::{AggregateReport, CountResult, CountStatus};
use socialcount_sources::PlatformDescriptor;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a whole query.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOutput {
    pub handle: String,
    pub total: u64,
    pub succeeded: usize,
    pub cancelled: bool,
    #[serde(serialize_with = "serialize_datetime")]
    pub generated_at: DateTime<Utc>,
    pub results: Vec<ResultOutput>,
}

/// JSON output for a single platform.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultOutput {
    pub platform: String,
    pub status: CountStatus,
    /// `null` unless the count was fetched.
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(serialize_with = "serialize_datetime")]
    pub fetched_at: DateTime<Utc>,
}

/// Platform info output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformInfoOutput {
    pub id: String,
    pub display_name: String,
    pub cli_name: String,
    pub aliases: Vec<String>,
    pub count_label: String,
    pub base_url: String,
    pub enabled: bool,
}

fn serialize_datetime<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339())
}

impl From<&CountResult> for ResultOutput {
    fn from(result: &CountResult) -> Self {
        Self {
            platform: result.source.clone(),
            status: result.status,
            count: result.value(),
            error: result.error.clone(),
            fetched_at: result.fetched_at,
        }
    }
}

impl PlatformInfoOutput {
    /// Describes a platform and whether it is queried by default.
    pub fn new(desc: &PlatformDescriptor, enabled: bool) -> Self {
        Self {
            id: format!("{:?}", desc.id).to_lowercase(),
            display_name: desc.display_name().to_string(),
            cli_name: desc.cli_name().to_string(),
            aliases: desc.cli.aliases.iter().map(ToString::to_string).collect(),
            count_label: desc.metadata.count_label.clone(),
            base_url: desc.base_url().to_string(),
            enabled,
        }
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats an aggregate report, results sorted by platform.
    pub fn format_report(&self, report: &AggregateReport) -> Result<String> {
        let output = ReportOutput {
            handle: report.handle.clone(),
            total: report.total(),
            succeeded: report.successes().count(),
            cancelled: report.cancelled,
            generated_at: report.generated_at,
            results: report.sorted().into_iter().map(ResultOutput::from).collect(),
        };
        self.format(&output)
    }

    /// Formats the platform list.
    pub fn format_platforms(&self, platforms: &[PlatformInfoOutput]) -> Result<String> {
        self.format(&platforms)
    }
}
