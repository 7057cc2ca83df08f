//! Platform descriptor system.
//!
//! A descriptor contains all the static configuration for a platform:
//! - Metadata (display name, count label, origin)
//! - Source plan (request target, extractor, default headers)
//! - CLI configuration

use socialcount_core::{PlatformKind, PlatformMetadata};
use socialcount_fetch::{
    CounterClient, Extractor, FetchError, HttpClient, RouteFn, SourceClient, SourceSettings,
};
use std::sync::Arc;

/// Headers every HTML source sends unless overridden.
pub const DEFAULT_HTML_HEADERS: &[(&str, &str)] = &[
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
    ),
    ("Accept-Language", "en-US,en;q=0.9"),
];

// ============================================================================
// Platform Descriptor
// ============================================================================

/// Complete descriptor for a platform.
pub struct PlatformDescriptor {
    /// Platform identifier.
    pub id: PlatformKind,
    /// Display metadata.
    pub metadata: PlatformMetadata,
    /// How to request and read the count.
    pub source: SourcePlan,
    /// CLI configuration.
    pub cli: CliConfig,
}

impl PlatformDescriptor {
    /// Returns the display name.
    pub fn display_name(&self) -> &str {
        &self.metadata.display_name
    }

    /// Returns the CLI name.
    pub fn cli_name(&self) -> &str {
        self.cli.name
    }

    /// Returns the default origin.
    pub fn base_url(&self) -> &str {
        &self.metadata.base_url
    }

    /// Returns the request target for `handle`.
    pub fn target(&self, handle: &str) -> String {
        (self.source.route)(socialcount_fetch::normalize_handle(handle))
    }

    /// Settings with this platform's origin and default headers.
    pub fn default_settings(&self) -> SourceSettings {
        self.source
            .default_headers
            .iter()
            .fold(SourceSettings::new(self.base_url()), |settings, (name, value)| {
                settings.with_header(*name, *value)
            })
    }

    /// Builds a source client for this platform.
    pub fn build_client(
        &self,
        settings: &SourceSettings,
    ) -> Result<Arc<dyn SourceClient>, FetchError> {
        let http = HttpClient::new(
            &settings.base_url,
            settings.request_timeout,
            &settings.headers,
        )?;

        Ok(Arc::new(CounterClient::new(
            self.display_name(),
            Arc::new(http),
            settings.retry.clone(),
            (self.source.extractor)(),
            self.source.route,
        )))
    }
}

impl std::fmt::Debug for PlatformDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformDescriptor")
            .field("id", &self.id)
            .field("base_url", &self.metadata.base_url)
            .field("cli", &self.cli)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Source Plan
// ============================================================================

/// How a platform's count is requested and read.
pub struct SourcePlan {
    /// Builds the request target from a normalized handle.
    pub route: RouteFn,
    /// Creates the extractor for this platform's content.
    pub extractor: fn() -> Arc<dyn Extractor>,
    /// Headers sent with every request.
    pub default_headers: &'static [(&'static str, &'static str)],
}

// ============================================================================
// CLI Config
// ============================================================================

/// Configuration for CLI selection.
#[derive(Debug, Clone, Copy)]
pub struct CliConfig {
    /// Primary CLI name.
    pub name: &'static str,
    /// Alternative names.
    pub aliases: &'static [&'static str],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x::x_descriptor;

    #[test]
    fn test_descriptor_accessors() {
        let desc = x_descriptor();

        assert_eq!(desc.display_name(), "X");
        assert_eq!(desc.cli_name(), "x");
        assert_eq!(desc.base_url(), "https://twstalker.com");
        assert_eq!(desc.target("@someone"), "/someone");
        assert!(desc.metadata.default_enabled);
    }

    #[test]
    fn test_default_settings_carry_headers() {
        let settings = x_descriptor().default_settings();

        assert_eq!(settings.base_url, "https://twstalker.com");
        assert_eq!(settings.headers["Accept-Language"], "en-US,en;q=0.9");
        assert!(settings.headers.contains_key("Accept"));
    }

    #[test]
    fn test_build_client_rejects_bad_origin() {
        let desc = x_descriptor();
        let settings = SourceSettings::new("not a url");
        assert!(matches!(
            desc.build_client(&settings),
            Err(FetchError::Config(_))
        ));
    }

    #[test]
    fn test_build_client_uses_override() {
        let desc = x_descriptor();
        let client = desc
            .build_client(&desc.default_settings().with_header("X-Test", "1"))
            .unwrap();
        assert_eq!(client.platform(), "X");
    }
}
