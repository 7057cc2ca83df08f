//! Configuration file handling.
//!
//! The file is JSON at `<config_dir>/socialcount/config.json`. A missing
//! file means defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use socialcount_core::PlatformKind;
use socialcount_fetch::{RetryPolicy, SourceSettings};
use socialcount_sources::{PlatformDescriptor, PlatformRegistry};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Platform-specific configuration, keyed by CLI name or alias.
    #[serde(default)]
    pub platforms: HashMap<String, PlatformConfig>,
}

/// Settings shared by every platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Overall budget for one platform's fetch, retries included.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Timeout for a single request.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Total attempts per fetch.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the first retry.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    /// Log level when not running with `--verbose`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Platform-specific configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Whether this platform is queried by default.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Origin override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Extra headers, overriding the platform defaults.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            request_timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            log_level: default_log_level(),
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: None,
            headers: HashMap::new(),
        }
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("socialcount")
            .join("config.json")
    }

    /// Loads configuration from `path`, or from the default path.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&Self::default_path()),
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;

        for key in config.platforms.keys() {
            if PlatformRegistry::get_by_cli_name(key).is_none() {
                warn!(platform = %key, "Ignoring config for unknown platform");
            }
        }

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Returns the configuration entry for a platform, if any.
    pub fn platform(&self, kind: PlatformKind) -> Option<&PlatformConfig> {
        self.platforms.iter().find_map(|(key, cfg)| {
            PlatformRegistry::get_by_cli_name(key)
                .filter(|desc| desc.id == kind)
                .map(|_| cfg)
        })
    }

    /// Returns whether a platform is enabled.
    pub fn is_platform_enabled(&self, kind: PlatformKind) -> bool {
        self.platform(kind).is_none_or(|p| p.enabled)
    }

    /// Platforms queried when no selection is given.
    pub fn enabled_platforms(&self) -> Vec<PlatformKind> {
        PlatformRegistry::default_enabled()
            .into_iter()
            .map(|desc| desc.id)
            .filter(|kind| self.is_platform_enabled(*kind))
            .collect()
    }

    /// Retry policy built from the general settings.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.general.max_attempts)
            .with_base_delay(Duration::from_millis(self.general.base_delay_ms))
            .with_overall_timeout(Duration::from_secs(self.general.timeout_secs))
    }

    /// Source settings for one platform, defaults merged with overrides.
    pub fn source_settings(&self, desc: &PlatformDescriptor) -> SourceSettings {
        let mut settings = desc
            .default_settings()
            .with_request_timeout(Duration::from_secs(self.general.request_timeout_secs))
            .with_retry(self.retry_policy());

        if let Some(platform) = self.platform(desc.id) {
            if let Some(base_url) = &platform.base_url {
                settings.base_url.clone_from(base_url);
            }
            settings = settings.with_headers(platform.headers.clone());
        }

        settings
    }

    /// Source settings for each of the given platforms.
    pub fn settings_map(&self, kinds: &[PlatformKind]) -> HashMap<PlatformKind, SourceSettings> {
        kinds
            .iter()
            .filter_map(|kind| PlatformRegistry::get(*kind))
            .map(|desc| (desc.id, self.source_settings(desc)))
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
