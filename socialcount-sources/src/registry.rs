//! Platform registry for managing all platform descriptors.
//!
//! The registry provides static access to all platform configurations
//! and builds aggregators from per-platform settings.

use socialcount_core::{CoreError, PlatformKind};
use socialcount_fetch::{Aggregator, FetchError, SourceClient, SourceSettings};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::debug;

use crate::descriptor::PlatformDescriptor;
use crate::facebook::facebook_descriptor;
use crate::instagram::instagram_descriptor;
use crate::linkedin::linkedin_descriptor;
use crate::tiktok::tiktok_descriptor;
use crate::x::x_descriptor;
use crate::youtube::youtube_descriptor;

// ============================================================================
// Static Registry
// ============================================================================

/// Static storage for all platform descriptors.
static DESCRIPTORS: OnceLock<Vec<PlatformDescriptor>> = OnceLock::new();

/// Static storage for CLI name to platform kind mapping.
static CLI_NAME_MAP: OnceLock<HashMap<String, PlatformKind>> = OnceLock::new();

fn init_descriptors() -> Vec<PlatformDescriptor> {
    vec![
        youtube_descriptor(),
        instagram_descriptor(),
        x_descriptor(),
        tiktok_descriptor(),
        facebook_descriptor(),
        linkedin_descriptor(),
    ]
}

/// Builds the CLI name to platform kind mapping.
fn build_cli_name_map(descriptors: &[PlatformDescriptor]) -> HashMap<String, PlatformKind> {
    let mut map = HashMap::new();

    for desc in descriptors {
        map.insert(desc.cli.name.to_string(), desc.id);

        for alias in desc.cli.aliases {
            map.insert((*alias).to_string(), desc.id);
        }
    }

    map
}

// ============================================================================
// Platform Registry
// ============================================================================

/// Global registry of all platform descriptors.
///
/// Initialized lazily on first access and never mutated afterwards.
pub struct PlatformRegistry;

impl PlatformRegistry {
    /// Returns all platform descriptors.
    pub fn all() -> &'static [PlatformDescriptor] {
        DESCRIPTORS.get_or_init(init_descriptors)
    }

    /// Gets a platform descriptor by kind.
    pub fn get(id: PlatformKind) -> Option<&'static PlatformDescriptor> {
        Self::all().iter().find(|d| d.id == id)
    }

    /// Returns the CLI name to platform kind mapping.
    pub fn cli_name_map() -> &'static HashMap<String, PlatformKind> {
        CLI_NAME_MAP.get_or_init(|| build_cli_name_map(Self::all()))
    }

    /// Looks up a platform by CLI name or alias, case-insensitively.
    pub fn get_by_cli_name(name: &str) -> Option<&'static PlatformDescriptor> {
        let kind = Self::cli_name_map().get(&name.trim().to_ascii_lowercase())?;
        Self::get(*kind)
    }

    /// Resolves a comma-separated platform list, or `all`.
    pub fn resolve(selection: &str) -> Result<Vec<PlatformKind>, CoreError> {
        if selection.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::kinds());
        }

        let mut kinds = Vec::new();
        for name in selection.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let desc = Self::get_by_cli_name(name)
                .ok_or_else(|| CoreError::PlatformNotFound(name.to_string()))?;
            if !kinds.contains(&desc.id) {
                kinds.push(desc.id);
            }
        }

        if kinds.is_empty() {
            return Err(CoreError::InvalidConfig("no platforms selected".to_string()));
        }
        Ok(kinds)
    }

    /// Returns all enabled-by-default platforms.
    pub fn default_enabled() -> Vec<&'static PlatformDescriptor> {
        Self::all()
            .iter()
            .filter(|d| d.metadata.default_enabled)
            .collect()
    }

    /// Returns the number of registered platforms.
    pub fn count() -> usize {
        Self::all().len()
    }

    /// Returns all platform kinds.
    pub fn kinds() -> Vec<PlatformKind> {
        Self::all().iter().map(|d| d.id).collect()
    }

    /// Builds an aggregator over the given platforms.
    ///
    /// `settings` supplies per-platform overrides; platforms without an
    /// entry use [`PlatformDescriptor::default_settings`].
    pub fn build_aggregator(
        kinds: &[PlatformKind],
        settings: &HashMap<PlatformKind, SourceSettings>,
    ) -> Result<Aggregator, FetchError> {
        let mut clients: Vec<Arc<dyn SourceClient>> = Vec::with_capacity(kinds.len());

        for kind in kinds {
            let desc = Self::get(*kind)
                .ok_or_else(|| FetchError::Config(format!("unknown platform: {kind}")))?;
            let client = match settings.get(kind) {
                Some(s) => desc.build_client(s)?,
                None => desc.build_client(&desc.default_settings())?,
            };
            debug!(platform = %kind, "Registered source");
            clients.push(client);
        }

        Ok(Aggregator::new(clients))
    }
}

// ============================================================================
// Tests
// ============================================================================
