//! Platform-related types.
//!
//! - [`PlatformKind`] - Enum of supported platforms
//! - [`PlatformMetadata`] - Display info and request defaults for a platform

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Platform Kind
// ============================================================================

/// Supported social platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    /// YouTube channel subscribers.
    Youtube,
    /// Instagram followers.
    Instagram,
    /// X (formerly Twitter) followers.
    X,
    /// TikTok followers.
    TikTok,
    /// Facebook page followers.
    Facebook,
    /// LinkedIn profile followers.
    LinkedIn,
}

impl PlatformKind {
    /// Returns the display name for this platform.
    ///
    /// This is also the stable identity used to label results.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Youtube => "Youtube",
            Self::Instagram => "Instagram",
            Self::X => "X",
            Self::TikTok => "TikTok",
            Self::Facebook => "Facebook",
            Self::LinkedIn => "LinkedIn",
        }
    }

    /// Returns all available platform kinds.
    pub fn all() -> &'static [PlatformKind] {
        &[
            Self::Youtube,
            Self::Instagram,
            Self::X,
            Self::TikTok,
            Self::Facebook,
            Self::LinkedIn,
        ]
    }

    /// Returns the CLI name for this platform (lowercase, no spaces).
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::Youtube => "youtube",
            Self::Instagram => "instagram",
            Self::X => "x",
            Self::TikTok => "tiktok",
            Self::Facebook => "facebook",
            Self::LinkedIn => "linkedin",
        }
    }

    /// Looks up a platform by its display name, case-insensitively.
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.display_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Platform Metadata
// ============================================================================

/// Metadata describing a platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformMetadata {
    /// The platform this metadata describes.
    pub id: PlatformKind,
    /// Display name.
    pub display_name: String,
    /// CLI name.
    pub cli_name: String,
    /// What the count measures (e.g., "subscribers", "followers").
    pub count_label: String,
    /// Origin the request targets are resolved against.
    pub base_url: String,
    /// Whether the platform is queried when no selection is given.
    pub default_enabled: bool,
}

impl PlatformMetadata {
    /// Creates default metadata for a platform kind.
    pub fn for_platform(kind: PlatformKind, base_url: impl Into<String>) -> Self {
        Self {
            id: kind,
            display_name: kind.display_name().to_string(),
            cli_name: kind.cli_name().to_string(),
            count_label: "followers".to_string(),
            base_url: base_url.into(),
            default_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_names() {
        assert_eq!(PlatformKind::Youtube.display_name(), "Youtube");
        assert_eq!(PlatformKind::LinkedIn.cli_name(), "linkedin");
        assert_eq!(PlatformKind::X.to_string(), "X");
    }

    #[test]
    fn test_from_display_name() {
        assert_eq!(
            PlatformKind::from_display_name("tiktok"),
            Some(PlatformKind::TikTok)
        );
        assert_eq!(PlatformKind::from_display_name("myspace"), None);
    }

    #[test]
    fn test_all_cli_names_unique() {
        let mut names: Vec<_> = PlatformKind::all().iter().map(|p| p.cli_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PlatformKind::all().len());
    }
}
