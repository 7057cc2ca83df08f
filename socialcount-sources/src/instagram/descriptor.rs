//! Instagram platform descriptor.

use socialcount_core::{PlatformKind, PlatformMetadata};
use socialcount_fetch::Extractor;
use std::sync::Arc;

use super::parser::{InstagramExtractor, instagram_route};
use crate::descriptor::{CliConfig, DEFAULT_HTML_HEADERS, PlatformDescriptor, SourcePlan};

/// Default origin.
pub const BASE_URL: &str = "https://www.instagram.com";

/// Creates the Instagram descriptor.
pub fn instagram_descriptor() -> PlatformDescriptor {
    PlatformDescriptor {
        id: PlatformKind::Instagram,
        metadata: PlatformMetadata::for_platform(PlatformKind::Instagram, BASE_URL),
        source: SourcePlan {
            route: instagram_route,
            extractor: instagram_extractor,
            default_headers: DEFAULT_HTML_HEADERS,
        },
        cli: CliConfig {
            name: "instagram",
            aliases: &["ig"],
        },
    }
}

fn instagram_extractor() -> Arc<dyn Extractor> {
    Arc::new(InstagramExtractor)
}
