//! TikTok platform descriptor.

use socialcount_core::{PlatformKind, PlatformMetadata};
use socialcount_fetch::Extractor;
use std::sync::Arc;

use super::parser::{TikTokExtractor, tiktok_route};
use crate::descriptor::{CliConfig, DEFAULT_HTML_HEADERS, PlatformDescriptor, SourcePlan};

/// Default origin.
pub const BASE_URL: &str = "https://www.tiktok.com";

/// Creates the TikTok descriptor.
pub fn tiktok_descriptor() -> PlatformDescriptor {
    PlatformDescriptor {
        id: PlatformKind::TikTok,
        metadata: PlatformMetadata::for_platform(PlatformKind::TikTok, BASE_URL),
        source: SourcePlan {
            route: tiktok_route,
            extractor: tiktok_extractor,
            default_headers: DEFAULT_HTML_HEADERS,
        },
        cli: CliConfig {
            name: "tiktok",
            aliases: &[],
        },
    }
}

fn tiktok_extractor() -> Arc<dyn Extractor> {
    Arc::new(TikTokExtractor)
}
