//! YouTube platform descriptor.

use socialcount_core::{PlatformKind, PlatformMetadata};
use socialcount_fetch::Extractor;
use std::sync::Arc;

use super::parser::{YoutubeExtractor, youtube_route};
use crate::descriptor::{CliConfig, DEFAULT_HTML_HEADERS, PlatformDescriptor, SourcePlan};

/// Default origin.
pub const BASE_URL: &str = "https://www.youtube.com";

/// Creates the YouTube descriptor.
pub fn youtube_descriptor() -> PlatformDescriptor {
    PlatformDescriptor {
        id: PlatformKind::Youtube,
        metadata: youtube_metadata(),
        source: SourcePlan {
            route: youtube_route,
            extractor: youtube_extractor,
            default_headers: DEFAULT_HTML_HEADERS,
        },
        cli: CliConfig {
            name: "youtube",
            aliases: &["yt"],
        },
    }
}

fn youtube_metadata() -> PlatformMetadata {
    PlatformMetadata {
        count_label: "subscribers".to_string(),
        ..PlatformMetadata::for_platform(PlatformKind::Youtube, BASE_URL)
    }
}

fn youtube_extractor() -> Arc<dyn Extractor> {
    Arc::new(YoutubeExtractor)
}
