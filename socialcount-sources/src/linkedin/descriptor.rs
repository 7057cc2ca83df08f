//! LinkedIn platform descriptor.

use socialcount_core::{PlatformKind, PlatformMetadata};
use socialcount_fetch::Extractor;
use std::sync::Arc;

use super::parser::{LinkedInExtractor, linkedin_route};
use crate::descriptor::{CliConfig, DEFAULT_HTML_HEADERS, PlatformDescriptor, SourcePlan};

/// Default origin (search engine serving the profile snippet).
pub const BASE_URL: &str = "https://www.google.com/";

/// Creates the LinkedIn descriptor.
pub fn linkedin_descriptor() -> PlatformDescriptor {
    PlatformDescriptor {
        id: PlatformKind::LinkedIn,
        metadata: PlatformMetadata::for_platform(PlatformKind::LinkedIn, BASE_URL),
        source: SourcePlan {
            route: linkedin_route,
            extractor: linkedin_extractor,
            default_headers: DEFAULT_HTML_HEADERS,
        },
        cli: CliConfig {
            name: "linkedin",
            aliases: &[],
        },
    }
}

fn linkedin_extractor() -> Arc<dyn Extractor> {
    Arc::new(LinkedInExtractor)
}
