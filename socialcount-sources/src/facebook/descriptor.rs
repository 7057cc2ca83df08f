//! Facebook platform descriptor.

use socialcount_core::{PlatformKind, PlatformMetadata};
use socialcount_fetch::Extractor;
use std::sync::Arc;

use super::parser::{FacebookExtractor, facebook_route};
use crate::descriptor::{CliConfig, DEFAULT_HTML_HEADERS, PlatformDescriptor, SourcePlan};

/// Default origin.
pub const BASE_URL: &str = "https://www.facebook.com";

/// Creates the Facebook descriptor.
pub fn facebook_descriptor() -> PlatformDescriptor {
    PlatformDescriptor {
        id: PlatformKind::Facebook,
        metadata: PlatformMetadata::for_platform(PlatformKind::Facebook, BASE_URL),
        source: SourcePlan {
            route: facebook_route,
            extractor: facebook_extractor,
            default_headers: DEFAULT_HTML_HEADERS,
        },
        cli: CliConfig {
            name: "facebook",
            aliases: &["fb"],
        },
    }
}

fn facebook_extractor() -> Arc<dyn Extractor> {
    Arc::new(FacebookExtractor)
}
