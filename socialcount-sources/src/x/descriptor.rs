//! X platform descriptor.

use socialcount_core::{PlatformKind, PlatformMetadata};
use socialcount_fetch::Extractor;
use std::sync::Arc;

use super::parser::{XExtractor, x_route};
use crate::descriptor::{CliConfig, DEFAULT_HTML_HEADERS, PlatformDescriptor, SourcePlan};

/// Default origin.
pub const BASE_URL: &str = "https://twstalker.com";

/// Creates the X descriptor.
pub fn x_descriptor() -> PlatformDescriptor {
    PlatformDescriptor {
        id: PlatformKind::X,
        metadata: PlatformMetadata::for_platform(PlatformKind::X, BASE_URL),
        source: SourcePlan {
            route: x_route,
            extractor: x_extractor,
            default_headers: DEFAULT_HTML_HEADERS,
        },
        cli: CliConfig {
            name: "x",
            aliases: &["twitter"],
        },
    }
}

fn x_extractor() -> Arc<dyn Extractor> {
    Arc::new(XExtractor)
}
