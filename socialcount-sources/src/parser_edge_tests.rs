//! Parser edge case and error handling tests.
//!
//! These tests verify extractor behavior with malformed, partial, or edge
//! case pages across every platform.

#[cfg(test)]
mod shared_edge_tests {
    use crate::registry::PlatformRegistry;
    use socialcount_core::PlatformKind;
    use socialcount_fetch::host::DEFAULT_REQUEST_TIMEOUT;
    use socialcount_fetch::{FetchError, HttpClient};
    use std::collections::HashMap;

    #[test]
    fn test_empty_and_garbage_pages_fail_cleanly() {
        let pages = ["", "   \n\t", "<html></html>", "not html at all", "{}", "null"];

        for desc in PlatformRegistry::all() {
            let extractor = (desc.source.extractor)();
            for page in pages {
                let result = extractor.extract(page, "someone");
                assert!(
                    matches!(result, Err(FetchError::Extraction(_))),
                    "{} should reject {page:?}, got {result:?}",
                    desc.display_name()
                );
            }
        }
    }

    #[test]
    fn test_targets_strip_leading_at() {
        for desc in PlatformRegistry::all() {
            assert_eq!(
                desc.target("@someone"),
                desc.target("someone"),
                "{}",
                desc.display_name()
            );
            assert!(!desc.target("@someone").contains("%40someone"));
        }
    }

    #[test]
    fn test_hostile_handles_stay_on_origin() {
        let handles = [
            "/evil.example",
            "//evil.example/x",
            "../../admin",
            "someone?x=1#frag",
            "https://evil.example",
            "a b",
        ];

        for desc in PlatformRegistry::all() {
            let client =
                HttpClient::new(desc.base_url(), DEFAULT_REQUEST_TIMEOUT, &HashMap::new())
                    .unwrap();
            let base = client.base_url().clone();

            for handle in handles {
                let url = client.resolve(&desc.target(handle)).unwrap();
                let name = desc.display_name();
                assert_eq!(url.origin(), base.origin(), "{name} {handle:?} -> {url}");
                assert!(url.fragment().is_none(), "{name} {handle:?} -> {url}");
                if desc.id != PlatformKind::LinkedIn {
                    assert!(url.query().is_none(), "{name} {handle:?} -> {url}");
                    assert!(!url.path().contains("/admin"), "{name} {handle:?} -> {url}");
                }
            }
        }
    }

    #[test]
    fn test_targets_are_relative() {
        for desc in PlatformRegistry::all() {
            assert!(desc.target("someone").starts_with('/'), "{}", desc.display_name());
        }
    }
}

#[cfg(test)]
mod suffix_edge_tests {
    use crate::facebook::FacebookExtractor;
    use crate::instagram::InstagramExtractor;
    use crate::x::XExtractor;
    use socialcount_fetch::{Extractor, FetchError};

    fn instagram(count: &str) -> String {
        format!(r#"<meta property="og:description" content="{count} Followers, 1 Following"#)
    }

    #[test]
    fn test_billions() {
        assert_eq!(
            InstagramExtractor.extract(&instagram("1.2B"), "h").unwrap(),
            1_200_000_000
        );
    }

    #[test]
    fn test_comma_and_suffix() {
        assert_eq!(
            InstagramExtractor.extract(&instagram("1,234.5K"), "h").unwrap(),
            1_234_500
        );
    }

    #[test]
    fn test_fraction_truncates() {
        // 1.2345K = 1234.5
        assert_eq!(
            InstagramExtractor.extract(&instagram("1.2345K"), "h").unwrap(),
            1_234
        );
    }

    #[test]
    fn test_character_class_admits_garbage() {
        // The pattern accepts any run of digits, separators and suffix
        // letters, so malformed runs reach the parser.
        let result = InstagramExtractor.extract(&instagram("1KM"), "h");
        assert!(matches!(result, Err(FetchError::Parse(_))), "{result:?}");

        let result = InstagramExtractor.extract(&instagram("1.2.3"), "h");
        assert!(matches!(result, Err(FetchError::Parse(_))), "{result:?}");
    }

    #[test]
    fn test_parse_error_carries_text_and_handle() {
        let page = r#"{"text":"...K followers"}"#;
        let err = FacebookExtractor.extract(page, "somepage").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("...K"), "{message}");
        assert!(message.contains("somepage"), "{message}");
    }

    #[test]
    fn test_first_match_wins() {
        let page = "@a Twitter profile. 10 Followers @b Twitter profile. 20 Followers";
        assert_eq!(XExtractor.extract(page, "h").unwrap(), 10);
    }
}
