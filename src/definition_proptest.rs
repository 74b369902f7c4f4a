//! Property-based tests for definition parsing, URL normalization,
//! reconciliation and tortoise truncation.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use std::io;

    use crate::changelog::{truncate_message, TORTOISE_MESSAGE_LIMIT};
    use crate::definition::parse;
    use crate::normalize::normalize;
    use crate::reconcile::reconcile;
    use proptest::prelude::*;

    fn scheme() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("http://"),
            Just("https://"),
            Just("svn://"),
            Just("svn+ssh://"),
        ]
    }

    fn segments() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-z][a-z0-9_]{0,7}", 1..5)
    }

    fn url() -> impl Strategy<Value = String> {
        (scheme(), "[a-z]{1,8}", segments())
            .prop_map(|(scheme, host, segments)| format!("{}{}/{}", scheme, host, segments.join("/")))
    }

    fn local_path() -> impl Strategy<Value = String> {
        segments().prop_map(|segments| segments.join("/"))
    }

    // ============================================================================
    // parse property tests
    // ============================================================================

    proptest! {
        /// Property: both historical token orders describe the same external
        #[test]
        fn parse_is_order_invariant(url in url(), path in local_path(), rev in prop::option::of(1u32..100_000)) {
            let flag = rev.map(|r| format!("-r{} ", r)).unwrap_or_default();
            let modern = parse(&format!("{}{} {}", flag, url, path), ".").unwrap();
            let legacy = parse(&format!("{} {}{}", path, flag, url), ".").unwrap();

            prop_assert_eq!(&modern.url, &legacy.url);
            prop_assert_eq!(&modern.local_path, &legacy.local_path);
            prop_assert_eq!(&modern.revision, &legacy.revision);
            prop_assert_eq!(&modern.name, &legacy.name);
        }

        /// Property: a peg revision wins over any -r flag
        #[test]
        fn parse_peg_revision_wins(url in url(), path in local_path(), flag in 1u32..1000, peg in 1u32..1000) {
            let ext = parse(&format!("-r {} {}@{} {}", flag, url, peg, path), "sub").unwrap();
            prop_assert_eq!(ext.revision, peg.to_string());
            prop_assert_eq!(ext.url, url);
        }

        /// Property: name is the last segment of the local path and full_path
        /// ends with the local path
        #[test]
        fn parse_name_is_last_segment(url in url(), path in local_path(), parent in "[a-z]{1,6}") {
            let ext = parse(&format!("{} {}", url, path), &parent).unwrap();
            let expected = path.rsplit('/').next().unwrap();
            prop_assert_eq!(ext.name.as_str(), expected);
            prop_assert_eq!(ext.full_path, format!("{}/{}", parent, path));
        }

        /// Property: arbitrary input never panics and a recognized definition
        /// always has a URL and a name
        #[test]
        fn parse_never_panics(input in ".*") {
            if let Ok(ext) = parse(&input, ".") {
                prop_assert!(!ext.url.is_empty());
                prop_assert!(!ext.name.is_empty());
                prop_assert!(!ext.revision.is_empty());
            }
        }
    }

    // ============================================================================
    // normalize property tests
    // ============================================================================

    fn dotted_segments() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(
            prop_oneof![
                Just(".".to_string()),
                Just("..".to_string()),
                Just(String::new()),
                "[a-z]{1,6}",
            ],
            0..8,
        )
    }

    proptest! {
        /// Property: normalize is idempotent
        #[test]
        fn normalize_is_idempotent(scheme in scheme(), host in "[a-z]{1,8}", segments in dotted_segments()) {
            let url = format!("{}{}/{}", scheme, host, segments.join("/"));
            let once = normalize(&url, || None);
            let twice = normalize(&once, || None);
            prop_assert_eq!(once, twice);
        }

        /// Property: a normalized URL keeps its origin and has no dot segments
        #[test]
        fn normalize_removes_dot_segments(scheme in scheme(), host in "[a-z]{1,8}", segments in dotted_segments()) {
            let origin = format!("{}{}", scheme, host);
            let url = format!("{}/{}", origin, segments.join("/"));
            let normalized = normalize(&url, || None);

            prop_assert!(normalized.starts_with(&origin));
            let path = &normalized[origin.len()..];
            prop_assert!(path.split('/').all(|s| s != "." && s != ".."), "{}", normalized);
        }

        /// Property: references that are not absolute URLs come back untouched
        #[test]
        fn normalize_leaves_relative_references(segments in dotted_segments()) {
            let reference = segments.join("/");
            prop_assert_eq!(normalize(&reference, || None), reference);
        }
    }

    // ============================================================================
    // reconcile and truncation property tests
    // ============================================================================

    proptest! {
        /// Property: reconciliation keeps the working order and length
        #[test]
        fn reconcile_preserves_working_order(names in prop::collection::btree_set("[a-z]{1,6}", 0..8)) {
            let working: Vec<_> = names
                .iter()
                .rev()
                .map(|name| parse(&format!("https://host/{} {}", name, name), ".").unwrap())
                .collect();
            let expected: Vec<String> = working.iter().map(|ext| ext.name.clone()).collect();

            let probe = |_: &str| Ok::<_, io::Error>(true);
            let result = reconcile(working, &[], &probe);

            let names: Vec<String> = result.into_iter().map(|ext| ext.name).collect();
            prop_assert_eq!(names, expected);
        }

        /// Property: truncated tortoise messages are one line within the limit
        #[test]
        fn truncate_message_is_bounded(message in "(?s).{0,600}") {
            let truncated = truncate_message(&message);
            prop_assert!(!truncated.contains('\n'));
            prop_assert!(truncated.chars().count() <= TORTOISE_MESSAGE_LIMIT + 3);
        }
    }
}
