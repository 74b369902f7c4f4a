//! Parsing of `svn propget svn:externals -R` output.
//!
//! The client prints one block per directory carrying the property:
//!
//! ```text
//! . - ^/libs/common common
//! https://example.com/repo/tools@120 tools
//!
//! src/app - -r42 https://example.com/widgets/trunk widgets
//! ```
//!
//! A line containing ` - ` starts a new block for the path before the
//! separator. Any other non-blank line continues the previous block.

use std::collections::HashMap;

use log::warn;

use crate::definition::{self, ExternalDefinition};

const PATH_SEPARATOR: &str = " - ";

/// One definition together with the directory declaring it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyLine {
    pub parent_path: String,
    pub definition: String,
}

/// Split property output into per-line definitions.
///
/// Blank lines, `#` comments and lines appearing before any path header are
/// dropped.
pub fn parse_listing(text: &str) -> Vec<PropertyLine> {
    let mut lines = Vec::new();
    let mut current_path: Option<String> = None;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let definition = match line.split_once(PATH_SEPARATOR) {
            Some((path, definition)) => {
                current_path = Some(path.trim().to_string());
                definition.trim()
            }
            None => line.trim(),
        };

        if definition.is_empty() || definition.starts_with('#') {
            continue;
        }

        if let Some(parent_path) = &current_path {
            lines.push(PropertyLine {
                parent_path: parent_path.clone(),
                definition: definition.to_string(),
            });
        }
    }

    lines
}

/// Parse a whole property listing into one snapshot.
///
/// Lines that fail to parse are logged and skipped. When two definitions
/// share `(parent_path, name)`, the later one replaces the earlier one in
/// place.
pub fn parse_snapshot(text: &str) -> Vec<ExternalDefinition> {
    let mut snapshot: Vec<ExternalDefinition> = Vec::new();
    let mut positions: HashMap<(String, String), usize> = HashMap::new();

    for line in parse_listing(text) {
        let ext = match definition::parse(&line.definition, &line.parent_path) {
            Ok(ext) => ext,
            Err(failure) => {
                warn!(
                    "Skipping external definition '{}' in {}: {}",
                    line.definition, line.parent_path, failure
                );
                continue;
            }
        };

        let key = (ext.parent_path.clone(), ext.name.clone());
        match positions.get(&key) {
            Some(&index) => {
                warn!(
                    "Duplicate external '{}' in {}; later definition wins",
                    ext.name, ext.parent_path
                );
                snapshot[index] = ext;
            }
            None => {
                positions.insert(key, snapshot.len());
                snapshot.push(ext);
            }
        }
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
. - ^/libs/common common
https://example.com/repo/tools@120 tools

src/app - -r42 https://example.com/widgets/trunk widgets
# pinned until the 2.x migration lands
vendor/zlib -r7 https://example.com/zlib/trunk
";

    #[test]
    fn test_parse_listing_continuation_lines() {
        let lines = parse_listing(LISTING);
        let pairs: Vec<_> = lines
            .iter()
            .map(|l| (l.parent_path.as_str(), l.definition.as_str()))
            .collect();
        assert_eq!(
            pairs,
            [
                (".", "^/libs/common common"),
                (".", "https://example.com/repo/tools@120 tools"),
                ("src/app", "-r42 https://example.com/widgets/trunk widgets"),
                ("src/app", "vendor/zlib -r7 https://example.com/zlib/trunk"),
            ]
        );
    }

    #[test]
    fn test_parse_listing_drops_orphan_lines() {
        let lines = parse_listing("https://example.com/orphan orphan\n. - https://example.com/a a\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].definition, "https://example.com/a a");
    }

    #[test]
    fn test_parse_listing_windows_line_endings() {
        let lines = parse_listing(". - https://example.com/a a\r\nhttps://example.com/b b\r\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].definition, "https://example.com/b b");
    }

    #[test]
    fn test_parse_listing_empty() {
        assert!(parse_listing("").is_empty());
        assert!(parse_listing("\n\n").is_empty());
    }

    #[test]
    fn test_parse_snapshot() {
        let snapshot = parse_snapshot(LISTING);
        assert_eq!(snapshot.len(), 4);

        assert_eq!(snapshot[1].name, "tools");
        assert_eq!(snapshot[1].revision, "120");
        assert_eq!(snapshot[3].full_path, "src/app/vendor/zlib");
        assert_eq!(snapshot[3].revision, "7");
    }

    #[test]
    fn test_parse_snapshot_skips_bad_lines() {
        let snapshot = parse_snapshot(". - -r5\nhttps://example.com/a a\n");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "a");
    }

    #[test]
    fn test_parse_snapshot_duplicate_key_later_wins() {
        let snapshot = parse_snapshot(
            ". - -r1 https://example.com/a lib\n-r2 https://example.com/b other\n-r3 https://example.com/c lib\n",
        );
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].name, "lib");
        assert_eq!(snapshot[0].revision, "3");
        assert_eq!(snapshot[1].name, "other");
    }
}
