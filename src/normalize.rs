//! URL normalization for repository locations.
//!
//! The Subversion server rejects URLs that still contain `..` segments, so
//! any reference taken from an external definition is resolved client-side
//! before it is handed to `svn log`. Normalization is best effort: anything
//! that cannot be resolved safely is returned exactly as given.

use log::debug;
use url::Url;

/// Prefix of repository-root relative references (`^/trunk/lib`).
pub const REPOSITORY_ROOT_MARKER: &str = "^/";

/// Normalize `url`, resolving `^/` against the repository root returned by
/// `repo_root_lookup` and collapsing `.` and `..` path segments.
///
/// The lookup is only invoked for `^/` references. Scheme, authority, query
/// and fragment are copied verbatim; only the path is rewritten.
pub fn normalize<F>(url: &str, repo_root_lookup: F) -> String
where
    F: FnOnce() -> Option<String>,
{
    let normalized = match url.strip_prefix(REPOSITORY_ROOT_MARKER) {
        Some(rest) => resolve_root_relative(rest, repo_root_lookup),
        None => collapse_url(url),
    };

    match normalized {
        Some(normalized) => {
            if normalized != url {
                debug!("Normalized URL: {} -> {}", url, normalized);
            }
            normalized
        }
        None => {
            debug!("Leaving URL unchanged: {}", url);
            url.to_string()
        }
    }
}

/// Collapse `.` and `..` segments of a slash-separated path.
///
/// `..` never climbs above the first segment, empty segments are dropped and
/// a trailing slash on a non-root path is kept.
pub fn collapse_path(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let absolute = path.starts_with('/');
    let trailing_slash = path.len() > 1 && path.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut collapsed = String::with_capacity(path.len());
    if absolute {
        collapsed.push('/');
    }
    collapsed.push_str(&segments.join("/"));
    if trailing_slash && !segments.is_empty() {
        collapsed.push('/');
    }
    collapsed
}

fn resolve_root_relative<F>(rest: &str, repo_root_lookup: F) -> Option<String>
where
    F: FnOnce() -> Option<String>,
{
    let root = repo_root_lookup()?;
    let parts = UrlParts::split(root.trim())?;
    let combined = format!("{}/{}", parts.path.trim_end_matches('/'), rest);
    Some(format!("{}{}", parts.origin, collapse_path(&combined)))
}

fn collapse_url(url: &str) -> Option<String> {
    let parts = UrlParts::split(url)?;
    Some(format!(
        "{}{}{}",
        parts.origin,
        collapse_path(parts.path),
        parts.suffix
    ))
}

/// Raw slices of a fully-qualified URL.
struct UrlParts<'a> {
    /// `scheme://authority`
    origin: &'a str,
    path: &'a str,
    /// Query and fragment, including their leading `?` or `#`.
    suffix: &'a str,
}

impl<'a> UrlParts<'a> {
    /// Split `text` if it is an absolute URL with a non-empty host.
    fn split(text: &'a str) -> Option<Self> {
        let parsed = Url::parse(text).ok()?;
        if parsed.host_str().is_none_or(str::is_empty) {
            return None;
        }

        let authority_start = text.find("://")? + 3;
        let after_scheme = &text[authority_start..];
        let authority_len = after_scheme
            .find(|c| matches!(c, '/' | '?' | '#'))
            .unwrap_or(after_scheme.len());
        let origin = &text[..authority_start + authority_len];

        let remainder = &after_scheme[authority_len..];
        let path_len = remainder
            .find(|c| matches!(c, '?' | '#'))
            .unwrap_or(remainder.len());

        Some(Self {
            origin,
            path: &remainder[..path_len],
            suffix: &remainder[path_len..],
        })
    }
}
