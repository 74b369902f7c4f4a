//! # Log Entry Decoding
//!
//! Converts revision history into [`LogRecord`]s ready for rendering.
//!
//! Two entry points are provided:
//!
//! - [`decode`] normalizes already-structured entries (revision, optional
//!   author, date and message).
//! - [`parse_log_xml`] reads the document produced by `svn log --xml` and
//!   feeds it through [`decode`].
//!
//! Decoding a feed is all-or-nothing. A malformed document yields an error
//! and no records, so a caller never renders a silently truncated changelog.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use xot::{Node, Xot};

use crate::error::{Error, Result};

/// Author used when an entry has none.
pub const UNKNOWN_AUTHOR: &str = "unknown";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One revision of history, as it will be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub revision: String,
    #[serde(default = "unknown_author")]
    pub author: String,
    /// `YYYY-MM-DD HH:MM:SS`, or the source text when it was not a valid
    /// ISO-8601 instant.
    #[serde(rename = "date", default)]
    pub timestamp: String,
    #[serde(default)]
    pub message: String,
}

/// A log entry as delivered by the version-control client or read back
/// from stored JSON records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawLogEntry {
    pub revision: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

fn unknown_author() -> String {
    UNKNOWN_AUTHOR.to_string()
}

/// Normalize raw entries into log records, keeping their order.
pub fn decode<I>(entries: I) -> Vec<LogRecord>
where
    I: IntoIterator<Item = RawLogEntry>,
{
    entries.into_iter().map(decode_entry).collect()
}

fn decode_entry(entry: RawLogEntry) -> LogRecord {
    let author = entry
        .author
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(unknown_author);

    LogRecord {
        revision: entry.revision,
        author,
        timestamp: entry.date.as_deref().map(format_timestamp).unwrap_or_default(),
        message: entry.message.as_deref().map(str::trim).unwrap_or_default().to_string(),
    }
}

/// Reformat an ISO-8601 instant as `YYYY-MM-DD HH:MM:SS`.
///
/// The wall-clock time is kept in the offset it was written in. Text that
/// does not parse is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    let text = raw.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return instant.format(TIMESTAMP_FORMAT).to_string();
    }
    if let Ok(instant) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return instant.format(TIMESTAMP_FORMAT).to_string();
    }
    if let Ok(instant) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M%#z") {
        return instant.format(TIMESTAMP_FORMAT).to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format(TIMESTAMP_FORMAT).to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f") {
        return naive.format(TIMESTAMP_FORMAT).to_string();
    }
    if let Some(midnight) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return midnight.format(TIMESTAMP_FORMAT).to_string();
    }

    raw.to_string()
}

/// Decode the output of `svn log --xml`.
///
/// ```text
/// <log>
///   <logentry revision="42">
///     <author>alice</author>
///     <date>2024-01-15T10:30:00.000000Z</date>
///     <msg>Fix the build</msg>
///   </logentry>
/// </log>
/// ```
pub fn parse_log_xml(xml: &str) -> Result<Vec<LogRecord>> {
    let mut xot = Xot::new();
    let log_name = xot.add_name("log");
    let entry_name = xot.add_name("logentry");
    let revision_name = xot.add_name("revision");
    let author_name = xot.add_name("author");
    let date_name = xot.add_name("date");
    let msg_name = xot.add_name("msg");

    let document = xot.parse(xml).map_err(|err| Error::LogDecode {
        message: err.to_string(),
    })?;
    let root = xot.document_element(document).map_err(|err| Error::LogDecode {
        message: err.to_string(),
    })?;
    if xot.element(root).map(|e| e.name()) != Some(log_name) {
        return Err(Error::LogDecode {
            message: "document element is not <log>".to_string(),
        });
    }

    let mut entries = Vec::new();
    for node in xot.children(root) {
        if xot.element(node).map(|e| e.name()) != Some(entry_name) {
            continue;
        }

        let revision = xot
            .get_attribute(node, revision_name)
            .filter(|r| !r.is_empty() && r.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| Error::LogDecode {
                message: "logentry without a numeric revision attribute".to_string(),
            })?;

        entries.push(RawLogEntry {
            revision: revision.to_string(),
            author: child_text(&xot, node, author_name),
            date: child_text(&xot, node, date_name),
            message: child_text(&xot, node, msg_name),
        });
    }

    Ok(decode(entries))
}

/// Text content of the first child element named `name`.
fn child_text(xot: &Xot, parent: Node, name: xot::NameId) -> Option<String> {
    let child = xot
        .children(parent)
        .find(|&node| xot.element(node).map(|e| e.name()) == Some(name))?;

    Some(
        xot.descendants(child)
            .filter_map(|node| xot.text_str(node))
            .collect(),
    )
}
