//! # Changelog Rendering
//!
//! Formats [`LogRecord`]s into one of several textual dialects:
//!
//! - **plain**: labeled fields per revision, separated by a 70-column rule.
//! - **markdown**: a `# Changelog` document with one section per revision.
//! - **commit**: a compact bullet list of first message lines.
//! - **tortoise**: newest revision first, messages optionally cut down so the
//!   result fits TortoiseSVN's commit-message conventions.
//!
//! `plain`, `markdown` and `commit` keep the input order (oldest first, as
//! retrieved from `svn log`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::log_entry::LogRecord;

/// Text returned for an empty range, whatever the format.
pub const NO_CHANGES: &str = "No changes found.";

/// Maximum message length, in characters, of a truncated tortoise entry.
pub const TORTOISE_MESSAGE_LIMIT: usize = 240;

const ELLIPSIS: &str = "...";
const PLAIN_RULE_WIDTH: usize = 70;
const TORTOISE_RULE_WIDTH: usize = 21;

/// Output dialect of a rendered changelog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangelogFormat {
    #[default]
    Plain,
    Markdown,
    Commit,
    Tortoise,
}

impl ChangelogFormat {
    pub const ALL: [ChangelogFormat; 4] = [
        ChangelogFormat::Plain,
        ChangelogFormat::Markdown,
        ChangelogFormat::Commit,
        ChangelogFormat::Tortoise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangelogFormat::Plain => "plain",
            ChangelogFormat::Markdown => "markdown",
            ChangelogFormat::Commit => "commit",
            ChangelogFormat::Tortoise => "tortoise",
        }
    }
}

impl fmt::Display for ChangelogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangelogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownFormat {
                name: s.to_string(),
            })
    }
}

/// Render `records` in `format`.
///
/// `truncate` only affects [`ChangelogFormat::Tortoise`].
pub fn render(records: &[LogRecord], format: ChangelogFormat, truncate: bool) -> String {
    if records.is_empty() {
        return NO_CHANGES.to_string();
    }

    match format {
        ChangelogFormat::Plain => render_plain(records),
        ChangelogFormat::Markdown => render_markdown(records),
        ChangelogFormat::Commit => render_commit(records),
        ChangelogFormat::Tortoise => render_tortoise(records, truncate),
    }
}

fn render_plain(records: &[LogRecord]) -> String {
    let rule = "-".repeat(PLAIN_RULE_WIDTH);
    let mut output = String::new();
    for record in records {
        output.push_str(&format!("Revision: {}\n", record.revision));
        output.push_str(&format!("Author: {}\n", record.author));
        output.push_str(&format!("Date: {}\n", record.timestamp));
        output.push_str(&format!("Message:\n{}\n", record.message));
        output.push_str(&rule);
        output.push_str("\n\n");
    }
    output
}

fn render_markdown(records: &[LogRecord]) -> String {
    let mut output = String::from("# Changelog\n\n");
    for record in records {
        output.push_str(&format!(
            "## r{} - {} - {}\n\n",
            record.revision, record.author, record.timestamp
        ));
        output.push_str(&format!("{}\n\n", record.message));
        output.push_str("---\n\n");
    }
    output
}

fn render_commit(records: &[LogRecord]) -> String {
    let mut output = String::from("Changes:\n");
    for record in records {
        output.push_str(&format!(
            "- r{}: {}\n",
            record.revision,
            first_line(&record.message)
        ));
    }
    output
}

fn render_tortoise(records: &[LogRecord], truncate: bool) -> String {
    let rule = "-".repeat(TORTOISE_RULE_WIDTH);
    let mut output = String::new();
    for record in records.iter().rev() {
        let message = if truncate {
            truncate_message(&record.message)
        } else {
            record.message.clone()
        };
        output.push_str(&format!("r{}\n{}\n{}\n", record.revision, message, rule));
    }
    output
}

/// First line of `message`, capped at [`TORTOISE_MESSAGE_LIMIT`] characters
/// with a trailing ellipsis when cut.
pub fn truncate_message(message: &str) -> String {
    let line = first_line(message);
    match line.char_indices().nth(TORTOISE_MESSAGE_LIMIT) {
        Some((cut, _)) => format!("{}{}", &line[..cut], ELLIPSIS),
        None => line.to_string(),
    }
}

fn first_line(message: &str) -> &str {
    message.split('\n').next().unwrap_or_default()
}
