//! # External Definitions
//!
//! This module turns one line of an `svn:externals` property into an
//! [`ExternalDefinition`]. Two historical orderings are understood:
//!
//! - **Old style**: `local_path [-r REV] URL`
//! - **New style**: `[-r REV] URL[@PEG] [local_path]`
//!
//! The ordering is decided by looking at the first non-flag token: if it
//! starts with one of [`URL_PREFIXES`] it is the URL, otherwise it is the
//! local path. A peg revision (`URL@123`) always wins over a `-r` flag.
//!
//! Parsing never panics and never partially succeeds. A line either yields a
//! complete definition or a [`ParseFailure`] that the caller is expected to
//! log and skip.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Parent path marker for definitions declared on the working-copy root.
pub const SELF_PARENT: &str = ".";

/// Revision used when a definition does not pin one.
pub const HEAD: &str = "HEAD";

/// Prefixes that identify a token as a URL when deciding the ordering of a
/// definition. `^/` is the repository-root marker.
pub const URL_PREFIXES: &[&str] = &[
    "http://",
    "https://",
    "svn://",
    "svn+ssh://",
    "file://",
    "^/",
];

const ADDED_MESSAGE: &str = "External definition added";

/// Why a definition line could not be turned into an [`ExternalDefinition`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// Nothing but revision flags (or nothing at all) was found.
    #[error("definition has no URL or path tokens")]
    NoTokens,

    /// The token in URL position was empty.
    #[error("definition has no URL")]
    MissingUrl,

    /// No usable directory name could be derived.
    #[error("cannot derive a local directory name from '{url}'")]
    EmptyName { url: String },
}

/// Classification of an external after comparing the working and base
/// snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExternalStatus {
    /// Freshly parsed, not yet reconciled.
    #[default]
    Unknown,
    /// Present in the working snapshot only.
    New,
    /// Present in both snapshots with a different definition.
    Changed,
    /// Identical in both snapshots and present on disk.
    Clean,
    /// The declared path does not exist in the working copy.
    Missing,
    /// The status could not be determined.
    Error,
}

impl ExternalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExternalStatus::Unknown => "unknown",
            ExternalStatus::New => "new",
            ExternalStatus::Changed => "changed",
            ExternalStatus::Clean => "clean",
            ExternalStatus::Missing => "missing",
            ExternalStatus::Error => "error",
        }
    }
}

impl fmt::Display for ExternalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A definition field compared during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangedField {
    Revision,
    Url,
    Path,
}

impl ChangedField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangedField::Revision => "revision",
            ChangedField::Url => "url",
            ChangedField::Path => "path",
        }
    }
}

impl fmt::Display for ChangedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Old and new value of one changed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub old: String,
    pub new: String,
}

/// Extra information attached to `new` and `changed` externals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeDetail {
    /// The definition does not exist in the base snapshot.
    Added,
    /// Fields that differ from the base snapshot.
    Modified(BTreeMap<ChangedField, FieldChange>),
}

impl Serialize for ChangeDetail {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ChangeDetail::Added => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "added")?;
                map.serialize_entry("message", ADDED_MESSAGE)?;
                map.end()
            }
            ChangeDetail::Modified(fields) => fields.serialize(serializer),
        }
    }
}

/// One parsed `svn:externals` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalDefinition {
    /// Final segment of the local path, used as the directory name.
    pub name: String,
    /// Path of the external relative to `parent_path`.
    pub local_path: String,
    /// `parent_path` joined with `local_path`, relative to the working copy.
    #[serde(rename = "path")]
    pub full_path: String,
    pub url: String,
    pub revision: String,
    /// Directory that declares the external, relative to the working copy.
    pub parent_path: String,
    pub status: ExternalStatus,
    #[serde(rename = "change_details")]
    pub change_detail: Option<ChangeDetail>,
}

impl ExternalDefinition {
    /// Identity of an external within one snapshot.
    pub fn key(&self) -> (&str, &str) {
        (&self.parent_path, &self.name)
    }

    /// Consume the definition and return it with a reconciled status.
    pub fn with_status(self, status: ExternalStatus, change_detail: Option<ChangeDetail>) -> Self {
        Self {
            status,
            change_detail,
            ..self
        }
    }
}

/// Parse one external definition declared on `parent_path`.
pub fn parse(definition: &str, parent_path: &str) -> Result<ExternalDefinition, ParseFailure> {
    let tokens = tokenize(definition);
    let (flag_revision, operands) = split_revision_flags(tokens);

    let (url, local_path) = match operands.as_slice() {
        [] => return Err(ParseFailure::NoTokens),
        [url] => (url.clone(), None),
        [first, second, ..] if looks_like_url(first) => (first.clone(), Some(second.clone())),
        [first, second, ..] => (second.clone(), Some(first.clone())),
    };

    let (url, revision) = match split_peg_revision(&url) {
        Some((base, peg)) => (base.to_string(), Some(peg.to_string())),
        None => (url, flag_revision),
    };

    if url.is_empty() {
        return Err(ParseFailure::MissingUrl);
    }

    let local_path = match local_path {
        Some(path) if !path.is_empty() => path,
        _ => last_segment(&percent_decode(&url)).to_string(),
    };
    let local_path = percent_decode(&local_path);

    let name = last_segment(&local_path).to_string();
    if name.is_empty() {
        return Err(ParseFailure::EmptyName { url });
    }

    let full_path = join_parent(parent_path, &local_path);
    let revision = revision
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| HEAD.to_string());

    Ok(ExternalDefinition {
        name,
        local_path,
        full_path,
        url,
        revision,
        parent_path: parent_path.to_string(),
        status: ExternalStatus::Unknown,
        change_detail: None,
    })
}

/// Whether `token` starts with one of the recognized URL prefixes.
pub fn looks_like_url(token: &str) -> bool {
    URL_PREFIXES.iter().any(|prefix| token.starts_with(prefix))
}

/// Shell-style splitting, falling back to plain whitespace splitting when the
/// quoting is unbalanced.
fn tokenize(definition: &str) -> Vec<String> {
    match shell_words::split(definition) {
        Ok(tokens) => tokens,
        Err(err) => {
            debug!("Falling back to whitespace splitting for '{}': {}", definition, err);
            definition.split_whitespace().map(str::to_string).collect()
        }
    }
}

/// Pull `-r REV` and `-rREV` out of the token stream.
///
/// Returns the last revision seen and the remaining tokens in order.
fn split_revision_flags(tokens: Vec<String>) -> (Option<String>, Vec<String>) {
    let mut revision = None;
    let mut operands = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter();

    while let Some(token) = iter.next() {
        if token == "-r" {
            if let Some(value) = iter.next() {
                revision = Some(value);
            }
        } else if let Some(value) = attached_revision(&token) {
            revision = Some(value.to_string());
        } else {
            operands.push(token);
        }
    }

    (revision, operands)
}

/// `-r1234` style flag. A quoted token containing whitespace is literal text.
fn attached_revision(token: &str) -> Option<&str> {
    token
        .strip_prefix("-r")
        .filter(|value| !value.is_empty() && !value.chars().any(char::is_whitespace))
}

/// Split `URL@123` into `(URL, "123")`.
fn split_peg_revision(url: &str) -> Option<(&str, &str)> {
    let (base, peg) = url.rsplit_once('@')?;
    if !peg.is_empty() && peg.bytes().all(|b| b.is_ascii_digit()) {
        Some((base, peg))
    } else {
        None
    }
}

fn last_segment(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or_default()
}

fn percent_decode(text: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(text.as_bytes())).into_owned()
}

fn join_parent(parent_path: &str, local_path: &str) -> String {
    if parent_path == SELF_PARENT || parent_path.is_empty() || local_path.starts_with('/') {
        local_path.to_string()
    } else {
        format!("{}/{}", parent_path.trim_end_matches('/'), local_path)
    }
}
