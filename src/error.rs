//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `svn-externals` library. It uses the `thiserror` library to create an
//! `Error` enum covering the failure modes of the I/O layer around the
//! definition parser, reconciler and changelog renderer.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum for everything that talks to the outside
//!   world: running the `svn` client, decoding its log feed, reading and
//!   writing the configuration file, validating working copies, and
//!   launching desktop tools.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Per-line definition failures are not part of this enum. They are
//! reported as [`crate::definition::ParseFailure`] so that a single bad line
//! never aborts a whole snapshot.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for svn-externals operations
#[derive(Error, Debug)]
pub enum Error {
    /// The external command could not be started at all.
    #[error("Failed to run {program}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    CommandSpawn {
        program: String,
        message: String,
        /// Optional hint for how to resolve the problem
        hint: Option<String>,
    },

    /// The external command did not finish within its time budget and was
    /// killed.
    #[error("Command timed out after {seconds}s: {command}")]
    CommandTimeout { command: String, seconds: u64 },

    /// The `svn` client ran but reported failure.
    #[error("svn command failed: {command} - {stderr}")]
    SvnCommand { command: String, stderr: String },

    /// The log feed could not be decoded. Decoding is all-or-nothing, so no
    /// records are available when this is returned.
    #[error("Failed to decode log feed: {message}")]
    LogDecode { message: String },

    /// The configuration file could not be read or written.
    #[error("Configuration error at {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// A path was expected to be a Subversion working copy but is not.
    #[error("Not a Subversion working copy: {}", path.display())]
    WorkingCopy { path: PathBuf },

    /// A desktop integration tool is not installed on this machine.
    #[error("{tool} is not available on this system")]
    LauncherUnavailable { tool: String },

    /// A changelog format name was not recognized.
    #[error("Unknown changelog format: {name} (expected plain, markdown, commit or tortoise)")]
    UnknownFormat { name: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
