//! # svn-externals
//!
//! Inspect the `svn:externals` of a Subversion working copy and turn revision
//! ranges into readable changelogs.
//!
//! ## Quick Example
//!
//! ```
//! use svn_externals::definition::{self, ExternalStatus};
//! use svn_externals::changelog::{self, ChangelogFormat};
//! use svn_externals::log_entry::LogRecord;
//!
//! let ext = definition::parse("-r42 ^/libs/common@40 common", "src").unwrap();
//! assert_eq!(ext.revision, "40");
//! assert_eq!(ext.full_path, "src/common");
//! assert_eq!(ext.status, ExternalStatus::Unknown);
//!
//! let records = vec![LogRecord {
//!     revision: "41".to_string(),
//!     author: "alice".to_string(),
//!     timestamp: "2024-03-01 10:00:00".to_string(),
//!     message: "Fix overflow".to_string(),
//! }];
//! let text = changelog::render(&records, ChangelogFormat::Commit, true);
//! assert_eq!(text, "Changes:\n- r41: Fix overflow\n");
//! ```
//!
//! ## Core
//!
//! - **`definition`**: one definition line to an [`ExternalDefinition`], in
//!   either historical token order, with `-r` and peg revisions.
//! - **`normalize`**: resolves `^/` and collapses `..` before a URL reaches
//!   the server.
//! - **`reconcile`**: compares the working property with `BASE` and assigns
//!   each external a status.
//! - **`log_entry`** and **`changelog`**: decode `svn log --xml` and render
//!   it as plain text, Markdown, a commit message or TortoiseSVN style.
//!
//! ## Around the core
//!
//! [`manager::ExternalsManager`] drives the `svn` client through the
//! [`runner::CommandRunner`] trait. Settings are kept by
//! [`config::ConfigStore`]; [`discovery`] finds working copies and
//! [`launcher`] opens TortoiseSVN dialogs.
//!
//! [`ExternalDefinition`]: definition::ExternalDefinition

pub mod changelog;
pub mod config;
pub mod defaults;
pub mod definition;
pub mod discovery;
pub mod error;
pub mod launcher;
pub mod log_entry;
pub mod manager;
pub mod normalize;
pub mod output;
pub mod property;
pub mod reconcile;
pub mod runner;
pub mod suggestions;
pub mod svn;

#[cfg(test)]
mod definition_proptest;
