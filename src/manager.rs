//! # Externals Manager
//!
//! `ExternalsManager` is the high-level entry point used by the CLI. It owns
//! an [`SvnClient`] bound to one working copy and wires the pure pieces of
//! the library together:
//!
//! - **externals**: working and `BASE` property listings are parsed with
//!   [`property::parse_snapshot`] and classified with
//!   [`reconcile::reconcile`] against the filesystem.
//! - **changelog**: the URL is normalized (resolving `^/` through
//!   `svn info` only when needed), `svn log --xml` is fetched and decoded.
//!
//! There is no process-wide instance; callers create one manager per working
//! copy and pass it around explicitly.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::definition::ExternalDefinition;
use crate::error::{Error, Result};
use crate::log_entry::{self, LogRecord};
use crate::normalize::normalize;
use crate::property;
use crate::reconcile::{self, FsProbe};
use crate::runner::CommandRunner;
use crate::svn::SvnClient;

/// Name of the administrative directory of a working copy.
pub const SVN_ADMIN_DIR: &str = ".svn";

/// Whether `path` is a directory containing an `.svn` directory.
pub fn is_working_copy(path: &Path) -> bool {
    path.is_dir() && path.join(SVN_ADMIN_DIR).is_dir()
}

/// Fail with [`Error::WorkingCopy`] unless `path` is a working copy.
pub fn ensure_working_copy(path: &Path) -> Result<()> {
    if is_working_copy(path) {
        Ok(())
    } else {
        Err(Error::WorkingCopy {
            path: path.to_path_buf(),
        })
    }
}

/// Externals and changelog operations for one working copy.
pub struct ExternalsManager<R> {
    svn: SvnClient<R>,
}

impl<R: CommandRunner> ExternalsManager<R> {
    pub fn new(svn: SvnClient<R>) -> Self {
        Self { svn }
    }

    /// Validate `path` and create a manager for it.
    pub fn open(runner: R, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        ensure_working_copy(&path)?;
        Ok(Self::new(SvnClient::new(runner, path)))
    }

    pub fn svn(&self) -> &SvnClient<R> {
        &self.svn
    }

    pub fn working_copy(&self) -> &Path {
        self.svn.working_copy()
    }

    /// All externals of the working copy with their status.
    pub fn externals(&self) -> Vec<ExternalDefinition> {
        let working = self.snapshot(false);
        let base = self.snapshot(true);
        let probe = FsProbe::new(self.working_copy());
        reconcile::reconcile(working, &base, &probe)
    }

    /// Externals whose definition is `changed` or `new`.
    pub fn changed_externals(&self) -> Vec<ExternalDefinition> {
        reconcile::changed_only(self.externals())
    }

    /// Log records of `url` between `old_rev` and `new_rev`.
    pub fn changelog(&self, url: &str, old_rev: &str, new_rev: &str) -> Result<Vec<LogRecord>> {
        let normalized = normalize(url, || self.svn.repository_root());
        let xml = self.svn.log_xml(&normalized, old_rev, new_rev)?;
        log_entry::parse_log_xml(&xml)
    }

    /// Point the manager at another working copy.
    ///
    /// The path is validated first; on failure the current working copy is
    /// kept.
    pub fn set_working_copy(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        ensure_working_copy(&path)?;
        info!("Working copy set to {}", path.display());
        self.svn.set_working_copy(path);
        Ok(())
    }

    /// `svn info` of the working copy.
    pub fn working_copy_info(&self) -> Result<BTreeMap<String, String>> {
        self.svn.info()
    }

    fn snapshot(&self, pristine: bool) -> Vec<ExternalDefinition> {
        match self.svn.propget_externals(pristine) {
            Ok(text) => property::parse_snapshot(&text),
            Err(err) => {
                let side = if pristine { "BASE" } else { "working" };
                warn!("Cannot read {} externals: {}", side, err);
                Vec::new()
            }
        }
    }
}
