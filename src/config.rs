//! # Persistent Settings
//!
//! Settings that outlive a single run live in a small JSON file:
//!
//! ```json
//! {
//!   "active_working_copy_path": "/home/me/projects/app",
//!   "projects_directory": "/home/me/projects",
//!   "truncate_tortoise_messages": true
//! }
//! ```
//!
//! [`ConfigStore`] reads and writes that file. Keys it does not know about
//! are kept in [`Config::extra`] and written back untouched, so other tools
//! sharing the file do not lose their settings.
//!
//! ## Legacy files
//!
//! Older files stored a single `working_copy_path`. On load such a file is
//! rewritten: the path becomes `active_working_copy_path`, its parent becomes
//! `projects_directory` when the old path is a directory, and the migrated
//! file is saved back.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::defaults::default_config_path;
use crate::error::{Error, Result};

const LEGACY_WORKING_COPY_KEY: &str = "working_copy_path";

fn default_truncate() -> bool {
    true
}

/// User settings stored in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub active_working_copy_path: Option<PathBuf>,
    #[serde(default)]
    pub projects_directory: Option<PathBuf>,
    /// Cap TortoiseSVN changelog messages at their first line.
    #[serde(default = "default_truncate")]
    pub truncate_tortoise_messages: bool,
    /// Keys written by someone else.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            active_working_copy_path: None,
            projects_directory: None,
            truncate_tortoise_messages: default_truncate(),
            extra: Map::new(),
        }
    }
}

impl Config {
    /// Move a legacy `working_copy_path` into the current keys.
    ///
    /// Returns whether anything changed. Files that already have a
    /// `projects_directory` are left alone.
    fn migrate_legacy(&mut self) -> bool {
        if self.projects_directory.is_some() {
            return false;
        }
        let Some(legacy) = self.extra.remove(LEGACY_WORKING_COPY_KEY) else {
            return false;
        };
        let Some(old_path) = legacy.as_str().map(PathBuf::from) else {
            warn!("Dropping non-string {} from config", LEGACY_WORKING_COPY_KEY);
            return true;
        };

        if old_path.is_dir() {
            self.projects_directory = old_path.parent().map(Path::to_path_buf);
        }
        self.active_working_copy_path = Some(old_path);
        true
    }
}

/// Loads and saves [`Config`] at a fixed location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`default_config_path`].
    pub fn at_default_location() -> Self {
        Self::new(default_config_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the config file.
    ///
    /// A missing file yields the defaults. So does a file that is not valid
    /// JSON, after logging a warning. Only failing to read an existing file
    /// is an error.
    pub fn load(&self) -> Result<Config> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No config file at {}", self.path.display());
                return Ok(Config::default());
            }
            Err(e) => return Err(self.config_error(e)),
        };

        let mut config: Config = match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Ignoring malformed config file {}: {}",
                    self.path.display(),
                    e
                );
                return Ok(Config::default());
            }
        };

        if config.migrate_legacy() {
            info!("Migrated legacy config file {}", self.path.display());
            self.save(&config)?;
        }
        Ok(config)
    }

    /// Write `config` as pretty JSON, creating parent directories.
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.config_error(e))?;
        }
        let mut json = serde_json::to_string_pretty(config)?;
        json.push('\n');
        fs::write(&self.path, json).map_err(|e| self.config_error(e))?;
        debug!("Saved config to {}", self.path.display());
        Ok(())
    }

    fn config_error(&self, err: io::Error) -> Error {
        Error::Config {
            path: self.path.clone(),
            message: err.to_string(),
        }
    }

    /// Load, apply `change`, save, and return the updated config.
    pub fn update<F>(&self, change: F) -> Result<Config>
    where
        F: FnOnce(&mut Config),
    {
        let mut config = self.load()?;
        change(&mut config);
        self.save(&config)?;
        Ok(config)
    }
}
