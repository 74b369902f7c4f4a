//! # CLI Command Implementations
//!
//! Each subcommand of `svn-externals` lives in its own file with:
//! - an `Args` struct derived with `clap`;
//! - an `execute` function taking the args and the shared [`Context`].
//!
//! The helpers here resolve which working copy a command runs against and
//! parse CLI values into library types.

pub mod changelog;
pub mod completions;
pub mod config;
pub mod externals;
pub mod format;
pub mod info;
pub mod properties;
pub mod working_copies;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use svn_externals::changelog::ChangelogFormat;
use svn_externals::config::{Config, ConfigStore};
use svn_externals::error::Error;
use svn_externals::log_entry::LogRecord;
use svn_externals::manager::{is_working_copy, ExternalsManager};
use svn_externals::output::OutputConfig;
use svn_externals::runner::ProcessRunner;
use svn_externals::suggestions;

/// State shared by every command.
#[derive(Debug)]
pub struct Context {
    pub store: ConfigStore,
    pub output: OutputConfig,
}

impl Context {
    pub fn load_config(&self) -> Result<Config> {
        Ok(self.store.load()?)
    }
}

/// Parse a `--format` value, suggesting the closest known name on failure.
pub fn parse_format(name: &str) -> Result<ChangelogFormat> {
    name.parse::<ChangelogFormat>().map_err(|err| match err {
        Error::UnknownFormat { name } => suggestions::unknown_format(&name),
        other => other.into(),
    })
}

/// Changelog rendering options shared by `log` and `format`.
#[derive(Args, Debug)]
pub struct RenderOptions {
    /// Output format: plain, markdown, commit or tortoise.
    #[arg(short, long, value_name = "FORMAT", value_parser = parse_format, default_value = "plain")]
    pub format: ChangelogFormat,

    /// Keep only the first line of long tortoise messages.
    #[arg(long, conflicts_with = "no_truncate")]
    pub truncate: bool,

    /// Print tortoise messages in full.
    #[arg(long)]
    pub no_truncate: bool,
}

impl RenderOptions {
    /// Whether to truncate, falling back to the stored preference.
    pub fn truncate(&self, config: &Config) -> bool {
        if self.no_truncate {
            false
        } else if self.truncate {
            true
        } else {
            config.truncate_tortoise_messages
        }
    }

    /// Render `records` with these options.
    pub fn render(&self, records: &[LogRecord], config: &Config) -> String {
        svn_externals::changelog::render(records, self.format, self.truncate(config))
    }
}

/// Pick the working copy: explicit argument, then the active one from the
/// config, then the current directory if it is a working copy.
pub fn resolve_working_copy(explicit: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    let path = match explicit.or_else(|| config.active_working_copy_path.clone()) {
        Some(path) => path,
        None => {
            let cwd = std::env::current_dir()?;
            if !is_working_copy(&cwd) {
                return Err(suggestions::no_working_copy_selected());
            }
            cwd
        }
    };

    if !is_working_copy(&path) {
        return Err(suggestions::not_a_working_copy(&path));
    }
    Ok(path)
}

/// Manager for `path` backed by the system `svn` client.
pub fn open_manager(path: &Path) -> Result<ExternalsManager<ProcessRunner>> {
    Ok(ExternalsManager::open(ProcessRunner, path)?)
}

/// Pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
