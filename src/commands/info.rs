//! # Info Command Implementation
//!
//! Reports what the other commands depend on: whether the `svn` client and
//! TortoiseSVN can be found, where the settings live, and `svn info` for the
//! selected working copy.
//!
//! This command is a safe, read-only operation that does not modify any files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use log::{debug, warn};
use serde::Serialize;

use svn_externals::defaults::WORKING_COPY_ENV;
use svn_externals::launcher::TortoiseLauncher;
use svn_externals::runner::ProcessRunner;
use svn_externals::svn::SvnClient;

use super::{open_manager, print_json, resolve_working_copy, Context};

/// Show tool availability and working copy information
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Working copy to describe.
    #[arg(short = 'C', long, value_name = "DIR", env = WORKING_COPY_ENV)]
    pub working_copy: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    config_file: PathBuf,
    svn_version: Option<String>,
    tortoise: Option<PathBuf>,
    working_copy: Option<PathBuf>,
    svn_info: BTreeMap<String, String>,
}

/// Execute the `info` command.
///
/// A missing working copy or `svn` client is reported, not treated as an
/// error.
pub fn execute(args: InfoArgs, context: &Context) -> Result<()> {
    let config = context.load_config()?;

    let cwd = std::env::current_dir()?;
    let svn_version = SvnClient::new(ProcessRunner, &cwd).version();
    let tortoise = TortoiseLauncher::locate();

    let working_copy = match resolve_working_copy(args.working_copy, &config) {
        Ok(path) => Some(path),
        Err(e) => {
            debug!("No working copy: {}", e);
            None
        }
    };

    let svn_info = match (&working_copy, &svn_version) {
        (Some(path), Some(_)) => match open_manager(path)?.working_copy_info() {
            Ok(info) => info,
            Err(e) => {
                warn!("Cannot read svn info: {}", e);
                BTreeMap::new()
            }
        },
        _ => BTreeMap::new(),
    };

    let report = Report {
        config_file: context.store.path().to_path_buf(),
        svn_version,
        tortoise: tortoise.executable().map(PathBuf::from),
        working_copy,
        svn_info,
    };

    if args.json {
        return print_json(&report);
    }
    print!("{}", render_report(&report));
    Ok(())
}

fn render_report(report: &Report) -> String {
    let or_missing = |value: Option<String>| value.unwrap_or_else(|| "not found".to_string());

    let mut text = String::new();
    text.push_str(&format!("Config file:  {}\n", report.config_file.display()));
    text.push_str(&format!("svn:          {}\n", or_missing(report.svn_version.clone())));
    text.push_str(&format!(
        "TortoiseSVN:  {}\n",
        or_missing(report.tortoise.as_ref().map(|p| p.display().to_string()))
    ));
    text.push_str(&format!(
        "Working copy: {}\n",
        report
            .working_copy
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none selected".to_string())
    ));

    if !report.svn_info.is_empty() {
        text.push('\n');
        for (key, value) in &report.svn_info {
            text.push_str(&format!("  {}: {}\n", key, value));
        }
    }
    text
}
