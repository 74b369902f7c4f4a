//! # Working Copies Command Implementation
//!
//! Lists the working copies found directly inside the projects directory and
//! marks the active one. `--activate` stores a working copy as the default
//! for later commands.

use std::path::{self, Path, PathBuf};

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use svn_externals::discovery::{discover_working_copies, WorkingCopyEntry};
use svn_externals::manager::is_working_copy;
use svn_externals::suggestions;

use super::{print_json, Context};

/// List or activate working copies in the projects directory
#[derive(Args, Debug)]
pub struct WorkingCopiesArgs {
    /// Directory to scan. Defaults to the configured projects directory.
    #[arg(value_name = "DIR", conflicts_with = "activate")]
    pub directory: Option<PathBuf>,

    /// Make this working copy the active one.
    #[arg(long, value_name = "PATH")]
    pub activate: Option<PathBuf>,

    /// Print JSON instead of a list.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Listing<'a> {
    projects_directory: &'a Path,
    active_path: Option<&'a Path>,
    working_copies: &'a [WorkingCopyEntry],
}

/// Execute the `working-copies` command.
pub fn execute(args: WorkingCopiesArgs, context: &Context) -> Result<()> {
    if let Some(path) = args.activate {
        return activate(&path, context);
    }

    let config = context.load_config()?;
    let directory = args
        .directory
        .or_else(|| config.projects_directory.clone())
        .ok_or_else(suggestions::no_projects_directory)?;
    if !directory.is_dir() {
        return Err(suggestions::projects_directory_invalid(&directory));
    }

    let working_copies = discover_working_copies(&directory);
    let active = config.active_working_copy_path.as_deref();

    if args.json {
        return print_json(&Listing {
            projects_directory: &directory,
            active_path: active,
            working_copies: &working_copies,
        });
    }

    if working_copies.is_empty() {
        println!("No working copies found in {}", directory.display());
        return Ok(());
    }

    for entry in &working_copies {
        let marker = if active == Some(entry.path.as_path()) {
            "*"
        } else {
            " "
        };
        println!("{} {:<24} {}", marker, entry.name, entry.path.display());
    }
    Ok(())
}

fn activate(path: &Path, context: &Context) -> Result<()> {
    let path = path::absolute(path)?;
    if !is_working_copy(&path) {
        return Err(suggestions::not_a_working_copy(&path));
    }

    context
        .store
        .update(|config| config.active_working_copy_path = Some(path.clone()))?;
    println!("Active working copy: {}", path.display());
    Ok(())
}
