//! # Externals Command Implementation
//!
//! Lists the `svn:externals` definitions of a working copy with the status
//! obtained by comparing the working property against `BASE`:
//!
//! ```text
//! changed lib          r11   https://host/repo/lib
//!         revision: 10 -> 11
//! new     docs         HEAD  https://host/repo/docs
//! clean   tools        HEAD  https://host/repo/tools
//! ```
//!
//! This command is read-only.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use svn_externals::defaults::WORKING_COPY_ENV;
use svn_externals::definition::{ChangeDetail, ExternalDefinition};
use svn_externals::output::{status_label, OutputConfig};

use super::{open_manager, print_json, resolve_working_copy, Context};

/// List externals of a working copy with their status
#[derive(Args, Debug)]
pub struct ExternalsArgs {
    /// Only show externals whose definition is new or changed.
    #[arg(long)]
    pub changed: bool,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Working copy to inspect.
    ///
    /// Defaults to the active working copy from the settings file, then the
    /// current directory.
    #[arg(short = 'C', long, value_name = "DIR", env = WORKING_COPY_ENV)]
    pub working_copy: Option<PathBuf>,
}

/// Execute the `externals` command.
pub fn execute(args: ExternalsArgs, context: &Context) -> Result<()> {
    let config = context.load_config()?;
    let working_copy = resolve_working_copy(args.working_copy, &config)?;
    let manager = open_manager(&working_copy)?;

    let externals = if args.changed {
        manager.changed_externals()
    } else {
        manager.externals()
    };

    if args.json {
        return print_json(&externals);
    }

    if externals.is_empty() {
        if args.changed {
            println!("No changed externals.");
        } else {
            println!("No externals defined.");
        }
        return Ok(());
    }

    print!("{}", render_table(&externals, &context.output));
    Ok(())
}

fn revision_label(ext: &ExternalDefinition) -> String {
    if ext.revision.chars().all(|c| c.is_ascii_digit()) {
        format!("r{}", ext.revision)
    } else {
        ext.revision.clone()
    }
}

/// One row per external, followed by indented change details.
fn render_table(externals: &[ExternalDefinition], output: &OutputConfig) -> String {
    let path_width = externals
        .iter()
        .map(|ext| ext.full_path.chars().count())
        .max()
        .unwrap_or(0);
    let revision_width = externals
        .iter()
        .map(|ext| revision_label(ext).len())
        .max()
        .unwrap_or(0);

    let mut table = String::new();
    for ext in externals {
        table.push_str(&format!(
            "{} {:<path_width$}  {:<revision_width$}  {}\n",
            status_label(output, ext.status),
            ext.full_path,
            revision_label(ext),
            ext.url,
        ));

        if let Some(ChangeDetail::Modified(fields)) = &ext.change_detail {
            for (field, change) in fields {
                table.push_str(&format!(
                    "        {}: {} -> {}\n",
                    field, change.old, change.new
                ));
            }
        }
    }
    table
}
