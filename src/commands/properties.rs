//! # Properties Command Implementation
//!
//! Opens the TortoiseSVN properties dialog, where `svn:externals` of a
//! directory can be edited. Relative paths are taken relative to the working
//! copy, so the parent path printed by `externals --json` can be passed
//! as is.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use svn_externals::defaults::WORKING_COPY_ENV;
use svn_externals::launcher::TortoiseLauncher;
use svn_externals::suggestions;

use super::{resolve_working_copy, Context};

/// Open the TortoiseSVN properties dialog for a directory
#[derive(Args, Debug)]
pub struct PropertiesArgs {
    /// Directory whose properties to edit, relative to the working copy.
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Working copy containing PATH.
    #[arg(short = 'C', long, value_name = "DIR", env = WORKING_COPY_ENV)]
    pub working_copy: Option<PathBuf>,
}

/// Execute the `properties` command.
pub fn execute(args: PropertiesArgs, context: &Context) -> Result<()> {
    let launcher = TortoiseLauncher::locate();
    if !launcher.is_available() {
        return Err(suggestions::tortoise_unavailable());
    }

    let target = if args.path.is_absolute() {
        args.path
    } else {
        let config = context.load_config()?;
        resolve_working_copy(args.working_copy, &config)?.join(&args.path)
    };

    launcher.open_properties(&target)?;
    println!("Opened properties dialog for {}", target.display());
    Ok(())
}
