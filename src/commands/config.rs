//! # Config Command Implementation
//!
//! Shows and edits the persistent settings file. Every change is written
//! immediately; keys this tool does not know about are preserved.

use std::path::{self, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};

use svn_externals::suggestions;

use super::{print_json, Context};

/// Show or change persistent settings
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the settings file location and contents
    Show,

    /// Set the directory scanned for working copies
    SetProjectsDir {
        /// Existing directory holding working copies
        #[arg(value_name = "DIR")]
        directory: PathBuf,
    },

    /// Choose whether tortoise changelogs keep only the first message line
    SetTruncate {
        #[arg(value_name = "BOOL", action = clap::ArgAction::Set)]
        enabled: bool,
    },
}

/// Execute the `config` command.
pub fn execute(args: ConfigArgs, context: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = context.load_config()?;
            println!("# {}", context.store.path().display());
            print_json(&config)
        }
        ConfigCommand::SetProjectsDir { directory } => {
            let directory = path::absolute(&directory)?;
            if !directory.is_dir() {
                return Err(suggestions::projects_directory_invalid(&directory));
            }
            context
                .store
                .update(|config| config.projects_directory = Some(directory.clone()))?;
            println!("Projects directory: {}", directory.display());
            Ok(())
        }
        ConfigCommand::SetTruncate { enabled } => {
            context
                .store
                .update(|config| config.truncate_tortoise_messages = enabled)?;
            println!("Truncate tortoise messages: {}", enabled);
            Ok(())
        }
    }
}
