//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use svn_externals::config::ConfigStore;
use svn_externals::defaults::CONFIG_ENV;
use svn_externals::output::OutputConfig;

use crate::commands;

/// svn-externals - Inspect Subversion externals and build changelogs
#[derive(Parser, Debug)]
#[command(name = "svn-externals")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    ///
    /// RUST_LOG takes precedence when set.
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    /// Path to the settings file.
    ///
    /// Defaults to `svn-externals/config.json` in the platform config
    /// directory.
    #[arg(long, global = true, value_name = "FILE", env = CONFIG_ENV)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List externals of a working copy with their status
    Externals(commands::externals::ExternalsArgs),

    /// Fetch and format the log of a URL between two revisions
    Log(commands::changelog::LogArgs),

    /// Format stored log records read from JSON
    Format(commands::format::FormatArgs),

    /// List or activate working copies in the projects directory
    WorkingCopies(commands::working_copies::WorkingCopiesArgs),

    /// Show or change persistent settings
    Config(commands::config::ConfigArgs),

    /// Show tool availability and working copy information
    Info(commands::info::InfoArgs),

    /// Open the TortoiseSVN properties dialog for a directory
    Properties(commands::properties::PropertiesArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let context = commands::Context {
            store: self
                .config
                .map(ConfigStore::new)
                .unwrap_or_else(ConfigStore::at_default_location),
            output: OutputConfig::from_env_and_flag(&self.color),
        };

        match self.command {
            Commands::Externals(args) => commands::externals::execute(args, &context),
            Commands::Log(args) => commands::changelog::execute(args, &context),
            Commands::Format(args) => commands::format::execute(args, &context),
            Commands::WorkingCopies(args) => commands::working_copies::execute(args, &context),
            Commands::Config(args) => commands::config::execute(args, &context),
            Commands::Info(args) => commands::info::execute(args, &context),
            Commands::Properties(args) => commands::properties::execute(args, &context),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Log to stderr at `level` unless `RUST_LOG` says otherwise.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
