//! # Log Command Implementation
//!
//! Fetches `svn log` for a URL between two revisions and prints it as a
//! changelog. The URL may be repository-root relative (`^/libs/common`) or
//! contain `..` segments; both are resolved before the log is requested.
//!
//! ```bash
//! svn-externals log --url ^/libs/common --from 120 --to HEAD --format markdown
//! ```
//!
//! With `--json` the decoded records are printed instead, ready to be fed
//! back into `svn-externals format`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use svn_externals::defaults::WORKING_COPY_ENV;
use svn_externals::suggestions;

use super::{open_manager, print_json, resolve_working_copy, Context, RenderOptions};

/// Fetch and format the log of a URL between two revisions
#[derive(Args, Debug)]
pub struct LogArgs {
    /// Repository URL, `^/` relative URLs included.
    #[arg(long)]
    pub url: String,

    /// First revision of the range.
    #[arg(long, value_name = "REV")]
    pub from: String,

    /// Last revision of the range.
    #[arg(long, value_name = "REV", default_value = "HEAD")]
    pub to: String,

    #[command(flatten)]
    pub render: RenderOptions,

    /// Print the decoded log records as JSON.
    #[arg(long)]
    pub json: bool,

    /// Working copy used to run `svn` and resolve `^/` URLs.
    #[arg(short = 'C', long, value_name = "DIR", env = WORKING_COPY_ENV)]
    pub working_copy: Option<PathBuf>,
}

/// Execute the `log` command.
pub fn execute(args: LogArgs, context: &Context) -> Result<()> {
    let config = context.load_config()?;
    let working_copy = resolve_working_copy(args.working_copy, &config)?;
    let manager = open_manager(&working_copy)?;

    let records = manager
        .changelog(&args.url, &args.from, &args.to)
        .map_err(|e| suggestions::log_retrieval_failed(&args.url, &e))?;

    if args.json {
        return print_json(&records);
    }

    println!("{}", args.render.render(&records, &config).trim_end());
    Ok(())
}
