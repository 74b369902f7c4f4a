//! # svn-externals CLI
//!
//! Binary entry point. Parses arguments with `clap` and hands off to the
//! command implementations; everything else lives in the library crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
