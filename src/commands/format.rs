//! # Format Command Implementation
//!
//! Re-renders log records saved earlier (for example with
//! `svn-externals log --json`) without contacting the repository. Input is a
//! JSON array of objects with `revision`, `author`, `date` and `message`.
//!
//! ```bash
//! svn-externals log --url ^/lib --from 10 --json > lib.json
//! svn-externals format --input lib.json --format tortoise
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Args;

use svn_externals::log_entry::{self, LogRecord, RawLogEntry};

use super::{Context, RenderOptions};

/// Format stored log records read from JSON
#[derive(Args, Debug)]
pub struct FormatArgs {
    /// JSON file with log records, `-` for stdin.
    #[arg(short, long, value_name = "FILE", default_value = "-")]
    pub input: PathBuf,

    #[command(flatten)]
    pub render: RenderOptions,
}

/// Execute the `format` command.
pub fn execute(args: FormatArgs, context: &Context) -> Result<()> {
    let config = context.load_config()?;
    let records = read_records(&args.input)?;
    println!("{}", args.render.render(&records, &config).trim_end());
    Ok(())
}

fn read_records(input: &Path) -> Result<Vec<LogRecord>> {
    let (source, text) = if input == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read log records from stdin")?;
        ("stdin".to_string(), text)
    } else {
        let text = fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        (input.display().to_string(), text)
    };

    parse_records(&text).with_context(|| {
        format!(
            "Invalid log records in {}\n  hint: Expected a JSON array of {{\"revision\", \"author\", \"date\", \"message\"}} objects",
            source
        )
    })
}

/// Stored records go through the same decoding as a live log feed.
fn parse_records(text: &str) -> serde_json::Result<Vec<LogRecord>> {
    let entries: Vec<RawLogEntry> = serde_json::from_str(text)?;
    Ok(log_entry::decode(entries))
}
