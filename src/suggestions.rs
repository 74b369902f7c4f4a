//! # Error Suggestions
//!
//! Helpers that build user-facing errors for the CLI. Each error says what
//! went wrong and how to fix it, one `hint:` line per suggestion.
//!
//! ```rust,ignore
//! use crate::suggestions;
//!
//! return Err(suggestions::no_working_copy_selected());
//! ```

use std::path::Path;

use crate::changelog::ChangelogFormat;

/// No `-C`, no environment variable, no active working copy in the config.
pub fn no_working_copy_selected() -> anyhow::Error {
    anyhow::anyhow!(
        "No working copy selected\n\n\
         hint: Pass -C/--working-copy <DIR>\n\
         hint: Set the SVN_EXTERNALS_WORKING_COPY environment variable\n\
         hint: Run 'svn-externals working-copies --activate <DIR>' to remember one"
    )
}

/// The given directory is not a working copy.
pub fn not_a_working_copy(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Not an SVN working copy: {path}\n\n\
         hint: The directory must contain a .svn folder\n\
         hint: Run 'svn checkout <URL> {path}' to create one",
        path = path.display()
    )
}

/// The directory to scan for working copies does not exist.
pub fn projects_directory_invalid(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Path is not a valid directory: {path}\n\n\
         hint: Pass an existing directory that holds your checkouts",
        path = path.display()
    )
}

/// Listing working copies without a directory to scan.
pub fn no_projects_directory() -> anyhow::Error {
    anyhow::anyhow!(
        "No projects directory configured\n\n\
         hint: Pass the directory to scan: 'svn-externals working-copies <DIR>'\n\
         hint: Or store it: 'svn-externals config set-projects-dir <DIR>'"
    )
}

/// The `svn` client could not be started.
pub fn svn_unavailable() -> anyhow::Error {
    anyhow::anyhow!(
        "The svn command-line client is not available\n\n\
         hint: Install Subversion and make sure 'svn' is on your PATH\n\
         hint: On Windows, enable the command line tools in the TortoiseSVN installer"
    )
}

/// `svn log` or decoding its output failed.
pub fn log_retrieval_failed(url: &str, error: &dyn std::fmt::Display) -> anyhow::Error {
    anyhow::anyhow!(
        "Failed to retrieve log for {url}\n\
         error: {error}\n\n\
         hint: Check that the URL exists and both revisions are valid\n\
         hint: Run with --log-level debug to see the svn command line"
    )
}

/// TortoiseSVN was not found.
pub fn tortoise_unavailable() -> anyhow::Error {
    anyhow::anyhow!(
        "TortoiseSVN is not available\n\n\
         hint: Install TortoiseSVN from https://tortoisesvn.net\n\
         hint: Make sure TortoiseProc.exe is on your PATH"
    )
}

/// An unrecognized changelog format name.
///
/// Includes the list of valid formats.
pub fn unknown_format(name: &str) -> anyhow::Error {
    let valid: Vec<&str> = ChangelogFormat::ALL.iter().map(|f| f.as_str()).collect();

    let did_you_mean = find_similar(&name.to_lowercase(), &valid)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Unknown changelog format: {name}{did_you_mean}\n\n\
         Valid formats are: {formats}",
        formats = valid.join(", ")
    )
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            (distance <= 2 && distance < input.len()).then_some((candidate, distance))
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Levenshtein distance, computed over characters with a single row.
fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, a_char) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let substitution = diagonal + usize::from(a_char != *b_char);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(row[j + 1] + 1);
        }
    }

    row[b_chars.len()]
}
