//! Typed wrappers around the `svn` command-line client.
//!
//! This uses the system `svn` command, so authentication, proxies and
//! client configuration from `~/.subversion` apply exactly as they do on
//! the command line.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use log::{debug, warn};
use regex::Regex;

use crate::error::{Error, Result};
use crate::runner::{describe, CommandOutput, CommandRunner};

/// Program name of the Subversion client.
pub const SVN_PROGRAM: &str = "svn";

const VERSION_TIMEOUT: Duration = Duration::from_secs(5);
const INFO_TIMEOUT: Duration = Duration::from_secs(10);
const PROPGET_TIMEOUT: Duration = Duration::from_secs(30);
const LOG_TIMEOUT: Duration = Duration::from_secs(60);

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"version (\d+\.\d+(?:\.\d+)?)").expect("version pattern is valid")
});

/// Runs `svn` subcommands inside one working copy.
#[derive(Debug, Clone)]
pub struct SvnClient<R> {
    runner: R,
    program: String,
    working_copy: PathBuf,
}

impl<R: CommandRunner> SvnClient<R> {
    pub fn new(runner: R, working_copy: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            program: SVN_PROGRAM.to_string(),
            working_copy: working_copy.into(),
        }
    }

    /// Use a different client executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn working_copy(&self) -> &Path {
        &self.working_copy
    }

    pub fn set_working_copy(&mut self, working_copy: PathBuf) {
        self.working_copy = working_copy;
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Whether the client can be started at all.
    pub fn is_available(&self) -> bool {
        self.exec(&["--version", "--quiet"], VERSION_TIMEOUT)
            .map(|output| output.success())
            .unwrap_or(false)
    }

    /// Client version such as `1.14.2`, if the client runs.
    pub fn version(&self) -> Option<String> {
        let output = self.exec(&["--version"], VERSION_TIMEOUT).ok()?;
        if !output.success() {
            return None;
        }
        VERSION_PATTERN
            .captures(&output.stdout)
            .map(|caps| caps[1].to_string())
    }

    /// Recursive `svn:externals` listing of the working copy.
    ///
    /// With `pristine` the `BASE` revision of the property is read instead
    /// of the locally edited one.
    pub fn propget_externals(&self, pristine: bool) -> Result<String> {
        let mut args = vec!["propget", "svn:externals", "-R", "."];
        if pristine {
            args.extend(["-r", "BASE"]);
        }
        self.checked(&args, PROPGET_TIMEOUT)
    }

    /// Repository root URL, used to resolve `^/` references.
    pub fn repository_root(&self) -> Option<String> {
        match self.checked(&["info", "--show-item", "repos-root-url", "."], INFO_TIMEOUT) {
            Ok(stdout) => Some(stdout.trim().to_string()).filter(|root| !root.is_empty()),
            Err(err) => {
                warn!("Cannot determine repository root: {}", err);
                None
            }
        }
    }

    /// `svn info` of the working copy as key/value pairs.
    pub fn info(&self) -> Result<BTreeMap<String, String>> {
        let stdout = self.checked(&["info", "."], INFO_TIMEOUT)?;
        Ok(parse_info(&stdout))
    }

    /// `svn log --xml` between two revisions, inclusive.
    pub fn log_xml(&self, url: &str, old_rev: &str, new_rev: &str) -> Result<String> {
        let range = format!(
            "-r{}:{}",
            canonical_revision(old_rev),
            canonical_revision(new_rev)
        );
        self.checked(&["log", range.as_str(), url, "--xml"], LOG_TIMEOUT)
    }

    fn exec(&self, args: &[&str], timeout: Duration) -> Result<CommandOutput> {
        self.runner
            .run(&self.program, args, &self.working_copy, timeout)
    }

    /// Run and require a zero exit status, returning stdout.
    fn checked(&self, args: &[&str], timeout: Duration) -> Result<String> {
        let output = self.exec(args, timeout)?;
        if output.success() {
            return Ok(output.stdout);
        }

        let command = describe(&self.program, args);
        debug!(
            "{} exited with {:?}\nstdout: {}",
            command, output.status, output.stdout
        );
        Err(Error::SvnCommand {
            command,
            stderr: output.stderr.trim().to_string(),
        })
    }
}

/// `head` in any letter case becomes `HEAD`; other revisions pass through.
pub fn canonical_revision(revision: &str) -> &str {
    let revision = revision.trim();
    if revision.eq_ignore_ascii_case("HEAD") {
        "HEAD"
    } else {
        revision
    }
}

/// Parse `Key: value` lines.
pub fn parse_info(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedRunner;
    use super::*;

    fn client(runner: ScriptedRunner) -> SvnClient<ScriptedRunner> {
        SvnClient::new(runner, "/wc")
    }

    #[test]
    fn test_canonical_revision() {
        assert_eq!(canonical_revision("head"), "HEAD");
        assert_eq!(canonical_revision("Head"), "HEAD");
        assert_eq!(canonical_revision(" 42 "), "42");
        assert_eq!(canonical_revision("BASE"), "BASE");
    }

    #[test]
    fn test_parse_info() {
        let info = parse_info(
            "Path: .\nURL: https://host/repo/trunk\nRepository Root: https://host/repo\n\nRevision: 120\n",
        );
        assert_eq!(info["URL"], "https://host/repo/trunk");
        assert_eq!(info["Repository Root"], "https://host/repo");
        assert_eq!(info["Revision"], "120");
        assert_eq!(info.len(), 4);
    }

    #[test]
    fn test_propget_working_and_pristine() {
        let svn = client(
            ScriptedRunner::new()
                .ok("propget svn:externals -R .", "working")
                .ok("propget svn:externals -R . -r BASE", "base"),
        );
        assert_eq!(svn.propget_externals(false).unwrap(), "working");
        assert_eq!(svn.propget_externals(true).unwrap(), "base");
    }

    #[test]
    fn test_propget_failure() {
        let svn = client(
            ScriptedRunner::new().fail("propget svn:externals -R .", "svn: E155007: not a working copy\n"),
        );
        let err = svn.propget_externals(false).unwrap_err();
        match err {
            Error::SvnCommand { command, stderr } => {
                assert_eq!(command, "svn propget svn:externals -R .");
                assert_eq!(stderr, "svn: E155007: not a working copy");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_failure_names_configured_program() {
        let svn = client(ScriptedRunner::new().fail("info .", "boom"))
            .with_program("/opt/svn/bin/svn");
        match svn.info().unwrap_err() {
            Error::SvnCommand { command, .. } => assert_eq!(command, "/opt/svn/bin/svn info ."),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_log_xml_canonicalizes_head() {
        let runner = ScriptedRunner::new().ok("log -r10:HEAD https://host/repo --xml", "<log/>");
        let svn = client(runner);
        assert_eq!(svn.log_xml("https://host/repo", "10", "head").unwrap(), "<log/>");
    }

    #[test]
    fn test_repository_root() {
        let svn = client(
            ScriptedRunner::new().ok("info --show-item repos-root-url .", "https://host/repo\n"),
        );
        assert_eq!(svn.repository_root().as_deref(), Some("https://host/repo"));
    }

    #[test]
    fn test_repository_root_failure_is_none() {
        let svn = client(ScriptedRunner::new().fail("info --show-item repos-root-url .", "E155007"));
        assert_eq!(svn.repository_root(), None);
    }

    #[test]
    fn test_version_and_availability() {
        let svn = client(
            ScriptedRunner::new()
                .ok("--version", "svn, version 1.14.2 (r1899510)\n   compiled Mar 1 2024\n")
                .ok("--version --quiet", "1.14.2\n"),
        );
        assert!(svn.is_available());
        assert_eq!(svn.version().as_deref(), Some("1.14.2"));
    }

    #[test]
    fn test_unavailable_client() {
        let svn = client(ScriptedRunner::new());
        assert!(!svn.is_available());
        assert_eq!(svn.version(), None);
    }
}
