//! Default values for svn-externals configuration.
//!
//! Centralized so the CLI flags, the config store and the tests agree on
//! file locations and environment variable names.

use std::path::PathBuf;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "SVN_EXTERNALS_CONFIG";

/// Environment variable selecting the working copy for a single run.
pub const WORKING_COPY_ENV: &str = "SVN_EXTERNALS_WORKING_COPY";

/// File name of the JSON config file.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Returns the default config file path.
///
/// Uses the platform-appropriate config directory:
/// - Linux: `~/.config/svn-externals/config.json` (XDG Base Directory)
/// - macOS: `~/Library/Application Support/svn-externals/config.json`
/// - Windows: `{FOLDERID_RoamingAppData}\svn-externals\config.json`
///
/// Falls back to `.svn-externals/config.json` in the current directory if
/// the platform config directory cannot be determined.
///
/// This can be overridden by the `--config` CLI flag or the
/// `SVN_EXTERNALS_CONFIG` environment variable.
pub fn default_config_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("svn-externals").join(CONFIG_FILE_NAME),
        None => PathBuf::from(".svn-externals").join(CONFIG_FILE_NAME),
    }
}
