//! Shared test utilities for E2E tests.
//!
//! Every command built here is isolated from the machine it runs on: the
//! settings file lives in the fixture's temporary directory and the
//! working-copy and logging environment variables are cleared.
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_working_copy("app");
//!     fixture.command().arg("working-copies").arg(fixture.path()).assert().success();
//! }
//! ```

use std::path::{Path, PathBuf};

use assert_fs::prelude::*;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    pub use super::TestFixture;
}

/// Log records in the JSON shape accepted by `svn-externals format`.
#[allow(dead_code)]
pub const LOG_RECORDS: &str = r#"[
  {"revision": "10", "author": "alice", "date": "2024-03-01 10:00:00", "message": "Add parser\n\nWith tests."},
  {"revision": "11", "author": "bob", "date": "2024-03-02 11:30:00", "message": "Fix overflow"}
]"#;

/// A temporary directory holding the settings file and any working copies.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a directory that looks like a working copy (it has `.svn`).
    pub fn with_working_copy(self, name: &str) -> Self {
        self.temp_dir
            .child(name)
            .child(".svn")
            .create_dir_all()
            .expect("Failed to create working copy");
        self
    }

    /// Write the settings file.
    #[allow(dead_code)]
    pub fn with_settings(self, json: &str) -> Self {
        self.temp_dir
            .child("settings.json")
            .write_str(json)
            .expect("Failed to write settings file");
        self
    }

    /// Add a file with the given path and content.
    #[allow(dead_code)]
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the isolated settings file.
    pub fn settings_path(&self) -> PathBuf {
        self.temp_dir.path().join("settings.json")
    }

    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command running in this fixture with its own settings file.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("svn-externals");
        cmd.current_dir(self.path())
            .env("SVN_EXTERNALS_CONFIG", self.settings_path())
            .env_remove("SVN_EXTERNALS_WORKING_COPY")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    /// Install a fake `svn` executable answering the given argument lines,
    /// and return the directory to prepend to `PATH`.
    ///
    /// Each answer maps the space-joined arguments to stdout. Anything else
    /// exits with status 1.
    #[cfg(unix)]
    #[allow(dead_code)]
    pub fn with_fake_svn(&self, answers: &[(&str, &str)]) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let mut script = String::from("#!/bin/sh\ncase \"$*\" in\n");
        for (args, stdout) in answers {
            script.push_str(&format!("  \"{}\")\n    cat <<'EOF'\n{}\nEOF\n    ;;\n", args, stdout));
        }
        script.push_str("  *)\n    echo \"svn: E205000: unexpected arguments: $*\" >&2\n    exit 1\n    ;;\nesac\n");

        let bin = self.temp_dir.child("fake-bin");
        bin.create_dir_all().expect("Failed to create fake bin dir");
        let svn = bin.child("svn");
        svn.write_str(&script).expect("Failed to write fake svn");
        std::fs::set_permissions(svn.path(), std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake svn executable");
        bin.path().to_path_buf()
    }

    /// Command whose `PATH` starts with `bin`.
    #[cfg(unix)]
    #[allow(dead_code)]
    pub fn command_with_path(&self, bin: &Path) -> assert_cmd::Command {
        let path = std::env::var_os("PATH").unwrap_or_default();
        let mut dirs = vec![bin.to_path_buf()];
        dirs.extend(std::env::split_paths(&path));
        let joined = std::env::join_paths(dirs).expect("Failed to build PATH");

        let mut cmd = self.command();
        cmd.env("PATH", joined);
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
