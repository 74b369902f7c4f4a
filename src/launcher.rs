//! TortoiseSVN desktop integration.
//!
//! TortoiseSVN edits `svn:externals` through its properties dialog. The
//! dialog is opened with `TortoiseProc.exe /command:properties /path:<dir>`
//! and left running on its own; this process does not wait for it.

use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::error::{Error, Result};

/// Executable name of the TortoiseSVN command processor.
pub const TORTOISE_PROC: &str = "TortoiseProc.exe";

const DEFAULT_INSTALL_DIRS: &[&str] = &[
    r"C:\Program Files\TortoiseSVN\bin",
    r"C:\Program Files (x86)\TortoiseSVN\bin",
];

/// Handle to a located `TortoiseProc.exe`, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TortoiseLauncher {
    executable: Option<PathBuf>,
}

impl TortoiseLauncher {
    /// Search `PATH`, then the default install directories.
    pub fn locate() -> Self {
        let path_dirs = env::var_os("PATH")
            .map(|paths| env::split_paths(&paths).collect::<Vec<_>>())
            .unwrap_or_default();
        let install_dirs = DEFAULT_INSTALL_DIRS.iter().map(PathBuf::from);
        Self::locate_in(path_dirs.into_iter().chain(install_dirs))
    }

    /// Search only `dirs`, in order.
    pub fn locate_in<I>(dirs: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let executable = dirs
            .into_iter()
            .map(|dir| dir.join(TORTOISE_PROC))
            .find(|candidate| candidate.is_file());
        match &executable {
            Some(path) => debug!("Found {} at {}", TORTOISE_PROC, path.display()),
            None => debug!("{} not found", TORTOISE_PROC),
        }
        Self { executable }
    }

    pub fn executable(&self) -> Option<&Path> {
        self.executable.as_deref()
    }

    pub fn is_available(&self) -> bool {
        self.executable.is_some()
    }

    /// Open the properties dialog for `path` without waiting for it.
    pub fn open_properties(&self, path: &Path) -> Result<()> {
        let executable = self
            .executable
            .as_deref()
            .ok_or_else(|| Error::LauncherUnavailable {
                tool: TORTOISE_PROC.to_string(),
            })?;

        Command::new(executable)
            .args(properties_args(path))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::CommandSpawn {
                program: executable.display().to_string(),
                message: e.to_string(),
                hint: None,
            })?;

        info!("Opened TortoiseSVN properties for {}", path.display());
        Ok(())
    }
}

/// Arguments asking TortoiseSVN for the properties dialog of `path`.
pub fn properties_args(path: &Path) -> [String; 2] {
    [
        "/command:properties".to_string(),
        format!("/path:{}", path.display()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_locate_in_finds_executable() {
        let empty = TempDir::new().unwrap();
        let install = TempDir::new().unwrap();
        fs::write(install.path().join(TORTOISE_PROC), "").unwrap();

        let launcher = TortoiseLauncher::locate_in([
            empty.path().to_path_buf(),
            install.path().to_path_buf(),
        ]);

        assert!(launcher.is_available());
        assert_eq!(
            launcher.executable(),
            Some(install.path().join(TORTOISE_PROC).as_path())
        );
    }

    #[test]
    fn test_locate_in_ignores_directories_named_like_executable() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(TORTOISE_PROC)).unwrap();

        let launcher = TortoiseLauncher::locate_in([temp.path().to_path_buf()]);
        assert!(!launcher.is_available());
    }

    #[test]
    fn test_open_properties_unavailable() {
        let launcher = TortoiseLauncher::default();
        let err = launcher.open_properties(Path::new("src")).unwrap_err();
        assert!(matches!(err, Error::LauncherUnavailable { .. }));
    }

    #[test]
    fn test_properties_args() {
        let args = properties_args(Path::new("src/app"));
        assert_eq!(args, ["/command:properties", "/path:src/app"]);
    }
}
