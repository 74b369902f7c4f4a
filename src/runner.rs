//! Running external commands with a time limit.
//!
//! [`CommandRunner`] is the seam between the library and the `svn` client.
//! The [`ProcessRunner`] implementation spawns real processes; tests swap in
//! a scripted runner instead.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use log::debug;

use crate::error::{Error, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Trait for running external commands - allows mocking in tests
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` in `cwd`, killing it after `timeout`.
    fn run(&self, program: &str, args: &[&str], cwd: &Path, timeout: Duration)
        -> Result<CommandOutput>;
}

/// Runs commands as child processes of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Path,
        timeout: Duration,
    ) -> Result<CommandOutput> {
        let command_line = describe(program, args);
        debug!("Running {} in {}", command_line, cwd.display());

        let mut child = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error(program, e))?;

        // Drain both pipes while waiting so a chatty child cannot block on a
        // full pipe buffer.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match wait_with_deadline(&mut child, timeout) {
            Wait::Exited(status) => status,
            Wait::TimedOut => {
                debug!("Killed {} after {:?}", command_line, timeout);
                return Err(Error::CommandTimeout {
                    command: command_line,
                    seconds: timeout.as_secs(),
                });
            }
        };

        Ok(CommandOutput {
            status,
            stdout: stdout.join().unwrap_or_default(),
            stderr: stderr.join().unwrap_or_default(),
        })
    }
}

/// Human-readable command line used in logs and errors.
pub fn describe(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

fn spawn_error(program: &str, err: std::io::Error) -> Error {
    let hint = (err.kind() == std::io::ErrorKind::NotFound)
        .then(|| format!("Make sure '{}' is installed and on your PATH", program));
    Error::CommandSpawn {
        program: program.to_string(),
        message: err.to_string(),
        hint,
    }
}

fn drain<R>(pipe: Option<R>) -> thread::JoinHandle<String>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buffer);
        }
        String::from_utf8_lossy(&buffer).into_owned()
    })
}

enum Wait {
    Exited(Option<i32>),
    TimedOut,
}

/// Wait for `child`, killing it once `timeout` has elapsed.
fn wait_with_deadline(child: &mut Child, timeout: Duration) -> Wait {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Wait::Exited(status.code()),
            Ok(None) if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Wait::TimedOut;
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(_) => return Wait::Exited(child.wait().ok().and_then(|s| s.code())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(describe("svn", &["log", "-r1:HEAD"]), "svn log -r1:HEAD");
        assert_eq!(describe("svn", &[]), "svn");
    }

    #[test]
    fn test_command_output_success() {
        let ok = CommandOutput {
            status: Some(0),
            ..Default::default()
        };
        let failed = CommandOutput {
            status: Some(1),
            ..Default::default()
        };
        assert!(ok.success());
        assert!(!failed.success());
        assert!(!CommandOutput::default().success());
    }

    #[test]
    fn test_missing_program_reports_hint() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = ProcessRunner
            .run(
                "svn-externals-no-such-program",
                &[],
                temp.path(),
                Duration::from_secs(5),
            )
            .unwrap_err();
        assert!(matches!(err, Error::CommandSpawn { hint: Some(_), .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_process_runner_captures_output() {
        let temp = tempfile::TempDir::new().unwrap();
        let output = ProcessRunner
            .run(
                "sh",
                &["-c", "echo out; echo err >&2; exit 3"],
                temp.path(),
                Duration::from_secs(10),
            )
            .unwrap();
        assert_eq!(output.status, Some(3));
        assert_eq!(output.stdout, "out\n");
        assert_eq!(output.stderr, "err\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_process_runner_times_out() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = ProcessRunner
            .run("sleep", &["5"], temp.path(), Duration::from_millis(100))
            .unwrap_err();
        assert!(matches!(err, Error::CommandTimeout { .. }));
    }
}
