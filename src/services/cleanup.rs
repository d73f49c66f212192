//! Cleanup script invocation

use std::{
    path::{Path, PathBuf},
    process::{ExitStatus, Stdio},
    time::{Duration, Instant},
};
use tokio::process::Command;
use tracing::{debug, info};

/// Errors from a single cleanup run
#[derive(Debug, thiserror::Error)]
pub enum CleanupError {
    #[error("Failed to launch cleanup script {}: {source}", .path.display())]
    Launch {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cleanup script {} failed with {status}: {stderr}", .path.display())]
    Failed {
        path: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Cleanup script {} did not finish within {}s", .path.display(), .after.as_secs())]
    TimedOut { path: PathBuf, after: Duration },
}

/// Captured result of a successful cleanup run
#[derive(Debug, Clone)]
pub struct CleanupReport {
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

/// The external executable run when the timer expires
#[derive(Debug, Clone)]
pub struct CleanupScript {
    path: PathBuf,
    timeout: Option<Duration>,
}

impl CleanupScript {
    /// Script with no time limit
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            timeout: None,
        }
    }

    /// Kill the script and report failure if it runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Run the script with no arguments and wait for it to exit.
    ///
    /// Output is captured rather than streamed. A zero exit code is success.
    pub async fn run(&self) -> Result<CleanupReport, CleanupError> {
        info!("Running cleanup script {}", self.path.display());
        let started = Instant::now();

        let mut command = Command::new(&self.path);
        command.stdin(Stdio::null()).kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, command.output())
                .await
                .map_err(|_| CleanupError::TimedOut {
                    path: self.path.clone(),
                    after: limit,
                })?,
            None => command.output().await,
        }
        .map_err(|source| CleanupError::Launch {
            path: self.path.clone(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(CleanupError::Failed {
                path: self.path.clone(),
                status: output.status,
                stderr,
            });
        }

        if !stdout.is_empty() {
            debug!("Cleanup script output: {}", stdout);
        }

        Ok(CleanupReport {
            stdout,
            stderr,
            elapsed: started.elapsed(),
        })
    }

    /// Check that the script exists and looks runnable
    pub fn check_available(&self) -> Result<(), String> {
        let metadata = std::fs::metadata(&self.path)
            .map_err(|e| format!("Cleanup script {} is not accessible: {}", self.path.display(), e))?;

        if !metadata.is_file() {
            return Err(format!("Cleanup script {} is not a file", self.path.display()));
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if metadata.permissions().mode() & 0o111 == 0 {
                return Err(format!("Cleanup script {} is not executable", self.path.display()));
            }
        }

        debug!("Cleanup script {} is available", self.path.display());
        Ok(())
    }
}


#[cfg(all(test, unix))]
mod tests {
    use super::test_support::*;
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_successful_script_captures_output() {
        let dir = TempDir::new().unwrap();
        let path = write_script(dir.path(), "ok.sh", "echo cleaned\necho note >&2");

        let report = CleanupScript::new(&path).run().await.unwrap();

        assert_eq!(report.stdout, "cleaned");
        assert_eq!(report.stderr, "note");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_failure() {
        let dir = TempDir::new().unwrap();
        let path = write_script(dir.path(), "fail.sh", "echo disk busy >&2\nexit 3");

        let err = CleanupScript::new(&path).run().await.unwrap_err();

        match err {
            CleanupError::Failed { status, stderr, .. } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "disk busy");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_script_is_launch_failure() {
        let dir = TempDir::new().unwrap();
        let script = CleanupScript::new(dir.path().join("absent.sh"));

        assert!(matches!(script.run().await, Err(CleanupError::Launch { .. })));
        assert!(script.check_available().is_err());
    }

    #[tokio::test]
    async fn test_script_runs_without_arguments() {
        let dir = TempDir::new().unwrap();
        let path = write_script(dir.path(), "args.sh", "echo \"$#\"");

        let report = CleanupScript::new(&path).run().await.unwrap();

        assert_eq!(report.stdout, "0");
    }

    #[tokio::test]
    async fn test_timeout_kills_slow_script() {
        let dir = TempDir::new().unwrap();
        let path = write_script(dir.path(), "slow.sh", "sleep 5");
        let script = CleanupScript::new(&path).with_timeout(Some(Duration::from_millis(200)));

        let started = Instant::now();
        let result = script.run().await;

        assert!(matches!(result, Err(CleanupError::TimedOut { .. })));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_check_available_rejects_non_executable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.sh");
        std::fs::write(&path, "#!/bin/sh\n").unwrap();

        assert!(CleanupScript::new(&path).check_available().is_err());

        let runnable = write_script(dir.path(), "runnable.sh", "exit 0");
        assert!(CleanupScript::new(&runnable).check_available().is_ok());
    }
}
