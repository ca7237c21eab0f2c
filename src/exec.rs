//! Process execution behind an injectable [`Executor`] trait.
use anyhow::{Context as _, Result};
use std::path::Path;
use std::process::{Command, ExitStatus};

/// Result of a command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecResult {
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
}

impl ExecResult {
    /// A successful result (exit code 0).
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }

    /// A failed result with the given exit code.
    #[must_use]
    pub const fn failed(code: i32) -> Self {
        Self {
            success: false,
            code: Some(code),
        }
    }

    /// Short human-readable description of a non-zero outcome.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

impl From<ExitStatus> for ExecResult {
    fn from(status: ExitStatus) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
        }
    }
}

/// Abstraction over process execution.
///
/// Commands inherit the engine's stdio so that component scripts can show
/// progress and prompt the user. A non-zero exit is reported through
/// [`ExecResult::success`]; `Err` means the process could not be started.
#[cfg_attr(test, mockall::automock)]
pub trait Executor: Send + Sync {
    /// Run `program args…` in `dir` with extra environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    fn run_in_with_env(
        &self,
        dir: &Path,
        program: &str,
        args: &[String],
        env: &[(String, String)],
    ) -> Result<ExecResult>;

    /// Run a free-form command line through the platform shell in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell cannot be spawned.
    fn run_shell(&self, dir: &Path, command: &str, env: &[(String, String)])
    -> Result<ExecResult>;

    /// Check if a program is available on PATH.
    fn which(&self, program: &str) -> bool;
}

/// Production [`Executor`] that spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_in_with_env(
        &self,
        dir: &Path,
        program: &str,
        args: &[String],
        env: &[(String, String)],
    ) -> Result<ExecResult> {
        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(dir);
        for (k, v) in env {
            cmd.env(k, v);
        }
        let status = cmd
            .status()
            .with_context(|| format!("failed to execute: {program} in {}", dir.display()))?;
        Ok(ExecResult::from(status))
    }

    fn run_shell(
        &self,
        dir: &Path,
        command: &str,
        env: &[(String, String)],
    ) -> Result<ExecResult> {
        #[cfg(windows)]
        let mut cmd = {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", command]);
            cmd
        };
        #[cfg(not(windows))]
        let mut cmd = {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", command]);
            cmd
        };
        cmd.current_dir(dir);
        for (k, v) in env {
            cmd.env(k, v);
        }

        let status = cmd
            .status()
            .with_context(|| format!("failed to execute: {command}"))?;
        Ok(ExecResult::from(status))
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn describe_exit_code() {
        assert_eq!(ExecResult::failed(3).describe(), "exit code 3");
        let signalled = ExecResult {
            success: false,
            code: None,
        };
        assert_eq!(signalled.describe(), "terminated by signal");
    }

    #[cfg(unix)]
    #[test]
    fn run_shell_success() {
        let dir = tempfile::tempdir().unwrap();
        let result = SystemExecutor.run_shell(dir.path(), "true", &[]).unwrap();
        assert!(result.success);
        assert_eq!(result.code, Some(0));
    }

    #[cfg(unix)]
    #[test]
    fn run_shell_failure_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SystemExecutor.run_shell(dir.path(), "exit 4", &[]).unwrap();
        assert!(!result.success);
        assert_eq!(result.code, Some(4));
    }

    #[cfg(unix)]
    #[test]
    fn run_in_with_env_passes_environment() {
        let dir = tempfile::tempdir().unwrap();
        let args = vec![
            "-c".to_string(),
            "test \"$ENGINE_MANAGED\" = 1 && test \"$PWD\" = \"$EXPECTED_DIR\"".to_string(),
        ];
        let canonical = dunce::canonicalize(dir.path()).unwrap();
        let env = vec![
            ("ENGINE_MANAGED".to_string(), "1".to_string()),
            (
                "EXPECTED_DIR".to_string(),
                canonical.to_string_lossy().into_owned(),
            ),
        ];
        let result = SystemExecutor
            .run_in_with_env(&canonical, "sh", &args, &env)
            .unwrap();
        assert!(result.success, "env and working directory should be applied");
    }

    #[cfg(unix)]
    #[test]
    fn run_shell_applies_environment() {
        let dir = tempfile::tempdir().unwrap();
        let env = vec![("ENGINE_ROOT".to_string(), "/opt/engine".to_string())];
        let result = SystemExecutor
            .run_shell(dir.path(), "test \"$ENGINE_ROOT\" = /opt/engine", &env)
            .unwrap();
        assert!(result.success);
    }

    #[test]
    fn run_in_with_env_missing_program_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = SystemExecutor.run_in_with_env(
            dir.path(),
            "this-program-does-not-exist-12345",
            &[],
            &[],
        );
        assert!(result.is_err(), "spawn failure should be an error");
    }

    #[test]
    fn which_missing_program() {
        assert!(!SystemExecutor.which("this-program-does-not-exist-12345"));
    }
}
