#![allow(clippy::result_large_err)] // Command failures carry full AppError context for CLI diagnostics.

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use crate::utils::redact_url;
use std::path::Path;
use std::process::Command;

/// Captured outcome of one external process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs external commands without shell interpretation.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    env: Vec<(String, String)>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an environment variable for every command run by this runner.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Run `argv` and fail with `CommandFailed` on a non-zero exit.
    pub fn run(&self, argv: &[&str], cwd: Option<&Path>) -> Result<CommandResult, AppError> {
        self.run_with(argv, cwd, true)
    }

    /// Run `argv`; when `check` is false a non-zero exit is returned as data.
    pub fn run_with(
        &self,
        argv: &[&str],
        cwd: Option<&Path>,
        check: bool,
    ) -> Result<CommandResult, AppError> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            AppError::new(ErrorCategory::ValidationError, "Empty command line")
        })?;
        let command_line = redact_url(&argv.join(" "));

        let mut command = Command::new(program);
        command.args(args);
        command.envs(self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        tracing::debug!(command = %command_line, cwd = ?cwd, "running command");

        let output = command.output().map_err(|e| {
            AppError::new(
                ErrorCategory::CommandFailed,
                format!("Failed to execute {}: {}", command_line, e),
            )
            .with_context("command", command_line.clone())
            .with_context("exit_code", "-1")
        })?;

        let result = CommandResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if check && !result.success() {
            let stderr = redact_url(&result.stderr);
            tracing::debug!(
                command = %command_line,
                exit_code = result.exit_code,
                "command failed"
            );
            return Err(AppError::new(
                ErrorCategory::CommandFailed,
                format!("Command failed: {}\n{}", command_line, stderr.trim_end()),
            )
            .with_context("command", command_line)
            .with_context("exit_code", result.exit_code.to_string())
            .with_context("stderr", stderr)
            .with_context("stdout", redact_url(&result.stdout)));
        }

        Ok(result)
    }
}
