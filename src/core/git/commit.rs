#![allow(clippy::result_large_err)] // Git commit helpers return AppError directly to preserve CLI diagnostics without boxing.

use super::GitIdentity;
use crate::core::command::CommandRunner;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::path::{Path, PathBuf};

/// Output fragments git prints when a commit has nothing to record.
const NOTHING_TO_COMMIT_MARKERS: [&str; 2] = ["nothing to commit", "no changes added to commit"];

/// Manages git commit and push operations
pub struct CommitManager {
    workspace_path: PathBuf,
    runner: CommandRunner,
}

impl CommitManager {
    pub fn new(workspace_path: &Path, runner: CommandRunner) -> Self {
        Self {
            workspace_path: workspace_path.to_path_buf(),
            runner,
        }
    }

    /// Whether the index differs from HEAD (`git diff --cached --quiet`).
    pub fn has_staged_changes(&self) -> Result<bool, AppError> {
        let result = self.runner.run_with(
            &["git", "diff", "--cached", "--quiet"],
            Some(&self.workspace_path),
            false,
        )?;
        match result.exit_code {
            0 => Ok(false),
            1 => Ok(true),
            code => Err(AppError::new(
                ErrorCategory::CommitFailed,
                format!("Failed to inspect staged changes: {}", result.stderr.trim()),
            )
            .with_context("exit_code", code.to_string())
            .with_context("stderr", result.stderr)),
        }
    }

    /// Stage `paths`, or everything when `paths` is `None`.
    pub fn stage(&self, paths: Option<&[PathBuf]>) -> Result<(), AppError> {
        let path_args: Vec<String> = paths
            .unwrap_or_default()
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();

        let mut argv = vec!["git", "add"];
        if paths.is_some() {
            argv.push("--");
            argv.extend(path_args.iter().map(String::as_str));
        } else {
            argv.push("-A");
        }

        self.runner
            .run(&argv, Some(&self.workspace_path))
            .map_err(|e| {
                AppError::wrap(ErrorCategory::CommitFailed, "Failed to stage changes", e)
            })?;
        Ok(())
    }

    /// Stage and commit. Returns `false` when staging produced no change.
    pub fn commit(
        &self,
        message: &str,
        paths: Option<&[PathBuf]>,
        identity: Option<&GitIdentity>,
    ) -> Result<bool, AppError> {
        self.stage(paths)?;

        if !self.has_staged_changes()? {
            tracing::info!("nothing to commit");
            return Ok(false);
        }

        let identity_args = identity.map(GitIdentity::config_args);
        let mut argv = vec!["git"];
        if let Some(args) = &identity_args {
            argv.extend(args.iter().map(String::as_str));
        }
        argv.extend(["commit", "-m", message]);

        match self.runner.run(&argv, Some(&self.workspace_path)) {
            Ok(_) => Ok(true),
            Err(e) if is_nothing_to_commit(&e) => {
                tracing::info!("nothing to commit");
                Ok(false)
            }
            Err(e) => Err(AppError::wrap(
                ErrorCategory::CommitFailed,
                "Failed to commit changes",
                e,
            )),
        }
    }

    /// Push branch to origin, optionally recording the upstream
    pub fn push(&self, branch_name: &str, set_upstream: bool) -> Result<(), AppError> {
        let mut argv = vec!["git", "push"];
        if set_upstream {
            argv.push("--set-upstream");
        }
        argv.extend(["origin", branch_name]);

        self.runner
            .run(&argv, Some(&self.workspace_path))
            .map_err(|e| {
                AppError::wrap(
                    ErrorCategory::PushFailed,
                    format!("Failed to push branch '{}'", branch_name),
                    e,
                )
            })?;
        Ok(())
    }
}

// Fallback only: git reports this on stdout in most versions, stderr in some.
fn is_nothing_to_commit(error: &AppError) -> bool {
    ["stdout", "stderr"].iter().any(|key| {
        error.context.get(*key).is_some_and(|text| {
            NOTHING_TO_COMMIT_MARKERS
                .iter()
                .any(|marker| text.contains(marker))
        })
    })
}
