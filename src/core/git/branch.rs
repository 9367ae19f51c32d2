#![allow(clippy::result_large_err)] // Git branch operations bubble AppError for command failures so extra boxing is unnecessary.

use crate::core::command::CommandRunner;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::path::{Path, PathBuf};

/// Manages git branch operations
pub struct BranchManager {
    workspace_path: PathBuf,
    runner: CommandRunner,
}

impl BranchManager {
    pub fn new(workspace_path: &Path, runner: CommandRunner) -> Self {
        Self {
            workspace_path: workspace_path.to_path_buf(),
            runner,
        }
    }

    /// Create a new branch from HEAD and check it out
    pub fn create_branch(&self, name: &str) -> Result<(), AppError> {
        self.runner
            .run(&["git", "checkout", "-b", name], Some(&self.workspace_path))
            .map_err(|e| {
                AppError::wrap(
                    ErrorCategory::BranchFailed,
                    format!("Failed to create branch '{}'", name),
                    e,
                )
            })?;
        Ok(())
    }

    /// Check if a local branch exists
    pub fn branch_exists(&self, name: &str) -> Result<bool, AppError> {
        let reference = format!("refs/heads/{}", name);
        let result = self.runner.run_with(
            &["git", "show-ref", "--verify", "--quiet", &reference],
            Some(&self.workspace_path),
            false,
        )?;
        Ok(result.success())
    }
}
