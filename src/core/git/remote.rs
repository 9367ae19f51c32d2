#![allow(clippy::result_large_err)]

use crate::core::command::CommandRunner;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::path::{Path, PathBuf};
use url::Url;

/// Build `<git_url>/<account>/<repo>.git`, embedding `account:token` as
/// userinfo for http(s) bases. Other schemes (e.g. `file://`) carry no
/// credentials.
pub fn repository_url(
    git_url: &str,
    account: &str,
    repo: &str,
    token: Option<&str>,
) -> Result<String, AppError> {
    let raw = format!("{}/{}/{}.git", git_url.trim_end_matches('/'), account, repo);
    let mut url = Url::parse(&raw).map_err(|e| {
        AppError::new(
            ErrorCategory::ValidationError,
            format!("Invalid repository URL for {}/{}: {}", account, repo, e),
        )
    })?;

    if let Some(token) = token {
        if matches!(url.scheme(), "http" | "https") {
            let invalid = |_| {
                AppError::new(
                    ErrorCategory::ValidationError,
                    "Cannot embed credentials in repository URL",
                )
            };
            url.set_username(account).map_err(invalid)?;
            url.set_password(Some(token)).map_err(invalid)?;
        }
    }

    Ok(url.to_string())
}

/// Manages cloning and remote configuration
pub struct RemoteManager {
    workspace_path: PathBuf,
    runner: CommandRunner,
}

impl RemoteManager {
    pub fn new(workspace_path: &Path, runner: CommandRunner) -> Self {
        Self {
            workspace_path: workspace_path.to_path_buf(),
            runner,
        }
    }

    /// Clone `url` into the managed path, removing whatever is there first.
    pub fn clone_from(&self, url: &str) -> Result<(), AppError> {
        if crate::utils::remove_dir_if_exists(&self.workspace_path)? {
            tracing::info!(dest = %self.workspace_path.display(), "removed existing destination");
        }
        if let Some(parent) = self.workspace_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let dest = self.workspace_path.to_string_lossy();
        self.runner
            .run(&["git", "clone", url, dest.as_ref()], None)
            .map_err(|e| {
                AppError::wrap(
                    ErrorCategory::CloneFailed,
                    format!("Failed to clone into {}", self.workspace_path.display()),
                    e,
                )
            })?;

        Ok(())
    }

    /// Point `origin` at `url`.
    pub fn set_origin(&self, url: &str) -> Result<(), AppError> {
        self.runner
            .run(
                &["git", "remote", "set-url", "origin", url],
                Some(&self.workspace_path),
            )
            .map_err(|e| {
                AppError::wrap(
                    ErrorCategory::PushFailed,
                    "Failed to set authenticated origin URL",
                    e,
                )
            })?;
        Ok(())
    }

    /// Current `origin` fetch URL.
    pub fn origin_url(&self) -> Result<String, AppError> {
        let result = self
            .runner
            .run(
                &["git", "remote", "get-url", "origin"],
                Some(&self.workspace_path),
            )
            .map_err(|e| {
                AppError::wrap(ErrorCategory::CommandFailed, "Failed to read origin URL", e)
            })?;
        Ok(result.stdout.trim().to_string())
    }
}
