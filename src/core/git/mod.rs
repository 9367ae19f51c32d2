#![allow(clippy::result_large_err)]

mod branch;
mod commit;
mod identity;
mod remote;

pub use branch::BranchManager;
pub use commit::CommitManager;
pub use identity::GitIdentity;
pub use remote::{repository_url, RemoteManager};

use crate::core::command::CommandRunner;
use crate::core::credential::Credential;
use crate::core::error::AppError;
use crate::core::types::{ErrorCategory, IdentityScope};
use crate::utils::redact_credentials;
use std::path::{Path, PathBuf};

fn git_runner() -> CommandRunner {
    // Never let git block on an interactive credential prompt.
    CommandRunner::new().with_env("GIT_TERMINAL_PROMPT", "0")
}

/// Mask `secret` anywhere in the error, including copies git echoed outside a URL.
fn scrub(mut error: AppError, secret: &str) -> AppError {
    error.message = redact_credentials(&error.message, Some(secret));
    for value in error.context.values_mut() {
        *value = redact_credentials(value, Some(secret));
    }
    error
}

/// Git operations manager - facade for git operations on one working copy
pub struct GitManager {
    workspace_path: PathBuf,
    runner: CommandRunner,
}

impl GitManager {
    /// Create a new GitManager for the given workspace
    pub fn new(workspace_path: &Path) -> Self {
        Self {
            workspace_path: workspace_path.to_path_buf(),
            runner: git_runner(),
        }
    }

    pub fn workspace_path(&self) -> &Path {
        &self.workspace_path
    }

    /// Check if the workspace is a git repository
    pub fn is_git_repo(&self) -> bool {
        self.workspace_path.join(".git").exists()
    }

    /// Get the current branch name
    pub fn current_branch(&self) -> Result<String, AppError> {
        let output = self
            .runner
            .run(
                &["git", "rev-parse", "--abbrev-ref", "HEAD"],
                Some(&self.workspace_path),
            )
            .map_err(|e| {
                AppError::wrap(ErrorCategory::CommandFailed, "Failed to get current branch", e)
            })?;
        Ok(output.stdout.trim().to_string())
    }

    /// Get a BranchManager instance
    pub fn branch_manager(&self) -> BranchManager {
        BranchManager::new(&self.workspace_path, self.runner.clone())
    }

    /// Get a CommitManager instance
    pub fn commit_manager(&self) -> CommitManager {
        CommitManager::new(&self.workspace_path, self.runner.clone())
    }

    /// Get a RemoteManager instance
    pub fn remote_manager(&self) -> RemoteManager {
        RemoteManager::new(&self.workspace_path, self.runner.clone())
    }
}

/// Repository operations needed to turn a hosted repository into a pushed branch.
pub struct RepositoryClient {
    git_url: String,
    workspace_root: PathBuf,
    runner: CommandRunner,
}

impl RepositoryClient {
    /// `git_url` is the clone base (`https://github.com`); clones without an
    /// explicit destination land in `workspace_root/<repo>`.
    pub fn new(git_url: impl Into<String>, workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            git_url: git_url.into(),
            workspace_root: workspace_root.into(),
            runner: git_runner(),
        }
    }

    /// Apply `identity` with `git config`; local scope writes into `repo_dir`.
    pub fn configure_identity(
        &self,
        identity: &GitIdentity,
        scope: IdentityScope,
        repo_dir: Option<&Path>,
    ) -> Result<(), AppError> {
        identity.configure(&self.runner, scope, repo_dir)
    }

    /// Clone `account/repo`, replacing any existing destination.
    pub fn clone_repo(
        &self,
        credential: &Credential,
        repo: &str,
        dest: Option<&Path>,
    ) -> Result<PathBuf, AppError> {
        let dest = dest
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.workspace_root.join(repo));
        let url = repository_url(
            &self.git_url,
            credential.account(),
            repo,
            Some(credential.token()),
        )?;

        tracing::info!(repo = %repo, dest = %dest.display(), "cloning repository");
        let manager = GitManager::new(&dest);
        manager
            .remote_manager()
            .clone_from(&url)
            .map_err(|e| scrub(e, credential.token()))?;
        if !manager.is_git_repo() {
            return Err(AppError::new(
                ErrorCategory::CloneFailed,
                format!("Clone did not produce a working copy at {}", dest.display()),
            ));
        }
        Ok(dest)
    }

    /// Rewrite `origin` so pushes authenticate with the credential.
    pub fn set_authenticated_remote(
        &self,
        repo_dir: &Path,
        credential: &Credential,
        repo: &str,
    ) -> Result<(), AppError> {
        let url = repository_url(
            &self.git_url,
            credential.account(),
            repo,
            Some(credential.token()),
        )?;
        GitManager::new(repo_dir)
            .remote_manager()
            .set_origin(&url)
            .map_err(|e| scrub(e, credential.token()))
    }

    /// Create and check out `branch`; an existing local branch is refused.
    pub fn create_branch(&self, repo_dir: &Path, branch: &str) -> Result<(), AppError> {
        let branches = GitManager::new(repo_dir).branch_manager();
        if branches.branch_exists(branch)? {
            return Err(AppError::new(
                ErrorCategory::BranchFailed,
                format!("Branch '{}' already exists in {}", branch, repo_dir.display()),
            )
            .with_context("branch", branch));
        }
        branches.create_branch(branch)
    }

    pub fn current_branch(&self, repo_dir: &Path) -> Result<String, AppError> {
        GitManager::new(repo_dir).current_branch()
    }

    pub fn commit(
        &self,
        repo_dir: &Path,
        message: &str,
        paths: Option<&[PathBuf]>,
        identity: Option<&GitIdentity>,
    ) -> Result<bool, AppError> {
        GitManager::new(repo_dir)
            .commit_manager()
            .commit(message, paths, identity)
    }

    pub fn push(&self, repo_dir: &Path, branch: &str, set_upstream: bool) -> Result<(), AppError> {
        tracing::info!(branch = %branch, "pushing branch");
        GitManager::new(repo_dir)
            .commit_manager()
            .push(branch, set_upstream)
    }
}
