#![allow(clippy::result_large_err)]

use crate::core::config::BridgeConfig;
use crate::core::credential::Credential;
use crate::core::error::AppError;
use crate::core::git::{GitIdentity, RepositoryClient};
use crate::core::github::GithubClient;
use crate::core::transform::{self, utc_timestamp};
use crate::core::types::IdentityScope;
use crate::utils::{remove_dir_if_exists, write_text};
use chrono::Utc;
use colab_bridge_types::{CreatePullRequest, UpdateResult};
use std::path::{Path, PathBuf};

pub const DEMO_FILE: &str = "colab_update.txt";
pub const PR_BODY: &str = "Automated PR created from Colab.";

/// A change applied to a fresh working copy before committing.
pub trait WorkingCopyMutation: Send + Sync {
    fn name(&self) -> &str;

    /// Modify `repo_dir` and return the touched paths, relative to it.
    fn apply(&self, repo_dir: &Path) -> Result<Vec<PathBuf>, AppError>;
}

/// Writes `colab_update.txt` with the current UTC time.
pub struct TimestampMutation;

impl WorkingCopyMutation for TimestampMutation {
    fn name(&self) -> &str {
        "timestamp"
    }

    fn apply(&self, repo_dir: &Path) -> Result<Vec<PathBuf>, AppError> {
        let content = format!("Updated from Colab at {}\n", utc_timestamp(Utc::now()));
        write_text(&repo_dir.join(DEMO_FILE), &content)?;
        Ok(vec![PathBuf::from(DEMO_FILE)])
    }
}

/// Runs the demo transform inside the working copy.
pub struct ProcessMutation;

impl WorkingCopyMutation for ProcessMutation {
    fn name(&self) -> &str {
        "process"
    }

    fn apply(&self, repo_dir: &Path) -> Result<Vec<PathBuf>, AppError> {
        transform::run(repo_dir)?;
        Ok(vec![PathBuf::from(transform::OUTPUT_FILE)])
    }
}

/// Default commit message; the timestamp keeps repeated runs distinct.
pub fn default_commit_message() -> String {
    format!("Colab: automated update at {}", utc_timestamp(Utc::now()))
}

/// Parameters of one `safe_update` run.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub repo: String,
    pub branch: String,
    pub base: String,
    pub message: Option<String>,
    pub dest: Option<PathBuf>,
}

impl UpdateRequest {
    pub fn new(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            branch: crate::core::config::DEFAULT_BRANCH.to_string(),
            base: crate::core::config::DEFAULT_BASE.to_string(),
            message: None,
            dest: None,
        }
    }
}

/// Drives clone → branch → modify → commit → push → pull request.
pub struct UpdateOrchestrator {
    repository: RepositoryClient,
    github: GithubClient,
    user_name: Option<String>,
    user_email: Option<String>,
}

impl UpdateOrchestrator {
    pub fn new(repository: RepositoryClient, github: GithubClient) -> Self {
        Self {
            repository,
            github,
            user_name: None,
            user_email: None,
        }
    }

    pub fn from_config(config: &BridgeConfig) -> Result<Self, AppError> {
        let repository = RepositoryClient::new(
            config.github.git_url.clone(),
            config.git.workspace_root.clone(),
        );
        let github = GithubClient::new(&config.github.api_url)?;
        Ok(Self::new(repository, github)
            .with_identity(config.git.user_name.clone(), config.git.user_email.clone()))
    }

    /// Override the commit author; unset parts fall back to the account defaults.
    pub fn with_identity(mut self, name: Option<String>, email: Option<String>) -> Self {
        self.user_name = name;
        self.user_email = email;
        self
    }

    pub fn identity_for(&self, account: &str) -> GitIdentity {
        let default = GitIdentity::for_account(account);
        GitIdentity::new(
            self.user_name.clone().unwrap_or(default.name),
            self.user_email.clone().unwrap_or(default.email),
        )
    }

    /// Run the full pipeline. Any step failure aborts the run; nothing is
    /// rolled back and the working copy is left in place for the caller.
    ///
    /// An empty commit does not stop the run: the branch is still pushed and
    /// the pull request still requested.
    pub async fn safe_update(
        &self,
        credential: &Credential,
        request: &UpdateRequest,
        mutation: &dyn WorkingCopyMutation,
    ) -> Result<UpdateResult, AppError> {
        let account = credential.account();
        let message = request
            .message
            .clone()
            .unwrap_or_else(default_commit_message);

        let repo_dir = self.repository.clone_repo(
            credential,
            &request.repo,
            request.dest.as_deref(),
        )?;

        let identity = self.identity_for(account);
        self.repository
            .configure_identity(&identity, IdentityScope::Local, Some(&repo_dir))?;

        self.repository.create_branch(&repo_dir, &request.branch)?;
        let head = self.repository.current_branch(&repo_dir)?;
        tracing::info!(branch = %head, dir = %repo_dir.display(), "working copy ready");

        tracing::info!(mutation = mutation.name(), "applying change");
        let touched = mutation.apply(&repo_dir)?;

        let commit_made = self.repository.commit(
            &repo_dir,
            &message,
            Some(&touched),
            Some(&identity),
        )?;
        if !commit_made {
            tracing::warn!("no changes to commit; pushing branch anyway");
        }

        self.repository
            .set_authenticated_remote(&repo_dir, credential, &request.repo)?;
        self.repository.push(&repo_dir, &request.branch, true)?;

        let pull_request = self
            .github
            .create_pull_request(
                credential,
                account,
                &request.repo,
                &CreatePullRequest {
                    title: message.clone(),
                    head: request.branch.clone(),
                    base: request.base.clone(),
                    body: PR_BODY.to_string(),
                },
            )
            .await?;

        Ok(UpdateResult {
            repo_dir,
            branch: request.branch.clone(),
            commit_made,
            pr_url: pull_request.html_url,
        })
    }
}

/// Remove a cloned working copy. Returns whether anything was removed.
pub fn remove_cloned_repo(repo_dir: &Path) -> Result<bool, AppError> {
    let removed = remove_dir_if_exists(repo_dir)?;
    if removed {
        tracing::info!(dir = %repo_dir.display(), "removed working copy");
    }
    Ok(removed)
}
