#![allow(clippy::result_large_err)]

use crate::core::command::CommandRunner;
use crate::core::error::AppError;
use crate::core::types::{ErrorCategory, IdentityScope};
use std::path::Path;

/// Author name and email recorded on commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitIdentity {
    pub name: String,
    pub email: String,
}

impl GitIdentity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Identity derived from the account: `<account>` / `<account>@users.noreply.github.com`.
    pub fn for_account(account: &str) -> Self {
        Self::new(account, format!("{}@users.noreply.github.com", account))
    }

    /// `-c` arguments that apply this identity to a single git invocation.
    pub fn config_args(&self) -> [String; 4] {
        [
            "-c".to_string(),
            format!("user.name={}", self.name),
            "-c".to_string(),
            format!("user.email={}", self.email),
        ]
    }

    /// Persist the identity with `git config`. Local scope requires `repo_dir`.
    pub fn configure(
        &self,
        runner: &CommandRunner,
        scope: IdentityScope,
        repo_dir: Option<&Path>,
    ) -> Result<(), AppError> {
        let scope_flag = match scope {
            IdentityScope::Global => "--global",
            IdentityScope::Local => {
                if repo_dir.is_none() {
                    return Err(AppError::new(
                        ErrorCategory::ValidationError,
                        "Local identity requires a working copy",
                    ));
                }
                "--local"
            }
        };

        for (key, value) in [("user.name", &self.name), ("user.email", &self.email)] {
            runner
                .run(&["git", "config", scope_flag, key, value], repo_dir)
                .map_err(|e| {
                    AppError::wrap(
                        ErrorCategory::CommandFailed,
                        format!("Failed to set git {}", key),
                        e,
                    )
                })?;
        }

        tracing::debug!(scope = ?scope, name = %self.name, "configured git identity");
        Ok(())
    }
}
