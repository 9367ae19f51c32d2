use serde::{Deserialize, Serialize};

/// Error category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    CommandFailed,
    CloneFailed,
    BranchFailed,
    CommitFailed,
    PushFailed,
    PullRequestFailed,
    PublishFailed,
    FileExists,
    NoCredential,
    ValidationError,
    SerializationError,
    IoError,
    InternalError,
}

impl ErrorCategory {
    /// Stable code attached to every error of this category.
    pub fn code(self) -> &'static str {
        match self {
            ErrorCategory::CommandFailed => "CMD-001",
            ErrorCategory::CloneFailed => "GIT-001",
            ErrorCategory::BranchFailed => "GIT-002",
            ErrorCategory::CommitFailed => "GIT-003",
            ErrorCategory::PushFailed => "GIT-004",
            ErrorCategory::PullRequestFailed => "API-001",
            ErrorCategory::PublishFailed => "API-002",
            ErrorCategory::FileExists => "API-003",
            ErrorCategory::NoCredential => "AUTH-001",
            ErrorCategory::ValidationError => "VAL-001",
            ErrorCategory::SerializationError => "SER-001",
            ErrorCategory::IoError => "IO-001",
            ErrorCategory::InternalError => "INT-001",
        }
    }

    /// Whether the category marks a failed git step.
    pub fn is_git_step(self) -> bool {
        matches!(
            self,
            ErrorCategory::CloneFailed
                | ErrorCategory::BranchFailed
                | ErrorCategory::CommitFailed
                | ErrorCategory::PushFailed
        )
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Error severity enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Error,
    Warning,
}

/// Scope a git identity is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdentityScope {
    /// `.git/config` of the working copy.
    #[default]
    Local,
    /// The user's global git config.
    Global,
}
