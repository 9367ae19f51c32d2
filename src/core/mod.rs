pub mod command;
pub mod config;
pub mod credential;
pub mod error;
pub mod git;
pub mod github;
pub mod orchestrator;
pub mod transform;
pub mod types;

pub use command::{CommandResult, CommandRunner};
pub use config::{BridgeConfig, ConfigLoader, ConfigValidator};
pub use credential::Credential;
pub use error::{AppError, DefaultErrorReporter, ErrorReporter};
pub use git::{GitIdentity, GitManager, RepositoryClient};
pub use github::{ContentPublisher, GithubClient};
pub use orchestrator::{
    remove_cloned_repo, ProcessMutation, TimestampMutation, UpdateOrchestrator, UpdateRequest,
    WorkingCopyMutation,
};
pub use types::*;
