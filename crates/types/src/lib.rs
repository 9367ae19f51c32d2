//! Wire and result types shared by the colab-bridge library and CLI.

pub mod contents;
pub mod pulls;
pub mod update;

pub use contents::{ContentMetadata, ContentPayload, PutContentsRequest};
pub use pulls::{CreatePullRequest, PullRequest};
pub use update::UpdateResult;
