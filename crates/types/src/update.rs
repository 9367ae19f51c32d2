use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of one orchestrated repository update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResult {
    pub repo_dir: PathBuf,
    pub branch: String,
    pub commit_made: bool,
    pub pr_url: Option<String>,
}
