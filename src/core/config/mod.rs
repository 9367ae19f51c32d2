use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_GIT_URL: &str = "https://github.com";
pub const DEFAULT_BRANCH: &str = "colab/auto-update";
pub const DEFAULT_BASE: &str = "main";
pub const DEFAULT_WORKSPACE_ROOT: &str = "/content";

/// Bridge configuration loaded from `.colab-bridge/config.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BridgeConfig {
    /// Hosting service endpoints
    #[serde(default)]
    pub github: GithubConfig,

    /// Working copy and commit settings
    #[serde(default)]
    pub git: GitConfig,
}

/// Hosting service endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GithubConfig {
    /// REST API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Base URL repositories are cloned from (`<git_url>/<owner>/<repo>.git`)
    #[serde(default = "default_git_url")]
    pub git_url: String,
}

/// Working copy and commit settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GitConfig {
    /// Commit author name (default: the account name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    /// Commit author email (default: `<account>@users.noreply.github.com`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,

    /// Directory clones land in when no destination is given
    #[serde(default = "default_workspace_root")]
    pub workspace_root: PathBuf,

    /// Branch created by `update`
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Branch pull requests target
    #[serde(default = "default_base")]
    pub base: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            git_url: default_git_url(),
        }
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            user_name: None,
            user_email: None,
            workspace_root: default_workspace_root(),
            branch: default_branch(),
            base: default_base(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_git_url() -> String {
    DEFAULT_GIT_URL.to_string()
}

fn default_workspace_root() -> PathBuf {
    PathBuf::from(DEFAULT_WORKSPACE_ROOT)
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

fn default_base() -> String {
    DEFAULT_BASE.to_string()
}


pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;
