#![allow(clippy::result_large_err)]

use super::{BridgeConfig, ConfigValidator};
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::env;
use std::path::{Path, PathBuf};

/// Location of the config file relative to the working directory.
pub const CONFIG_RELATIVE_PATH: &str = ".colab-bridge/config.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config with precedence: defaults, config file, environment.
    ///
    /// An explicit `path` must exist; otherwise `<cwd>/.colab-bridge/config.toml`
    /// is read when present.
    pub fn load(path: Option<&Path>) -> Result<BridgeConfig, AppError> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?.ok_or_else(|| {
                AppError::new(
                    ErrorCategory::ValidationError,
                    format!("Config file {} does not exist", path.display()),
                )
            })?,
            None => Self::load_from_file(&Self::default_path())?.unwrap_or_default(),
        };

        Self::apply_env_overrides(&mut config);
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    pub fn default_path() -> PathBuf {
        env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(CONFIG_RELATIVE_PATH)
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<BridgeConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to read config file {}: {}", path.display(), e),
            )
        })?;

        let config: BridgeConfig = toml::from_str(&content).map_err(|e| {
            AppError::new(
                ErrorCategory::ValidationError,
                format!("Failed to parse config file {}: {}", path.display(), e),
            )
        })?;

        Ok(Some(config))
    }

    /// Environment variables take precedence over config file values
    fn apply_env_overrides(config: &mut BridgeConfig) {
        if let Ok(api_url) = env::var("COLAB_BRIDGE_API_URL") {
            config.github.api_url = api_url;
        }

        if let Ok(git_url) = env::var("COLAB_BRIDGE_GIT_URL") {
            config.github.git_url = git_url;
        }

        if let Ok(root) = env::var("COLAB_BRIDGE_WORKSPACE_ROOT") {
            config.git.workspace_root = PathBuf::from(root);
        }

        if let Ok(name) = env::var("COLAB_BRIDGE_GIT_NAME") {
            config.git.user_name = Some(name);
        }

        if let Ok(email) = env::var("COLAB_BRIDGE_GIT_EMAIL") {
            config.git.user_email = Some(email);
        }
    }

    /// Get documentation for supported environment variables
    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "GITHUB_TOKEN - Access token (prompted for when unset and interactive)",
            "COLAB_BRIDGE_API_URL - Override REST API base URL (default: https://api.github.com)",
            "COLAB_BRIDGE_GIT_URL - Override clone base URL (default: https://github.com)",
            "COLAB_BRIDGE_WORKSPACE_ROOT - Override clone directory root (default: /content)",
            "COLAB_BRIDGE_GIT_NAME - Override commit author name",
            "COLAB_BRIDGE_GIT_EMAIL - Override commit author email",
        ]
    }
}
