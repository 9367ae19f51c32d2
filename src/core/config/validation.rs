#![allow(clippy::result_large_err)]

use super::BridgeConfig;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use url::Url;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration rules
    pub fn validate(config: &BridgeConfig) -> Result<(), AppError> {
        let api = Url::parse(&config.github.api_url).map_err(|e| {
            AppError::new(
                ErrorCategory::ValidationError,
                format!("github.api_url is not a valid URL: {}", e),
            )
        })?;
        if !matches!(api.scheme(), "http" | "https") {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                "github.api_url must use http or https",
            ));
        }

        // file:// is accepted so clones can target local bare repositories.
        Url::parse(&config.github.git_url).map_err(|e| {
            AppError::new(
                ErrorCategory::ValidationError,
                format!("github.git_url is not a valid URL: {}", e),
            )
        })?;

        if config.git.branch.trim().is_empty() {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                "git.branch cannot be empty",
            ));
        }

        if config.git.base.trim().is_empty() {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                "git.base cannot be empty",
            ));
        }

        Ok(())
    }
}
