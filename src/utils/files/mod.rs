#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::fs;
use std::path::Path;

/// Remove a directory tree if present. Returns whether anything was removed.
pub fn remove_dir_if_exists(path: &Path) -> Result<bool, AppError> {
    if !path.exists() {
        return Ok(false);
    }

    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    result.map_err(|e| {
        AppError::new(
            ErrorCategory::IoError,
            format!("Failed to remove {}: {}", path.display(), e),
        )
    })?;

    Ok(true)
}

/// Write UTF-8 text, creating missing parent directories first.
pub fn write_text(path: &Path, content: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::new(
                    ErrorCategory::IoError,
                    format!("Failed to create directory {}: {}", parent.display(), e),
                )
            })?;
        }
    }

    fs::write(path, content).map_err(|e| {
        AppError::new(
            ErrorCategory::IoError,
            format!("Failed to write {}: {}", path.display(), e),
        )
    })
}
