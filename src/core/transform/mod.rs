#![allow(clippy::result_large_err)]

//! Demo text transform run before committing results back to a repository.
//!
//! Reads `data/input.txt` (optional) under a root directory and writes
//! `data/output.txt`: a `# Generated at <timestamp>` header followed by the
//! uppercased non-blank input lines, or `NO_INPUT` when there were none.

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use crate::utils::write_text;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

pub const DATA_DIR: &str = "data";
pub const INPUT_FILE: &str = "data/input.txt";
pub const OUTPUT_FILE: &str = "data/output.txt";
pub const NO_INPUT: &str = "NO_INPUT";
pub const HEADER_PREFIX: &str = "# Generated at ";

/// Paths the transform reads and writes under `root`.
#[derive(Debug, Clone)]
pub struct TransformPaths {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl TransformPaths {
    pub fn under(root: &Path) -> Self {
        Self {
            input: root.join(INPUT_FILE),
            output: root.join(OUTPUT_FILE),
        }
    }
}

/// ISO-8601 UTC with microseconds and a trailing `Z`.
pub fn utc_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Input lines without trailing newlines; a missing file yields no lines.
pub fn read_input(path: &Path) -> Result<Vec<String>, AppError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path).map_err(|e| {
        AppError::new(
            ErrorCategory::IoError,
            format!("Failed to read {}: {}", path.display(), e),
        )
    })?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Uppercase each non-blank line, dropping blank and whitespace-only lines.
pub fn transform<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|line| !line.trim().is_empty())
        .map(str::to_uppercase)
        .collect()
}

/// Full output file content for `transformed` generated at `now`.
pub fn render_output(transformed: &[String], now: DateTime<Utc>) -> String {
    let mut out = format!("{}{}\n", HEADER_PREFIX, utc_timestamp(now));
    if transformed.is_empty() {
        out.push_str(NO_INPUT);
        out.push('\n');
    } else {
        out.push_str(&transformed.join("\n"));
        out.push('\n');
    }
    out
}

/// Run the transform under `root`. Returns the output path and the number of
/// transformed lines.
pub fn run(root: &Path) -> Result<(PathBuf, usize), AppError> {
    let paths = TransformPaths::under(root);
    std::fs::create_dir_all(root.join(DATA_DIR))?;

    let lines = read_input(&paths.input)?;
    let transformed = transform(&lines);
    write_text(&paths.output, &render_output(&transformed, Utc::now()))?;

    tracing::debug!(
        output = %paths.output.display(),
        lines = transformed.len(),
        "transform complete"
    );
    Ok((paths.output, transformed.len()))
}
