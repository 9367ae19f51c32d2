use crate::core::types::{ErrorCategory, ErrorSeverity};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct AppError {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub code: String,
    pub message: String,
    pub context: BTreeMap<String, String>,
    pub recovery_suggestions: Vec<String>,
    pub occurred_at: DateTime<Utc>,
    pub source: Option<anyhow::Error>,
}

impl AppError {
    pub fn new<T: Into<String>>(category: ErrorCategory, message: T) -> Self {
        let severity = match category {
            ErrorCategory::FileExists => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        };
        AppError {
            category,
            severity,
            code: category.code().to_string(),
            message: message.into(),
            context: BTreeMap::new(),
            recovery_suggestions: default_suggestions(category),
            occurred_at: Utc::now(),
            source: None,
        }
    }

    /// Wrap a lower-level error (typically `CommandFailed`) in a step-specific
    /// category, keeping its context so callers still see the command and stderr.
    pub fn wrap<T: Into<String>>(category: ErrorCategory, message: T, inner: AppError) -> Self {
        let mut error = AppError::new(category, message);
        for (key, value) in &inner.context {
            error.context.insert(key.clone(), value.clone());
        }
        error.source = Some(anyhow::Error::new(inner));
        error
    }

    pub fn with_source<T: Into<String>>(
        category: ErrorCategory,
        message: T,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        let mut error = AppError::new(category, message);
        error.source = Some(anyhow::anyhow!(source));
        error
    }

    pub fn with_context<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn severity(&self) -> ErrorSeverity {
        self.severity
    }

    /// HTTP status recorded by API failures, if any.
    pub fn http_status(&self) -> Option<u16> {
        self.context.get("status").and_then(|s| s.parse().ok())
    }

    /// Exit status recorded by command failures, if any.
    pub fn exit_code(&self) -> Option<i32> {
        self.context.get("exit_code").and_then(|s| s.parse().ok())
    }
}

fn default_suggestions(category: ErrorCategory) -> Vec<String> {
    let hint = match category {
        ErrorCategory::NoCredential => "Set GITHUB_TOKEN or run from an interactive terminal",
        ErrorCategory::FileExists => "Re-run with --force to update the existing file",
        ErrorCategory::PushFailed => "Check that the token has push access to the repository",
        ErrorCategory::BranchFailed => "Pick a branch name that does not exist yet",
        _ => return vec![],
    };
    vec![hint.to_string()]
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.category, self.message)?;
        if let Some(ref source) = self.source {
            write!(f, "\nCaused by: {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        let mut error = AppError::new(ErrorCategory::IoError, e.to_string());
        error.source = Some(anyhow::anyhow!(e));
        error
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        let mut error = AppError::new(ErrorCategory::SerializationError, e.to_string());
        error.source = Some(anyhow::anyhow!(e));
        error
    }
}

pub trait ErrorReporter {
    fn report_error(&self, error: &AppError);
    fn report_warning(&self, message: &str, context: Option<String>);
    fn report_info(&self, message: &str);
}

pub struct DefaultErrorReporter;

impl DefaultErrorReporter {
    pub fn new() -> Self {
        DefaultErrorReporter
    }

    /// Render the report into a string; `report_error` prints exactly this.
    pub fn render(error: &AppError) -> String {
        let label = match error.severity {
            ErrorSeverity::Error => "ERROR",
            ErrorSeverity::Warning => "WARNING",
        };
        let mut out = format!("[{}] {}: {}", label, error.code, error.message);
        for (key, value) in &error.context {
            // Response bodies and stderr can be long; they stay on their own lines.
            out.push_str(&format!("\n  {}: {}", key, value.trim_end()));
        }
        for suggestion in &error.recovery_suggestions {
            out.push_str(&format!("\n  hint: {}", suggestion));
        }
        out
    }
}

impl Default for DefaultErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorReporter for DefaultErrorReporter {
    fn report_error(&self, error: &AppError) {
        eprintln!("{}", Self::render(error));
    }

    fn report_warning(&self, message: &str, context: Option<String>) {
        eprintln!("[WARNING] {}", message);
        if let Some(ref ctx) = context {
            eprintln!("  Context: {}", ctx);
        }
    }

    fn report_info(&self, message: &str) {
        println!("[INFO] {}", message);
    }
}
