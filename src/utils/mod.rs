//! Utility helpers: filesystem helpers and secret redaction.
pub mod files;
pub mod redact;

pub use files::{remove_dir_if_exists, write_text};
pub use redact::{redact_credentials, redact_url};
