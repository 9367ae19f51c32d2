use serde::{Deserialize, Serialize};

/// A single-file write requested through the contents endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPayload {
    /// Repository-relative target path, e.g. `notes/from-colab.txt`.
    pub path: String,
    pub content: Vec<u8>,
    pub message: String,
    pub branch: Option<String>,
    /// Version marker of the file being replaced. Only set from a lookup
    /// issued in the same publish call.
    pub sha: Option<String>,
}

impl ContentPayload {
    pub fn new(path: impl Into<String>, content: Vec<u8>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content,
            message: message.into(),
            branch: None,
            sha: None,
        }
    }

    pub fn with_branch(mut self, branch: Option<String>) -> Self {
        self.branch = branch;
        self
    }

    /// Human-facing branch label used in messages.
    pub fn branch_label(&self) -> &str {
        self.branch.as_deref().unwrap_or("default")
    }
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutContentsRequest {
    pub message: String,
    /// Base64-encoded file content.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

/// Subset of the metadata returned when probing an existing file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMetadata {
    #[serde(default)]
    pub sha: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}
