use super::{GithubClient, PATH_SEGMENT};
use crate::core::credential::Credential;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use colab_bridge_types::{ContentMetadata, ContentPayload, PutContentsRequest};
use percent_encoding::utf8_percent_encode;
use reqwest::{Method, StatusCode};
use serde_json::Value;

const LOOKUP_ACTION: &str = "Failed to check existing file";
const WRITE_ACTION: &str = "GitHub API error";

/// Result of probing a path on the contents endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileLookup {
    Missing,
    Exists { sha: Option<String> },
}

/// Percent-encode each `/`-separated segment of a repository path.
pub fn encode_content_path(path: &str) -> String {
    path.trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

impl GithubClient {
    /// `GET .../contents/{path}`: 200 means the file exists, 404 that it does not.
    pub async fn lookup_file(
        &self,
        credential: &Credential,
        owner: &str,
        repo: &str,
        path: &str,
        branch: Option<&str>,
    ) -> Result<FileLookup, AppError> {
        let mut url = self
            .repo_endpoint(owner, repo, &contents_tail(path))
            .map_err(|e| e.into_app_error(ErrorCategory::PublishFailed, LOOKUP_ACTION))?;
        if let Some(branch) = branch {
            url.query_pairs_mut().append_pair("ref", branch);
        }

        let response = self
            .send(self.request(Method::GET, url, credential))
            .await
            .map_err(|e| e.into_app_error(ErrorCategory::PublishFailed, LOOKUP_ACTION))?;

        match response.status {
            StatusCode::OK => {
                let body: Value = serde_json::from_str(&response.body)?;
                // A JSON array means the path names a directory.
                if !body.is_object() {
                    return Err(AppError::new(
                        ErrorCategory::PublishFailed,
                        format!("{} is a directory, not a file", path),
                    ));
                }
                let metadata: ContentMetadata = serde_json::from_value(body)?;
                tracing::debug!(path = %path, sha = ?metadata.sha, "file exists");
                Ok(FileLookup::Exists { sha: metadata.sha })
            }
            StatusCode::NOT_FOUND => Ok(FileLookup::Missing),
            _ => Err(response.failure(ErrorCategory::PublishFailed, LOOKUP_ACTION)),
        }
    }

    /// `PUT .../contents/{path}` with the base64-encoded payload.
    pub async fn put_file(
        &self,
        credential: &Credential,
        owner: &str,
        repo: &str,
        payload: &ContentPayload,
    ) -> Result<Value, AppError> {
        let url = self
            .repo_endpoint(owner, repo, &contents_tail(&payload.path))
            .map_err(|e| e.into_app_error(ErrorCategory::PublishFailed, WRITE_ACTION))?;

        let body = put_request(payload);
        let response = self
            .send(self.request(Method::PUT, url, credential).json(&body))
            .await
            .map_err(|e| e.into_app_error(ErrorCategory::PublishFailed, WRITE_ACTION))?;

        if !response.is_created_or_ok() {
            return Err(response.failure(ErrorCategory::PublishFailed, WRITE_ACTION));
        }

        Ok(serde_json::from_str(&response.body)?)
    }
}

fn contents_tail(path: &str) -> String {
    format!("contents/{}", encode_content_path(path))
}

/// Wire body for a contents write.
pub(crate) fn put_request(payload: &ContentPayload) -> PutContentsRequest {
    PutContentsRequest {
        message: payload.message.clone(),
        content: BASE64.encode(&payload.content),
        branch: payload.branch.clone(),
        sha: payload.sha.clone(),
    }
}

/// Creates or updates one file through the contents endpoint, without a
/// local working copy.
///
/// The lookup and the write are separate requests: another writer can change
/// the file in between, in which case the write fails on a stale `sha`.
pub struct ContentPublisher {
    client: GithubClient,
}

impl ContentPublisher {
    pub fn new(client: GithubClient) -> Self {
        Self { client }
    }

    /// Look up, refuse to overwrite unless `force`, then write.
    ///
    /// The payload is consumed so its version marker can only come from the
    /// lookup issued here.
    pub async fn publish(
        &self,
        credential: &Credential,
        owner: &str,
        repo: &str,
        mut payload: ContentPayload,
        force: bool,
    ) -> Result<Value, AppError> {
        payload.sha = None;

        let existing = self
            .client
            .lookup_file(
                credential,
                owner,
                repo,
                &payload.path,
                payload.branch.as_deref(),
            )
            .await?;

        if let FileLookup::Exists { sha } = existing {
            if !force {
                return Err(AppError::new(
                    ErrorCategory::FileExists,
                    format!(
                        "File already exists at {} on branch {}. Use --force to update.",
                        payload.path,
                        payload.branch_label()
                    ),
                )
                .with_context("path", payload.path.clone())
                .with_context("branch", payload.branch_label()));
            }
            payload.sha = sha;
        }

        tracing::info!(
            owner = %owner,
            repo = %repo,
            path = %payload.path,
            branch = %payload.branch_label(),
            update = payload.sha.is_some(),
            "writing file"
        );
        self.client
            .put_file(credential, owner, repo, &payload)
            .await
    }
}
