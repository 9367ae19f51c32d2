use super::GithubClient;
use crate::core::credential::Credential;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use colab_bridge_types::{CreatePullRequest, PullRequest};
use reqwest::Method;

const ACTION: &str = "Failed to create PR";

impl GithubClient {
    /// Open a pull request from `request.head` into `request.base`.
    ///
    /// Only 200 and 201 count as success; any other status is
    /// `PullRequestFailed` with the status code and response body.
    pub async fn create_pull_request(
        &self,
        credential: &Credential,
        owner: &str,
        repo: &str,
        request: &CreatePullRequest,
    ) -> Result<PullRequest, AppError> {
        let url = self
            .repo_endpoint(owner, repo, "pulls")
            .map_err(|e| e.into_app_error(ErrorCategory::PullRequestFailed, ACTION))?;

        tracing::info!(
            owner = %owner,
            repo = %repo,
            head = %request.head,
            base = %request.base,
            "creating pull request"
        );

        let response = self
            .send(self.request(Method::POST, url, credential).json(request))
            .await
            .map_err(|e| e.into_app_error(ErrorCategory::PullRequestFailed, ACTION))?;

        if !response.is_created_or_ok() {
            return Err(response.failure(ErrorCategory::PullRequestFailed, ACTION));
        }

        let pull_request: PullRequest = serde_json::from_str(&response.body).map_err(|e| {
            AppError::new(
                ErrorCategory::PullRequestFailed,
                format!("{}: unreadable response: {}", ACTION, e),
            )
            .with_context("status", response.status.as_u16().to_string())
            .with_context("body", response.body.clone())
        })?;

        if let Some(url) = &pull_request.html_url {
            tracing::info!(url = %url, "pull request created");
        }
        Ok(pull_request)
    }
}
