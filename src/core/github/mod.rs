#![allow(clippy::result_large_err)]

//! Client for the two hosting REST endpoints the bridge uses: pull request
//! creation and single-file contents.

mod contents;
mod pulls;

pub use contents::{encode_content_path, ContentPublisher, FileLookup};

use crate::core::credential::Credential;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Method, RequestBuilder, StatusCode};
use url::Url;

pub const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

/// Characters escaped inside a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'+');

/// Transport-level failures, before any HTTP status is known.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to read response body: {0}")]
    Body(String),
}

impl ApiError {
    fn into_app_error(self, category: ErrorCategory, action: &str) -> AppError {
        AppError::with_source(category, format!("{}: {}", action, self), Box::new(self))
    }
}

/// A response whose body has been read to text.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// 200 or 201, the only statuses the write endpoints accept.
    pub fn is_created_or_ok(&self) -> bool {
        matches!(self.status, StatusCode::OK | StatusCode::CREATED)
    }

    /// Build the error for an unexpected status, keeping status and body.
    pub fn failure(&self, category: ErrorCategory, action: &str) -> AppError {
        AppError::new(
            category,
            format!("{}: {} {}", action, self.status.as_u16(), self.body.trim()),
        )
        .with_context("status", self.status.as_u16().to_string())
        .with_context("body", self.body.clone())
    }
}

/// Authenticated client for the hosting REST API.
#[derive(Debug, Clone)]
pub struct GithubClient {
    api_url: Url,
    http: reqwest::Client,
}

impl GithubClient {
    pub fn new(api_url: &str) -> Result<Self, AppError> {
        let api_url = Url::parse(api_url).map_err(|e| {
            AppError::new(
                ErrorCategory::ValidationError,
                format!("Invalid API URL {}: {}", api_url, e),
            )
        })?;
        Ok(Self {
            api_url,
            http: reqwest::Client::new(),
        })
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// `<api>/repos/<owner>/<repo>/<tail>`; `tail` must already be encoded.
    fn repo_endpoint(&self, owner: &str, repo: &str, tail: &str) -> Result<Url, ApiError> {
        let raw = format!(
            "{}/repos/{}/{}/{}",
            self.api_url.as_str().trim_end_matches('/'),
            utf8_percent_encode(owner, PATH_SEGMENT),
            utf8_percent_encode(repo, PATH_SEGMENT),
            tail
        );
        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    fn request(&self, method: Method, url: Url, credential: &Credential) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("token {}", credential.token()),
            )
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
            .header(
                reqwest::header::USER_AGENT,
                concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
            )
    }

    async fn send(&self, builder: RequestBuilder) -> Result<ApiResponse, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.without_url().to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Body(e.to_string()))?;
        Ok(ApiResponse { status, body })
    }
}
