//! GitHub-hosted model artifacts.
//!
//! Tags, branches and the latest release come from the REST API; the
//! artifact itself is downloaded from the raw-content host. One attempt per
//! request, no retries.

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use modelsmith_core::{
    application::{ApplicationError, ports::ArtifactSource},
    domain::RepositoryCoordinate,
    error::{SmithError, SmithResult},
};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_RAW_URL: &str = "https://raw.githubusercontent.com";

const PER_PAGE: usize = 100;

/// HTTP-level failures, before they are turned into retrieval errors.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: token missing or invalid")]
    Unauthorized,

    #[error("Unexpected response {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Where to talk to and as whom.
#[derive(Debug, Clone)]
pub struct GitHubSourceConfig {
    pub api_url: String,
    pub raw_url: String,
    pub token: Option<String>,
}

impl Default for GitHubSourceConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            raw_url: DEFAULT_RAW_URL.into(),
            token: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// [`ArtifactSource`] over the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubSource {
    config: GitHubSourceConfig,
    client: Client,
}

impl GitHubSource {
    pub fn new(config: GitHubSourceConfig) -> SmithResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("modelsmith/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SmithError::Configuration {
                message: format!("Could not build HTTP client: {}", e),
            })?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &GitHubSourceConfig {
        &self.config
    }

    fn api_url(&self, repo: &RepositoryCoordinate, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.config.api_url.trim_end_matches('/'),
            repo.owner(),
            repo.name(),
            path
        )
    }

    fn raw_url(&self, repo: &RepositoryCoordinate, reference: &str, artifact_path: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.config.raw_url.trim_end_matches('/'),
            repo.owner(),
            repo.name(),
            reference,
            artifact_path.trim_start_matches('/')
        )
    }

    /// Build a request with optional auth header.
    fn get(&self, url: &str) -> RequestBuilder {
        let mut req = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(ref token) = self.config.token {
            req = req.bearer_auth(token);
        }
        req
    }

    fn send(&self, url: &str) -> Result<Response, GitHubError> {
        debug!(url, "GET");
        let response = self.get(url).send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => Err(GitHubError::NotFound(url.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GitHubError::Unauthorized),
            _ => Err(GitHubError::Status { status, body }),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, GitHubError> {
        Ok(self.send(url)?.json()?)
    }

    /// Follow `page=N` until a short page comes back.
    fn names(&self, repo: &RepositoryCoordinate, path: &str) -> Result<Vec<String>, GitHubError> {
        let mut names = Vec::new();
        for page in 1.. {
            let url = self.api_url(repo, &format!("{path}?per_page={PER_PAGE}&page={page}"));
            let batch: Vec<NamedRef> = self.get_json(&url)?;
            let last = batch.len() < PER_PAGE;
            names.extend(batch.into_iter().map(|r| r.name));
            if last {
                break;
            }
        }
        Ok(names)
    }
}

fn retrieval(what: &str, repo: &RepositoryCoordinate, e: GitHubError) -> SmithError {
    ApplicationError::RetrievalFailed {
        what: what.to_string(),
        repository: repo.to_string(),
        reason: e.to_string(),
    }
    .into()
}

impl ArtifactSource for GitHubSource {
    #[instrument(skip_all, fields(%repo))]
    fn list_tags(&self, repo: &RepositoryCoordinate) -> SmithResult<Vec<String>> {
        self.names(repo, "tags").map_err(|e| retrieval("tags", repo, e))
    }

    #[instrument(skip_all, fields(%repo))]
    fn list_branches(&self, repo: &RepositoryCoordinate) -> SmithResult<Vec<String>> {
        self.names(repo, "branches")
            .map_err(|e| retrieval("branches", repo, e))
    }

    #[instrument(skip_all, fields(%repo))]
    fn latest_tag(&self, repo: &RepositoryCoordinate) -> SmithResult<String> {
        match self.get_json::<Release>(&self.api_url(repo, "releases/latest")) {
            Ok(release) => Ok(release.tag_name),
            // Repositories that only tag, never release
            Err(GitHubError::NotFound(_)) => {
                warn!("No published release, using the newest tag");
                self.list_tags(repo)?.into_iter().next().ok_or_else(|| {
                    ApplicationError::RetrievalFailed {
                        what: "latest tag".into(),
                        repository: repo.to_string(),
                        reason: "repository has no releases and no tags".into(),
                    }
                    .into()
                })
            }
            Err(e) => Err(retrieval("latest release", repo, e)),
        }
    }

    #[instrument(skip_all, fields(%repo, reference = %reference))]
    fn fetch_artifact(
        &self,
        repo: &RepositoryCoordinate,
        reference: &str,
        artifact_path: &str,
    ) -> SmithResult<Vec<u8>> {
        let url = self.raw_url(repo, reference, artifact_path);
        let what = format!("{artifact_path}@{reference}");
        let response = self.send(&url).map_err(|e| retrieval(&what, repo, e))?;
        let bytes = response
            .bytes()
            .map_err(|e| retrieval(&what, repo, GitHubError::Http(e)))?;
        Ok(bytes.to_vec())
    }
}
