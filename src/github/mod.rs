//! GitHub REST API client.
//!
//! Only three endpoints are used: repository metadata, the recursive git
//! tree of a branch, and the contents API for individual files. Every call
//! carries a `User-Agent` and, when configured, a bearer token.

pub mod models;
pub mod url;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{GeneratorError, Result};

pub use models::{EntryKind, FileTreeEntry, License, RepositoryIdentity, RepositoryMetadata};
pub use url::parse_repo_url;

use models::{ContentResponse, RepositoryResponse, TreeResponse};

const USER_AGENT_VALUE: &str = "README-Generator-App";
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Thin wrapper over the GitHub REST API
#[derive(Clone, Debug)]
pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    /// Creates a client against the default API root
    pub fn new(token: Option<&str>) -> Result<Self> {
        Self::with_base_url(crate::config::DEFAULT_GITHUB_API_BASE, token)
    }

    /// Creates a client from the application configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_base_url(&config.github_api_base, config.github_token())
    }

    /// Creates a client against an arbitrary API root (GitHub Enterprise, mocks)
    pub fn with_base_url(base_url: &str, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        if let Some(token) = token {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| GeneratorError::Config(format!("GitHub token is not a valid header value: {}", e)))?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
        }

        let client = Client::builder().default_headers(headers).build()?;

        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| GeneratorError::Config(format!("GitHub API base URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(GeneratorError::Config(format!(
                "GitHub API base URL {} cannot carry a path",
                base_url
            )));
        }

        Ok(Self { client, base_url })
    }

    /// Builds `{base}/repos/{owner}/{name}/{tail}` with every segment
    /// percent-encoded. Slashes inside `tail` items stay separators.
    fn repo_url(&self, identity: &RepositoryIdentity, tail: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                GeneratorError::Config(format!("GitHub API base URL {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(["repos", identity.owner.as_str(), identity.name.as_str()])
            .extend(tail.iter().copied().flat_map(|part| part.split('/')));
        Ok(url)
    }

    /// Fetches repository metadata
    ///
    /// 404 maps to `NotFound`, 403 to `RateLimited`, any other failure
    /// status to `Upstream`.
    pub async fn get_repository(&self, identity: &RepositoryIdentity) -> Result<RepositoryMetadata> {
        let url = self.repo_url(identity, &[])?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        match response.status() {
            status if status.is_success() => {
                let repo = response.json::<RepositoryResponse>().await?;
                Ok(repo.into())
            }
            StatusCode::NOT_FOUND => Err(GeneratorError::NotFound),
            StatusCode::FORBIDDEN => Err(GeneratorError::RateLimited),
            status => Err(GeneratorError::Upstream {
                context: "GitHub API error".to_string(),
                status: status.as_u16(),
            }),
        }
    }

    /// Fetches the full recursive file tree of a branch
    pub async fn get_tree(
        &self,
        identity: &RepositoryIdentity,
        branch: &str,
    ) -> Result<Vec<FileTreeEntry>> {
        let mut url = self.repo_url(identity, &["git", "trees", branch])?;
        url.query_pairs_mut().append_pair("recursive", "1");
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(GeneratorError::Upstream {
                context: "Failed to fetch file tree".to_string(),
                status: response.status().as_u16(),
            });
        }

        let tree = response.json::<TreeResponse>().await?;
        if tree.truncated {
            warn!("File tree for {} was truncated by GitHub", identity.full_name());
        }

        Ok(tree.tree.into_iter().map(FileTreeEntry::from).collect())
    }

    /// Fetches and decodes one file through the contents API
    ///
    /// Returns `Ok(None)` when the file does not exist or is not a
    /// base64-encoded blob.
    pub async fn get_file_content(
        &self,
        identity: &RepositoryIdentity,
        path: &str,
    ) -> Result<Option<String>> {
        let url = self.repo_url(identity, &["contents", path])?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            debug!("{} returned {}", path, response.status());
            return Ok(None);
        }

        let content = response.json::<ContentResponse>().await?;
        Ok(decode_content(&content))
    }

    /// Like [`get_file_content`](Self::get_file_content) but folds every
    /// failure into `None`
    pub async fn get_optional_file(&self, identity: &RepositoryIdentity, path: &str) -> Option<String> {
        match self.get_file_content(identity, path).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to fetch {}: {}", path, e);
                None
            }
        }
    }
}

fn decode_content(content: &ContentResponse) -> Option<String> {
    if content.encoding.as_deref() != Some("base64") {
        return None;
    }
    let encoded = content.content.as_deref()?;
    if encoded.is_empty() {
        return None;
    }

    // GitHub wraps the payload at 60 columns.
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    match BASE64.decode(compact) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            warn!("Failed to decode base64 content: {}", e);
            None
        }
    }
}
