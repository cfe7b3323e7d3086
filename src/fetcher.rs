//! Repository fetching: metadata, file tree and a small fixed set of files.
//!
//! Only the metadata and tree calls can fail the whole operation. Every
//! other file is optional and degrades to absent on any failure.

use futures::future::join_all;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::Result;
use crate::github::{FileTreeEntry, GitHubClient, RepositoryIdentity, RepositoryMetadata};

/// Maximum number of configuration files fetched per repository
pub const MAX_CONFIG_FILES: usize = 10;

const README_CANDIDATES: [&str; 2] = ["README.md", "readme.md"];
const LICENSE_CANDIDATES: [&str; 2] = ["LICENSE", "LICENSE.md"];

static CONFIG_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.(env\.example|dockerignore)$").expect("config suffix pattern is valid")
});

static CONFIG_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\.env\.example|docker-compose\.ya?ml|Dockerfile|Makefile|\.gitignore|tsconfig\.json|vite\.config\.[jt]s|next\.config\.[jt]s|webpack\.config\.[jt]s)$",
    )
    .expect("config name pattern is valid")
});

const CONFIG_EXACT: &[&str] = &[
    "setup.py",
    "setup.cfg",
    "Cargo.toml",
    "go.mod",
    "pom.xml",
    "build.gradle",
];

/// A configuration file and its decoded content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Path relative to the repository root
    pub path: String,
    /// Decoded file content
    pub content: String,
}

/// Everything fetched for one repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRepositoryData {
    /// Repository metadata
    pub metadata: RepositoryMetadata,
    /// Flat recursive file tree at the default branch
    pub file_tree: Vec<FileTreeEntry>,
    /// Parsed `package.json`, when present and an object
    pub package_json: Option<Value>,
    /// Raw `requirements.txt`
    pub requirements_txt: Option<String>,
    /// Raw `pyproject.toml`
    pub pyproject_toml: Option<String>,
    /// Raw README text
    pub existing_readme: Option<String>,
    /// Raw LICENSE text
    pub license_content: Option<String>,
    /// Matched configuration files, in file tree order
    pub config_files: Vec<ConfigFile>,
}

impl RawRepositoryData {
    /// Data with only metadata and a file tree; every optional file absent
    pub fn new(metadata: RepositoryMetadata, file_tree: Vec<FileTreeEntry>) -> Self {
        Self {
            metadata,
            file_tree,
            package_json: None,
            requirements_txt: None,
            pyproject_toml: None,
            existing_readme: None,
            license_content: None,
            config_files: Vec::new(),
        }
    }
}

/// True when a path is on the configuration file allow-list
pub fn is_config_file(path: &str) -> bool {
    CONFIG_SUFFIX.is_match(path) || CONFIG_NAME.is_match(path) || CONFIG_EXACT.contains(&path)
}

/// Picks up to [`MAX_CONFIG_FILES`] configuration files in tree order
pub fn select_config_files(file_tree: &[FileTreeEntry]) -> Vec<&FileTreeEntry> {
    file_tree
        .iter()
        .filter(|entry| entry.is_file() && is_config_file(&entry.path))
        .take(MAX_CONFIG_FILES)
        .collect()
}

/// Fetches repository data through a [`GitHubClient`]
#[derive(Clone, Debug)]
pub struct RepositoryFetcher {
    client: GitHubClient,
}

impl RepositoryFetcher {
    /// Creates a fetcher around an existing client
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }

    /// Fetches metadata, tree, optional files and configuration files
    pub async fn fetch(&self, identity: &RepositoryIdentity) -> Result<RawRepositoryData> {
        info!("Fetching repository metadata for {}", identity.full_name());
        let metadata = self.client.get_repository(identity).await?;

        info!("Fetching file tree at {}", metadata.default_branch);
        let file_tree = self.client.get_tree(identity, &metadata.default_branch).await?;

        let (package_json, requirements_txt, pyproject_toml, existing_readme, license_content) = tokio::join!(
            self.fetch_package_json(identity),
            self.client.get_optional_file(identity, "requirements.txt"),
            self.client.get_optional_file(identity, "pyproject.toml"),
            self.fetch_first(identity, &README_CANDIDATES),
            self.fetch_first(identity, &LICENSE_CANDIDATES),
        );

        let config_files = self.fetch_config_files(identity, &file_tree).await;
        info!(
            "Fetched {} tree entries and {} configuration files",
            file_tree.len(),
            config_files.len()
        );

        Ok(RawRepositoryData {
            metadata,
            file_tree,
            package_json,
            requirements_txt,
            pyproject_toml,
            existing_readme,
            license_content,
            config_files,
        })
    }

    async fn fetch_package_json(&self, identity: &RepositoryIdentity) -> Option<Value> {
        let raw = self.client.get_optional_file(identity, "package.json").await?;
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) if value.is_object() => Some(value),
            Ok(_) => {
                warn!("package.json is not a JSON object, ignoring it");
                None
            }
            Err(e) => {
                warn!("Failed to parse package.json: {}", e);
                None
            }
        }
    }

    /// Tries each candidate in order; any failure moves on to the next one
    async fn fetch_first(&self, identity: &RepositoryIdentity, candidates: &[&str]) -> Option<String> {
        for path in candidates {
            if let Some(content) = self.client.get_optional_file(identity, path).await {
                return Some(content);
            }
        }
        None
    }

    async fn fetch_config_files(
        &self,
        identity: &RepositoryIdentity,
        file_tree: &[FileTreeEntry],
    ) -> Vec<ConfigFile> {
        let fetches = select_config_files(file_tree).into_iter().map(|entry| async move {
            self.client
                .get_optional_file(identity, &entry.path)
                .await
                .map(|content| ConfigFile {
                    path: entry.path.clone(),
                    content,
                })
        });

        join_all(fetches).await.into_iter().flatten().collect()
    }
}
