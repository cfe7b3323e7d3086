//! Repository data as returned by the GitHub REST API, and the normalized
//! shapes the rest of the pipeline works with.

use serde::{Deserialize, Serialize};

/// The (owner, name) pair addressing a hosted repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryIdentity {
    /// Owner/organization name
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepositoryIdentity {
    /// Creates a new identity
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Returns "owner/name"
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// License information attached to a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    /// Display name, e.g. "MIT License"
    pub name: String,
    /// SPDX identifier, e.g. "MIT"
    pub spdx_id: Option<String>,
}

/// Repository metadata fetched once per request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    /// Repository name
    pub name: String,
    /// Full name: "owner/repo"
    pub full_name: String,
    /// Optional description
    pub description: Option<String>,
    /// Topics/tags associated with the repository
    pub topics: Vec<String>,
    /// License reported by GitHub
    pub license: Option<License>,
    /// Primary language (as detected by GitHub)
    pub language: Option<String>,
    /// Default branch name
    pub default_branch: String,
    /// Project homepage
    pub homepage: Option<String>,
    /// Number of stars
    pub stargazers_count: u64,
    /// Number of forks
    pub forks_count: u64,
}

/// Kind of entry in the recursive file tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A regular file (git blob)
    File,
    /// A directory (git tree)
    Directory,
}

/// One entry of the flat recursive file tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTreeEntry {
    /// Path relative to the repository root
    pub path: String,
    /// File or directory
    pub kind: EntryKind,
    /// Size in bytes, files only
    pub size: Option<u64>,
}

impl FileTreeEntry {
    /// Creates a file entry
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            size: None,
        }
    }

    /// Creates a directory entry
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
            size: None,
        }
    }

    /// True for file entries
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// True for directory entries
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// True when the entry sits at the repository root
    pub fn is_top_level(&self) -> bool {
        !self.path.contains('/')
    }
}

/// `GET /repos/{owner}/{repo}` payload
#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryResponse {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    pub license: Option<LicenseResponse>,
    pub language: Option<String>,
    pub default_branch: Option<String>,
    pub homepage: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LicenseResponse {
    pub name: String,
    pub spdx_id: Option<String>,
}

impl From<RepositoryResponse> for RepositoryMetadata {
    fn from(repo: RepositoryResponse) -> Self {
        Self {
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description,
            topics: repo.topics.unwrap_or_default(),
            license: repo.license.map(|l| License {
                name: l.name,
                spdx_id: l.spdx_id,
            }),
            language: repo.language,
            default_branch: repo.default_branch.unwrap_or_else(|| "main".to_string()),
            homepage: repo.homepage.filter(|h| !h.is_empty()),
            stargazers_count: repo.stargazers_count,
            forks_count: repo.forks_count,
        }
    }
}

/// `GET /repos/{owner}/{repo}/git/trees/{branch}?recursive=1` payload
#[derive(Debug, Deserialize)]
pub(crate) struct TreeResponse {
    #[serde(default)]
    pub tree: Vec<TreeItem>,
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TreeItem {
    pub path: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub size: Option<u64>,
}

impl From<TreeItem> for FileTreeEntry {
    fn from(item: TreeItem) -> Self {
        let kind = if item.item_type == "tree" {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        Self {
            path: item.path,
            kind,
            size: item.size,
        }
    }
}

/// `GET /repos/{owner}/{repo}/contents/{path}` payload
#[derive(Debug, Deserialize)]
pub(crate) struct ContentResponse {
    pub content: Option<String>,
    pub encoding: Option<String>,
}
