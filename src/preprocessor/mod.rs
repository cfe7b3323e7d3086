//! Turns fetched repository data into the bounded context used for prompts.
//!
//! Everything here is pure and infallible: sparse input yields empty
//! fields, never an error.

pub mod dependencies;
pub mod detection;
pub mod summary;

use serde::{Serialize, Serializer};

use crate::fetcher::RawRepositoryData;

pub use dependencies::{extract_dependencies, extract_scripts, Dependencies};
pub use detection::{
    detect_frameworks, detect_languages, detect_package_manager, detect_tools, merge_languages,
};
pub use summary::{summarize_config_files, summarize_existing_readme, summarize_project_structure};

/// Description used when the repository has none
pub const NO_DESCRIPTION: &str = "No description provided";
/// License label when LICENSE text exists but GitHub reports no license
pub const CUSTOM_LICENSE: &str = "Custom License";

/// Star and fork counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepositoryStats {
    pub stars: u64,
    pub forks: u64,
}

/// Detected technologies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechStack {
    pub languages: Vec<String>,
    pub frameworks: Vec<String>,
    pub tools: Vec<String>,
    pub package_manager: Option<String>,
}

/// Normalized, size-bounded projection of [`RawRepositoryData`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedContext {
    pub repo_name: String,
    pub full_name: String,
    pub description: String,
    pub primary_language: Option<String>,
    pub topics: Vec<String>,
    pub license: Option<String>,
    pub homepage: Option<String>,
    pub stats: RepositoryStats,
    pub tech_stack: TechStack,
    pub dependencies: Dependencies,
    pub project_structure: String,
    /// `package.json` scripts in document order
    #[serde(serialize_with = "serialize_pairs")]
    pub scripts: Vec<(String, String)>,
    pub existing_readme_summary: Option<String>,
    pub config_summary: String,
}

/// Builds the prompt context from fetched data
pub fn process(raw: &RawRepositoryData) -> ProcessedContext {
    let metadata = &raw.metadata;
    let package_json = raw.package_json.as_ref();

    let languages = merge_languages(metadata.language.as_deref(), detect_languages(&raw.file_tree));

    let tech_stack = TechStack {
        languages,
        frameworks: detect_frameworks(package_json),
        tools: detect_tools(&raw.file_tree),
        package_manager: detect_package_manager(&raw.file_tree),
    };

    let license = raw.license_content.as_ref().map(|_| {
        metadata
            .license
            .as_ref()
            .map(|l| l.name.clone())
            .unwrap_or_else(|| CUSTOM_LICENSE.to_string())
    });

    ProcessedContext {
        repo_name: metadata.name.clone(),
        full_name: metadata.full_name.clone(),
        description: metadata
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        primary_language: metadata.language.clone(),
        topics: metadata.topics.clone(),
        license,
        homepage: metadata.homepage.clone(),
        stats: RepositoryStats {
            stars: metadata.stargazers_count,
            forks: metadata.forks_count,
        },
        tech_stack,
        dependencies: extract_dependencies(
            package_json,
            raw.requirements_txt.as_deref(),
            raw.pyproject_toml.as_deref(),
        ),
        project_structure: summarize_project_structure(&raw.file_tree),
        scripts: extract_scripts(package_json),
        existing_readme_summary: summarize_existing_readme(raw.existing_readme.as_deref()),
        config_summary: summarize_config_files(&raw.config_files),
    }
}

fn serialize_pairs<S>(pairs: &[(String, String)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(pairs.iter().map(|(k, v)| (k, v)))
}
