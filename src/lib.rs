#![warn(clippy::all)]

//! readme-generator - README generation for public GitHub repositories
//!
//! The pipeline is a straight line: a repository reference is parsed into an
//! owner/name pair, the repository is fetched through the GitHub REST API,
//! the fetched data is reduced to a bounded context, the context is rendered
//! into a single prompt, and one Gemini request turns that prompt into
//! markdown.
//!
//! ## Usage
//! ```rust,ignore
//! use readme_generator::{Config, ReadmeService};
//! use readme_generator::api::GenerateReadmeRequest;
//!
//! async fn example() -> readme_generator::Result<()> {
//!     let service = ReadmeService::from_config(&Config::from_env())?;
//!     let request = GenerateReadmeRequest {
//!         repo_url: Some("https://github.com/acme/widget".into()),
//!         sections: Some(serde_json::json!({ "installation": true, "usage": true })),
//!         tone: Some("friendly".into()),
//!         language: Some("English".into()),
//!     }
//!     .validate()?;
//!     let response = service.generate(&request).await?;
//!     println!("{}", response.readme);
//!     Ok(())
//! }
//! ```

/// Configuration loaded from the environment
pub mod config;
/// Error taxonomy and HTTP status mapping
pub mod error;
/// Logging setup
pub mod logging;
/// GitHub REST client, response models and reference parsing
pub mod github;
/// Repository fetching with optional-file degradation
pub mod fetcher;
/// Tech stack detection and context construction
pub mod preprocessor;
/// Section and tone tables and prompt rendering
pub mod prompts;
/// Generation model client
pub mod llm;
/// Request validation, the generation service and the HTTP router
pub mod api;
/// Input normalization helpers
pub mod utils;

pub use api::{router, AppState, GenerateReadmeRequest, GenerateReadmeResponse, ReadmeService};
pub use config::Config;
pub use error::{GeneratorError, Result};
pub use github::{parse_repo_url, GitHubClient, RepositoryIdentity};
pub use llm::{GeminiClient, ReadmeModel};
pub use preprocessor::{process, ProcessedContext};
pub use prompts::{build_prompt, Section, SectionSelection, Tone};
