//! The README generation operation and its HTTP surface.
//!
//! [`ReadmeService`] runs the pipeline: parse, fetch, preprocess, prompt,
//! generate. [`router`] exposes it as `POST /api/generate-readme` and maps
//! every failure to a status code and an `{ "error": ... }` body.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    response::Json as ResponseJson,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::config::Config;
use crate::error::{GeneratorError, Result};
use crate::fetcher::RepositoryFetcher;
use crate::github::{parse_repo_url, GitHubClient};
use crate::llm::{GeminiClient, ReadmeModel};
use crate::preprocessor::{process, TechStack};
use crate::prompts::{build_prompt, SectionSelection, Tone};

/// Inbound request body, every field optional so validation can name
/// the first missing one
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReadmeRequest {
    pub repo_url: Option<String>,
    pub sections: Option<Value>,
    pub tone: Option<String>,
    pub language: Option<String>,
}

/// A request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeRequest {
    pub repo_url: String,
    pub sections: SectionSelection,
    pub tone: Tone,
    pub language: String,
}

impl GenerateReadmeRequest {
    /// Checks presence in order: reference, sections, tone, language.
    /// Values are only interpreted once all four are present.
    pub fn validate(self) -> Result<ReadmeRequest> {
        let repo_url = non_empty(self.repo_url)
            .ok_or_else(|| GeneratorError::validation("Repository URL is required"))?;
        let sections = match self.sections {
            Some(value @ Value::Object(_)) => value,
            _ => return Err(GeneratorError::validation("Section selection is required")),
        };
        let tone = non_empty(self.tone)
            .ok_or_else(|| GeneratorError::validation("Tone selection is required"))?;
        let language = non_empty(self.language)
            .ok_or_else(|| GeneratorError::validation("Language selection is required"))?;

        let sections = serde_json::from_value::<SectionSelection>(sections)
            .map_err(|e| GeneratorError::validation(format!("Invalid section selection: {}", e)))?;

        if sections.is_empty() {
            return Err(GeneratorError::validation(
                "At least one section must be selected",
            ));
        }

        Ok(ReadmeRequest {
            repo_url,
            sections,
            tone: tone.parse()?,
            language,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Identity fields echoed back for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadmeMetadata {
    pub repo_name: String,
    pub full_name: String,
    pub detected_tech_stack: TechStack,
}

/// Successful response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateReadmeResponse {
    pub success: bool,
    pub readme: String,
    pub metadata: ReadmeMetadata,
}

/// Runs the generation pipeline for one request at a time; holds no
/// per-request state
#[derive(Clone)]
pub struct ReadmeService {
    fetcher: RepositoryFetcher,
    model: Arc<dyn ReadmeModel>,
}

impl ReadmeService {
    pub fn new(fetcher: RepositoryFetcher, model: Arc<dyn ReadmeModel>) -> Self {
        Self { fetcher, model }
    }

    /// Wires the GitHub and Gemini clients from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let github = GitHubClient::from_config(config)?;
        Ok(Self::new(
            RepositoryFetcher::new(github),
            Arc::new(GeminiClient::from_config(config)),
        ))
    }

    /// Fetch, preprocess, prompt and generate, stopping at the first failure
    pub async fn generate(&self, request: &ReadmeRequest) -> Result<GenerateReadmeResponse> {
        let identity = parse_repo_url(&request.repo_url)?;

        info!("Fetching repository data for {}", identity.full_name());
        let raw = self.fetcher.fetch(&identity).await?;

        info!("Preprocessing repository data");
        let context = process(&raw);

        info!("Generating README ({} tone, {})", request.tone, request.language);
        let prompt = build_prompt(&context, &request.sections, request.tone, &request.language);
        let readme = self.model.generate(&prompt).await?;

        Ok(GenerateReadmeResponse {
            success: true,
            readme,
            metadata: ReadmeMetadata {
                repo_name: context.repo_name,
                full_name: context.full_name,
                detected_tech_stack: context.tech_stack,
            },
        })
    }
}

/// State shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReadmeService>,
}

impl AppState {
    pub fn new(service: ReadmeService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Builds the HTTP application with all routes and middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/generate-readme", post(generate_readme))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint - returns basic service information
async fn index() -> ResponseJson<Value> {
    ResponseJson(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Generate a README.md for a public GitHub repository",
        "endpoints": {
            "health": "/health",
            "generate": "/api/generate-readme"
        }
    }))
}

/// Health check endpoint
async fn health_check() -> ResponseJson<Value> {
    ResponseJson(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "status": "healthy"
    }))
}

/// README generation endpoint
async fn generate_readme(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<ResponseJson<GenerateReadmeResponse>> {
    match handle_generate(&state, &body).await {
        Ok(response) => {
            info!("Generated README for {}", response.metadata.full_name);
            Ok(ResponseJson(response))
        }
        Err(e) => {
            error!("Error generating README: {}", e);
            Err(e)
        }
    }
}

async fn handle_generate(state: &AppState, body: &[u8]) -> Result<GenerateReadmeResponse> {
    let request: GenerateReadmeRequest = serde_json::from_slice(body)
        .map_err(|e| GeneratorError::validation(format!("Invalid request body: {}", e)))?;
    let request = request.validate()?;
    state.service.generate(&request).await
}
