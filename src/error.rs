use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Custom result type alias for the application
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Environment variable holding the generation provider key
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Errors that can occur while generating a README
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The repository reference did not match any accepted shape
    #[error("Invalid GitHub repository URL: {0}")]
    InvalidReference(String),

    /// Repository is absent or private
    #[error("Repository not found. Make sure it exists and is public.")]
    NotFound,

    /// Hosting provider quota exceeded
    #[error("GitHub API rate limit exceeded. Please try again later.")]
    RateLimited,

    /// Unexpected non-success status from the hosting provider
    #[error("{context}: {status}")]
    Upstream {
        /// What was being fetched
        context: String,
        /// HTTP status returned by the provider
        status: u16,
    },

    /// The generation provider has no credential configured
    #[error("{} environment variable is not set", GEMINI_API_KEY_VAR)]
    MissingCredential,

    /// The generation call failed
    #[error("Generation provider error: {0}")]
    Provider(String),

    /// Malformed inbound request
    #[error("{0}")]
    Validation(String),

    /// Invalid local configuration
    #[error("Config error: {0}")]
    Config(String),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing/serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON body returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human readable failure message
    pub error: String,
}

impl GeneratorError {
    /// Creates a validation error with the specified message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Maps the failure to the status code returned to callers
    ///
    /// Variants with a fixed meaning map directly. The rest carry
    /// provider text, so their message decides.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidReference(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::MissingCredential => StatusCode::SERVICE_UNAVAILABLE,
            Self::Upstream { .. }
            | Self::Provider(_)
            | Self::Config(_)
            | Self::Http(_)
            | Self::Json(_) => status_from_message(&self.to_string()),
        }
    }

    /// Checks if this error is the caller's fault
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// First marker found in the message wins, checked in this order
const STATUS_MARKERS: [(&str, StatusCode); 4] = [
    ("not found", StatusCode::NOT_FOUND),
    ("rate limit", StatusCode::TOO_MANY_REQUESTS),
    ("Invalid", StatusCode::BAD_REQUEST),
    (GEMINI_API_KEY_VAR, StatusCode::SERVICE_UNAVAILABLE),
];

fn status_from_message(message: &str) -> StatusCode {
    STATUS_MARKERS
        .iter()
        .find(|(marker, _)| message.contains(marker))
        .map(|(_, status)| *status)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl IntoResponse for GeneratorError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
