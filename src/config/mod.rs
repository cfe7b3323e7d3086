mod env_manager;

use serde::{Deserialize, Serialize};

pub use env_manager::{get_env_value, ApiKeys, GITHUB_TOKEN_VAR};

/// Default GitHub REST API endpoint
pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
/// Default Gemini REST API endpoint
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
/// Model used for every generation request
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Address the web server binds to
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Main configuration struct for the application
///
/// Holds provider credentials, API endpoints and server settings. Everything
/// is read from the environment; nothing is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API keys for the hosting and generation providers
    pub api_keys: ApiKeys,
    /// Base URL of the GitHub REST API
    pub github_api_base: String,
    /// Base URL of the Gemini REST API
    pub gemini_api_base: String,
    /// Model identifier sent with each generation request
    pub model: String,
    /// Socket address for the web server
    pub bind_addr: String,
    /// Fallback log level when `RUST_LOG` is not set
    pub log_level: String,
}

impl Config {
    /// Builds the configuration from environment variables
    ///
    /// Empty variables are treated as unset and fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            api_keys: ApiKeys::from_env(),
            github_api_base: get_env_value("GITHUB_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GITHUB_API_BASE.to_string()),
            gemini_api_base: get_env_value("GEMINI_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            model: get_env_value("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            bind_addr: get_env_value("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            log_level: get_env_value("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        }
    }

    /// Retrieves the optional GitHub token
    pub fn github_token(&self) -> Option<&str> {
        self.api_keys.github_token.as_deref()
    }

    /// Retrieves the optional Gemini API key
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.api_keys.gemini_api_key.as_deref()
    }

    /// Points the GitHub client at a different API root
    pub fn with_github_api_base(mut self, base: impl Into<String>) -> Self {
        self.github_api_base = base.into();
        self
    }

    /// Points the generation client at a different API root
    pub fn with_gemini_api_base(mut self, base: impl Into<String>) -> Self {
        self.gemini_api_base = base.into();
        self
    }

    /// Replaces the configured provider keys
    pub fn with_api_keys(mut self, api_keys: ApiKeys) -> Self {
        self.api_keys = api_keys;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_keys: ApiKeys::default(),
            github_api_base: DEFAULT_GITHUB_API_BASE.to_string(),
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            log_level: "info".to_string(),
        }
    }
}
