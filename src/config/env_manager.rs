use serde::{Deserialize, Serialize};

use crate::error::GEMINI_API_KEY_VAR;

/// Environment variable holding the optional GitHub access token
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Stores API keys for the hosting and generation providers
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ApiKeys {
    /// GitHub API token for authenticated requests
    pub github_token: Option<String>,
    /// Gemini API key for README generation
    pub gemini_api_key: Option<String>,
}

impl ApiKeys {
    /// Loads API keys from the environment
    pub fn from_env() -> Self {
        Self {
            github_token: get_env_value(GITHUB_TOKEN_VAR),
            gemini_api_key: get_env_value(GEMINI_API_KEY_VAR),
        }
    }
}

// Keys must never end up in logs.
impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeys")
            .field("github_token", &self.github_token.as_ref().map(|_| "***"))
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Reads an environment variable, treating empty values as unset
pub fn get_env_value(key: &str) -> Option<String> {
    let value = std::env::var(key).ok()?;
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_keys() {
        let keys = ApiKeys {
            github_token: Some("ghp_secret".to_string()),
            gemini_api_key: None,
        };
        let rendered = format!("{:?}", keys);
        assert!(!rendered.contains("ghp_secret"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn test_missing_env_value() {
        assert_eq!(get_env_value("README_GENERATOR_SURELY_UNSET_VARIABLE"), None);
    }
}
