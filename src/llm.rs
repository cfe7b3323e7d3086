//! README generation through the Gemini `generateContent` API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{GeneratorError, Result};

/// Sampling temperature for every generation request
pub const TEMPERATURE: f64 = 0.7;
/// Output token cap for every generation request
pub const MAX_OUTPUT_TOKENS: u32 = 8192;

/// A model that turns a prompt into README markdown
#[async_trait]
pub trait ReadmeModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Gemini REST client
///
/// The key is checked on every call so a server can start without one and
/// still answer with `MissingCredential`.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    message: String,
}

impl GeminiClient {
    pub fn new(base_url: &str, model: &str, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.gemini_api_base,
            &config.model,
            config.gemini_api_key().map(str::to_string),
        )
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl ReadmeModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or(GeneratorError::MissingCredential)?;

        info!("Requesting generation from {}", self.model);
        let url = self.endpoint();
        debug!("POST {} ({} prompt chars)", url, prompt.len());

        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "maxOutputTokens": MAX_OUTPUT_TOKENS
            }
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GeneratorError::Provider(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GeneratorError::Provider(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| format!("HTTP {}", status));
            return Err(GeneratorError::Provider(message));
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&text).map_err(|e| GeneratorError::Provider(e.to_string()))?;
        let generated = extract_text(parsed)
            .ok_or_else(|| GeneratorError::Provider("Response contained no text".to_string()))?;

        Ok(strip_code_fence(&generated))
    }
}

fn extract_text(response: GenerateResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    Some(text)
}

/// Removes a wrapping code fence and surrounding whitespace
///
/// Recognized openers are ```` ```markdown ````, ```` ```md ```` and a bare
/// ```` ``` ````.
pub fn strip_code_fence(text: &str) -> String {
    let mut readme = text.trim();

    for opener in ["```markdown", "```md", "```"] {
        if let Some(rest) = readme.strip_prefix(opener) {
            readme = rest;
            break;
        }
    }
    if let Some(rest) = readme.strip_suffix("```") {
        readme = rest;
    }

    readme.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("```markdown\n# Title\n```", "# Title" ; "markdown fence")]
    #[test_case("```md\n# Title\n```\n", "# Title" ; "md fence")]
    #[test_case("```\n# Title\n```", "# Title" ; "bare fence")]
    #[test_case("  # Title\n\nBody  ", "# Title\n\nBody" ; "no fence")]
    #[test_case("# Title\n```", "# Title" ; "trailing fence only")]
    fn test_strip_code_fence(input: &str, expected: &str) {
        assert_eq!(strip_code_fence(input), expected);
    }

    #[test]
    fn test_inner_fences_survive() {
        let input = "```markdown\n# Title\n\n```bash\nnpm install\n```\n```";
        assert_eq!(strip_code_fence(input), "# Title\n\n```bash\nnpm install\n```");
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        // Unroutable base URL: a network attempt would surface as Provider.
        let client = GeminiClient::new("http://127.0.0.1:9", "gemini-2.5-flash", None);
        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, GeneratorError::MissingCredential));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        let client = GeminiClient::new("http://localhost", "m", Some(String::new()));
        assert!(client.api_key.is_none());
    }

    #[test]
    fn test_endpoint_and_debug_redaction() {
        let client = GeminiClient::new("http://localhost/", "gemini-2.5-flash", Some("secret".into()));
        assert_eq!(
            client.endpoint(),
            "http://localhost/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert!(!format!("{:?}", client).contains("secret"));
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GenerateResponse = serde_json::from_str(
            r##"{"candidates":[{"content":{"parts":[{"text":"# A"},{"text":"\nB"}]}}]}"##,
        )
        .unwrap();
        assert_eq!(extract_text(response).as_deref(), Some("# A\nB"));

        let empty: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(extract_text(empty), None);
    }
}
