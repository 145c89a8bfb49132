//! Google Gemini provider implementation for Ideaboard
//!
//! Calls the Gemini `generateContent` REST endpoint with the prompt as the
//! sole user content. The API key is resolved once when the provider is
//! built; a missing key is reported on the first request rather than at
//! startup.

use crate::config::GeminiConfig;
use crate::error::{IdeaboardError, Result};
use crate::providers::{CompletionResponse, Provider, TokenUsage};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable consulted first for the Gemini API key
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

const KEYRING_SERVICE: &str = "ideaboard";
const KEYRING_USER: &str = "gemini";

/// Gemini API provider
///
/// # Examples
///
/// ```no_run
/// use ideaboard::config::GeminiConfig;
/// use ideaboard::providers::{GeminiProvider, Provider};
/// use std::time::Duration;
///
/// # async fn example() -> ideaboard::error::Result<()> {
/// let provider = GeminiProvider::new(
///     GeminiConfig::default(),
///     Some("my-api-key".to_string()),
///     Duration::from_secs(120),
/// )?;
/// let completion = provider.complete("List three pet startup ideas").await?;
/// println!("{}", completion.text);
/// # Ok(())
/// # }
/// ```
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: usize,
    #[serde(default)]
    candidates_token_count: usize,
}

#[derive(Debug, Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Model and API base settings
    /// * `api_key` - Resolved API key, or `None` when no credential was found
    /// * `timeout` - HTTP timeout for each request
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: GeminiConfig, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ideaboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(IdeaboardError::from)?;

        tracing::info!(
            "Initialized Gemini provider: api_base={}, model={}, credentials={}",
            config.api_base,
            config.model,
            if api_key.is_some() { "present" } else { "missing" }
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Whether an API key was resolved for this provider
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }
}

/// Resolve the Gemini API key from the environment, then the system keyring
///
/// Lookup failures are logged and treated as "no key" so that the process
/// can still start; the missing credential surfaces on the first request.
pub fn resolve_api_key() -> Option<String> {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            tracing::debug!("Using Gemini API key from {}", API_KEY_ENV);
            return Some(key);
        }
    }

    match keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER).and_then(|e| e.get_password()) {
        Ok(key) if !key.trim().is_empty() => {
            tracing::debug!("Using Gemini API key from system keyring");
            Some(key)
        }
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("No Gemini API key in keyring: {}", IdeaboardError::from(e));
            None
        }
    }
}

/// Fold a Gemini error body into a readable message
fn describe_http_error(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .and_then(|wrapper| {
            let message = wrapper.error.message?;
            Some(match wrapper.error.status {
                Some(s) if !s.is_empty() => format!("{} {}: {}", status.as_u16(), s, message),
                _ => format!("{}: {}", status.as_u16(), message),
            })
        })
        .unwrap_or_else(|| format!("{}: {}", status.as_u16(), body))
}

fn extract_text(response: GenerateContentResponse) -> Result<CompletionResponse> {
    let usage = response
        .usage_metadata
        .map(|u| TokenUsage::new(u.prompt_token_count, u.candidates_token_count));

    let candidate = match response.candidates.into_iter().next() {
        Some(candidate) => candidate,
        None => {
            let reason = response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .map(|r| format!(" (blocked: {})", r))
                .unwrap_or_default();
            return Err(IdeaboardError::Provider(format!(
                "Gemini returned no candidates{}",
                reason
            ))
            .into());
        }
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate
            .finish_reason
            .map(|r| format!(" (finish reason: {})", r))
            .unwrap_or_default();
        return Err(IdeaboardError::Provider(format!(
            "Gemini returned no text in the response candidates{}",
            reason
        ))
        .into());
    }

    Ok(match usage {
        Some(usage) => CompletionResponse::with_usage(text, usage),
        None => CompletionResponse::new(text),
    })
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }

    async fn complete(&self, prompt: &str) -> Result<CompletionResponse> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            IdeaboardError::MissingCredentials(format!(
                "gemini (set {} or store a key in the system keyring)",
                API_KEY_ENV
            ))
        })?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let url = self.endpoint();
        tracing::debug!("Sending Gemini request: url={}, prompt_chars={}", url, prompt.len());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {}", e);
                IdeaboardError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, error_text);
            let description = describe_http_error(status, &error_text);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    IdeaboardError::Authentication(description)
                }
                _ => IdeaboardError::Provider(format!("Gemini returned error {}", description)),
            }
            .into());
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            IdeaboardError::Provider(format!("Failed to parse Gemini response: {}", e))
        })?;

        extract_text(parsed)
    }
}
