//! Base provider trait and common types for Ideaboard
//!
//! This module defines the Provider trait that every generative model backend
//! implements, along with the completion response and token usage types.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Token usage information from a completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: usize,
    /// Number of tokens in the completion
    pub completion_tokens: usize,
    /// Total tokens used (prompt + completion)
    pub total_tokens: usize,
}

impl TokenUsage {
    /// Create a new TokenUsage instance
    ///
    /// # Examples
    ///
    /// ```
    /// use ideaboard::providers::TokenUsage;
    ///
    /// let usage = TokenUsage::new(100, 50);
    /// assert_eq!(usage.total_tokens, 150);
    /// ```
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Completion text with optional token usage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// Raw free-text completion from the model
    pub text: String,
    /// Optional token usage information
    pub usage: Option<TokenUsage>,
}

impl CompletionResponse {
    /// Create a new CompletionResponse without usage data
    ///
    /// # Examples
    ///
    /// ```
    /// use ideaboard::providers::CompletionResponse;
    ///
    /// let response = CompletionResponse::new("Idea one\nIdea two");
    /// assert!(response.usage.is_none());
    /// ```
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: None,
        }
    }

    /// Create a new CompletionResponse with token usage
    pub fn with_usage(text: impl Into<String>, usage: TokenUsage) -> Self {
        Self {
            text: text.into(),
            usage: Some(usage),
        }
    }
}

/// Provider trait for generative model backends
///
/// A provider turns a single prompt into free-form completion text. Any
/// failure (network, auth, quota, malformed response) is returned as an
/// error; callers decide how to surface it.
///
/// # Examples
///
/// ```no_run
/// use ideaboard::providers::{CompletionResponse, Provider};
/// use ideaboard::error::Result;
/// use async_trait::async_trait;
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl Provider for EchoProvider {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     fn model(&self) -> String {
///         "echo-1".to_string()
///     }
///
///     async fn complete(&self, prompt: &str) -> Result<CompletionResponse> {
///         Ok(CompletionResponse::new(prompt))
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short provider name used in status output and logs
    fn name(&self) -> &str;

    /// Model identifier sent with every request
    fn model(&self) -> String;

    /// Completes a single prompt
    ///
    /// # Arguments
    ///
    /// * `prompt` - The full prompt text, sent as the sole user content
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails or the response carries no text
    async fn complete(&self, prompt: &str) -> Result<CompletionResponse>;
}
