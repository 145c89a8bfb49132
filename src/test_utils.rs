//! Test utilities for Ideaboard
//!
//! This module provides a scripted provider for driving the board without a
//! network, plus configuration helpers.

use crate::config::Config;
use crate::error::IdeaboardError;
use crate::providers::{CompletionResponse, Provider};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Provider that replays queued responses and records every prompt
///
/// Clones share the same queue and prompt log, so a test can keep one
/// handle after moving another into a `Gateway`.
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProvider {
    /// Empty script; any call fails with "no scripted reply"
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful completion
    pub fn with_response(self, text: &str) -> Self {
        self.replies
            .lock()
            .expect("script lock")
            .push_back(Ok(text.to_string()));
        self
    }

    /// Queue a provider failure
    pub fn with_failure(self, message: &str) -> Self {
        self.replies
            .lock()
            .expect("script lock")
            .push_back(Err(message.to_string()));
        self
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt lock").clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> String {
        "scripted-1".to_string()
    }

    async fn complete(&self, prompt: &str) -> crate::error::Result<CompletionResponse> {
        self.prompts
            .lock()
            .expect("prompt lock")
            .push(prompt.to_string());

        let reply = self.replies.lock().expect("script lock").pop_front();
        match reply {
            Some(Ok(text)) => Ok(CompletionResponse::new(text)),
            Some(Err(message)) => Err(IdeaboardError::Provider(message).into()),
            None => Err(IdeaboardError::Provider("no scripted reply".to_string()).into()),
        }
    }
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: crate::error::Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// Create a test configuration with default values
pub fn test_config() -> Config {
    Config::default()
}

/// Create a test configuration YAML string
pub fn test_config_yaml() -> String {
    r#"
provider:
  type: ollama
  request_timeout_seconds: 30
  gemini:
    model: gemini-1.5-flash
  ollama:
    host: http://localhost:11434
    model: llama3.2:latest
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_provider_replays_in_order() {
        let provider = ScriptedProvider::new()
            .with_response("first")
            .with_failure("second failed");

        assert_eq!(provider.complete("p1").await.unwrap().text, "first");
        assert_error_contains(provider.complete("p2").await, "second failed");
        assert_error_contains(provider.complete("p3").await, "no scripted reply");
        assert_eq!(provider.prompts(), vec!["p1", "p2", "p3"]);
    }

    #[tokio::test]
    async fn test_scripted_provider_clones_share_log() {
        let provider = ScriptedProvider::new().with_response("x");
        let clone = provider.clone();
        clone.complete("shared").await.unwrap();
        assert_eq!(provider.prompts(), vec!["shared"]);
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        assert_error_contains(Ok(()), "error");
    }

    #[test]
    fn test_test_config() {
        let config = test_config();
        assert_eq!(config.provider.provider_type, "gemini");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_test_config_yaml() {
        let config: Config = serde_yaml::from_str(&test_config_yaml()).unwrap();
        assert_eq!(config.provider.provider_type, "ollama");
        assert_eq!(config.provider.gemini.model, "gemini-1.5-flash");
        assert!(config.validate().is_ok());
    }
}
