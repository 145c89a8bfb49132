//! Provider module for Ideaboard
//!
//! This module contains the generative model abstraction and the Gemini and
//! Ollama implementations.

pub mod base;
pub mod gemini;
pub mod ollama;

pub use base::{CompletionResponse, Provider, TokenUsage};
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;

use crate::config::ProviderConfig;
use crate::error::{IdeaboardError, Result};
use std::time::Duration;

/// Create a provider instance based on configuration
///
/// For Gemini the API key is resolved here, once, from the environment or
/// the system keyring. A missing key does not fail construction.
///
/// # Arguments
///
/// * `config` - Provider configuration; `provider_type` selects the backend
///
/// # Returns
///
/// Returns a boxed provider instance
///
/// # Errors
///
/// Returns error if provider type is invalid or initialization fails
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    let timeout = Duration::from_secs(config.request_timeout_seconds);

    match config.provider_type.as_str() {
        "gemini" => {
            let provider =
                GeminiProvider::new(config.gemini.clone(), gemini::resolve_api_key(), timeout)?;
            if !provider.has_api_key() {
                tracing::warn!(
                    "No Gemini API key found; set {} or store one in the system keyring",
                    gemini::API_KEY_ENV
                );
            }
            Ok(Box::new(provider))
        }
        "ollama" => Ok(Box::new(OllamaProvider::new(
            config.ollama.clone(),
            timeout,
        )?)),
        other => Err(IdeaboardError::Provider(format!("Unknown provider type: {}", other)).into()),
    }
}
