//! Generation gateway
//!
//! Wraps a single provider call and turns every failure into a message the
//! board can show. Nothing raised by the provider crosses this boundary.

use crate::providers::Provider;

/// Result of one generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Raw completion text from the model
    Success(String),
    /// User-displayable description of why the call failed
    Failure(String),
}

impl GenerationOutcome {
    /// Completion text, or `""` for a failed call
    pub fn output(&self) -> &str {
        match self {
            Self::Success(text) => text,
            Self::Failure(_) => "",
        }
    }

    /// Failure message, if the call failed
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(message) => Some(message),
        }
    }
}

/// Gateway to the configured generative model
pub struct Gateway {
    provider: Box<dyn Provider>,
}

impl Gateway {
    /// Wrap a provider
    pub fn new(provider: Box<dyn Provider>) -> Self {
        Self { provider }
    }

    /// The wrapped provider
    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }

    /// Send `prompt` to the model once
    ///
    /// Never fails: provider errors become [`GenerationOutcome::Failure`]
    /// carrying the underlying description. No retry is attempted.
    pub async fn generate(&self, prompt: &str) -> GenerationOutcome {
        match self.provider.complete(prompt).await {
            Ok(response) => {
                tracing::debug!(
                    provider = self.provider.name(),
                    output_chars = response.text.len(),
                    total_tokens = ?response.usage.map(|u| u.total_tokens),
                    "Generation succeeded"
                );
                GenerationOutcome::Success(response.text)
            }
            Err(e) => {
                tracing::warn!(provider = self.provider.name(), "Generation failed: {:#}", e);
                GenerationOutcome::Failure(format!("Failed to generate ideas: {}", e))
            }
        }
    }
}
