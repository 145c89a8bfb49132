//! Configuration management for Ideaboard
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{IdeaboardError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Provider types understood by the provider factory
pub const SUPPORTED_PROVIDERS: &[&str] = &["gemini", "ollama"];

/// Main configuration structure for Ideaboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Provider configuration (Gemini, Ollama)
    pub provider: ProviderConfig,
}

/// Provider configuration
///
/// Specifies which generative model backend to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use
    #[serde(rename = "type")]
    pub provider_type: String,

    /// HTTP timeout applied to every generation request (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Google Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Ollama configuration
    #[serde(default)]
    pub ollama: OllamaConfig,
}

fn default_request_timeout() -> u64 {
    120
}

/// Google Gemini provider configuration
///
/// The API key is not read from this file. It is resolved once at startup
/// from the environment or the system keyring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model identifier sent with every request
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API base URL (overridable so tests can point at a mock server)
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,
}

fn default_gemini_model() -> String {
    "gemini-1.5-pro".to_string()
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            api_base: default_gemini_api_base(),
        }
    }
}

/// Ollama provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama server host
    #[serde(default = "default_ollama_host")]
    pub host: String,

    /// Model to use for Ollama
    #[serde(default = "default_ollama_model")]
    pub model: String,
}

fn default_ollama_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:latest".to_string()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_ollama_host(),
            model: default_ollama_model(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: "gemini".to_string(),
            request_timeout_seconds: default_request_timeout(),
            gemini: GeminiConfig::default(),
            ollama: OllamaConfig::default(),
        }
    }
}

impl ProviderConfig {
    /// Model identifier of the active provider
    ///
    /// # Examples
    ///
    /// ```
    /// use ideaboard::config::ProviderConfig;
    ///
    /// let config = ProviderConfig::default();
    /// assert_eq!(config.active_model(), "gemini-1.5-pro");
    /// ```
    pub fn active_model(&self) -> &str {
        match self.provider_type.as_str() {
            "ollama" => &self.ollama.model,
            _ => &self.gemini.model,
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(IdeaboardError::from)?;
        let config = serde_yaml::from_str(&contents).map_err(IdeaboardError::from)?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider_type) = std::env::var("IDEABOARD_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Ok(model) = std::env::var("IDEABOARD_GEMINI_MODEL") {
            self.provider.gemini.model = model;
        }

        if let Ok(api_base) = std::env::var("IDEABOARD_GEMINI_API_BASE") {
            self.provider.gemini.api_base = api_base;
        }

        if let Ok(host) = std::env::var("IDEABOARD_OLLAMA_HOST") {
            self.provider.ollama.host = host;
        }

        if let Ok(model) = std::env::var("IDEABOARD_OLLAMA_MODEL") {
            self.provider.ollama.model = model;
        }

        if let Ok(timeout) = std::env::var("IDEABOARD_REQUEST_TIMEOUT_SECONDS") {
            match timeout.parse::<u64>() {
                Ok(value) => {
                    self.provider.request_timeout_seconds = value;
                    tracing::debug!(
                        request_timeout_seconds = value,
                        "Env override: IDEABOARD_REQUEST_TIMEOUT_SECONDS"
                    );
                }
                Err(_) => {
                    tracing::warn!("Invalid IDEABOARD_REQUEST_TIMEOUT_SECONDS: {}", timeout);
                }
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(provider) = cli.command.provider_override() {
            tracing::debug!("Using provider override: {}", provider);
            self.provider.provider_type = provider.to_string();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `IdeaboardError::Config` describing the first invalid field
    pub fn validate(&self) -> Result<()> {
        if self.provider.provider_type.is_empty() {
            return Err(IdeaboardError::Config("Provider type cannot be empty".to_string()).into());
        }

        if !SUPPORTED_PROVIDERS.contains(&self.provider.provider_type.as_str()) {
            return Err(IdeaboardError::Config(format!(
                "Invalid provider type: {}. Must be one of: {}",
                self.provider.provider_type,
                SUPPORTED_PROVIDERS.join(", ")
            ))
            .into());
        }

        if self.provider.request_timeout_seconds == 0
            || self.provider.request_timeout_seconds > 3600
        {
            return Err(IdeaboardError::Config(
                "request_timeout_seconds must be between 1 and 3600".to_string(),
            )
            .into());
        }

        if self.provider.gemini.model.trim().is_empty() {
            return Err(IdeaboardError::Config("Gemini model cannot be empty".to_string()).into());
        }

        if self.provider.ollama.model.trim().is_empty() {
            return Err(IdeaboardError::Config("Ollama model cannot be empty".to_string()).into());
        }

        validate_http_url("gemini.api_base", &self.provider.gemini.api_base)?;
        validate_http_url("ollama.host", &self.provider.ollama.host)?;

        Ok(())
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(IdeaboardError::Config(format!(
            "{} must start with http:// or https://, got: {}",
            field, value
        ))
        .into())
    }
}
