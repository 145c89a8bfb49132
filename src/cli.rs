//! Command-line interface definition for Ideaboard
//!
//! This module defines the CLI structure using clap's derive API,
//! providing the interactive board, a one-shot generator, and a prompt
//! preview command.

use clap::{Parser, Subcommand};

/// Ideaboard - Interactive brainstorming board
///
/// Enter a topic, curate the generated ideas, and ask for more
/// suggestions shaped by what you kept and what you removed.
#[derive(Parser, Debug, Clone)]
#[command(name = "ideaboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Ideaboard
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the interactive brainstorming board
    Board {
        /// Override the provider from config (gemini, ollama)
        #[arg(short, long)]
        provider: Option<String>,

        /// Set the topic immediately instead of prompting for it
        #[arg(short, long)]
        topic: Option<String>,
    },

    /// Generate one round of ideas for a topic and exit
    Generate {
        /// Brainstorming topic
        #[arg(short, long)]
        topic: String,

        /// Override the provider from config (gemini, ollama)
        #[arg(short, long)]
        provider: Option<String>,

        /// Print ideas as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Print the prompt that would be sent, without calling a model
    Prompt {
        /// Brainstorming topic
        #[arg(short, long)]
        topic: String,

        /// Idea text to list as kept (repeatable)
        #[arg(short, long = "keep")]
        keep: Vec<String>,

        /// Idea text to list as removed (repeatable)
        #[arg(short, long = "remove")]
        remove: Vec<String>,
    },
}

impl Commands {
    /// Provider override carried by the command, if any
    pub fn provider_override(&self) -> Option<&str> {
        match self {
            Self::Board { provider, .. } | Self::Generate { provider, .. } => provider.as_deref(),
            Self::Prompt { .. } => None,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            json_logs: false,
            command: Commands::Board {
                provider: None,
                topic: None,
            },
        }
    }
}
