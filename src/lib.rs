//! Ideaboard - Interactive brainstorming board library
//!
//! This library provides the core functionality for Ideaboard: a topic is
//! entered, a generative model proposes ideas, and the user curates them by
//! removing or liking entries before asking for more. Every follow-up prompt
//! carries the kept and removed ideas so the model can steer toward what the
//! user wants.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `board`: Idea records, the generation gateway, and the session state machine
//! - `prompts`: Prompt construction from topic, kept ideas, and removed ideas
//! - `providers`: Model provider abstraction and implementations (Gemini, Ollama)
//! - `commands`: Interactive board loop and one-shot command handlers
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use ideaboard::{Config, Gateway, SessionState};
//! use ideaboard::providers::create_provider;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let gateway = Gateway::new(create_provider(&config.provider)?);
//!     let board = SessionState::new()
//!         .set_topic(&gateway, "urban gardening")
//!         .await?
//!         .state;
//!     println!("{} ideas", board.visible_count());
//!     Ok(())
//! }
//! ```

pub mod board;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod prompts;
pub mod providers;

// Re-export commonly used types
pub use board::{Gateway, GenerationOutcome, Idea, SessionState};
pub use config::Config;
pub use error::{IdeaboardError, Result};

#[cfg(test)]
pub mod test_utils;
