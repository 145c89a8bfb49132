//! Ideaboard - Interactive brainstorming board
//!
#![doc = "Ideaboard - Interactive brainstorming board"]
#![doc = "Main entry point for the Ideaboard application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ideaboard::cli::{Cli, Commands};
use ideaboard::commands;
use ideaboard::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose, cli.json_logs);

    // Prompt preview needs no model, so it skips configuration entirely
    if let Commands::Prompt {
        topic,
        keep,
        remove,
    } = &cli.command
    {
        return commands::prompt::run_prompt(topic.clone(), keep.clone(), remove.clone());
    }

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    match cli.command {
        Commands::Board { provider, topic } => {
            if let Some(p) = &provider {
                tracing::debug!("Using provider override: {}", p);
            }
            commands::board::run_board(config, topic).await?;
            Ok(())
        }
        Commands::Generate {
            topic,
            provider,
            json,
        } => {
            tracing::info!("Generating ideas for a single topic");
            if let Some(p) = &provider {
                tracing::debug!("Using provider override: {}", p);
            }
            commands::generate::run_generate(config, topic, json).await?;
            Ok(())
        }
        Commands::Prompt { .. } => Ok(()),
    }
}

/// Initialize tracing subscriber with environment filter
///
/// `RUST_LOG` wins when set. Logs go to stderr so they never mix with
/// board output or `--json` results on stdout.
fn init_tracing(verbose: bool, json_logs: bool) {
    let default_level = if verbose {
        "ideaboard=debug"
    } else {
        "ideaboard=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
