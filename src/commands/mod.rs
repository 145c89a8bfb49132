/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes three top-level command modules:

- `board`   : Interactive brainstorming board
- `generate`: One round of ideas for a topic, printed and done
- `prompt`  : Print the generation prompt without calling a model

The handlers stay thin: state transitions live in `crate::board`, and
these modules only read input and render output.
*/

use crate::board::{Gateway, GenerationNotice, Idea, SessionState, Topic};
use crate::config::Config;
use crate::error::{IdeaboardError, Result};
use crate::providers::create_provider;
use colored::Colorize;

// Special commands parser for board actions
pub mod special_commands;

/// Render the visible ideas of a board
///
/// Positions are numbered from 1 over the non-removed ideas; liked ideas
/// carry a heart marker.
pub fn render_board(state: &SessionState) -> String {
    let topic = match state.topic() {
        Some(topic) => topic,
        None => return "No topic set yet.".to_string(),
    };

    let mut out = format!("{} {}\n", "Topic:".bold(), topic.as_str().cyan().bold());
    out.push_str(&"-".repeat(60));
    out.push('\n');

    if state.visible_count() == 0 {
        out.push_str("(no ideas on the board; use /more to generate some)\n");
        return out;
    }

    for (position, _, idea) in state.visible() {
        let marker = if idea.liked {
            format!(" {}", "♥".red())
        } else {
            String::new()
        };
        out.push_str(&format!("{:>3}. {}{}\n", position, idea.text, marker));
    }
    out
}

/// Render the removed ideas of a board
pub fn render_removed(state: &SessionState) -> String {
    let removed: Vec<&Idea> = state.removed().collect();
    if removed.is_empty() {
        return "No removed ideas.\n".to_string();
    }

    let mut out = format!("{}\n", "Removed ideas:".bold());
    for (i, idea) in removed.iter().enumerate() {
        out.push_str(&format!("{:>3}. {}\n", i + 1, idea.text.dimmed()));
    }
    out
}

/// Render a generation notice as a single line
pub fn render_notice(notice: &GenerationNotice, initial: bool) -> String {
    match notice {
        GenerationNotice::Added(0) => "The model returned no ideas.".yellow().to_string(),
        GenerationNotice::Added(n) if initial => format!("Generated {} ideas.", n).green().to_string(),
        GenerationNotice::Added(n) => format!("Added {} new ideas.", n).green().to_string(),
        GenerationNotice::Failed(message) => message.red().to_string(),
    }
}

/// Interactive board handler.
pub mod board {
    //! Runs a readline loop over the session state machine.
    //!
    //! Each line is parsed into a board action, applied to the session, and
    //! the resulting board is rendered before the next line is read. Model
    //! calls are awaited inline; there is no cancellation.

    use super::special_commands::{parse_special_command, print_help, SpecialCommand};
    use super::*;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// What the loop should show after handling a line
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Render {
        /// Show the board, preceded by an optional notice line
        Board(Option<String>),
        /// Show removed ideas
        Removed,
        /// Show session status
        Status,
        /// Show command help
        Help,
        /// The session was reset; ask for a new topic
        TopicPrompt,
        /// Show an error line; state is unchanged
        Error(String),
        /// Leave the loop
        Exit,
    }

    /// One handled line: the next state and what to show
    #[derive(Debug)]
    pub struct Step {
        /// State after handling the line
        pub state: SessionState,
        /// What to render
        pub render: Render,
    }

    /// Start the interactive board
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `topic` - Optional topic to set before the first prompt
    ///
    /// # Errors
    ///
    /// Returns error if the provider cannot be built or the terminal cannot
    /// be opened. Model failures never end the session.
    pub async fn run_board(config: Config, topic: Option<String>) -> Result<()> {
        tracing::info!(
            provider = %config.provider.provider_type,
            model = config.provider.active_model(),
            "Starting interactive board"
        );

        let provider = create_provider(&config.provider)?;
        let gateway = Gateway::new(provider);
        let mut rl = DefaultEditor::new().map_err(IdeaboardError::from)?;
        let mut state = SessionState::new();

        print_welcome_banner(&gateway);

        if let Some(topic) = topic {
            let step = handle_line(state, &gateway, &topic).await;
            state = step.state;
            show(&state, &gateway, &step.render);
        }

        loop {
            let prompt = if state.is_board() {
                format!("{} ", "idea>".green().bold())
            } else {
                format!("{} ", "topic>".cyan().bold())
            };

            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    if let Err(e) = rl.add_history_entry(trimmed) {
                        tracing::debug!("Failed to record history entry: {}", e);
                    }

                    let step = handle_line(state, &gateway, trimmed).await;
                    state = step.state;
                    if step.render == Render::Exit {
                        break;
                    }
                    show(&state, &gateway, &step.render);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Shown when plain text is entered on the board
    pub const PLAIN_TEXT_HINT: &str =
        "Not a command. Use /more to generate more ideas, or /help to list commands.";

    /// Apply one line of input to the session
    ///
    /// In topic entry any line not starting with `/` is the topic, so words
    /// like "quit" can be brainstormed; `/exit` still leaves. On the board,
    /// plain text never calls the model. Refused transitions come back with
    /// the state unchanged.
    pub async fn handle_line(state: SessionState, gateway: &Gateway, line: &str) -> Step {
        if !state.is_board() && !line.trim_start().starts_with('/') {
            return enter_topic(state, gateway, line).await;
        }

        let command = match parse_special_command(line) {
            Ok(command) => command,
            Err(e) => {
                return Step {
                    state,
                    render: Render::Error(e.to_string()),
                }
            }
        };

        match command {
            SpecialCommand::Exit => Step {
                state,
                render: Render::Exit,
            },
            SpecialCommand::Help => Step {
                state,
                render: Render::Help,
            },
            SpecialCommand::ShowStatus => Step {
                state,
                render: Render::Status,
            },
            SpecialCommand::Reset => Step {
                state: state.reset(),
                render: Render::TopicPrompt,
            },
            SpecialCommand::List if state.is_board() => Step {
                state,
                render: Render::Board(None),
            },
            SpecialCommand::ShowRemoved if state.is_board() => Step {
                state,
                render: Render::Removed,
            },
            SpecialCommand::List | SpecialCommand::ShowRemoved => Step {
                state,
                render: Render::Error(crate::board::SessionError::NoTopic.to_string()),
            },
            SpecialCommand::Remove(position) => settle(state.remove(position)),
            SpecialCommand::Like(position) => settle(state.like(position)),
            SpecialCommand::More => {
                println!("{}", "Generating ideas...".dimmed());
                settle(state.generate_more(gateway).await)
            }
            SpecialCommand::None if state.is_board() => Step {
                state,
                render: Render::Error(PLAIN_TEXT_HINT.to_string()),
            },
            SpecialCommand::None => enter_topic(state, gateway, line).await,
        }
    }

    async fn enter_topic(state: SessionState, gateway: &Gateway, line: &str) -> Step {
        println!("{}", "Generating ideas...".dimmed());
        match state.set_topic(gateway, line).await {
            Ok(transition) => Step {
                render: Render::Board(transition.notice.as_ref().map(|n| render_notice(n, true))),
                state: transition.state,
            },
            Err(rejected) => Step {
                render: Render::Error(rejected.error.to_string()),
                state: rejected.state,
            },
        }
    }

    fn settle(result: crate::board::TransitionResult) -> Step {
        match result {
            Ok(transition) => Step {
                render: Render::Board(
                    transition
                        .notice
                        .as_ref()
                        .map(|n| render_notice(n, false)),
                ),
                state: transition.state,
            },
            Err(rejected) => Step {
                render: Render::Error(rejected.error.to_string()),
                state: rejected.state,
            },
        }
    }

    fn show(state: &SessionState, gateway: &Gateway, render: &Render) {
        match render {
            Render::Exit => {}
            Render::Board(notice) => {
                if let Some(notice) = notice {
                    println!("{}", notice);
                }
                println!("\n{}", render_board(state));
            }
            Render::Removed => println!("\n{}", render_removed(state)),
            Render::Status => print_status_display(state, gateway),
            Render::Help => print_help(),
            Render::TopicPrompt => {
                println!("{}", "Board cleared. Enter a new topic to start over.".yellow());
            }
            Render::Error(message) => eprintln!("{}", message.red()),
        }
    }

    fn print_welcome_banner(gateway: &Gateway) {
        let provider = gateway.provider();
        println!(
            "\n{}\n{}\n",
            "Ideaboard - brainstorming board".bold(),
            format!("Model: {} ({})", provider.model(), provider.name()).dimmed()
        );
        println!("Enter a topic to get started. Type /help for commands.\n");
    }

    fn print_status_display(state: &SessionState, gateway: &Gateway) {
        let provider = gateway.provider();
        println!("\n{}", "Board Status".bold());
        println!(
            "  Topic:    {}",
            state
                .topic()
                .map(Topic::as_str)
                .unwrap_or("(not set)")
        );
        println!("  Visible:  {}", state.visible_count());
        println!("  Removed:  {}", state.removed().count());
        println!("  Liked:    {}", state.liked().count());
        println!("  Model:    {} ({})\n", provider.model(), provider.name());
    }

}

/// One-shot generation handler.
pub mod generate {
    use super::*;

    /// Generate one round of ideas for `topic` and print them
    ///
    /// # Errors
    ///
    /// Returns error if the topic is blank, the provider cannot be built,
    /// or the model call fails (so the process exits non-zero).
    pub async fn run_generate(config: Config, topic: String, json: bool) -> Result<()> {
        let provider = create_provider(&config.provider)?;
        let gateway = Gateway::new(provider);

        let transition = SessionState::new()
            .set_topic(&gateway, &topic)
            .await
            .map_err(|rejected| IdeaboardError::Config(rejected.error.to_string()))?;

        if let Some(GenerationNotice::Failed(message)) = &transition.notice {
            return Err(IdeaboardError::Provider(message.clone()).into());
        }

        let state = transition.state;
        if json {
            println!("{}", ideas_json(state.ideas())?);
        } else {
            println!("{}", render_board(&state));
        }
        Ok(())
    }

    /// Serialize ideas as a pretty-printed JSON array
    pub fn ideas_json(ideas: &[Idea]) -> Result<String> {
        Ok(serde_json::to_string_pretty(ideas).map_err(IdeaboardError::from)?)
    }

}

/// Prompt preview handler.
pub mod prompt {
    use super::*;
    use crate::prompts::build_prompt;

    /// Build the prompt for the given topic and idea lists
    ///
    /// # Errors
    ///
    /// Returns error if the topic is blank
    ///
    /// # Examples
    ///
    /// ```
    /// use ideaboard::commands::prompt::preview_prompt;
    ///
    /// let text = preview_prompt("pets", &["Dog cafe".to_string()], &[]).unwrap();
    /// assert!(text.contains("1. Dog cafe"));
    /// ```
    pub fn preview_prompt(topic: &str, keep: &[String], remove: &[String]) -> Result<String> {
        let topic =
            Topic::new(topic).map_err(|e| IdeaboardError::Config(e.to_string()))?;
        let kept: Vec<Idea> = keep.iter().map(Idea::new).collect();
        let removed: Vec<Idea> = remove
            .iter()
            .map(|text| Idea {
                removed: true,
                ..Idea::new(text)
            })
            .collect();
        Ok(build_prompt(topic.as_str(), &kept, &removed))
    }

    /// Print the prompt for the given topic and idea lists
    pub fn run_prompt(topic: String, keep: Vec<String>, remove: Vec<String>) -> Result<()> {
        print!("{}", preview_prompt(&topic, &keep, &remove)?);
        Ok(())
    }

}
