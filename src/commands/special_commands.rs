//! Special commands parser for the interactive board
//!
//! Board actions are entered as slash commands:
//! - `/more` asks the model for another round of ideas
//! - `/remove <n>` and `/like <n>` act on the idea shown at position `n`
//! - `/list`, `/removed` and `/status` re-render parts of the board
//! - `/reset` drops the topic and every idea
//!
//! Commands are case-insensitive. Bare `exit` and `quit` are also accepted;
//! the board loop only consults this parser for topic input that starts
//! with `/`, so those words remain usable as topics.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Generate more ideas from the current board
    More,

    /// Remove the idea at a visible position (1-based)
    Remove(usize),

    /// Like the idea at a visible position (1-based)
    Like(usize),

    /// Re-render the board
    List,

    /// Show the removed ideas
    ShowRemoved,

    /// Clear the topic and all ideas
    Reset,

    /// Show topic, counts and provider
    ShowStatus,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// A topic in topic entry; rejected with a hint on the board.
    None,
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` if input starts with "/" but is not a valid command.
/// Returns `CommandError::MissingArgument` when `/remove` or `/like` has no position.
/// Returns `CommandError::UnsupportedArgument` when the position is not a positive number.
///
/// # Examples
///
/// ```
/// use ideaboard::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/remove 2").unwrap(), SpecialCommand::Remove(2));
/// assert_eq!(parse_special_command("/MORE").unwrap(), SpecialCommand::More);
/// assert_eq!(parse_special_command("space travel").unwrap(), SpecialCommand::None);
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    let mut parts = lower.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let arg = parts.next();
    let extra = parts.next();

    match command {
        "exit" | "quit" | "/exit" | "/quit" => Ok(SpecialCommand::Exit),
        "/more" | "/m" => no_argument(command, arg, SpecialCommand::More),
        "/list" | "/ls" => no_argument(command, arg, SpecialCommand::List),
        "/removed" => no_argument(command, arg, SpecialCommand::ShowRemoved),
        "/reset" => no_argument(command, arg, SpecialCommand::Reset),
        "/status" => no_argument(command, arg, SpecialCommand::ShowStatus),
        "/help" | "/?" => no_argument(command, arg, SpecialCommand::Help),
        "/remove" | "/rm" => {
            let position = parse_position("/remove", arg, extra)?;
            Ok(SpecialCommand::Remove(position))
        }
        "/like" => {
            let position = parse_position("/like", arg, extra)?;
            Ok(SpecialCommand::Like(position))
        }
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

fn no_argument(
    command: &str,
    arg: Option<&str>,
    parsed: SpecialCommand,
) -> Result<SpecialCommand, CommandError> {
    match arg {
        None => Ok(parsed),
        Some(arg) => Err(CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        }),
    }
}

fn parse_position(
    command: &str,
    arg: Option<&str>,
    extra: Option<&str>,
) -> Result<usize, CommandError> {
    let arg = arg.ok_or_else(|| CommandError::MissingArgument {
        command: command.to_string(),
        usage: format!("{} <number>", command),
    })?;

    if let Some(extra) = extra {
        return Err(CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: extra.to_string(),
        });
    }

    match arg.parse::<usize>() {
        Ok(position) if position > 0 => Ok(position),
        _ => Err(CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        }),
    }
}

/// Display help information for board commands
pub fn print_help() {
    println!(
        r#"
Board Commands
==============

BEFORE A TOPIC IS SET:
  <text>          - Set <text> as the topic and generate the first ideas
                    (any text, including "exit" or "quit")

ON THE BOARD:
  /more           - Generate more ideas based on what you kept and removed
  /m              - Same as /more
  /remove <n>     - Remove idea number <n> from the board
  /rm <n>         - Same as /remove
  /like <n>       - Mark idea number <n> as liked
  /list           - Show the board again
  /ls             - Same as /list
  /removed        - Show ideas you removed
  /reset          - Clear the topic and all ideas, then start over

SESSION:
  /status         - Show topic, idea counts and model
  /help           - Show this help message
  /?              - Same as /help
  /exit           - Exit the board
  /quit           - Same as /exit
  exit, quit      - Also exit once a topic is set

NOTES:
  - Commands are case-insensitive
  - Idea numbers refer to the board as currently shown
  - Removed ideas stay hidden but still steer future suggestions
"#
    );
}
