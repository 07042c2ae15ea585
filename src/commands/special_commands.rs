//! Special commands parser for the chat shell
//!
//! Special commands act on the conversation or the session instead of being
//! sent to the agent. They are prefixed with `/` and are case-insensitive;
//! `exit` and `quit` also work without the slash.

use crate::export::ExportFormat;
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

/// Special commands that can be executed in the chat shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Remove all messages from the conversation
    Clear,

    /// Save the conversation to a file
    Export(ExportFormat),

    /// List the quick prompts
    ListTemplates,

    /// Send a quick prompt by id or title
    SendTemplate(String),

    /// Recall an older input into the next prompt
    HistoryUp,

    /// Recall a newer input into the next prompt
    HistoryDown,

    /// Show remembered inputs
    ShowHistory,

    /// Dictate the next message
    Voice,

    /// Show session and conversation status
    ShowStatus,

    /// Sign out and leave the shell
    Logout,

    Help,

    Exit,

    /// Not a special command; the input is a chat message
    None,
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` for an unrecognized `/` command,
/// `CommandError::UnsupportedArgument` for a bad argument, and
/// `CommandError::MissingArgument` when a required argument is absent.
///
/// # Examples
///
/// ```
/// use chatterbox::commands::special_commands::{parse_special_command, SpecialCommand};
/// use chatterbox::export::ExportFormat;
///
/// assert_eq!(parse_special_command("/clear").unwrap(), SpecialCommand::Clear);
/// assert_eq!(
///     parse_special_command("/export html").unwrap(),
///     SpecialCommand::Export(ExportFormat::Html)
/// );
/// assert_eq!(parse_special_command("hello").unwrap(), SpecialCommand::None);
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    // Arguments keep their original case for template titles
    let (head, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, Some(rest.trim())),
        None => (trimmed, None),
    };
    let command = head.to_lowercase();
    let command = command.as_str();

    match (command, arg) {
        ("/clear", None) => Ok(SpecialCommand::Clear),

        ("/export", None) => Ok(SpecialCommand::Export(ExportFormat::Text)),
        ("/export", Some(arg)) => ExportFormat::parse_str(arg)
            .map(SpecialCommand::Export)
            .map_err(|_| CommandError::UnsupportedArgument {
                command: "/export".to_string(),
                arg: arg.to_string(),
            }),

        ("/templates", None) | ("/prompts", None) => Ok(SpecialCommand::ListTemplates),

        ("/prompt", None) => Err(CommandError::MissingArgument {
            command: "/prompt".to_string(),
            usage: "/prompt <id|title>".to_string(),
        }),
        ("/prompt", Some(arg)) => Ok(SpecialCommand::SendTemplate(arg.to_string())),

        ("/up", None) => Ok(SpecialCommand::HistoryUp),
        ("/down", None) => Ok(SpecialCommand::HistoryDown),
        ("/history", None) => Ok(SpecialCommand::ShowHistory),
        ("/voice", None) | ("/mic", None) => Ok(SpecialCommand::Voice),
        ("/status", None) => Ok(SpecialCommand::ShowStatus),
        ("/logout", None) => Ok(SpecialCommand::Logout),
        ("/help", None) | ("/?", None) => Ok(SpecialCommand::Help),
        ("exit", None) | ("quit", None) | ("/exit", None) | ("/quit", None) => {
            Ok(SpecialCommand::Exit)
        }

        (
            "/clear" | "/templates" | "/prompts" | "/up" | "/down" | "/history" | "/voice"
            | "/mic" | "/status" | "/logout" | "/help" | "/?" | "/exit" | "/quit",
            Some(arg),
        ) => Err(CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        }),

        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Print the special command reference
pub fn print_help() {
    println!(
        r#"
Chat Shell Commands
===================

CONVERSATION:
  /clear              - Remove all messages
  /export [txt|html]  - Save the conversation (default: txt)
  /templates          - List quick prompts
  /prompt <id|title>  - Send a quick prompt
  /voice              - Dictate the next message

INPUT HISTORY:
  Up / Down arrows    - Step through earlier inputs on the current line
  /up                 - Recall an older input into the next prompt
  /down               - Recall a newer input into the next prompt
  /history            - Show remembered inputs

SESSION:
  /status             - Show session and conversation status
  /logout             - Sign out and leave the shell
  /help               - Show this help message
  exit                - Leave the shell
  quit                - Same as exit

NOTES:
  - Commands are case-insensitive
  - Regular text (not starting with /) is sent to the agent
  - HTML exports can be printed to PDF from a browser
"#
    );
}
