//! Terminal rendering helpers for the chat shell

use crate::conversation::{Message, Sender};
use crate::session::Session;
use chrono::Local;
use colored::Colorize;

/// Colored sender tag, e.g. `[You]`
pub fn sender_tag(sender: Sender) -> String {
    match sender {
        Sender::User => format!("[{}]", "You".cyan()),
        Sender::Agent => format!("[{}]", "Bot".green()),
    }
}

/// One message as printed in the thread view
pub fn format_message(message: &Message, show_timestamps: bool) -> String {
    let tag = sender_tag(message.sender);
    if show_timestamps {
        let time = message.timestamp.with_timezone(&Local).format("%H:%M");
        format!("{} {} {}", time.to_string().dimmed(), tag, message.content)
    } else {
        format!("{} {}", tag, message.content)
    }
}

/// Readline prompt for the current session
///
/// # Examples
///
/// ```
/// use chatterbox::render::prompt;
/// use chatterbox::session::Session;
///
/// assert!(prompt(&Session::signed_out()).ends_with(">> "));
/// ```
pub fn prompt(session: &Session) -> String {
    match session.display_name() {
        Some(name) => format!("[{}] >> ", name),
        None => ">> ".to_string(),
    }
}

pub fn typing_indicator() -> String {
    "Bot is typing…".dimmed().italic().to_string()
}

/// Success notification
pub fn success(text: &str) -> String {
    format!("{} {}", "✓".green(), text.green())
}

/// Failure notification
pub fn failure(text: &str) -> String {
    format!("{} {}", "✗".red(), text.red())
}

/// Warning notification
pub fn warning(text: &str) -> String {
    format!("{} {}", "!".yellow(), text.yellow())
}
