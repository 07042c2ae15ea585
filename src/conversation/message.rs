//! Chat message types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person at the keyboard
    User,
    /// The simulated agent
    #[serde(alias = "bot")]
    Agent,
}

impl Sender {
    /// Label used in transcripts and the thread view
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Agent => "Bot",
        }
    }

    /// CSS class used by the HTML transcript
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Agent => "bot",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single message in the conversation
///
/// Messages are immutable once created. Ids are ULIDs, so they sort by
/// creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique, time-sortable identifier
    pub id: String,
    /// Message text
    pub content: String,
    /// Who wrote it
    pub sender: Sender,
    /// Creation time
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message stamped with the current time
    pub fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: Ulid::new().to_string(),
            content: content.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    /// Create a message from the user
    ///
    /// # Examples
    ///
    /// ```
    /// use chatterbox::conversation::{Message, Sender};
    ///
    /// let msg = Message::user("hello");
    /// assert_eq!(msg.sender, Sender::User);
    /// assert_eq!(msg.content, "hello");
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, content)
    }

    /// Create a message from the agent
    pub fn agent(content: impl Into<String>) -> Self {
        Self::new(Sender::Agent, content)
    }
}
