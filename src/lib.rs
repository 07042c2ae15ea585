//! Chatterbox - terminal chat shell library
//!
//! This library provides the core functionality for Chatterbox: a mocked
//! sign-in with a durable session, a conversation with a simulated agent,
//! bounded input history, quick prompts, transcript export and optional
//! voice input.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: Authentication state and the mocked sign-in flow
//! - `storage`: Durable key-value storage for the session
//! - `conversation`: Messages, input history, responders and the conversation store
//! - `templates`: Quick prompts
//! - `export`: Transcript export to text and HTML
//! - `voice`: Optional speech input
//! - `context`: The application context handed to command handlers
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use chatterbox::conversation::{ConversationStore, MockResponder};
//! use chatterbox::config::ChatConfig;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = ConversationStore::new(Arc::new(MockResponder::default()), &ChatConfig::default());
//!     store.send_message("Hello!").await?;
//!     assert_eq!(store.message_count(), 2);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod conversation;
pub mod error;
pub mod export;
pub mod render;
pub mod session;
pub mod storage;
pub mod templates;
pub mod voice;

// Re-export commonly used types
pub use config::Config;
pub use context::AppContext;
pub use conversation::{ConversationStore, Message, Sender};
pub use error::{ChatterboxError, Result};
pub use session::SessionStore;

#[cfg(test)]
pub mod test_utils;
