//! Conversation with the simulated agent
//!
//! - [`message`]: message and sender types
//! - [`history`]: bounded input history with recall cursor
//! - [`responder`]: pluggable reply producers
//! - [`store`]: the conversation store tying them together

pub mod history;
pub mod message;
pub mod responder;
pub mod store;

pub use history::{HistoryDirection, InputHistory, DEFAULT_HISTORY_CAPACITY};
pub use message::{Message, Sender};
pub use responder::{default_responses, MockResponder, ResponseProvider, FALLBACK_RESPONSE};
pub use store::{ChatAction, ChatState, ConversationStore, SendOutcome};
