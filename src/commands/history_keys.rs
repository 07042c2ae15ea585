//! Arrow-key recall of earlier inputs
//!
//! Up and Down are bound to the conversation's [`InputHistory`] instead of
//! rustyline's own history, so the line editor shows the same bounded,
//! deduplicated list that `/history` prints.
//!
//! [`InputHistory`]: crate::conversation::InputHistory

use crate::conversation::{ConversationStore, HistoryDirection};
use rustyline::{
    Cmd, ConditionalEventHandler, DefaultEditor, Event, EventContext, EventHandler, KeyCode,
    KeyEvent, Modifiers, Movement, RepeatCount,
};

/// Replaces the current line with the next recalled input
pub struct HistoryRecall {
    conversation: ConversationStore,
    direction: HistoryDirection,
}

impl HistoryRecall {
    pub fn new(conversation: ConversationStore, direction: HistoryDirection) -> Self {
        Self {
            conversation,
            direction,
        }
    }

    /// Step the history cursor and build the editor command
    ///
    /// Returns `None` when nothing has been remembered yet, which leaves the
    /// key to rustyline's default handling.
    pub fn recall(&self) -> Option<Cmd> {
        if !self.conversation.has_history() {
            return None;
        }

        let text = self.conversation.navigate_history(self.direction);
        tracing::trace!(
            direction = %self.direction,
            cursor = ?self.conversation.history_cursor(),
            "History recall"
        );
        Some(Cmd::Replace(Movement::WholeLine, Some(text)))
    }
}

impl ConditionalEventHandler for HistoryRecall {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        _ctx: &EventContext,
    ) -> Option<Cmd> {
        self.recall()
    }
}

/// Bind the Up and Down arrows of `rl` to the conversation's input history
pub fn bind_history_keys(rl: &mut DefaultEditor, conversation: &ConversationStore) {
    for (code, direction) in [
        (KeyCode::Up, HistoryDirection::Up),
        (KeyCode::Down, HistoryDirection::Down),
    ] {
        let recall = HistoryRecall::new(conversation.clone(), direction);
        rl.bind_sequence(
            KeyEvent(code, Modifiers::NONE),
            EventHandler::Conditional(Box::new(recall)),
        );
    }
}
