//! Bounded recency list of sent inputs with cursor-based recall
//!
//! Entries are stored newest first. The cursor is `None` while the user is
//! editing a fresh line; `Up` walks toward older entries and `Down` walks
//! back toward the fresh line. There is no wraparound at either end.

use std::fmt;

/// Default number of remembered inputs
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Direction of a history recall step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    /// Toward older entries
    Up,
    /// Toward newer entries and finally the empty line
    Down,
}

impl fmt::Display for HistoryDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// Input history
///
/// Invariants: at most `capacity` entries, no duplicate entries, cursor
/// reset to `None` whenever an entry is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputHistory {
    entries: Vec<String>,
    cursor: Option<usize>,
    capacity: usize,
}

impl InputHistory {
    /// Create an empty history holding at most `capacity` entries
    ///
    /// A zero capacity is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            capacity: capacity.max(1),
        }
    }

    /// Remember an input
    ///
    /// Blank text is ignored. An existing identical entry is moved to the
    /// front rather than duplicated.
    ///
    /// # Examples
    ///
    /// ```
    /// use chatterbox::conversation::InputHistory;
    ///
    /// let mut history = InputHistory::default();
    /// history.add("a");
    /// history.add("b");
    /// history.add("a");
    /// assert_eq!(history.entries(), ["a", "b"]);
    /// ```
    pub fn add(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }

        self.entries.retain(|entry| entry != text);
        self.entries.insert(0, text.to_string());
        self.entries.truncate(self.capacity);
        self.cursor = None;
    }

    /// Move the cursor one step and return the recalled text
    ///
    /// Returns an empty string when the cursor rests on the fresh line.
    ///
    /// # Examples
    ///
    /// ```
    /// use chatterbox::conversation::{HistoryDirection, InputHistory};
    ///
    /// let mut history = InputHistory::default();
    /// for text in ["a", "b", "c"] {
    ///     history.add(text);
    /// }
    /// assert_eq!(history.navigate(HistoryDirection::Up), "c");
    /// assert_eq!(history.navigate(HistoryDirection::Up), "b");
    /// assert_eq!(history.navigate(HistoryDirection::Down), "c");
    /// assert_eq!(history.navigate(HistoryDirection::Down), "");
    /// ```
    pub fn navigate(&mut self, direction: HistoryDirection) -> String {
        self.cursor = self.step(direction);
        self.current().to_string()
    }

    /// Cursor position one step in `direction`, without moving
    pub fn step(&self, direction: HistoryDirection) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }

        match (direction, self.cursor) {
            (HistoryDirection::Up, None) => Some(0),
            (HistoryDirection::Up, Some(i)) => Some((i + 1).min(self.entries.len() - 1)),
            (HistoryDirection::Down, None) | (HistoryDirection::Down, Some(0)) => None,
            (HistoryDirection::Down, Some(i)) => Some(i - 1),
        }
    }

    /// Text under the cursor, empty on the fresh line
    pub fn current(&self) -> &str {
        self.cursor
            .and_then(|i| self.entries.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Position the cursor directly
    ///
    /// Out-of-range positions clear the cursor.
    pub fn set_cursor(&mut self, cursor: Option<usize>) {
        self.cursor = cursor.filter(|&i| i < self.entries.len());
    }

    /// Entries, newest first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Cursor position, `None` on the fresh line
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InputHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn history_of(items: &[&str]) -> InputHistory {
        let mut history = InputHistory::default();
        for item in items {
            history.add(item);
        }
        history
    }

    #[test]
    fn test_add_puts_newest_first() {
        let history = history_of(&["a", "b", "c"]);
        assert_eq!(history.entries(), ["c", "b", "a"]);
        assert_eq!(history.cursor(), None);
    }

    #[test]
    fn test_add_ignores_blank_text() {
        let mut history = history_of(&["a"]);
        history.add("");
        history.add("   \t\n");
        assert_eq!(history.entries(), ["a"]);
    }

    #[test]
    fn test_add_existing_moves_to_front_without_changing_set() {
        let mut history = history_of(&["a", "b", "c"]);
        let before: HashSet<String> = history.entries().iter().cloned().collect();

        history.add("a");

        let after: HashSet<String> = history.entries().iter().cloned().collect();
        assert_eq!(history.entries(), ["a", "c", "b"]);
        assert_eq!(before, after);
    }

    #[test]
    fn test_add_is_exact_match_dedup() {
        let history = history_of(&["hello", "Hello", "hello "]);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_capacity_and_uniqueness_hold_for_long_sequences() {
        let mut history = InputHistory::default();
        for i in 0..500 {
            history.add(&format!("msg-{}", i % 73));
            assert!(history.len() <= DEFAULT_HISTORY_CAPACITY);
            let unique: HashSet<&String> = history.entries().iter().collect();
            assert_eq!(unique.len(), history.len());
        }
        assert_eq!(history.len(), DEFAULT_HISTORY_CAPACITY);
        // 499 % 73 == 61 was added last
        assert_eq!(history.entries()[0], "msg-61");
    }

    #[test]
    fn test_truncation_drops_oldest() {
        let mut history = InputHistory::with_capacity(2);
        history.add("a");
        history.add("b");
        history.add("c");
        assert_eq!(history.entries(), ["c", "b"]);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut history = InputHistory::with_capacity(0);
        history.add("a");
        history.add("b");
        assert_eq!(history.entries(), ["b"]);
        assert_eq!(history.capacity(), 1);
    }

    #[test]
    fn test_add_resets_cursor() {
        let mut history = history_of(&["a", "b"]);
        history.navigate(HistoryDirection::Up);
        assert_eq!(history.cursor(), Some(0));
        history.add("c");
        assert_eq!(history.cursor(), None);
    }

    #[test]
    fn test_up_walks_then_holds_at_oldest() {
        let mut history = history_of(&["a", "b", "c"]);
        let recalled: Vec<String> = (0..5)
            .map(|_| history.navigate(HistoryDirection::Up))
            .collect();
        assert_eq!(recalled, ["c", "b", "a", "a", "a"]);
        assert_eq!(history.cursor(), Some(2));
    }

    #[test]
    fn test_down_returns_to_empty_and_stays() {
        let mut history = history_of(&["a", "b", "c"]);
        history.navigate(HistoryDirection::Up);
        history.navigate(HistoryDirection::Up);

        assert_eq!(history.navigate(HistoryDirection::Down), "c");
        assert_eq!(history.navigate(HistoryDirection::Down), "");
        assert_eq!(history.navigate(HistoryDirection::Down), "");
        assert_eq!(history.cursor(), None);
    }

    #[test]
    fn test_down_from_fresh_line_stays_empty() {
        let mut history = history_of(&["a"]);
        assert_eq!(history.navigate(HistoryDirection::Down), "");
        assert_eq!(history.cursor(), None);
    }

    #[test]
    fn test_navigate_on_empty_history() {
        let mut history = InputHistory::default();
        assert_eq!(history.navigate(HistoryDirection::Up), "");
        assert_eq!(history.navigate(HistoryDirection::Down), "");
        assert_eq!(history.cursor(), None);
    }

    #[test]
    fn test_set_cursor_rejects_out_of_range() {
        let mut history = history_of(&["a", "b"]);
        history.set_cursor(Some(1));
        assert_eq!(history.current(), "a");
        history.set_cursor(Some(5));
        assert_eq!(history.cursor(), None);
    }

    #[test]
    fn test_step_does_not_move_cursor() {
        let mut history = history_of(&["a", "b"]);
        assert_eq!(history.step(HistoryDirection::Up), Some(0));
        assert_eq!(history.cursor(), None);
        history.navigate(HistoryDirection::Up);
        assert_eq!(history.step(HistoryDirection::Down), None);
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(HistoryDirection::Up.to_string(), "up");
        assert_eq!(HistoryDirection::Down.to_string(), "down");
    }
}
