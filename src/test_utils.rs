//! Test utilities for Chatterbox
//!
//! This module provides common test utilities including temporary directory
//! management, ready-made contexts, and assertion helpers.

use crate::config::Config;
use crate::context::AppContext;
use crate::conversation::MockResponder;
use crate::error::Result;
use crate::storage::MemoryStore;
use std::sync::Arc;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// Default configuration with every artificial delay removed
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.session.auth_delay_ms = 0;
    config.responder.min_delay_ms = 0;
    config.responder.max_delay_ms = 0;
    config
}

/// Context with in-memory storage and an instant responder
pub fn test_context() -> AppContext {
    let config = test_config();
    let responder = MockResponder::from_config(&config.responder);
    AppContext::build(config, Arc::new(MemoryStore::new()), Arc::new(responder))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChatterboxError;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: Result<()> = Err(ChatterboxError::Config("test error message".to_string()).into());
        assert_error_contains(result, "test error");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        assert_error_contains(Ok(()), "error");
    }

    #[test]
    fn test_test_config_is_valid_and_instant() {
        let config = test_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.responder.max_delay_ms, 0);
    }

    #[tokio::test]
    async fn test_test_context_replies_immediately() {
        let ctx = test_context();
        ctx.conversation.send_message("ping").await.unwrap();
        assert_eq!(ctx.conversation.message_count(), 2);
    }
}
