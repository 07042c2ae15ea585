//! Error types for Chatterbox
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Chatterbox operations
///
/// Covers configuration loading, the mocked sign-in flow, session storage,
/// simulated agent replies, transcript export and the voice capability.
#[derive(Error, Debug)]
pub enum ChatterboxError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Login or registration failure
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Durable session storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Response provider failed to produce a reply
    #[error("Responder error: {0}")]
    Responder(String),

    /// Transcript export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Speech recognition errors (including an absent capability)
    #[error("Voice input error: {0}")]
    Voice(String),

    /// Invalid interactive command usage
    #[error("Command error: {0}")]
    Command(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Line editor errors
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Result type alias for Chatterbox operations
///
/// Uses `anyhow::Error` so call sites can attach context while still
/// downcasting to [`ChatterboxError`] where the variant matters.
pub type Result<T> = anyhow::Result<T>;
