//! Configuration management for Chatterbox
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::conversation::history::DEFAULT_HISTORY_CAPACITY;
use crate::conversation::responder::{default_responses, FALLBACK_RESPONSE};
use crate::error::{ChatterboxError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound accepted for the input history capacity
const MAX_HISTORY_CAPACITY: usize = 1000;

/// Main configuration structure for Chatterbox
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Mocked sign-in behavior and session storage location
    #[serde(default)]
    pub session: SessionConfig,
    /// Simulated agent reply behavior
    #[serde(default)]
    pub responder: ResponderConfig,
    /// Conversation behavior
    #[serde(default)]
    pub chat: ChatConfig,
    /// Transcript export settings
    #[serde(default)]
    pub export: ExportConfig,
    /// Optional voice input capability
    #[serde(default)]
    pub voice: VoiceConfig,
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Artificial delay applied to login and registration (milliseconds)
    #[serde(default = "default_auth_delay_ms")]
    pub auth_delay_ms: u64,

    /// Path of the session database; the user data directory is used when unset
    #[serde(default)]
    pub storage_path: Option<String>,
}

fn default_auth_delay_ms() -> u64 {
    1000
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auth_delay_ms: default_auth_delay_ms(),
            storage_path: None,
        }
    }
}

/// Mock responder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponderConfig {
    /// Lower bound of the simulated reply delay (milliseconds, inclusive)
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,

    /// Upper bound of the simulated reply delay (milliseconds, exclusive)
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Pool of canned replies chosen uniformly at random
    #[serde(default = "default_responses")]
    pub responses: Vec<String>,

    /// Reply used when the responder fails
    #[serde(default = "default_fallback_response")]
    pub fallback_response: String,
}

fn default_min_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    3000
}

fn default_fallback_response() -> String {
    FALLBACK_RESPONSE.to_string()
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            responses: default_responses(),
            fallback_response: default_fallback_response(),
        }
    }
}

/// Conversation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Maximum number of remembered inputs
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Drop replies whose send started before the last `/clear`
    #[serde(default = "default_discard_stale_responses")]
    pub discard_stale_responses: bool,

    /// Show message timestamps in the thread view
    #[serde(default = "default_show_timestamps")]
    pub show_timestamps: bool,
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

fn default_discard_stale_responses() -> bool {
    true
}

fn default_show_timestamps() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            discard_stale_responses: default_discard_stale_responses(),
            show_timestamps: default_show_timestamps(),
        }
    }
}

/// Transcript export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory that receives exported transcripts
    #[serde(default = "default_export_directory")]
    pub directory: String,
}

fn default_export_directory() -> String {
    ".".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
        }
    }
}

/// Voice input configuration
///
/// A terminal has no microphone binding, so dictation is read from a
/// transcript file when one is configured. Without it voice input is
/// reported as unsupported.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// File with one dictated utterance per line
    #[serde(default)]
    pub transcript_file: Option<String>,
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ChatterboxError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| ChatterboxError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(path) = std::env::var("CHATTERBOX_STORAGE_PATH") {
            tracing::debug!(path = %path, "Env override: CHATTERBOX_STORAGE_PATH");
            self.session.storage_path = Some(path);
        }

        if let Ok(delay) = std::env::var("CHATTERBOX_AUTH_DELAY_MS") {
            if let Ok(value) = delay.parse() {
                self.session.auth_delay_ms = value;
            } else {
                tracing::warn!("Invalid CHATTERBOX_AUTH_DELAY_MS: {}", delay);
            }
        }

        if let Ok(delay) = std::env::var("CHATTERBOX_MIN_DELAY_MS") {
            if let Ok(value) = delay.parse() {
                self.responder.min_delay_ms = value;
            } else {
                tracing::warn!("Invalid CHATTERBOX_MIN_DELAY_MS: {}", delay);
            }
        }

        if let Ok(delay) = std::env::var("CHATTERBOX_MAX_DELAY_MS") {
            if let Ok(value) = delay.parse() {
                self.responder.max_delay_ms = value;
            } else {
                tracing::warn!("Invalid CHATTERBOX_MAX_DELAY_MS: {}", delay);
            }
        }

        if let Ok(capacity) = std::env::var("CHATTERBOX_HISTORY_CAPACITY") {
            if let Ok(value) = capacity.parse() {
                self.chat.history_capacity = value;
            } else {
                tracing::warn!("Invalid CHATTERBOX_HISTORY_CAPACITY: {}", capacity);
            }
        }

        if let Ok(dir) = std::env::var("CHATTERBOX_EXPORT_DIR") {
            self.export.directory = dir;
        }

        if let Ok(file) = std::env::var("CHATTERBOX_VOICE_TRANSCRIPT") {
            self.voice.transcript_file = Some(file);
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Some(path) = &cli.storage_path {
            self.session.storage_path = Some(path.clone());
        }

        if cli.instant {
            self.session.auth_delay_ms = 0;
            self.responder.min_delay_ms = 0;
            self.responder.max_delay_ms = 0;
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.responder.min_delay_ms > self.responder.max_delay_ms {
            return Err(ChatterboxError::Config(format!(
                "responder.min_delay_ms ({}) must not exceed responder.max_delay_ms ({})",
                self.responder.min_delay_ms, self.responder.max_delay_ms
            ))
            .into());
        }

        if self.responder.responses.is_empty() {
            return Err(ChatterboxError::Config(
                "responder.responses must contain at least one reply".to_string(),
            )
            .into());
        }

        if self.responder.fallback_response.trim().is_empty() {
            return Err(ChatterboxError::Config(
                "responder.fallback_response cannot be empty".to_string(),
            )
            .into());
        }

        if self.chat.history_capacity == 0 {
            return Err(ChatterboxError::Config(
                "chat.history_capacity must be greater than 0".to_string(),
            )
            .into());
        }

        if self.chat.history_capacity > MAX_HISTORY_CAPACITY {
            return Err(ChatterboxError::Config(format!(
                "chat.history_capacity must be less than or equal to {}",
                MAX_HISTORY_CAPACITY
            ))
            .into());
        }

        if self.export.directory.trim().is_empty() {
            return Err(
                ChatterboxError::Config("export.directory cannot be empty".to_string()).into(),
            );
        }

        Ok(())
    }
}
