//! Application context shared by the command handlers
//!
//! Everything the REPL touches lives here and is passed around explicitly.

use crate::config::Config;
use crate::conversation::{ConversationStore, MockResponder, ResponseProvider, SendOutcome};
use crate::error::{ChatterboxError, Result};
use crate::export::{export_transcript, ExportFormat};
use crate::session::SessionStore;
use crate::storage::{KeyValueStore, SledStore};
use crate::templates::find_template;
use crate::voice::VoiceInput;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Stores and capabilities of one running application
pub struct AppContext {
    pub config: Config,
    pub session: SessionStore,
    pub conversation: ConversationStore,
    pub voice: VoiceInput,
}

impl AppContext {
    /// Assemble the context from injected storage and responder
    pub fn build(
        config: Config,
        storage: Arc<dyn KeyValueStore>,
        responder: Arc<dyn ResponseProvider>,
    ) -> Self {
        let session = SessionStore::new(storage, &config.session);
        let conversation = ConversationStore::new(responder, &config.chat)
            .with_fallback_response(config.responder.fallback_response.clone());
        let voice = VoiceInput::from_config(&config.voice);

        Self {
            config,
            session,
            conversation,
            voice,
        }
    }

    /// Open the session database and use the mock responder
    ///
    /// # Errors
    ///
    /// Returns an error if the session database cannot be opened
    pub fn from_config(config: Config) -> Result<Self> {
        let storage = match &config.session.storage_path {
            Some(path) => SledStore::open(path)?,
            None => SledStore::new()?,
        };
        tracing::debug!(path = %storage.path().display(), "Opened session storage");

        let responder = MockResponder::from_config(&config.responder);
        Ok(Self::build(config, Arc::new(storage), Arc::new(responder)))
    }

    /// Send a quick prompt by id or title
    ///
    /// # Errors
    ///
    /// Returns `ChatterboxError::Command` for an unknown template or while a
    /// reply is still pending
    pub async fn send_template(&self, key: &str) -> Result<SendOutcome> {
        let template = find_template(key)
            .ok_or_else(|| ChatterboxError::Command(format!("Unknown quick prompt: {}", key)))?;

        if self.conversation.is_loading() {
            return Err(ChatterboxError::Command(
                "Wait for the current reply before sending a quick prompt".to_string(),
            )
            .into());
        }

        tracing::debug!(template = template.id, "Sending quick prompt");
        self.conversation.send_message(template.prompt).await
    }

    /// Export the current conversation to the configured directory
    pub fn export(&self, format: ExportFormat) -> Result<PathBuf> {
        export_transcript(
            &self.conversation.messages(),
            format,
            Path::new(&self.config.export.directory),
        )
    }
}
