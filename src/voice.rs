//! Optional voice input
//!
//! Speech recognition is a pluggable capability. When no recognizer is
//! available the REPL keeps working and `/voice` reports the absence.
//! [`TranscriptRecognizer`] replays dictation from a file, one utterance per
//! line, which stands in for a microphone in terminals and tests.

use crate::config::VoiceConfig;
use crate::error::{ChatterboxError, Result};
use anyhow::Context;
use std::collections::VecDeque;
use std::path::Path;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Event emitted by a recognizer during one listening session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceEvent {
    /// Final transcript of an utterance
    Result(String),
    /// Recognition failed
    Error(String),
    /// Listening ended
    End,
}

/// A speech recognition backend
pub trait SpeechRecognizer: Send {
    /// Whether the backend can be used at all
    fn is_available(&self) -> bool;

    /// Begin listening; events are delivered on `events`
    ///
    /// # Errors
    ///
    /// Returns `ChatterboxError::Voice` if listening cannot start
    fn start(&mut self, events: UnboundedSender<VoiceEvent>) -> Result<()>;

    /// Stop listening. Stopping an idle recognizer is a no-op.
    fn stop(&mut self);

    fn name(&self) -> &str;
}

/// Recognizer used when no speech backend exists
#[derive(Debug, Default)]
pub struct UnsupportedRecognizer;

impl SpeechRecognizer for UnsupportedRecognizer {
    fn is_available(&self) -> bool {
        false
    }

    fn start(&mut self, _events: UnboundedSender<VoiceEvent>) -> Result<()> {
        Err(ChatterboxError::Voice(
            "Speech recognition is not supported in this environment".to_string(),
        )
        .into())
    }

    fn stop(&mut self) {}

    fn name(&self) -> &str {
        "unsupported"
    }
}

/// Recognizer that replays utterances from a transcript
#[derive(Debug, Default)]
pub struct TranscriptRecognizer {
    utterances: VecDeque<String>,
}

impl TranscriptRecognizer {
    /// Create from a list of utterances; blank lines are skipped
    pub fn new<I, S>(utterances: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            utterances: utterances
                .into_iter()
                .map(Into::into)
                .filter(|u: &String| !u.trim().is_empty())
                .collect(),
        }
    }

    /// Load utterances from a file, one per line
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read voice transcript {}", path.display()))?;
        Ok(Self::new(contents.lines().map(str::trim)))
    }
}

impl SpeechRecognizer for TranscriptRecognizer {
    fn is_available(&self) -> bool {
        true
    }

    fn start(&mut self, events: UnboundedSender<VoiceEvent>) -> Result<()> {
        let event = match self.utterances.pop_front() {
            Some(text) => VoiceEvent::Result(text),
            None => VoiceEvent::Error("No speech detected".to_string()),
        };
        // A dropped receiver means nobody is listening any more
        let _ = events.send(event);
        let _ = events.send(VoiceEvent::End);
        Ok(())
    }

    fn stop(&mut self) {}

    fn name(&self) -> &str {
        "transcript"
    }
}

/// Listening state around a recognizer
pub struct VoiceInput {
    recognizer: Box<dyn SpeechRecognizer>,
    listening: bool,
    events: Option<UnboundedReceiver<VoiceEvent>>,
}

impl VoiceInput {
    pub fn new(recognizer: Box<dyn SpeechRecognizer>) -> Self {
        Self {
            recognizer,
            listening: false,
            events: None,
        }
    }

    /// Voice input with no backend
    pub fn unsupported() -> Self {
        Self::new(Box::new(UnsupportedRecognizer))
    }

    /// Pick a recognizer from configuration
    ///
    /// An unreadable transcript file is logged and treated as no backend.
    pub fn from_config(config: &VoiceConfig) -> Self {
        match &config.transcript_file {
            Some(path) => match TranscriptRecognizer::from_file(Path::new(path)) {
                Ok(recognizer) => {
                    tracing::debug!(path = %path, "Voice input replays transcript");
                    Self::new(Box::new(recognizer))
                }
                Err(e) => {
                    tracing::warn!("Voice input disabled: {:#}", e);
                    Self::unsupported()
                }
            },
            None => Self::unsupported(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.recognizer.is_available()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn backend_name(&self) -> &str {
        self.recognizer.name()
    }

    /// Start a listening session
    pub fn start_listening(&mut self) -> Result<()> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.recognizer.start(tx)?;
        self.events = Some(rx);
        self.listening = true;
        Ok(())
    }

    /// End the current listening session
    pub fn stop_listening(&mut self) {
        self.recognizer.stop();
        self.events = None;
        self.listening = false;
    }

    /// Flip between listening and idle, returning the new state
    pub fn toggle(&mut self) -> Result<bool> {
        if self.listening {
            self.stop_listening();
        } else {
            self.start_listening()?;
        }
        Ok(self.listening)
    }

    /// Wait for the current session to yield a transcript
    ///
    /// Returns `Ok(None)` if the session ended without speech or none is
    /// active.
    pub async fn next_transcript(&mut self) -> Result<Option<String>> {
        let Some(events) = self.events.as_mut() else {
            return Ok(None);
        };

        let outcome = match events.recv().await {
            Some(VoiceEvent::Result(text)) => Ok(Some(text)),
            Some(VoiceEvent::Error(e)) => Err(ChatterboxError::Voice(e).into()),
            Some(VoiceEvent::End) | None => Ok(None),
        };
        self.listening = false;
        outcome
    }

    /// Listen for a single utterance
    ///
    /// # Errors
    ///
    /// Returns `ChatterboxError::Voice` if no recognizer is available or
    /// recognition fails
    pub async fn listen_once(&mut self) -> Result<Option<String>> {
        if !self.listening {
            self.start_listening()?;
        }
        let outcome = self.next_transcript().await;
        self.stop_listening();
        outcome
    }
}

impl Default for VoiceInput {
    fn default() -> Self {
        Self::unsupported()
    }
}
