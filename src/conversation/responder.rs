//! Response providers for the conversation
//!
//! The conversation store never produces replies itself. It asks an injected
//! [`ResponseProvider`], which keeps the simulated agent swappable in tests
//! and leaves room for a real backend later.

use crate::config::ResponderConfig;
use crate::error::{ChatterboxError, Result};
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Reply shown when a provider fails
pub const FALLBACK_RESPONSE: &str = "Sorry, I encountered an error. Please try again.";

/// Canned replies used by the mock agent
pub fn default_responses() -> Vec<String> {
    [
        "That's an interesting question! Let me think about that.",
        "I understand what you're asking. Here's my perspective on that topic.",
        "Great point! I'd like to share some thoughts on this.",
        "That's a fascinating topic. Let me provide you with some insights.",
        "I appreciate your question. Here's what I think about that.",
        "Excellent question! I have some ideas to share with you.",
        "That's worth exploring. Let me break this down for you.",
        "I see what you're getting at. Here's my take on this matter.",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Produces the agent's reply to a user message
#[async_trait]
pub trait ResponseProvider: Send + Sync {
    /// Produce a reply for `content`
    ///
    /// # Errors
    ///
    /// Returns an error if no reply can be produced; callers fall back to
    /// [`FALLBACK_RESPONSE`]
    async fn produce(&self, content: &str) -> Result<String>;

    /// Short name used in logs and `/status`
    fn name(&self) -> &str;
}

/// Simulated agent: waits a random delay, then answers from a fixed pool
///
/// The reply does not depend on the message content.
#[derive(Debug, Clone)]
pub struct MockResponder {
    responses: Vec<String>,
    min_delay: Duration,
    max_delay: Duration,
}

impl MockResponder {
    /// Create a responder with an explicit pool and delay range
    ///
    /// The delay is drawn from `[min_delay, max_delay)`. When the bounds are
    /// equal (or inverted) `min_delay` is used as-is.
    pub fn new(responses: Vec<String>, min_delay: Duration, max_delay: Duration) -> Self {
        Self {
            responses,
            min_delay,
            max_delay,
        }
    }

    /// Build from the `responder` configuration section
    pub fn from_config(config: &ResponderConfig) -> Self {
        Self::new(
            config.responses.clone(),
            Duration::from_millis(config.min_delay_ms),
            Duration::from_millis(config.max_delay_ms),
        )
    }

    /// Default pool with no delay
    ///
    /// # Examples
    ///
    /// ```
    /// use chatterbox::conversation::{MockResponder, ResponseProvider};
    ///
    /// let rt = tokio::runtime::Runtime::new().unwrap();
    /// let reply = rt.block_on(MockResponder::instant().produce("hi")).unwrap();
    /// assert!(!reply.is_empty());
    /// ```
    pub fn instant() -> Self {
        Self::new(default_responses(), Duration::ZERO, Duration::ZERO)
    }

    /// Pool of possible replies
    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    fn pick(&self) -> Result<(Duration, String)> {
        if self.responses.is_empty() {
            return Err(ChatterboxError::Responder("Response pool is empty".to_string()).into());
        }

        // ThreadRng is not Send, so it must not live across the sleep
        let mut rng = rand::rng();
        let delay = if self.max_delay > self.min_delay {
            let ms = rng.random_range(self.min_delay.as_millis()..self.max_delay.as_millis());
            Duration::from_millis(ms as u64)
        } else {
            self.min_delay
        };
        let reply = self.responses[rng.random_range(0..self.responses.len())].clone();

        Ok((delay, reply))
    }
}

impl Default for MockResponder {
    fn default() -> Self {
        Self::from_config(&ResponderConfig::default())
    }
}

#[async_trait]
impl ResponseProvider for MockResponder {
    async fn produce(&self, content: &str) -> Result<String> {
        let (delay, reply) = self.pick()?;
        tracing::debug!(
            delay_ms = delay.as_millis() as u64,
            input_len = content.len(),
            "Simulating agent reply"
        );

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        Ok(reply)
    }

    fn name(&self) -> &str {
        "mock"
    }
}
