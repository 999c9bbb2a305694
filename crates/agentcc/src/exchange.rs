//! The single-turn exchange: load, append, ask, append, save.

use agentcc_llm::SharedBackend;
use agentcc_session::ContextStore;
use agentcc_types::Conversation;

use crate::error::{ExchangeError, Result};

/// Prompt that deletes the stored conversation instead of sending anything.
pub const CLEAR_COMMAND: &str = "/clear";

/// Runs exchanges against one context store.
///
/// Either the whole round trip completes and the extended conversation is
/// saved, or the store is left exactly as it was.
#[derive(Debug)]
pub struct Exchange<S> {
    store: S,
}

impl<S: ContextStore> Exchange<S> {
    /// Create an exchange over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the stored conversation, falling back to an empty one.
    ///
    /// An unreadable or corrupt context file is reported on stderr and
    /// otherwise ignored; the next successful save replaces it.
    pub fn load_conversation(&self) -> Conversation {
        match self.store.load() {
            Ok(conversation) => conversation,
            Err(e) => {
                tracing::debug!(location = %self.store.location(), error = %e, "Context unreadable, starting fresh");
                eprintln!("Warning: Could not load context file: {}", e);
                Conversation::new()
            }
        }
    }

    /// Send `prompt` as the next user turn and return the reply.
    ///
    /// `resolve` is only called after the conversation has been loaded, so
    /// a broken context file is reported even when resolution fails.
    pub async fn run<F>(&self, prompt: &str, resolve: F) -> Result<String>
    where
        F: FnOnce() -> Result<SharedBackend>,
    {
        let mut conversation = self.load_conversation();
        conversation.push_user(prompt);

        let backend = resolve()?;
        tracing::debug!(
            backend = backend.name(),
            turns = conversation.len(),
            "Sending transcript"
        );

        let reply = backend.exchange(conversation.turns()).await?;
        conversation.push_assistant(reply.as_str());

        self.store.save(&conversation).map_err(ExchangeError::Save)?;
        tracing::debug!(location = %self.store.location(), turns = conversation.len(), "Context saved");

        Ok(reply)
    }

    /// Forget the stored conversation.
    ///
    /// Returns `true` if there was anything to forget.
    pub fn clear(&self) -> Result<bool> {
        self.store.clear().map_err(ExchangeError::Clear)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
