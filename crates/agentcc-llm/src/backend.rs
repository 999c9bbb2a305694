//! Chat backend trait and a scripted mock implementation.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use agentcc_types::Turn;

use crate::error::{LlmError, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Chat Backend Trait
// ─────────────────────────────────────────────────────────────────────────────

/// A service that produces the next assistant reply for a transcript.
///
/// Backends keep no state between calls: `transcript` is the entire
/// conversation so far, oldest turn first, ending with the new user turn.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Produce the reply text for `transcript`.
    async fn exchange(&self, transcript: &[Turn]) -> Result<String>;

    /// Get the name of this backend.
    fn name(&self) -> &str;
}

/// A backend that can be shared across threads.
pub type SharedBackend = Arc<dyn ChatBackend>;

// ─────────────────────────────────────────────────────────────────────────────
// Mock Backend
// ─────────────────────────────────────────────────────────────────────────────

/// One scripted outcome of a [`MockBackend`] call.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Error(String),
}

/// A mock backend for testing purposes.
///
/// Returns pre-configured replies in order and records every transcript it
/// was given.
#[derive(Debug)]
pub struct MockBackend {
    name: String,
    replies: Mutex<Vec<MockReply>>,
    request_log: Mutex<Vec<Vec<Turn>>>,
}

impl MockBackend {
    /// Create a mock backend with the given replies.
    ///
    /// If more calls are made than replies available, an error is returned.
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            name: "mock".to_string(),
            replies: Mutex::new(replies),
            request_log: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock backend with a single text reply.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(vec![MockReply::Text(text.into())])
    }

    /// Create a mock backend whose only call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(vec![MockReply::Error(message.into())])
    }

    /// Get every transcript this backend received.
    pub fn requests(&self) -> Vec<Vec<Turn>> {
        lock(&self.request_log).clone()
    }

    /// Get the number of calls made.
    pub fn request_count(&self) -> usize {
        lock(&self.request_log).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl ChatBackend for MockBackend {
    async fn exchange(&self, transcript: &[Turn]) -> Result<String> {
        lock(&self.request_log).push(transcript.to_vec());

        let mut replies = lock(&self.replies);
        if replies.is_empty() {
            return Err(LlmError::Backend(
                "MockBackend: no more replies available".to_string(),
            ));
        }
        match replies.remove(0) {
            MockReply::Text(text) => Ok(text),
            MockReply::Error(message) => Err(LlmError::Backend(message)),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
