//! Request and response types for the Messages API.
//!
//! Only the subset the tools use is modelled: a plain list of text turns goes
//! out, and the first content block of the reply comes back.

use agentcc_types::Turn;
use serde::{Deserialize, Serialize};

use crate::error::{LlmError, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Completion Request
// ─────────────────────────────────────────────────────────────────────────────

/// A completion request.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    /// The model to use for completion.
    pub model: String,

    /// Maximum tokens to generate.
    pub max_tokens: u32,

    /// The full conversation, oldest first.
    pub messages: Vec<Turn>,
}

impl CompletionRequest {
    /// Create a new completion request.
    pub fn new(model: impl Into<String>, messages: Vec<Turn>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            messages,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Completion Response
// ─────────────────────────────────────────────────────────────────────────────

/// A content block in a response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Text content.
    Text { text: String },
    /// A tool invocation request.
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    /// Any block type this client does not model.
    #[serde(other)]
    Unknown,
}

/// Why the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    StopSequence,
    ToolUse,
    #[serde(other)]
    Other,
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// A completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    /// Unique response ID.
    pub id: String,

    /// Model that generated the response.
    pub model: String,

    /// Content blocks in the response.
    pub content: Vec<ContentBlock>,

    /// Why generation stopped.
    #[serde(default)]
    pub stop_reason: Option<StopReason>,

    /// Token usage.
    #[serde(default)]
    pub usage: Usage,
}

impl CompletionResponse {
    /// Text of the first content block.
    ///
    /// The reply is always taken from the first block; a response that is
    /// empty or starts with something other than text is an error.
    pub fn first_text(&self) -> Result<&str> {
        match self.content.first() {
            Some(ContentBlock::Text { text }) => Ok(text.as_str()),
            Some(other) => Err(LlmError::InvalidResponse(format!(
                "first content block is not text: {:?}",
                other
            ))),
            None => Err(LlmError::InvalidResponse(
                "response contained no content".to_string(),
            )),
        }
    }
}
