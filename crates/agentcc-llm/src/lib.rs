//! Chat backends for agentcc.
//!
//! Every backend offers the same single capability: turn a full transcript
//! into the next assistant reply, or fail. Backends are stateless between
//! calls, so the whole transcript is sent every time.
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │  ChatBackend trait                        │
//! │  - exchange(&[Turn]) -> reply text        │
//! └───────────────────────────────────────────┘
//!                      │
//!          ┌───────────┴───────────┐
//!          ▼                       ▼
//!   ┌─────────────┐        ┌──────────────┐
//!   │  Anthropic  │        │  Local agent │
//!   │ (HTTP API)  │        │ (subprocess) │
//!   └─────────────┘        └──────────────┘
//! ```

pub mod anthropic;
pub mod backend;
pub mod error;
pub mod local;
pub mod types;

pub use anthropic::{AnthropicBackend, AnthropicConfig};
pub use backend::{ChatBackend, MockBackend, MockReply, SharedBackend};
pub use error::{LlmError, Result};
pub use local::{flatten_transcript, LocalAgentBackend, LocalAgentConfig};
pub use types::{CompletionRequest, CompletionResponse, ContentBlock, StopReason, Usage};
