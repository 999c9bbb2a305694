//! agentcc - forward a prompt to Claude and keep the conversation.
//!
//! Three small tools share everything in this crate and differ only in
//! their [`Variant`]:
//!
//! - `agentcc`: Messages API, key from `ANTHROPIC_API_KEY`
//! - `agentcc-native`: Messages API, key discovered from existing installs
//! - `agentcc-local`: a locally installed CLI agent run as a subprocess
//!
//! Each invocation loads the variant's context file, sends the whole
//! transcript plus the new prompt, prints the reply and saves the extended
//! conversation. `/clear` deletes the context file instead.

pub mod cli;
pub mod error;
pub mod exchange;
pub mod logging;
pub mod variant;

pub use error::{ExchangeError, Result};
pub use exchange::{CLEAR_COMMAND, Exchange};
pub use variant::Variant;
