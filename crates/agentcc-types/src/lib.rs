//! Shared types for the agentcc tools.
//!
//! A conversation is nothing more than an ordered list of [`Turn`]s. Every
//! other crate in the workspace (the store, the backends, the CLI) speaks in
//! these types.

pub mod message;

pub use message::{Conversation, Role, Turn};
