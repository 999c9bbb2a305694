//! Conversation context persistence.
//!
//! The context store keeps the running conversation of one tool variant
//! between invocations. Stores are addressed by path so tests (or future
//! per-session stores) never touch the real file in the home directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use agentcc_session::{ContextStore, JsonFileStore};
//!
//! let store = JsonFileStore::new(path);
//! let mut conversation = store.load()?;
//! conversation.push_user("hi");
//! store.save(&conversation)?;
//! ```

mod error;
mod store;

pub use error::{Error, Result};
pub use store::{ContextStore, JsonFileStore, MemoryStore};
