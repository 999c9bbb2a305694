//! Context store trait and its file-backed and in-memory implementations.

use std::fs;
use std::ffi::OsString;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use agentcc_types::Conversation;

use crate::error::{Error, Result};

/// Persistence for a single running conversation.
///
/// The store only ever deals in whole conversations: there is no per-turn
/// update or delete. Implementations must never leave a partially written
/// conversation behind.
pub trait ContextStore: Send + Sync {
    /// Load the stored conversation.
    ///
    /// A store that has never been written returns an empty conversation.
    /// Loading must not create anything as a side effect.
    fn load(&self) -> Result<Conversation>;

    /// Replace the stored conversation.
    fn save(&self, conversation: &Conversation) -> Result<()>;

    /// Delete the stored conversation.
    ///
    /// Returns `true` if something was removed. Clearing an empty store is
    /// not an error.
    fn clear(&self) -> Result<bool>;

    /// Human-readable location of the store, for diagnostics.
    fn location(&self) -> String;
}

// ─────────────────────────────────────────────────────────────────────────────
// JSON file store
// ─────────────────────────────────────────────────────────────────────────────

/// A conversation stored as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the staging file is created in: the context file's own, so
    /// the final rename never crosses filesystems.
    fn staging_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Prefix of staging file names, to make leftovers recognizable.
    fn staging_prefix(&self) -> OsString {
        let mut prefix = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "context.json".into());
        prefix.push(".");
        prefix
    }
}

impl ContextStore for JsonFileStore {
    fn load(&self) -> Result<Conversation> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No context file, starting fresh");
                return Ok(Conversation::new());
            }
            Err(source) => {
                return Err(Error::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let conversation: Conversation =
            serde_json::from_str(&contents).map_err(|source| Error::Parse {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            path = %self.path.display(),
            turns = conversation.len(),
            "Loaded context"
        );
        Ok(conversation)
    }

    fn save(&self, conversation: &Conversation) -> Result<()> {
        let contents = serde_json::to_string_pretty(conversation)?;

        let dir = self.staging_dir();
        fs::create_dir_all(dir).map_err(|source| Error::Write {
            path: dir.to_path_buf(),
            source,
        })?;

        // Every save stages into its own uniquely named file, so overlapping
        // saves can lose an update but never publish a half-written file.
        let mut staging = tempfile::Builder::new()
            .prefix(&self.staging_prefix())
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|source| Error::Write {
                path: dir.to_path_buf(),
                source,
            })?;
        staging
            .write_all(contents.as_bytes())
            .and_then(|()| staging.as_file().sync_all())
            .map_err(|source| Error::Write {
                path: staging.path().to_path_buf(),
                source,
            })?;

        staging.persist(&self.path).map_err(|e| Error::Write {
            path: self.path.clone(),
            source: e.error,
        })?;

        tracing::debug!(
            path = %self.path.display(),
            turns = conversation.len(),
            "Saved context"
        );
        Ok(())
    }

    fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Removed context file");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(Error::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory store
// ─────────────────────────────────────────────────────────────────────────────

/// A store that keeps the conversation in memory.
///
/// Useful for tests; can be told to fail reads or writes to exercise the
/// degraded paths of callers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    conversation: Mutex<Option<Conversation>>,
    fail_loads: bool,
    fail_saves: bool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `conversation`.
    pub fn with_conversation(conversation: Conversation) -> Self {
        Self {
            conversation: Mutex::new(Some(conversation)),
            ..Self::default()
        }
    }

    /// Make every `load` fail.
    pub fn failing_loads(mut self) -> Self {
        self.fail_loads = true;
        self
    }

    /// Make every `save` fail.
    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    /// The currently stored conversation, if any.
    pub fn snapshot(&self) -> Option<Conversation> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Conversation>> {
        self.conversation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ContextStore for MemoryStore {
    fn load(&self) -> Result<Conversation> {
        if self.fail_loads {
            return Err(Error::Other("load disabled".to_string()));
        }
        Ok(self.lock().clone().unwrap_or_default())
    }

    fn save(&self, conversation: &Conversation) -> Result<()> {
        if self.fail_saves {
            return Err(Error::Other("save disabled".to_string()));
        }
        *self.lock() = Some(conversation.clone());
        Ok(())
    }

    fn clear(&self) -> Result<bool> {
        Ok(self.lock().take().is_some())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
