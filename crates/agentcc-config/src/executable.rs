//! Local executable resolution.
//!
//! A command is looked up on the search path first and then at a fixed
//! per-platform install location. A command given as a path (anything with a
//! separator in it) is used as-is when it exists.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::paths;
use crate::{ConfigError, Result};

/// Where an executable was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutableSource {
    /// The command was given as a path.
    Explicit,
    /// Found in a directory on the search path.
    SearchPath,
    /// Found at the fixed install location.
    InstallPath,
}

impl fmt::Display for ExecutableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutableSource::Explicit => write!(f, "explicit path"),
            ExecutableSource::SearchPath => write!(f, "PATH"),
            ExecutableSource::InstallPath => write!(f, "install location"),
        }
    }
}

/// A located executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExecutable {
    pub path: PathBuf,
    pub source: ExecutableSource,
}

/// Finds a command on the search path or at its install location.
#[derive(Debug, Clone)]
pub struct ExecutableLocator {
    command: String,
    search_path: Option<OsString>,
    install_path: Option<PathBuf>,
}

impl ExecutableLocator {
    /// Locator for `command` using this process's `PATH` and the platform's
    /// default install location.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            search_path: std::env::var_os("PATH"),
            install_path: paths::default_install_path(),
        }
    }

    /// Override the search path (same format as `PATH`).
    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    /// Override the fixed install location; `None` disables it.
    pub fn with_install_path(mut self, install_path: Option<PathBuf>) -> Self {
        self.install_path = install_path;
        self
    }

    /// Descriptions of every place that is checked, in order.
    pub fn searched(&self) -> Vec<String> {
        if is_path_like(&self.command) {
            return vec![self.command.clone()];
        }
        let mut searched = vec![format!("'{}' on PATH", self.command)];
        if let Some(ref install) = self.install_path {
            searched.push(install.display().to_string());
        }
        searched
    }

    /// Locate the executable.
    pub fn locate(&self) -> Result<ResolvedExecutable> {
        let found = if is_path_like(&self.command) {
            let path = PathBuf::from(&self.command);
            is_executable(&path).then_some(ResolvedExecutable {
                path,
                source: ExecutableSource::Explicit,
            })
        } else {
            self.search_path
                .as_deref()
                .and_then(|search_path| find_on_path(&self.command, search_path))
                .map(|path| ResolvedExecutable {
                    path,
                    source: ExecutableSource::SearchPath,
                })
                .or_else(|| {
                    self.install_path
                        .as_ref()
                        .filter(|p| is_executable(p))
                        .map(|path| ResolvedExecutable {
                            path: path.clone(),
                            source: ExecutableSource::InstallPath,
                        })
                })
        };

        match found {
            Some(resolved) => {
                tracing::debug!(
                    command = %self.command,
                    path = %resolved.path.display(),
                    source = %resolved.source,
                    "Resolved executable"
                );
                Ok(resolved)
            }
            None => Err(ConfigError::ExecutableNotFound {
                command: self.command.clone(),
                searched: self.searched(),
            }),
        }
    }
}

fn is_path_like(command: &str) -> bool {
    command.contains('/') || command.contains(std::path::MAIN_SEPARATOR)
}

/// Search every directory of `search_path` for `command`.
pub fn find_on_path(command: &str, search_path: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| candidates(&dir, command))
        .find(|candidate| is_executable(candidate))
}

#[cfg(windows)]
fn candidates(dir: &Path, command: &str) -> Vec<PathBuf> {
    let mut out = vec![dir.join(command)];
    for ext in ["exe", "cmd", "bat"] {
        out.push(dir.join(format!("{}.{}", command, ext)));
    }
    out
}

#[cfg(not(windows))]
fn candidates(dir: &Path, command: &str) -> Vec<PathBuf> {
    vec![dir.join(command)]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
