//! Configuration for the agentcc tools.
//!
//! Provides:
//! - Well-known locations (context files, desktop and CLI config files,
//!   per-platform install paths)
//! - API credential resolution (desktop config → CLI config → env var)
//! - Local executable resolution (`PATH` → fixed install path)
//! - Optional TOML settings (`config.toml`) with environment overrides

pub mod discovery;
pub mod error;
pub mod executable;
pub mod paths;
pub mod secrets;
pub mod settings;

pub use discovery::{config_dir, config_path, load_settings, load_settings_from, LoadedSettings};
pub use error::{ConfigError, Result};
pub use executable::{ExecutableLocator, ExecutableSource, ResolvedExecutable};
pub use paths::Platform;
pub use secrets::{CredentialChain, ResolvedSecret, SecretSource, API_KEY_ENV_VAR};
pub use settings::{AnthropicSettings, LocalSettings, Settings};
