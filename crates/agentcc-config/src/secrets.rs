//! API credential resolution.
//!
//! Resolution order for the full chain:
//! 1. Desktop application config (`apiKey`)
//! 2. CLI tool config (`apiKey` or `api_key`)
//! 3. Environment variable
//!
//! The first source that yields a non-empty value wins. A missing file, an
//! unreadable file and a malformed file are all the same thing here: the
//! source is skipped.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::paths;
use crate::{ConfigError, Result};

/// Environment variable holding the API key.
pub const API_KEY_ENV_VAR: &str = "ANTHROPIC_API_KEY";

/// Fields checked in the desktop application config.
const DESKTOP_KEY_FIELDS: &[&str] = &["apiKey"];

/// Fields checked in the CLI tool config.
const CLI_KEY_FIELDS: &[&str] = &["apiKey", "api_key"];

/// Result of credential resolution with provenance.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedSecret {
    /// The secret value.
    pub value: String,
    /// Where the secret was found.
    pub source: SecretSource,
}

impl fmt::Debug for ResolvedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedSecret")
            .field("value", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Where a secret was resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretSource {
    /// The desktop application's config file.
    DesktopConfig(PathBuf),
    /// The CLI tool's config file.
    CliConfig(PathBuf),
    /// Environment variable.
    EnvVar(String),
}

impl fmt::Display for SecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretSource::DesktopConfig(path) => write!(f, "desktop config {}", path.display()),
            SecretSource::CliConfig(path) => write!(f, "CLI config {}", path.display()),
            SecretSource::EnvVar(var) => write!(f, "env var {}", var),
        }
    }
}

/// An ordered list of places to look for an API credential.
#[derive(Debug, Clone, Default)]
pub struct CredentialChain {
    desktop_config: Option<PathBuf>,
    cli_config: Option<PathBuf>,
    env_var: Option<String>,
}

impl CredentialChain {
    /// An empty chain; resolves nothing until sources are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// The full chain for this system: desktop config, CLI config, then
    /// `ANTHROPIC_API_KEY`.
    pub fn system() -> Self {
        let mut chain = Self::new().with_env_var(API_KEY_ENV_VAR);
        chain.desktop_config = paths::desktop_config_path();
        chain.cli_config = paths::cli_config_path();
        chain
    }

    /// Only the `ANTHROPIC_API_KEY` environment variable.
    pub fn env_only() -> Self {
        Self::new().with_env_var(API_KEY_ENV_VAR)
    }

    /// Set the desktop application config file.
    pub fn with_desktop_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.desktop_config = Some(path.into());
        self
    }

    /// Set the CLI tool config file.
    pub fn with_cli_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.cli_config = Some(path.into());
        self
    }

    /// Set the environment variable checked last.
    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = Some(name.into());
        self
    }

    /// Descriptions of every source in resolution order.
    pub fn sources(&self) -> Vec<String> {
        let mut sources = Vec::new();
        if let Some(ref path) = self.desktop_config {
            sources.push(format!("desktop config {}", path.display()));
        }
        if let Some(ref path) = self.cli_config {
            sources.push(format!("CLI config {}", path.display()));
        }
        if let Some(ref var) = self.env_var {
            sources.push(format!("env var {}", var));
        }
        sources
    }

    /// Walk the chain and return the first non-empty credential.
    pub fn resolve(&self) -> Option<ResolvedSecret> {
        if let Some(ref path) = self.desktop_config
            && let Some(value) = read_key(path, DESKTOP_KEY_FIELDS)
        {
            return Some(ResolvedSecret {
                value,
                source: SecretSource::DesktopConfig(path.clone()),
            });
        }

        if let Some(ref path) = self.cli_config
            && let Some(value) = read_key(path, CLI_KEY_FIELDS)
        {
            return Some(ResolvedSecret {
                value,
                source: SecretSource::CliConfig(path.clone()),
            });
        }

        if let Some(ref var) = self.env_var
            && let Ok(value) = std::env::var(var)
            && !value.is_empty()
        {
            return Some(ResolvedSecret {
                value,
                source: SecretSource::EnvVar(var.clone()),
            });
        }

        None
    }

    /// Like [`resolve`](Self::resolve), but a miss is an error naming every
    /// source that was checked.
    pub fn require(&self) -> Result<ResolvedSecret> {
        match self.resolve() {
            Some(secret) => {
                tracing::debug!(source = %secret.source, "Resolved API credential");
                Ok(secret)
            }
            None => Err(ConfigError::CredentialsNotFound {
                checked: self.sources(),
            }),
        }
    }
}

/// Read the first non-empty string among `fields` from a JSON config file.
fn read_key(path: &Path, fields: &[&str]) -> Option<String> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::trace!(path = %path.display(), error = %e, "Credential source unavailable");
            return None;
        }
    };

    let config: serde_json::Value = match serde_json::from_str(&contents) {
        Ok(config) => config,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Ignoring malformed config file");
            return None;
        }
    };

    fields.iter().find_map(|field| {
        config
            .get(*field)
            .and_then(|v| v.as_str())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // Each test uses its own variable name so tests can run in parallel.
    fn set_env(name: &str, value: &str) {
        // SAFETY: the variable name is unique to the calling test.
        unsafe { std::env::set_var(name, value) };
    }

    fn unset_env(name: &str) {
        // SAFETY: the variable name is unique to the calling test.
        unsafe { std::env::remove_var(name) };
    }

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_desktop_config_wins_over_env() {
        let dir = TempDir::new().unwrap();
        let desktop = write(&dir, "desktop.json", r#"{"apiKey": "X"}"#);
        set_env("AGENTCC_TEST_KEY_DESKTOP_WINS", "from-env");

        let resolved = CredentialChain::new()
            .with_desktop_config(&desktop)
            .with_env_var("AGENTCC_TEST_KEY_DESKTOP_WINS")
            .resolve()
            .unwrap();

        assert_eq!(resolved.value, "X");
        assert_eq!(resolved.source, SecretSource::DesktopConfig(desktop));
        unset_env("AGENTCC_TEST_KEY_DESKTOP_WINS");
    }

    #[test]
    fn test_cli_config_used_when_desktop_missing() {
        let dir = TempDir::new().unwrap();
        let cli = write(&dir, "cli.json", r#"{"apiKey": "cli-key"}"#);

        let resolved = CredentialChain::new()
            .with_desktop_config(dir.path().join("missing.json"))
            .with_cli_config(&cli)
            .resolve()
            .unwrap();

        assert_eq!(resolved.value, "cli-key");
        assert_eq!(resolved.source, SecretSource::CliConfig(cli));
    }

    #[test]
    fn test_cli_config_accepts_snake_case_field() {
        let dir = TempDir::new().unwrap();
        let cli = write(&dir, "cli.json", r#"{"api_key": "snake"}"#);

        let resolved = CredentialChain::new().with_cli_config(&cli).resolve().unwrap();
        assert_eq!(resolved.value, "snake");
    }

    #[test]
    fn test_desktop_config_ignores_snake_case_field() {
        let dir = TempDir::new().unwrap();
        let desktop = write(&dir, "desktop.json", r#"{"api_key": "snake"}"#);

        assert!(
            CredentialChain::new()
                .with_desktop_config(&desktop)
                .resolve()
                .is_none()
        );
    }

    #[test]
    fn test_cli_config_wins_over_env() {
        let dir = TempDir::new().unwrap();
        let cli = write(&dir, "cli.json", r#"{"apiKey": "cli-key"}"#);
        set_env("AGENTCC_TEST_KEY_CLI_WINS", "from-env");

        let resolved = CredentialChain::new()
            .with_cli_config(&cli)
            .with_env_var("AGENTCC_TEST_KEY_CLI_WINS")
            .resolve()
            .unwrap();

        assert_eq!(resolved.value, "cli-key");
        unset_env("AGENTCC_TEST_KEY_CLI_WINS");
    }

    #[test]
    fn test_malformed_configs_fall_through_to_env() {
        let dir = TempDir::new().unwrap();
        let desktop = write(&dir, "desktop.json", "{ not json");
        let cli = write(&dir, "cli.json", r#"["not", "an", "object"]"#);
        set_env("AGENTCC_TEST_KEY_MALFORMED", "from-env");

        let resolved = CredentialChain::new()
            .with_desktop_config(&desktop)
            .with_cli_config(&cli)
            .with_env_var("AGENTCC_TEST_KEY_MALFORMED")
            .resolve()
            .unwrap();

        assert_eq!(resolved.value, "from-env");
        assert_eq!(
            resolved.source,
            SecretSource::EnvVar("AGENTCC_TEST_KEY_MALFORMED".to_string())
        );
        unset_env("AGENTCC_TEST_KEY_MALFORMED");
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let dir = TempDir::new().unwrap();
        let desktop = write(&dir, "desktop.json", r#"{"apiKey": ""}"#);
        let cli = write(&dir, "cli.json", r#"{"apiKey": 42, "api_key": "fallback"}"#);

        let resolved = CredentialChain::new()
            .with_desktop_config(&desktop)
            .with_cli_config(&cli)
            .resolve()
            .unwrap();
        assert_eq!(resolved.value, "fallback");
    }

    #[test]
    fn test_empty_env_var_is_not_a_credential() {
        set_env("AGENTCC_TEST_KEY_EMPTY", "");
        let chain = CredentialChain::new().with_env_var("AGENTCC_TEST_KEY_EMPTY");
        assert!(chain.resolve().is_none());
        unset_env("AGENTCC_TEST_KEY_EMPTY");
    }

    #[test]
    fn test_require_names_every_source() {
        let dir = TempDir::new().unwrap();
        let chain = CredentialChain::new()
            .with_desktop_config(dir.path().join("d.json"))
            .with_cli_config(dir.path().join("c.json"))
            .with_env_var("AGENTCC_TEST_KEY_NEVER_SET");

        let err = chain.require().unwrap_err();
        match err {
            ConfigError::CredentialsNotFound { ref checked } => {
                assert_eq!(checked.len(), 3);
                assert!(checked[0].starts_with("desktop config"));
                assert!(checked[1].starts_with("CLI config"));
                assert_eq!(checked[2], "env var AGENTCC_TEST_KEY_NEVER_SET");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("AGENTCC_TEST_KEY_NEVER_SET"));
    }

    #[test]
    fn test_env_only_chain_has_single_source() {
        let chain = CredentialChain::env_only();
        assert_eq!(chain.sources(), vec![format!("env var {}", API_KEY_ENV_VAR)]);
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = ResolvedSecret {
            value: "sk-very-secret".to_string(),
            source: SecretSource::EnvVar(API_KEY_ENV_VAR.to_string()),
        };
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("sk-very-secret"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_secret_source_display() {
        assert_eq!(
            SecretSource::EnvVar("ANTHROPIC_API_KEY".to_string()).to_string(),
            "env var ANTHROPIC_API_KEY"
        );
        assert_eq!(
            SecretSource::CliConfig(PathBuf::from("/h/.claude/config.json")).to_string(),
            "CLI config /h/.claude/config.json"
        );
    }
}
