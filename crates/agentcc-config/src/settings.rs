//! User settings.
//!
//! ```toml
//! [anthropic]
//! model = "claude-sonnet-4-20250514"
//! max_tokens = 8096
//! base_url = "https://api.anthropic.com"
//! timeout_secs = 300
//!
//! [local]
//! command = "claude"
//! timeout_secs = 600
//! ```
//!
//! # Environment Variables
//!
//! - `AGENTCC_MODEL` - Override `anthropic.model`
//! - `AGENTCC_MAX_TOKENS` - Override `anthropic.max_tokens`
//! - `ANTHROPIC_BASE_URL` - Override `anthropic.base_url`
//! - `AGENTCC_LOCAL_COMMAND` - Override `local.command`

use serde::{Deserialize, Serialize};

use crate::Result;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 8096;
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_API_VERSION: &str = "2023-06-01";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_LOCAL_COMMAND: &str = "claude";

const MODEL_ENV: &str = "AGENTCC_MODEL";
const MAX_TOKENS_ENV: &str = "AGENTCC_MAX_TOKENS";
const BASE_URL_ENV: &str = "ANTHROPIC_BASE_URL";
const LOCAL_COMMAND_ENV: &str = "AGENTCC_LOCAL_COMMAND";

/// All user settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Remote Messages API settings.
    pub anthropic: AnthropicSettings,
    /// Local CLI agent settings.
    pub local: LocalSettings,
}

/// Settings for the remote Messages API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnthropicSettings {
    /// Model identifier sent with every request.
    pub model: String,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// API base URL, without the `/v1/messages` suffix.
    pub base_url: String,
    /// Value of the `anthropic-version` header.
    pub api_version: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AnthropicSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Settings for the local CLI agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalSettings {
    /// Command name (looked up on `PATH`) or path to the executable.
    pub command: String,
    /// Kill the agent after this many seconds. Unset means wait forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for LocalSettings {
    fn default() -> Self {
        Self {
            command: DEFAULT_LOCAL_COMMAND.to_string(),
            timeout_secs: None,
        }
    }
}

impl Settings {
    /// Parse settings from TOML. Missing sections and fields keep defaults.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// Unparseable values are skipped and reported in `warnings`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F, warnings: &mut Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(model) = get(MODEL_ENV) {
            self.anthropic.model = model;
        }

        if let Some(raw) = get(MAX_TOKENS_ENV) {
            match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => self.anthropic.max_tokens = n,
                _ => warnings.push(format!(
                    "Ignoring {}={:?}: expected a positive integer",
                    MAX_TOKENS_ENV, raw
                )),
            }
        }

        if let Some(url) = get(BASE_URL_ENV) {
            self.anthropic.base_url = url;
        }

        if let Some(command) = get(LOCAL_COMMAND_ENV) {
            self.local.command = command;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.anthropic.model, DEFAULT_MODEL);
        assert_eq!(settings.anthropic.max_tokens, 8096);
        assert_eq!(settings.anthropic.base_url, "https://api.anthropic.com");
        assert_eq!(settings.anthropic.api_version, "2023-06-01");
        assert_eq!(settings.anthropic.timeout_secs, 300);
        assert_eq!(settings.local.command, "claude");
        assert!(settings.local.timeout_secs.is_none());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let settings = Settings::from_toml(
            r#"
[anthropic]
model = "claude-opus-4-20250514"

[local]
timeout_secs = 90
"#,
        )
        .unwrap();

        assert_eq!(settings.anthropic.model, "claude-opus-4-20250514");
        assert_eq!(settings.anthropic.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(settings.local.command, "claude");
        assert_eq!(settings.local.timeout_secs, Some(90));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(Settings::from_toml("[anthropic\nmodel = ").is_err());
        assert!(Settings::from_toml("[anthropic]\nmax_tokens = \"many\"").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::default();
        let mut warnings = Vec::new();
        settings.apply_env_overrides(
            env(&[
                ("AGENTCC_MODEL", "claude-haiku"),
                ("AGENTCC_MAX_TOKENS", "1024"),
                ("ANTHROPIC_BASE_URL", "http://localhost:9999"),
                ("AGENTCC_LOCAL_COMMAND", "/opt/claude"),
            ]),
            &mut warnings,
        );

        assert!(warnings.is_empty());
        assert_eq!(settings.anthropic.model, "claude-haiku");
        assert_eq!(settings.anthropic.max_tokens, 1024);
        assert_eq!(settings.anthropic.base_url, "http://localhost:9999");
        assert_eq!(settings.local.command, "/opt/claude");
    }

    #[test]
    fn test_invalid_max_tokens_override_is_ignored_with_warning() {
        let mut settings = Settings::default();
        let mut warnings = Vec::new();
        settings.apply_env_overrides(env(&[("AGENTCC_MAX_TOKENS", "lots")]), &mut warnings);

        assert_eq!(settings.anthropic.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("AGENTCC_MAX_TOKENS"));

        settings.apply_env_overrides(env(&[("AGENTCC_MAX_TOKENS", "0")]), &mut warnings);
        assert_eq!(settings.anthropic.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let mut settings = Settings::default();
        let mut warnings = Vec::new();
        settings.apply_env_overrides(env(&[("AGENTCC_MODEL", "  ")]), &mut warnings);
        assert_eq!(settings.anthropic.model, DEFAULT_MODEL);
    }
}
