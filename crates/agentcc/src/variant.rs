//! Per-tool policy: where the context lives, how a backend is found and
//! what the user is told when that fails.

use std::sync::Arc;
use std::time::Duration;

use agentcc_config::{paths, ConfigError, CredentialChain, ExecutableLocator, Settings};
use agentcc_llm::{
    AnthropicBackend, AnthropicConfig, LlmError, LocalAgentBackend, LocalAgentConfig,
    SharedBackend,
};
use agentcc_session::JsonFileStore;

use crate::error::{ExchangeError, Result};

/// Which of the three tools is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Messages API with the key from `ANTHROPIC_API_KEY`.
    Api,
    /// Messages API with the key discovered from existing installs.
    Native,
    /// Locally installed CLI agent.
    Local,
}

/// What to print when an exchange fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReport {
    /// Printed after `Error:`.
    pub headline: String,
    /// Printed line by line after the headline.
    pub details: Vec<String>,
}

impl Variant {
    /// Executable name.
    pub fn binary_name(self) -> &'static str {
        match self {
            Variant::Api => "agentcc",
            Variant::Native => "agentcc-native",
            Variant::Local => "agentcc-local",
        }
    }

    /// One-line description for `--help`.
    pub fn about(self) -> &'static str {
        match self {
            Variant::Api => "Send a prompt to Claude through the API and keep the conversation",
            Variant::Native => {
                "Send a prompt to Claude using existing Claude credentials and keep the conversation"
            }
            Variant::Local => "Send a prompt to the local Claude CLI and keep the conversation",
        }
    }

    /// Name of the context file in the home directory.
    pub fn context_file_name(self) -> &'static str {
        match self {
            Variant::Api => ".agentcc_context.json",
            Variant::Native => ".agentcc_native_context.json",
            Variant::Local => ".agentcc_local_context.json",
        }
    }

    /// Usage text printed when no prompt is given.
    pub fn usage(self) -> String {
        let name = self.binary_name();
        let mut lines = vec![
            format!("Usage: {} \"PROMPT_MSG\"", name),
            format!("       {} \"/clear\"", name),
        ];
        match self {
            Variant::Api => {}
            Variant::Native => lines.extend(
                [
                    "",
                    "This tool uses credentials from:",
                    "1. Claude Desktop app configuration (if installed)",
                    "2. ~/.claude/config.json (if exists)",
                    "3. ANTHROPIC_API_KEY environment variable (fallback)",
                    "",
                    "No manual API key setup required!",
                ]
                .map(String::from),
            ),
            Variant::Local => lines.extend(
                [
                    "",
                    "This tool runs the locally installed Claude CLI, found on PATH",
                    "or at its default install location.",
                ]
                .map(String::from),
            ),
        }
        lines.join("\n")
    }

    /// The context store in the user's home directory.
    pub fn store(self) -> Result<JsonFileStore> {
        Ok(JsonFileStore::new(paths::context_file(
            self.context_file_name(),
        )?))
    }

    /// Where API variants look for a key. `None` for the local variant.
    pub fn credential_chain(self) -> Option<CredentialChain> {
        match self {
            Variant::Api => Some(CredentialChain::env_only()),
            Variant::Native => Some(CredentialChain::system()),
            Variant::Local => None,
        }
    }

    /// Find credentials or the executable and build the backend.
    pub fn resolve_backend(self, settings: &Settings) -> Result<SharedBackend> {
        if let Some(chain) = self.credential_chain() {
            let secret = chain.require()?;
            tracing::debug!(source = %secret.source, "Using API credential");

            let anthropic = &settings.anthropic;
            let config = AnthropicConfig::new(secret.value)
                .with_base_url(anthropic.base_url.as_str())
                .with_api_version(anthropic.api_version.as_str())
                .with_model(anthropic.model.as_str())
                .with_max_tokens(anthropic.max_tokens)
                .with_timeout(Duration::from_secs(anthropic.timeout_secs));
            return Ok(Arc::new(AnthropicBackend::new(config)?));
        }

        let executable = ExecutableLocator::new(settings.local.command.as_str()).locate()?;
        let config = LocalAgentConfig::new(executable.path)
            .with_timeout(settings.local.timeout_secs.map(Duration::from_secs));
        Ok(Arc::new(LocalAgentBackend::new(config)))
    }

    /// Turn a failure into the message shown to the user.
    pub fn failure_report(self, err: &ExchangeError) -> FailureReport {
        let (headline, details) = match (self, err) {
            (Variant::Api, ExchangeError::Resolve(ConfigError::CredentialsNotFound { .. })) => (
                "ANTHROPIC_API_KEY environment variable not set.".to_string(),
                Vec::new(),
            ),
            (Variant::Native, ExchangeError::Resolve(ConfigError::CredentialsNotFound { .. })) => (
                "Could not find Claude API credentials.".to_string(),
                lines(&[
                    "",
                    "Please ensure one of the following:",
                    "1. Claude Desktop is installed and configured",
                    "2. API key is set in ~/.claude/config.json",
                    "3. ANTHROPIC_API_KEY environment variable is set (as fallback)",
                    "",
                    "This tool is designed to use existing Claude credentials without requiring manual setup.",
                ]),
            ),
            (Variant::Local, ExchangeError::Resolve(ConfigError::ExecutableNotFound { .. })) => (
                capitalize(&err.to_string()),
                lines(&[
                    "",
                    "Install the Claude CLI with:",
                    "  npm install -g @anthropic-ai/claude-code",
                    "or set AGENTCC_LOCAL_COMMAND to the path of the executable.",
                ]),
            ),
            (Variant::Local, ExchangeError::Backend(backend_err)) => {
                let hint = match backend_err {
                    LlmError::Timeout(_) => {
                        "Raise [local] timeout_secs in config.toml if the agent needs longer."
                    }
                    _ => "Make sure the Claude CLI is installed and logged in: run `claude` once interactively.",
                };
                (capitalize(&err.to_string()), lines(&["", hint]))
            }
            _ => (err.to_string(), Vec::new()),
        };
        FailureReport { headline, details }
    }
}

fn lines(text: &[&str]) -> Vec<String> {
    text.iter().map(|line| line.to_string()).collect()
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
