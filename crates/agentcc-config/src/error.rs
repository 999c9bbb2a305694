//! Configuration error types.

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur during configuration loading and resolution.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// No credential was found in any source of the chain.
    #[error("could not find API credentials (checked: {})", checked.join(", "))]
    CredentialsNotFound { checked: Vec<String> },

    /// The local executable was not found anywhere.
    #[error("could not find the '{command}' executable (checked: {})", searched.join(", "))]
    ExecutableNotFound {
        command: String,
        searched: Vec<String>,
    },

    /// The user's home directory could not be determined.
    #[error("could not determine the home directory")]
    NoHomeDir,
}
