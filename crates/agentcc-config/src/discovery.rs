//! Settings file discovery.
//!
//! Resolution order (later overrides earlier):
//! 1. Built-in defaults
//! 2. `<config dir>/config.toml` (`AGENTCC_CONFIG_DIR` or the platform config dir)
//! 3. Environment variable overrides

use std::path::{Path, PathBuf};

use crate::{ConfigError, Result, Settings};

/// Default config filename within the config directory.
const USER_CONFIG_FILE: &str = "config.toml";

/// Application name for config directory resolution.
const APP_NAME: &str = "agentcc";

/// Environment variable to override the config directory.
const CONFIG_DIR_ENV: &str = "AGENTCC_CONFIG_DIR";

/// Result of settings discovery.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    /// The effective settings.
    pub settings: Settings,
    /// The file the settings were read from, if one was loaded.
    pub source: Option<PathBuf>,
    /// Problems that were tolerated along the way.
    pub warnings: Vec<String>,
}

/// Get the config directory for agentcc.
///
/// Checks `AGENTCC_CONFIG_DIR` first, then falls back to the platform default
/// (`~/.config/agentcc` on Linux, `~/Library/Application Support/agentcc` on macOS).
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the settings file path.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join(USER_CONFIG_FILE))
}

/// Load settings from the default config directory and the process environment.
pub fn load_settings() -> LoadedSettings {
    load_settings_from(config_dir().as_deref(), |name| std::env::var(name).ok())
}

/// Load settings from an explicit config directory with an explicit
/// environment lookup.
///
/// Never fails: a broken settings file is reported as a warning and the
/// defaults are used instead.
pub fn load_settings_from<F>(config_dir: Option<&Path>, lookup: F) -> LoadedSettings
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = Settings::default();
    let mut warnings = Vec::new();
    let mut source = None;

    if let Some(path) = config_dir.map(|d| d.join(USER_CONFIG_FILE))
        && path.is_file()
    {
        match load_settings_file(&path) {
            Ok(loaded) => {
                settings = loaded;
                source = Some(path);
            }
            Err(e) => warnings.push(format!("Failed to load {}: {}", path.display(), e)),
        }
    }

    settings.apply_env_overrides(lookup, &mut warnings);

    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    LoadedSettings {
        settings,
        source,
        warnings,
    }
}

/// Load settings from a specific file path (no discovery).
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    Settings::from_toml(&contents)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DEFAULT_MODEL;
    use std::fs;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_missing_dir_gives_defaults() {
        let loaded = load_settings_from(None, no_env);
        assert_eq!(loaded.settings, Settings::default());
        assert!(loaded.source.is_none());
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let loaded = load_settings_from(Some(dir.path()), no_env);
        assert_eq!(loaded.settings, Settings::default());
        assert!(loaded.source.is_none());
    }

    #[test]
    fn test_loads_settings_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "[anthropic]\nmodel = \"from-file\"\nmax_tokens = 512\n",
        )
        .unwrap();

        let loaded = load_settings_from(Some(dir.path()), no_env);
        assert_eq!(loaded.settings.anthropic.model, "from-file");
        assert_eq!(loaded.settings.anthropic.max_tokens, 512);
        assert_eq!(loaded.source, Some(dir.path().join("config.toml")));
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "[anthropic]\nmodel = \"from-file\"\n",
        )
        .unwrap();

        let loaded = load_settings_from(Some(dir.path()), |name| {
            (name == "AGENTCC_MODEL").then(|| "from-env".to_string())
        });
        assert_eq!(loaded.settings.anthropic.model, "from-env");
    }

    #[test]
    fn test_broken_file_warns_and_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "[anthropic\n").unwrap();

        let loaded = load_settings_from(Some(dir.path()), no_env);
        assert_eq!(loaded.settings.anthropic.model, DEFAULT_MODEL);
        assert!(loaded.source.is_none());
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.warnings[0].contains("config.toml"));
    }

    #[test]
    fn test_config_path_ends_with_file_name() {
        if let Some(p) = config_path() {
            assert!(p.ends_with("config.toml"));
        }
    }
}
