//! Well-known file locations.
//!
//! Every location is computed from explicit inputs (platform, home directory,
//! roaming/app-data directory) by a `*_for` function so it can be tested for
//! all platforms; the plain variants fill those inputs in from the running
//! system.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::{ConfigError, Result};

/// Desktop platforms with known file layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOS,
    Windows,
    Linux,
    /// Anything else: desktop locations are "not found".
    Unsupported,
}

impl Platform {
    /// Detect the current platform.
    pub fn detect() -> Self {
        #[cfg(target_os = "macos")]
        {
            Platform::MacOS
        }

        #[cfg(target_os = "windows")]
        {
            Platform::Windows
        }

        #[cfg(target_os = "linux")]
        {
            Platform::Linux
        }

        #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
        {
            Platform::Unsupported
        }
    }

    /// Get the display name for this platform.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::MacOS => "macOS",
            Platform::Windows => "Windows",
            Platform::Linux => "Linux",
            Platform::Unsupported => "Unsupported",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Name of the desktop application's directory.
const DESKTOP_APP_DIR: &str = "Claude";

/// Name of the config file used by both the desktop app and the CLI.
const CONFIG_JSON: &str = "config.json";

/// The user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(ConfigError::NoHomeDir)
}

/// Path of a context file with the given name in the home directory.
pub fn context_file(file_name: &str) -> Result<PathBuf> {
    Ok(home_dir()?.join(file_name))
}

/// Desktop application config file for a platform.
///
/// `roaming` is the Windows roaming app-data directory (`%APPDATA%`); when it
/// is unknown, `<home>\AppData\Roaming` is used.
pub fn desktop_config_path_for(
    platform: Platform,
    home: &Path,
    roaming: Option<&Path>,
) -> Option<PathBuf> {
    match platform {
        Platform::MacOS => Some(
            home.join("Library")
                .join("Application Support")
                .join(DESKTOP_APP_DIR)
                .join(CONFIG_JSON),
        ),
        Platform::Windows => {
            let base = roaming
                .map(Path::to_path_buf)
                .unwrap_or_else(|| home.join("AppData").join("Roaming"));
            Some(base.join(DESKTOP_APP_DIR).join(CONFIG_JSON))
        }
        Platform::Linux => Some(home.join(".config").join(DESKTOP_APP_DIR).join(CONFIG_JSON)),
        Platform::Unsupported => None,
    }
}

/// Desktop application config file on this system.
pub fn desktop_config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    let roaming = std::env::var_os("APPDATA")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    desktop_config_path_for(Platform::detect(), &home, roaming.as_deref())
}

/// CLI tool config file under a home directory.
pub fn cli_config_path_for(home: &Path) -> PathBuf {
    home.join(".claude").join(CONFIG_JSON)
}

/// CLI tool config file on this system.
pub fn cli_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| cli_config_path_for(&home))
}

/// Fixed install location of the local CLI agent for a platform.
///
/// - macOS: Homebrew's prefix, which is often missing from `PATH` in
///   non-login shells
/// - Linux: the per-user "local" install under `~/.claude`
/// - Windows: npm's global bin directory under `%APPDATA%`
pub fn default_install_path_for(
    platform: Platform,
    home: &Path,
    roaming: Option<&Path>,
) -> Option<PathBuf> {
    match platform {
        Platform::MacOS => Some(PathBuf::from("/opt/homebrew/bin/claude")),
        Platform::Linux => Some(home.join(".claude").join("local").join("claude")),
        Platform::Windows => {
            let base = roaming
                .map(Path::to_path_buf)
                .unwrap_or_else(|| home.join("AppData").join("Roaming"));
            Some(base.join("npm").join("claude.cmd"))
        }
        Platform::Unsupported => None,
    }
}

/// Fixed install location of the local CLI agent on this system.
pub fn default_install_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    let roaming = std::env::var_os("APPDATA")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    default_install_path_for(Platform::detect(), &home, roaming.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_detect_is_stable() {
        assert_eq!(Platform::detect(), Platform::detect());
    }

    #[test]
    fn test_platform_display() {
        assert_eq!(Platform::MacOS.to_string(), "macOS");
        assert_eq!(Platform::Unsupported.to_string(), "Unsupported");
    }

    #[test]
    fn test_desktop_config_macos() {
        let path = desktop_config_path_for(Platform::MacOS, Path::new("/Users/u"), None).unwrap();
        assert_eq!(
            path,
            PathBuf::from("/Users/u/Library/Application Support/Claude/config.json")
        );
    }

    #[test]
    fn test_desktop_config_linux() {
        let path = desktop_config_path_for(Platform::Linux, Path::new("/home/u"), None).unwrap();
        assert_eq!(path, PathBuf::from("/home/u/.config/Claude/config.json"));
    }

    #[test]
    fn test_desktop_config_windows_uses_roaming_dir() {
        let path = desktop_config_path_for(
            Platform::Windows,
            Path::new("/home/u"),
            Some(Path::new("/roaming")),
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("/roaming/Claude/config.json"));
    }

    #[test]
    fn test_desktop_config_windows_falls_back_to_home() {
        let path = desktop_config_path_for(Platform::Windows, Path::new("/home/u"), None).unwrap();
        assert!(path.starts_with("/home/u/AppData/Roaming"));
        assert!(path.ends_with("Claude/config.json"));
    }

    #[test]
    fn test_desktop_config_unsupported_is_none() {
        assert!(desktop_config_path_for(Platform::Unsupported, Path::new("/home/u"), None).is_none());
    }

    #[test]
    fn test_cli_config_path() {
        assert_eq!(
            cli_config_path_for(Path::new("/home/u")),
            PathBuf::from("/home/u/.claude/config.json")
        );
    }

    #[test]
    fn test_default_install_paths() {
        let home = Path::new("/home/u");
        assert_eq!(
            default_install_path_for(Platform::Linux, home, None),
            Some(PathBuf::from("/home/u/.claude/local/claude"))
        );
        assert_eq!(
            default_install_path_for(Platform::MacOS, home, None),
            Some(PathBuf::from("/opt/homebrew/bin/claude"))
        );
        assert!(
            default_install_path_for(Platform::Windows, home, Some(Path::new("/r")))
                .unwrap()
                .ends_with("npm/claude.cmd")
        );
        assert!(default_install_path_for(Platform::Unsupported, home, None).is_none());
    }
}
