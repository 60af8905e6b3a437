//! Settings file support
//!
//! Loads settings from ~/.fencematch.toml (or %USERPROFILE%\.fencematch.toml on Windows)
//!
//! Example:
//! ```text
//! # fencematch settings
//! enabled = true
//! highlight-color = "yellow"
//! ```
//!
//! Unknown keys are ignored. A missing file yields the defaults; a malformed
//! one is reported and the defaults are used instead.

use std::fs;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::{info, warn};

use crate::error::{FenceError, Result};
use crate::style::Color;

const ENABLED_KEY: &str = "enabled";
const COLOR_KEY: &str = "highlight-color";

/// Fence highlighting settings, injected into the core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Whether matched fences are visibly highlighted
    pub enabled: bool,
    /// Color used for highlighted fences
    pub highlight_color: Color,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            highlight_color: Color::Yellow,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".fencematch.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".fencematch.toml"))
        }
    }

    /// Load settings from the default path, falling back to defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };

        match Self::parse(&contents) {
            Ok(settings) => {
                info!(path = %path.display(), ?settings, "loaded settings");
                settings
            }
            Err(e) => {
                warn!(path = %path.display(), "ignoring settings file: {}", e);
                Self::default()
            }
        }
    }

    /// Parse settings file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let table: Table = contents.parse()?;
        let mut settings = Self::default();

        if let Some(value) = table.get(ENABLED_KEY) {
            settings.enabled = value.as_bool().ok_or_else(|| {
                FenceError::Message(format!("'{}' must be true or false", ENABLED_KEY))
            })?;
        }

        if let Some(value) = table.get(COLOR_KEY) {
            let name = value.as_str().ok_or_else(|| {
                FenceError::Message(format!("'{}' must be a string", COLOR_KEY))
            })?;
            settings.highlight_color = name.parse()?;
        }

        Ok(settings)
    }

    /// Render settings as file contents
    pub fn to_toml(&self) -> String {
        let mut table = Table::new();
        table.insert(ENABLED_KEY.to_string(), Value::Boolean(self.enabled));
        table.insert(
            COLOR_KEY.to_string(),
            Value::String(self.highlight_color.to_string()),
        );
        format!("# fencematch settings\n{}", table)
    }

    /// Save settings to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_toml())?;
        info!(path = %path.display(), "saved settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_settings() {
        let contents = r##"
# Comment
enabled = false
highlight-color = "#102030"
        "##;

        let settings = Settings::parse(contents).unwrap();
        assert_eq!(
            settings,
            Settings {
                enabled: false,
                highlight_color: Color::Rgb(0x10, 0x20, 0x30),
            }
        );
    }

    #[test]
    fn test_parse_partial_and_unknown_keys() {
        let settings = Settings::parse("highlight-color = \"cyan\"\ntab-width = 4\n").unwrap();
        assert!(settings.enabled);
        assert_eq!(settings.highlight_color, Color::Cyan);

        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        assert!(Settings::parse("enabled = \"yes\"").is_err());
        assert!(Settings::parse("highlight-color = 3").is_err());
        assert!(Settings::parse("highlight-color = \"mauve\"").is_err());
        assert!(matches!(
            Settings::parse("enabled = ").unwrap_err(),
            FenceError::Config(_)
        ));
    }

    #[test]
    fn test_to_toml_parses_back() {
        let settings = Settings {
            enabled: false,
            highlight_color: Color::BrightGreen,
        };
        assert_eq!(Settings::parse(&settings.to_toml()).unwrap(), settings);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!(
            "fencematch-settings-{}.toml",
            std::process::id()
        ));
        let settings = Settings {
            enabled: false,
            highlight_color: Color::Magenta,
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);

        fs::write(&path, "enabled = maybe").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());

        fs::remove_file(&path).unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }
}
