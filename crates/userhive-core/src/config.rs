//! Configuration management for UserHive.
//!
//! Loads configuration from ${USERHIVE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Color theme for the terminal UI.
///
/// Both themes drive the same views; only the palette differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Accent colors, borders and highlighted headers (default).
    #[default]
    Styled,
    /// Terminal default colors only.
    Plain,
}

impl Theme {
    /// Returns the config/CLI name for this theme.
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Styled => "styled",
            Theme::Plain => "plain",
        }
    }

    /// Parses a theme name (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|theme| theme.name().eq_ignore_ascii_case(value.trim()))
    }

    /// Returns all themes for iteration.
    pub fn all() -> &'static [Theme] {
        &[Theme::Styled, Theme::Plain]
    }
}

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for UserHive configuration and data files.
    //!
    //! USERHIVE_HOME resolution order:
    //! 1. USERHIVE_HOME environment variable (if set)
    //! 2. ~/.config/userhive (default)
    //! 3. ./.userhive when no home directory can be determined

    use std::path::PathBuf;

    /// Environment variable that overrides the home directory.
    pub const HOME_ENV: &str = "USERHIVE_HOME";

    /// Returns the UserHive home directory.
    pub fn userhive_home() -> PathBuf {
        if let Ok(home) = std::env::var(HOME_ENV)
            && !home.trim().is_empty()
        {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".userhive"),
            |h| h.join(".config").join("userhive"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        userhive_home().join("config.toml")
    }

    /// Returns the path to the stored session token.
    pub fn session_path() -> PathBuf {
        userhive_home().join("session.json")
    }

    /// Returns the path to the persistent page mirror.
    pub fn mirror_path() -> PathBuf {
        userhive_home().join("mirror.json")
    }

    /// Returns the directory holding log files.
    pub fn logs_dir() -> PathBuf {
        userhive_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the user directory API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Optional `x-api-key` header value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Color theme for the TUI.
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Some(Self::DEFAULT_BASE_URL.to_string()),
            api_key: None,
            theme: Theme::default(),
        }
    }
}

impl Config {
    /// Default user directory API.
    pub const DEFAULT_BASE_URL: &'static str = "https://reqres.in/api";

    /// Environment variable overriding `base_url`.
    pub const BASE_URL_ENV: &'static str = "USERHIVE_API_URL";

    /// Loads configuration from the default config path.
    /// Returns defaults if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Resolves the API base URL with precedence: env > config > default.
    ///
    /// Trailing slashes are stripped so endpoint paths can be appended.
    ///
    /// # Errors
    /// Returns an error if the chosen URL is not well-formed.
    pub fn resolved_base_url(&self) -> Result<String> {
        let env_url = std::env::var(Self::BASE_URL_ENV).ok();
        let candidates = [env_url.as_deref(), self.base_url.as_deref()];

        let chosen = candidates
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
            .unwrap_or(Self::DEFAULT_BASE_URL);

        url::Url::parse(chosen).with_context(|| format!("Invalid API base URL: {chosen}"))?;
        Ok(chosen.trim_end_matches('/').to_string())
    }

    /// Returns the configured API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Saves only the theme field to the config file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or written.
    pub fn save_theme(theme: Theme) -> Result<()> {
        Self::save_theme_to(&paths::config_path(), theme)
    }

    /// Saves only the theme field to a specific config file path.
    ///
    /// Creates the file from the default template if it doesn't exist.
    /// Existing fields and comments are preserved.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or written.
    pub fn save_theme_to(path: &Path, theme: Theme) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        doc["theme"] = value(theme.name());

        Self::write_config(path, &doc.to_string())
    }

    /// Creates a config file from the default template.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    fn write_config(path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}
