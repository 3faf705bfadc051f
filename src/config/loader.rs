use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::animation::AnimationOptions;
use crate::config::types::Config;
use crate::page::PageContent;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/pagestack/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("pagestack").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing file yields `Config::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads, parses and validates the configuration at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            templates = config.templates.len(),
            "Loaded config"
        );
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Names and the page tag are non-empty
    /// - The animation options string parses
    /// - The transition timeout is positive
    /// - Every template's root element is the page tag
    /// - The initial page is a known template (when templates are configured)
    pub fn validate(&self) -> Result<(), ConfigError> {
        let navigator = &self.navigator;

        if navigator.page_tag.trim().is_empty() {
            return Err(validation("page_tag must not be empty"));
        }

        if let Some(name) = &navigator.default_animation {
            if name.trim().is_empty() {
                return Err(validation("default_animation must not be empty"));
            }
        }

        if let Some(raw) = &navigator.animation_options {
            AnimationOptions::parse(raw).map_err(|e| ConfigError::ValidationError {
                message: format!("animation_options: {}", e),
            })?;
        }

        if navigator.transition_timeout_ms == Some(0) {
            return Err(validation("transition_timeout_ms must be greater than zero"));
        }

        let page_tag = navigator.page_tag.to_ascii_lowercase();
        for (name, markup) in &self.templates {
            if name.trim().is_empty() {
                return Err(validation("template names must not be empty"));
            }
            let root = PageContent::new(markup.as_str()).root_tag();
            if root.as_deref() != Some(page_tag.as_str()) {
                return Err(ConfigError::ValidationError {
                    message: format!(
                        "Template '{}' must have a <{}> root element",
                        name, navigator.page_tag
                    ),
                });
            }
        }

        if let Some(initial) = &navigator.initial_page {
            if initial.trim().is_empty() {
                return Err(validation("initial_page must not be empty"));
            }
            if !self.templates.is_empty() && !self.templates.contains_key(initial) {
                return Err(ConfigError::ValidationError {
                    message: format!("Initial page '{}' not found in templates", initial),
                });
            }
        }

        Ok(())
    }
}

fn validation(message: &str) -> ConfigError {
    ConfigError::ValidationError {
        message: message.to_string(),
    }
}
