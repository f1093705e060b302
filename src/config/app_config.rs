//! Application configuration module for devnotes
//!
//! Provides TOML-based configuration with environment variable override
//! support. Priority: CLI args > Environment variables > Config file > Defaults

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where notes are stored (default: ~/dev-notes)
    #[serde(default = "default_notes_dir")]
    notes_dir: String,

    /// Prefix prepended to every note filename
    #[serde(default = "default_file_prefix")]
    file_prefix: String,
}

fn default_notes_dir() -> String {
    "~/dev-notes".to_string()
}

fn default_file_prefix() -> String {
    "week4".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            notes_dir: default_notes_dir(),
            file_prefix: default_file_prefix(),
        }
    }
}

impl AppConfig {
    /// Create config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file: {}", e))?;
        Ok(config)
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(notes_dir) = std::env::var("DEVNOTES_NOTES_DIR") {
            config.notes_dir = notes_dir;
        }

        if let Ok(prefix) = std::env::var("DEVNOTES_FILE_PREFIX") {
            config.file_prefix = prefix;
        }

        config
    }

    /// Merge with another config (other takes priority for non-default values)
    pub fn merge_with(&self, other: &Self) -> Self {
        Self {
            notes_dir: if other.notes_dir != default_notes_dir() {
                other.notes_dir.clone()
            } else {
                self.notes_dir.clone()
            },
            file_prefix: if other.file_prefix != default_file_prefix() {
                other.file_prefix.clone()
            } else {
                self.file_prefix.clone()
            },
        }
    }

    /// Override notes_dir
    pub fn with_notes_dir(mut self, dir: &str) -> Self {
        self.notes_dir = dir.to_string();
        self
    }

    /// Override file_prefix
    pub fn with_file_prefix(mut self, prefix: &str) -> Self {
        self.file_prefix = prefix.to_string();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.notes_dir.trim().is_empty() {
            return Err(anyhow!("notes_dir must not be empty"));
        }

        if self.file_prefix.is_empty() {
            return Err(anyhow!("file_prefix must not be empty"));
        }

        if self.file_prefix.contains(['/', '\\'])
            || self.file_prefix.contains(char::is_whitespace)
        {
            return Err(anyhow!(
                "Invalid file prefix '{}': must not contain path separators or whitespace",
                self.file_prefix
            ));
        }

        Ok(())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| anyhow!("Failed to serialize config: {}", e))
    }

    // Getters
    pub fn notes_dir(&self) -> &str {
        &self.notes_dir
    }

    pub fn file_prefix(&self) -> &str {
        &self.file_prefix
    }
}
