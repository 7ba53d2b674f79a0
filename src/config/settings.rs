//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::APP_NAME;

/// Environment variables consulted for the Gemini API key, in order.
const API_KEY_ENV_VARS: [&str; 2] = ["CALLBRIEF_GEMINI_API_KEY", "GEMINI_API_KEY"];

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Generative text service settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Contact store settings
    #[serde(default)]
    pub contacts: ContactSettings,

    /// Analysis history settings
    #[serde(default)]
    pub history: HistorySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Data directory for the history database and default contact store
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (gemini)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key (for cloud providers)
    #[serde(default)]
    pub api_key: String,

    /// Model name
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// API endpoint (empty = provider default)
    #[serde(default)]
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSettings {
    /// CSV contact store (empty = <data_dir>/contacts.csv)
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Header of the column holding phone numbers
    #[serde(default = "default_phone_column")]
    pub phone_column: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Record every analysis outcome in the history database
    #[serde(default = "default_true")]
    pub enabled: bool,
}

// Default value functions

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", APP_NAME, APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.local/share/callbrief"))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_llm_provider() -> String {
    "gemini".to_string()
}

fn default_llm_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    45
}

fn default_phone_column() -> String {
    "phone_number".to_string()
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            model: default_llm_model(),
            endpoint: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            path: None,
            phone_column: default_phone_column(),
        }
    }
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            llm: LlmSettings::default(),
            contacts: ContactSettings::default(),
            history: HistorySettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::debug!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides(|name| std::env::var(name).ok());
            return Ok(settings);
        }

        let mut settings = Self::load_from(&config_path)?;
        settings.apply_env_overrides(|name| std::env::var(name).ok());

        Ok(settings)
    }

    /// Parse a settings file without applying environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Fill an empty API key from the first non-blank key variable.
    fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if !self.llm.api_key.trim().is_empty() {
            return;
        }

        if let Some(key) = API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| lookup(*name))
            .find(|key| !key.trim().is_empty())
        {
            self.llm.api_key = key;
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", APP_NAME, APP_NAME)
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &Path) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the history database path
    pub fn database_path(&self) -> PathBuf {
        self.general.data_dir.join("callbrief.db")
    }

    /// Get the contact store path
    pub fn contacts_path(&self) -> PathBuf {
        self.contacts
            .path
            .clone()
            .unwrap_or_else(|| self.general.data_dir.join("contacts.csv"))
    }

    /// Default tracing filter when `RUST_LOG` is unset. `--verbose` wins over
    /// the configured level.
    pub fn log_directive(&self, verbose: bool) -> String {
        let level = self.general.log_level.trim();
        if verbose {
            "debug".to_string()
        } else if level.is_empty() {
            default_log_level()
        } else {
            level.to_string()
        }
    }
}
