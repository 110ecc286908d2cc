//! Configuration management for ModTranslate
//!
//! Uses XDG-compliant paths:
//! - Config: ~/.config/modtranslate/config.toml
//! - Data: ~/.local/share/modtranslate/
//! - Cache: ~/.cache/modtranslate/

mod paths;

pub use paths::Paths;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target language (e.g., "German"); selects translation and masterlist directories
    pub language: String,

    /// Mod manager mods directory (one sub-directory per mod)
    pub mods_dir: Option<String>,

    /// Directory of pre-extracted plugin string dumps
    pub dumps_dir: Option<String>,

    /// Plugin file names to exclude from scans, in addition to the masterlist
    pub ignore_list: Vec<String>,

    /// Base URL the per-language masterlist is fetched from
    pub masterlist_url: Option<String>,

    /// Only include fully covered files when building database translations
    pub only_complete_coverage: bool,

    /// Paths configuration
    #[serde(skip)]
    pub paths: Paths,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "German".to_string(),
            mods_dir: None,
            dumps_dir: None,
            ignore_list: Vec::new(),
            masterlist_url: None,
            only_complete_coverage: false,
            paths: Paths::new(),
        }
    }
}

impl Config {
    /// Resolve the mods directory (override or `<data>/mods`)
    pub fn mods_dir(&self) -> PathBuf {
        self.mods_dir
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.paths.data_dir().join("mods"))
    }

    /// Resolve the string dumps directory (override or `<data>/dumps`)
    pub fn dumps_dir(&self) -> PathBuf {
        self.dumps_dir
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.paths.data_dir().join("dumps"))
    }

    /// User translations directory for the configured language
    pub fn translations_dir(&self) -> PathBuf {
        self.paths.language_translations_dir(&self.language)
    }

    /// Base game translation directory for the configured language
    pub fn vanilla_dir(&self) -> PathBuf {
        self.paths.vanilla_translation_dir(&self.language)
    }

    /// Ensure required directories exist
    pub fn ensure_dirs(&self) -> Result<()> {
        self.paths
            .ensure_dirs()
            .context("Failed to create default application directories")?;
        std::fs::create_dir_all(self.translations_dir())
            .context("Failed to create translations directory")?;
        Ok(())
    }

    /// Load configuration from disk or create default
    pub async fn load() -> Result<Self> {
        Self::load_with_paths(Paths::new()).await
    }

    /// Load configuration using an explicit path layout
    pub async fn load_with_paths(paths: Paths) -> Result<Self> {
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .await
                .context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")?
        } else {
            // Create default config
            let config = Config {
                paths: paths.clone(),
                ..Config::default()
            };
            config.save().await?;
            config
        };

        config.paths = paths;
        Ok(config)
    }

    /// Save configuration to disk
    pub async fn save(&self) -> Result<()> {
        let config_path = self.paths.config_file();

        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, content)
            .await
            .context("Failed to write config file")?;

        Ok(())
    }
}
