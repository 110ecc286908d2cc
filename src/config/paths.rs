//! XDG-compliant path management

use directories::ProjectDirs;
use std::path::PathBuf;

/// Manages all application paths using XDG base directory specification
#[derive(Debug, Clone)]
pub struct Paths {
    config_dir: PathBuf,
    data_dir: PathBuf,
    cache_dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    /// Create a new Paths instance
    pub fn new() -> Self {
        let dirs = ProjectDirs::from("", "", "modtranslate")
            .expect("Failed to determine project directories");
        Self {
            config_dir: dirs.config_dir().to_path_buf(),
            data_dir: dirs.data_dir().to_path_buf(),
            cache_dir: dirs.cache_dir().to_path_buf(),
        }
    }

    /// Root every directory below `root` (portable installs and tests)
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_dir: root.join("config"),
            data_dir: root.join("data"),
            cache_dir: root.join("cache"),
        }
    }

    // ========== Config Paths ==========

    /// Config directory: ~/.config/modtranslate/
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Main config file: ~/.config/modtranslate/config.toml
    pub fn config_file(&self) -> PathBuf {
        self.config_dir().join("config.toml")
    }

    // ========== Data Paths ==========

    /// Data directory: ~/.local/share/modtranslate/
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }

    /// State database (checkbox cache): ~/.local/share/modtranslate/state.db
    pub fn database_file(&self) -> PathBuf {
        self.data_dir().join("state.db")
    }

    /// Log file: ~/.local/share/modtranslate/modtranslate.log
    pub fn log_file(&self) -> PathBuf {
        self.data_dir().join("modtranslate.log")
    }

    /// User translations root: ~/.local/share/modtranslate/translations/
    pub fn translations_dir(&self) -> PathBuf {
        self.data_dir().join("translations")
    }

    /// User translations for one language
    pub fn language_translations_dir(&self, language: &str) -> PathBuf {
        self.translations_dir().join(language)
    }

    /// Bundled base game translation for one language
    pub fn vanilla_translation_dir(&self, language: &str) -> PathBuf {
        self.data_dir().join("vanilla").join(language)
    }

    // ========== Cache Paths ==========

    /// Cache directory: ~/.cache/modtranslate/
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone()
    }

    /// Masterlist cache: ~/.cache/modtranslate/masterlist/
    pub fn masterlist_cache_dir(&self) -> PathBuf {
        self.cache_dir().join("masterlist")
    }

    /// Cached masterlist for one language
    pub fn masterlist_file(&self, language: &str) -> PathBuf {
        self.masterlist_cache_dir()
            .join(format!("{}.json", language.to_lowercase()))
    }

    // ========== Utility Methods ==========

    /// Ensure all required directories exist
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.config_dir())?;
        std::fs::create_dir_all(self.data_dir())?;
        std::fs::create_dir_all(self.translations_dir())?;
        std::fs::create_dir_all(self.cache_dir())?;
        std::fs::create_dir_all(self.masterlist_cache_dir())?;
        Ok(())
    }
}
