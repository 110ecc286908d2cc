//! Installed mods and their translatable files

mod loader;

pub use loader::*;

use crate::status::TranslationStatus;
use std::path::{Path, PathBuf};

/// Plugin file types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginType {
    /// Master file (.esm)
    Master,
    /// Plugin file (.esp)
    Plugin,
    /// Light plugin (.esl)
    Light,
}

impl PluginType {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "esm" => Some(Self::Master),
            "esp" => Some(Self::Plugin),
            "esl" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// One translatable file inside a mod
///
/// `status` is derived at runtime by scans and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModFile {
    /// Path relative to the mod root
    pub path: PathBuf,
    pub status: TranslationStatus,
}

impl ModFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            status: TranslationStatus::NoneStatus,
        }
    }

    /// File name without directories, as used by masterlist and ignore rules
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Identifies a mod file across mods
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModFileId {
    pub mod_name: String,
    pub path: PathBuf,
}

impl ModFileId {
    pub fn new(mod_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            mod_name: mod_name.into(),
            path: path.into(),
        }
    }
}

/// An installed mod
#[derive(Debug, Clone)]
pub struct Mod {
    pub name: String,

    /// Absolute path to the mod root
    pub path: PathBuf,

    /// External (Nexus Mods) mod id, if known
    pub mod_id: Option<u64>,

    /// External file id of the installed archive, if known
    pub file_id: Option<u64>,

    pub version: String,

    pub modfiles: Vec<ModFile>,
}

impl Mod {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            mod_id: None,
            file_id: None,
            version: String::new(),
            modfiles: Vec::new(),
        }
    }

    /// Aggregate status: the most actionable status of any file
    pub fn status(&self) -> TranslationStatus {
        TranslationStatus::rollup(self.modfiles.iter().map(|f| f.status))
    }

    /// Absolute path of one of this mod's files
    pub fn file_path(&self, modfile: &ModFile) -> PathBuf {
        self.path.join(&modfile.path)
    }

    pub fn modfile_id(&self, modfile: &ModFile) -> ModFileId {
        ModFileId::new(&self.name, &modfile.path)
    }

    /// Find a file by relative path, ignoring case and separator style
    pub fn find_modfile(&self, path: &Path) -> Option<&ModFile> {
        let wanted = normalize_relative_path(path);
        self.modfiles
            .iter()
            .find(|f| normalize_relative_path(&f.path) == wanted)
    }

    pub fn find_modfile_mut(&mut self, path: &Path) -> Option<&mut ModFile> {
        let wanted = normalize_relative_path(path);
        self.modfiles
            .iter_mut()
            .find(|f| normalize_relative_path(&f.path) == wanted)
    }
}

/// Case-insensitive, forward-slash form of a relative path
pub fn normalize_relative_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").to_lowercase()
}
