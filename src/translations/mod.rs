//! Translations: named, persisted bundles of translated strings
//!
//! A [`Translation`] covers one or more mod files, keyed by their path
//! relative to the mod root. The [`TranslationStore`] owns every loaded
//! translation and is the only place they are mutated and persisted.

mod database;
mod store;

pub use database::*;
pub use store::*;

use crate::mods::normalize_relative_path;
use crate::status::TranslationStatus;
use crate::strings::StringRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name under which the bundled base game translation is loaded
pub const VANILLA_TRANSLATION_NAME: &str = "Base Game";

/// Where a translation came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TranslationSource {
    /// Built locally (e.g. from database strings)
    #[default]
    Local,
    NexusMods,
    Confrerie,
}

impl TranslationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationSource::Local => "Local",
            TranslationSource::NexusMods => "NexusMods",
            TranslationSource::Confrerie => "Confrerie",
        }
    }
}

/// One entry of a translations `index.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationIndexEntry {
    pub name: String,
    #[serde(default)]
    pub mod_id: Option<u64>,
    #[serde(default)]
    pub file_id: Option<u64>,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub original_mod_id: Option<u64>,
    #[serde(default)]
    pub original_file_id: Option<u64>,
    #[serde(default)]
    pub original_version: String,
    #[serde(default)]
    pub source: TranslationSource,
    /// Unix timestamp of creation or installation
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// A named bundle of strings covering one or more mod files
#[derive(Debug, Clone)]
pub struct Translation {
    pub name: String,

    /// External id of the translation itself
    pub mod_id: Option<u64>,
    pub file_id: Option<u64>,
    pub version: String,

    /// The mod this translation targets
    pub original_mod_id: Option<u64>,
    pub original_file_id: Option<u64>,
    pub original_version: String,

    pub source: TranslationSource,
    pub timestamp: Option<i64>,

    /// Strings per covered mod file (path relative to the mod root)
    pub strings: BTreeMap<PathBuf, Vec<StringRecord>>,

    /// Installation state, recomputed after deep scans
    pub status: TranslationStatus,
}

impl Translation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mod_id: None,
            file_id: None,
            version: String::new(),
            original_mod_id: None,
            original_file_id: None,
            original_version: String::new(),
            source: TranslationSource::Local,
            timestamp: None,
            strings: BTreeMap::new(),
            status: TranslationStatus::TranslationInstalled,
        }
    }

    pub fn from_index_entry(entry: TranslationIndexEntry) -> Self {
        Self {
            name: entry.name,
            mod_id: entry.mod_id,
            file_id: entry.file_id,
            version: entry.version,
            original_mod_id: entry.original_mod_id,
            original_file_id: entry.original_file_id,
            original_version: entry.original_version,
            source: entry.source,
            timestamp: entry.timestamp,
            strings: BTreeMap::new(),
            status: TranslationStatus::TranslationInstalled,
        }
    }

    pub fn index_entry(&self) -> TranslationIndexEntry {
        TranslationIndexEntry {
            name: self.name.clone(),
            mod_id: self.mod_id,
            file_id: self.file_id,
            version: self.version.clone(),
            original_mod_id: self.original_mod_id,
            original_file_id: self.original_file_id,
            original_version: self.original_version.clone(),
            source: self.source,
            timestamp: self.timestamp,
        }
    }

    /// Covered mod files, in key order
    pub fn files(&self) -> Vec<PathBuf> {
        self.strings.keys().cloned().collect()
    }

    /// Stored key matching `path`, ignoring case and separator style
    pub fn file_key(&self, path: &Path) -> Option<&PathBuf> {
        let wanted = normalize_relative_path(path);
        self.strings
            .keys()
            .find(|k| normalize_relative_path(k) == wanted)
    }

    pub fn covers(&self, path: &Path) -> bool {
        self.file_key(path).is_some()
    }

    pub fn strings_for(&self, path: &Path) -> Option<&[StringRecord]> {
        let key = self.file_key(path)?;
        self.strings.get(key).map(Vec::as_slice)
    }

    /// Whether the translation covers a file with this name in any directory
    pub fn covers_file_name(&self, file_name: &str) -> bool {
        let wanted = file_name.to_lowercase();
        self.strings.keys().any(|k| {
            k.file_name()
                .map(|n| n.to_string_lossy().to_lowercase() == wanted)
                .unwrap_or(false)
        })
    }

    pub fn string_count(&self) -> usize {
        self.strings.values().map(Vec::len).sum()
    }

    /// Status of one covered file: incomplete while any string needs work
    pub fn file_status(&self, path: &Path) -> Option<TranslationStatus> {
        let strings = self.strings_for(path)?;
        Some(status_of_strings(strings))
    }

    /// Recompute the installation status from the current strings
    pub fn recompute_status(&mut self) -> TranslationStatus {
        self.status = TranslationStatus::rollup(
            self.strings.values().map(|strings| status_of_strings(strings)),
        )
        .max(TranslationStatus::TranslationInstalled);
        self.status
    }
}

fn status_of_strings(strings: &[StringRecord]) -> TranslationStatus {
    if strings.iter().any(|s| s.status.needs_translation()) {
        TranslationStatus::TranslationIncomplete
    } else {
        TranslationStatus::TranslationInstalled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StringStatus;

    fn translation() -> Translation {
        let mut t = Translation::new("Obsidian Weathers - German");
        t.strings.insert(
            PathBuf::from("Obsidian Weathers.esp"),
            vec![StringRecord::new(Some("1"), None, "SPEL FULL", "Options")
                .with_translation("Optionen", StringStatus::TranslationComplete)],
        );
        t
    }

    #[test]
    fn test_file_lookup_is_case_insensitive() {
        let t = translation();
        assert!(t.covers(Path::new("obsidian weathers.ESP")));
        assert!(t.covers_file_name("OBSIDIAN WEATHERS.esp"));
        assert!(!t.covers(Path::new("Other.esp")));
    }

    #[test]
    fn test_recompute_status() {
        let mut t = translation();
        assert_eq!(t.recompute_status(), TranslationStatus::TranslationInstalled);

        t.strings
            .get_mut(Path::new("Obsidian Weathers.esp"))
            .unwrap()
            .push(StringRecord::new(Some("2"), None, "SPEL DESC", "New"));
        assert_eq!(t.recompute_status(), TranslationStatus::TranslationIncomplete);
        assert_eq!(
            t.file_status(Path::new("Obsidian Weathers.esp")),
            Some(TranslationStatus::TranslationIncomplete)
        );
    }

    #[test]
    fn test_index_entry_round_trip() {
        let mut t = translation();
        t.mod_id = Some(1);
        t.original_mod_id = Some(52442);
        t.source = TranslationSource::NexusMods;

        let entry = t.index_entry();
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: TranslationIndexEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);

        let rebuilt = Translation::from_index_entry(parsed);
        assert_eq!(rebuilt.original_mod_id, Some(52442));
        assert_eq!(rebuilt.source, TranslationSource::NexusMods);
    }
}
