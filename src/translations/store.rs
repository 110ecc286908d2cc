//! Translation store: loads, owns, persists and looks up translations
//!
//! On-disk layout for one language:
//!
//! ```text
//! <root>/index.json                       list of TranslationIndexEntry
//! <root>/<name>/<relative path>.json      one string file per covered mod file
//! ```
//!
//! The base game translation uses the same per-file layout without an index
//! and is never written.

use super::{Translation, TranslationIndexEntry, VANILLA_TRANSLATION_NAME};
use crate::error::{StoreError, StoreResult};
use crate::mods::Mod;
use crate::status::StringStatus;
use crate::strings::{load_strings, save_strings, write_atomic, StringIndex, StringRecord};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use walkdir::WalkDir;

const INDEX_FILE: &str = "index.json";
const STRINGS_EXTENSION: &str = ".json";

/// Change notification emitted when the set of translations changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    TranslationAdded { name: String, files: Vec<PathBuf> },
    TranslationRemoved { name: String, files: Vec<PathBuf> },
}

/// Owner of the base game translation and all user translations
pub struct TranslationStore {
    root: PathBuf,
    vanilla: Option<Translation>,
    translations: Vec<Translation>,
    subscribers: Vec<UnboundedSender<StoreEvent>>,
}

impl TranslationStore {
    /// Empty store persisting below `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            vanilla: None,
            translations: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    /// Load the base game translation and every indexed user translation.
    ///
    /// Malformed index or string files abort loading; translations listed in
    /// the index but missing on disk are skipped.
    pub fn load(root: impl Into<PathBuf>, vanilla_dir: &Path) -> StoreResult<Self> {
        let mut store = Self::new(root);

        if vanilla_dir.is_dir() {
            let mut vanilla = Translation::new(VANILLA_TRANSLATION_NAME);
            vanilla.strings = load_translation_files(vanilla_dir)?;
            tracing::info!(
                "Loaded base game translation with {} string(s)",
                vanilla.string_count()
            );
            store.vanilla = Some(vanilla);
        } else {
            tracing::debug!("No base game translation at {}", vanilla_dir.display());
        }

        let index_path = store.index_path();
        if !index_path.exists() {
            return Ok(store);
        }

        let content =
            std::fs::read_to_string(&index_path).map_err(|e| StoreError::io(&index_path, e))?;
        let entries: Vec<TranslationIndexEntry> =
            serde_json::from_str(&content).map_err(|source| StoreError::Validation {
                path: index_path.clone(),
                source,
            })?;

        for entry in entries {
            let dir = store.translation_dir(&entry.name);
            if !dir.is_dir() {
                tracing::warn!(
                    "Translation '{}' is listed in {} but missing on disk",
                    entry.name,
                    index_path.display()
                );
                continue;
            }

            let mut translation = Translation::from_index_entry(entry);
            translation.strings = load_translation_files(&dir)?;
            translation.recompute_status();
            store.translations.push(translation);
        }

        tracing::info!("Loaded {} translation(s)", store.translations.len());
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Set the base game translation (not persisted)
    pub fn set_vanilla(&mut self, vanilla: Option<Translation>) {
        self.vanilla = vanilla;
    }

    pub fn vanilla(&self) -> Option<&Translation> {
        self.vanilla.as_ref()
    }

    /// User translations in precedence order
    pub fn user_translations(&self) -> &[Translation] {
        &self.translations
    }

    pub fn get(&self, name: &str) -> Option<&Translation> {
        self.translations.iter().find(|t| t.name == name)
    }

    fn get_mut(&mut self, name: &str) -> StoreResult<&mut Translation> {
        if name == VANILLA_TRANSLATION_NAME {
            return Err(StoreError::ReadOnly);
        }
        self.translations
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// Receive add/remove notifications
    pub fn subscribe(&mut self) -> UnboundedReceiver<StoreEvent> {
        let (tx, rx) = unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    fn emit(&mut self, event: StoreEvent) {
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    // ========== Lookups ==========

    /// First user translation covering the mod file at `path`
    pub fn get_translation_by_modfile_path(&self, path: &Path) -> Option<&Translation> {
        self.translations.iter().find(|t| t.covers(path))
    }

    /// Whether the base game translation covers the mod file at `path`
    pub fn vanilla_covers(&self, path: &Path) -> bool {
        self.vanilla
            .as_ref()
            .map(|v| v.covers(path))
            .unwrap_or(false)
    }

    /// Translation targeting a mod: by (mod id, file id), then by mod id,
    /// then by a translation covering the mod's first file name.
    pub fn get_translation_by_mod(&self, m: &Mod) -> Option<&Translation> {
        if let Some(mod_id) = m.mod_id {
            if m.file_id.is_some() {
                if let Some(t) = self.translations.iter().find(|t| {
                    t.original_mod_id == Some(mod_id) && t.original_file_id == m.file_id
                }) {
                    return Some(t);
                }
            }

            if let Some(t) = self
                .translations
                .iter()
                .find(|t| t.original_mod_id == Some(mod_id))
            {
                return Some(t);
            }
        }

        let first = m.modfiles.first()?;
        let file_name = first.file_name();
        self.translations
            .iter()
            .find(|t| t.covers_file_name(&file_name))
    }

    /// Aggregate index of "database strings": every translated string of the
    /// base game translation, then every user string that is not
    /// `TranslationRequired`, in precedence order.
    pub fn database_index(&self) -> StringIndex<'_> {
        let mut index = StringIndex::new();

        if let Some(vanilla) = &self.vanilla {
            index.extend(
                vanilla
                    .strings
                    .values()
                    .flatten()
                    .filter(|s| s.string.is_some()),
            );
        }

        for translation in &self.translations {
            index.extend(
                translation
                    .strings
                    .values()
                    .flatten()
                    .filter(|s| s.string.is_some() && s.status != StringStatus::TranslationRequired),
            );
        }

        index
    }

    // ========== Mutations ==========

    /// Persist and register a new translation
    pub fn add_translation(&mut self, mut translation: Translation) -> StoreResult<()> {
        if translation.name == VANILLA_TRANSLATION_NAME || self.contains(&translation.name) {
            return Err(StoreError::DuplicateName(translation.name));
        }

        let dir = self.translation_dir(&translation.name);
        for (path, strings) in &translation.strings {
            save_strings(&strings_file_path(&dir, path), strings)?;
        }

        translation.recompute_status();
        let event = StoreEvent::TranslationAdded {
            name: translation.name.clone(),
            files: translation.files(),
        };

        tracing::info!(
            "Added translation '{}' covering {} file(s)",
            translation.name,
            translation.strings.len()
        );
        self.translations.push(translation);
        self.write_index()?;
        self.emit(event);

        Ok(())
    }

    /// Delete a translation from the index, then from disk
    pub fn remove_translation(&mut self, name: &str) -> StoreResult<Translation> {
        if name == VANILLA_TRANSLATION_NAME {
            return Err(StoreError::ReadOnly);
        }
        let position = self
            .translations
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        let removed = self.translations.remove(position);
        if let Err(e) = self.write_index() {
            self.translations.insert(position, removed);
            return Err(e);
        }

        let dir = self.translation_dir(name);
        if dir.exists() {
            if let Err(e) = std::fs::remove_dir_all(&dir) {
                tracing::warn!("Failed to delete {}: {}", dir.display(), e);
            }
        }

        tracing::info!("Removed translation '{}'", name);
        self.emit(StoreEvent::TranslationRemoved {
            name: removed.name.clone(),
            files: removed.files(),
        });

        Ok(removed)
    }

    /// Rename a translation and its directory
    pub fn rename_translation(&mut self, old_name: &str, new_name: &str) -> StoreResult<()> {
        let taken = self
            .translations
            .iter()
            .any(|t| t.name != old_name && t.name.eq_ignore_ascii_case(new_name));
        if new_name == VANILLA_TRANSLATION_NAME || taken {
            return Err(StoreError::DuplicateName(new_name.to_string()));
        }

        let old_dir = self.translation_dir(old_name);
        let new_dir = self.translation_dir(new_name);
        let translation = self.get_mut(old_name)?;

        if old_dir.exists() {
            std::fs::rename(&old_dir, &new_dir).map_err(|e| StoreError::io(&old_dir, e))?;
        }
        translation.name = new_name.to_string();

        self.write_index()?;
        tracing::info!("Renamed translation '{}' to '{}'", old_name, new_name);
        Ok(())
    }

    /// Append strings to one covered file and persist it.
    ///
    /// Creates the file entry if the translation does not cover it yet.
    pub fn append_strings(
        &mut self,
        name: &str,
        path: &Path,
        strings: Vec<StringRecord>,
    ) -> StoreResult<()> {
        let translation = self.get_mut(name)?;
        let key = translation
            .file_key(path)
            .cloned()
            .unwrap_or_else(|| path.to_path_buf());

        translation.strings.entry(key.clone()).or_default().extend(strings);
        translation.recompute_status();
        self.save_file(name, &key)
    }

    /// Edit one string's translated text and status, then persist the file
    pub fn set_string(
        &mut self,
        name: &str,
        path: &Path,
        position: usize,
        text: impl Into<String>,
        status: StringStatus,
    ) -> StoreResult<()> {
        let key = {
            let translation = self.get_mut(name)?;
            let key = translation
                .file_key(path)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(format!("{} in '{}'", path.display(), name)))?;
            let string = string_at(translation, &key, position)?;

            if !string.status.can_transition_to(status) {
                return Err(StoreError::InvalidTransition {
                    from: string.status,
                    to: status,
                });
            }
            string.string = Some(text.into());
            string.status = status;
            translation.recompute_status();
            key
        };

        self.save_file(name, &key)
    }

    /// Reset one string to its untranslated state, then persist the file
    pub fn reset_string(&mut self, name: &str, path: &Path, position: usize) -> StoreResult<()> {
        let key = {
            let translation = self.get_mut(name)?;
            let key = translation
                .file_key(path)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(format!("{} in '{}'", path.display(), name)))?;
            string_at(translation, &key, position)?.reset();
            translation.recompute_status();
            key
        };

        self.save_file(name, &key)
    }

    // ========== Persistence ==========

    fn save_file(&self, name: &str, key: &Path) -> StoreResult<()> {
        let translation = self
            .get(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        let strings = translation
            .strings
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default();

        save_strings(&strings_file_path(&self.translation_dir(name), key), strings)
    }

    fn write_index(&self) -> StoreResult<()> {
        let entries: Vec<TranslationIndexEntry> =
            self.translations.iter().map(Translation::index_entry).collect();
        let path = self.index_path();
        let json = serde_json::to_string_pretty(&entries).map_err(|source| {
            StoreError::Validation {
                path: path.clone(),
                source,
            }
        })?;

        write_atomic(&path, json.as_bytes())
    }

    fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    fn translation_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Whether a user translation with this name exists, ignoring case
    pub fn contains(&self, name: &str) -> bool {
        self.translations
            .iter()
            .any(|t| t.name.eq_ignore_ascii_case(name))
    }
}

fn string_at<'a>(
    translation: &'a mut Translation,
    key: &Path,
    position: usize,
) -> StoreResult<&'a mut StringRecord> {
    let name = translation.name.clone();
    translation
        .strings
        .get_mut(key)
        .and_then(|strings| strings.get_mut(position))
        .ok_or_else(|| {
            StoreError::NotFound(format!("string {} of {} in '{}'", position, key.display(), name))
        })
}

fn strings_file_path(dir: &Path, key: &Path) -> PathBuf {
    dir.join(format!("{}{}", key.to_string_lossy(), STRINGS_EXTENSION))
}

/// Load every string file below a translation directory
fn load_translation_files(
    dir: &Path,
) -> StoreResult<std::collections::BTreeMap<PathBuf, Vec<StringRecord>>> {
    let mut files = std::collections::BTreeMap::new();

    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            StoreError::io(path, std::io::Error::other(e.to_string()))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(dir) else {
            continue;
        };
        let relative = relative.to_string_lossy().replace('\\', "/");
        let Some(key) = relative.strip_suffix(STRINGS_EXTENSION) else {
            continue;
        };

        files.insert(PathBuf::from(key), load_strings(entry.path())?);
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mods::ModFile;
    use crate::status::TranslationStatus;
    use crate::translations::TranslationSource;
    use tempfile::TempDir;

    fn string(form_id: &str, original: &str, translated: Option<&str>) -> StringRecord {
        let s = StringRecord::new(Some(form_id), None, "WEAP FULL", original);
        match translated {
            Some(t) => s.with_translation(t, StringStatus::TranslationComplete),
            None => s,
        }
    }

    fn translation(name: &str, file: &str, strings: Vec<StringRecord>) -> Translation {
        let mut t = Translation::new(name);
        t.strings.insert(PathBuf::from(file), strings);
        t
    }

    #[test]
    fn test_add_persists_and_reloads() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("German");

        let mut store = TranslationStore::new(&root);
        let mut t = translation(
            "Weapons - German",
            "Weapons.esp",
            vec![string("1", "Sword", Some("Schwert")), string("2", "Axe", None)],
        );
        t.original_mod_id = Some(42);
        t.source = TranslationSource::NexusMods;
        store.add_translation(t).unwrap();

        assert!(root.join("index.json").exists());
        assert!(root.join("Weapons - German/Weapons.esp.json").exists());

        let reloaded = TranslationStore::load(&root, &dir.path().join("vanilla")).unwrap();
        let t = reloaded.get("Weapons - German").unwrap();
        assert_eq!(t.original_mod_id, Some(42));
        assert_eq!(t.source, TranslationSource::NexusMods);
        assert_eq!(t.strings_for(Path::new("Weapons.esp")).unwrap().len(), 2);
        assert_eq!(t.status, TranslationStatus::TranslationIncomplete);
    }

    #[test]
    fn test_nested_file_keys_round_trip() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("German");

        let mut store = TranslationStore::new(&root);
        store
            .add_translation(translation(
                "Nested",
                "optional/Patch.esl",
                vec![string("1", "Sword", Some("Schwert"))],
            ))
            .unwrap();

        let reloaded = TranslationStore::load(&root, &dir.path().join("vanilla")).unwrap();
        assert_eq!(
            reloaded.get("Nested").unwrap().files(),
            vec![PathBuf::from("optional/Patch.esl")]
        );
    }

    #[test]
    fn test_malformed_index_fails_fast() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("German");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("index.json"), "{ not json").unwrap();

        let result = TranslationStore::load(&root, &dir.path().join("vanilla"));
        assert!(matches!(result, Err(StoreError::Validation { .. })));
    }

    #[test]
    fn test_malformed_string_file_fails_fast() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("German");

        let mut store = TranslationStore::new(&root);
        store
            .add_translation(translation("Broken", "Broken.esp", vec![string("1", "A", None)]))
            .unwrap();
        std::fs::write(root.join("Broken/Broken.esp.json"), "[{]").unwrap();

        let result = TranslationStore::load(&root, &dir.path().join("vanilla"));
        assert!(matches!(result, Err(StoreError::Validation { .. })));
    }

    #[test]
    fn test_missing_translation_dir_is_skipped() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("German");

        let mut store = TranslationStore::new(&root);
        store
            .add_translation(translation("Gone", "Gone.esp", vec![string("1", "A", None)]))
            .unwrap();
        std::fs::remove_dir_all(root.join("Gone")).unwrap();

        let reloaded = TranslationStore::load(&root, &dir.path().join("vanilla")).unwrap();
        assert!(reloaded.user_translations().is_empty());
    }

    #[test]
    fn test_add_remove_emit_events() {
        let dir = TempDir::new().unwrap();
        let mut store = TranslationStore::new(dir.path());
        let mut events = store.subscribe();

        store
            .add_translation(translation("T", "A.esp", vec![string("1", "A", Some("a"))]))
            .unwrap();
        store.remove_translation("T").unwrap();

        assert_eq!(
            events.try_recv().unwrap(),
            StoreEvent::TranslationAdded {
                name: "T".to_string(),
                files: vec![PathBuf::from("A.esp")]
            }
        );
        assert_eq!(
            events.try_recv().unwrap(),
            StoreEvent::TranslationRemoved {
                name: "T".to_string(),
                files: vec![PathBuf::from("A.esp")]
            }
        );
        assert!(events.try_recv().is_err());
        assert!(!dir.path().join("T").exists());
    }

    #[test]
    fn test_duplicate_and_missing_names() {
        let dir = TempDir::new().unwrap();
        let mut store = TranslationStore::new(dir.path());
        store
            .add_translation(translation("T", "A.esp", vec![]))
            .unwrap();

        assert!(matches!(
            store.add_translation(translation("t", "B.esp", vec![])),
            Err(StoreError::DuplicateName(_))
        ));
        assert!(matches!(
            store.remove_translation("missing"),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.remove_translation(VANILLA_TRANSLATION_NAME),
            Err(StoreError::ReadOnly)
        ));
    }

    #[test]
    fn test_rename_rewrites_index() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("German");
        let mut store = TranslationStore::new(&root);
        store
            .add_translation(translation("Old", "A.esp", vec![string("1", "A", Some("a"))]))
            .unwrap();

        store.rename_translation("Old", "New").unwrap();
        assert!(root.join("New/A.esp.json").exists());
        assert!(!root.join("Old").exists());

        let reloaded = TranslationStore::load(&root, &dir.path().join("vanilla")).unwrap();
        assert!(reloaded.get("New").is_some());
        assert!(reloaded.get("Old").is_none());
    }

    #[test]
    fn test_rename_changing_only_case() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("German");
        let mut store = TranslationStore::new(&root);
        store
            .add_translation(translation("weapons", "A.esp", vec![string("1", "A", Some("a"))]))
            .unwrap();
        store
            .add_translation(translation("Armor", "B.esp", vec![]))
            .unwrap();

        store.rename_translation("weapons", "Weapons").unwrap();
        assert!(store.get("Weapons").is_some());
        assert!(root.join("Weapons/A.esp.json").exists());

        assert!(matches!(
            store.rename_translation("Weapons", "armor"),
            Err(StoreError::DuplicateName(_))
        ));
    }

    #[test]
    fn test_remove_keeps_translation_when_index_write_fails() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("German");
        let mut store = TranslationStore::new(&root);
        store
            .add_translation(translation("T", "A.esp", vec![string("1", "A", Some("a"))]))
            .unwrap();
        let mut events = store.subscribe();

        // A directory in place of index.json makes the rewrite fail
        let index = root.join("index.json");
        std::fs::remove_file(&index).unwrap();
        std::fs::create_dir_all(index.join("blocked")).unwrap();

        assert!(store.remove_translation("T").is_err());
        assert!(store.get("T").is_some());
        assert!(root.join("T/A.esp.json").exists());
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_set_and_reset_string_persist() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("German");
        let mut store = TranslationStore::new(&root);
        store
            .add_translation(translation("T", "A.esp", vec![string("1", "Sword", None)]))
            .unwrap();

        store
            .set_string("T", Path::new("a.esp"), 0, "Schwert", StringStatus::TranslationComplete)
            .unwrap();
        let reloaded = TranslationStore::load(&root, &dir.path().join("vanilla")).unwrap();
        let s = &reloaded.get("T").unwrap().strings_for(Path::new("A.esp")).unwrap()[0];
        assert_eq!(s.string.as_deref(), Some("Schwert"));
        assert_eq!(s.status, StringStatus::TranslationComplete);

        // Going back to required is only possible through a reset
        assert!(matches!(
            store.set_string("T", Path::new("A.esp"), 0, "x", StringStatus::TranslationRequired),
            Err(StoreError::InvalidTransition { .. })
        ));

        store.reset_string("T", Path::new("A.esp"), 0).unwrap();
        let t = store.get("T").unwrap();
        assert_eq!(t.status, TranslationStatus::TranslationIncomplete);
        let s = &t.strings_for(Path::new("A.esp")).unwrap()[0];
        assert_eq!(s.string.as_deref(), Some("Sword"));
        assert_eq!(s.status, StringStatus::TranslationRequired);
    }

    #[test]
    fn test_lookup_by_modfile_path_uses_precedence() {
        let dir = TempDir::new().unwrap();
        let mut store = TranslationStore::new(dir.path());
        store
            .add_translation(translation("First", "Shared.esp", vec![]))
            .unwrap();
        store
            .add_translation(translation("Second", "Shared.esp", vec![]))
            .unwrap();

        let found = store
            .get_translation_by_modfile_path(Path::new("SHARED.esp"))
            .unwrap();
        assert_eq!(found.name, "First");
        assert!(store
            .get_translation_by_modfile_path(Path::new("Other.esp"))
            .is_none());
    }

    #[test]
    fn test_vanilla_is_checked_separately() {
        let dir = TempDir::new().unwrap();
        let mut store = TranslationStore::new(dir.path());
        store.set_vanilla(Some(translation(
            VANILLA_TRANSLATION_NAME,
            "Skyrim.esm",
            vec![string("1", "Iron Sword", Some("Eisenschwert"))],
        )));

        assert!(store.vanilla_covers(Path::new("skyrim.esm")));
        assert!(store
            .get_translation_by_modfile_path(Path::new("Skyrim.esm"))
            .is_none());
    }

    #[test]
    fn test_lookup_by_mod_identity() {
        let dir = TempDir::new().unwrap();
        let mut store = TranslationStore::new(dir.path());

        let mut by_mod = translation("By mod id", "X.esp", vec![]);
        by_mod.original_mod_id = Some(10);
        let mut by_file = translation("By file id", "Y.esp", vec![]);
        by_file.original_mod_id = Some(10);
        by_file.original_file_id = Some(99);
        store.add_translation(by_mod).unwrap();
        store.add_translation(by_file).unwrap();
        store
            .add_translation(translation("By name", "Named.esp", vec![]))
            .unwrap();

        let mut m = Mod::new("Mod", "/mods/Mod");
        m.mod_id = Some(10);
        m.file_id = Some(99);
        assert_eq!(store.get_translation_by_mod(&m).unwrap().name, "By file id");

        m.file_id = Some(1);
        assert_eq!(store.get_translation_by_mod(&m).unwrap().name, "By mod id");

        let mut unnamed = Mod::new("Other", "/mods/Other");
        unnamed.modfiles.push(ModFile::new("named.esp"));
        assert_eq!(store.get_translation_by_mod(&unnamed).unwrap().name, "By name");

        let nothing = Mod::new("Empty", "/mods/Empty");
        assert!(store.get_translation_by_mod(&nothing).is_none());
    }

    #[test]
    fn test_database_index_excludes_required_user_strings() {
        let dir = TempDir::new().unwrap();
        let mut store = TranslationStore::new(dir.path());
        store.set_vanilla(Some(translation(
            VANILLA_TRANSLATION_NAME,
            "Skyrim.esm",
            vec![string("1|Skyrim.esm", "Iron Sword", Some("Eisenschwert"))],
        )));

        let pending = string("2|Mod.esp", "Pending", None).with_translation(
            "Pending",
            StringStatus::TranslationRequired,
        );
        store
            .add_translation(translation(
                "User",
                "Mod.esp",
                vec![string("3|Mod.esp", "Steel Sword", Some("Stahlschwert")), pending],
            ))
            .unwrap();

        let index = store.database_index();
        assert!(index.find_by_original("Iron Sword").is_some());
        assert!(index.find_by_original("Steel Sword").is_some());
        assert!(index.find_by_original("Pending").is_none());
    }

    #[test]
    fn test_append_strings_creates_file_entry() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("German");
        let mut store = TranslationStore::new(&root);
        store
            .add_translation(translation("T", "A.esp", vec![string("1", "A", Some("a"))]))
            .unwrap();

        store
            .append_strings("T", Path::new("B.esp"), vec![string("2", "B", None)])
            .unwrap();

        assert!(root.join("T/B.esp.json").exists());
        assert_eq!(store.get("T").unwrap().files().len(), 2);
    }
}
