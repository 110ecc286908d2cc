//! Translation lifecycle operations on top of the store

use super::{Translation, TranslationSource, TranslationStore};
use crate::mods::Mod;
use crate::scanner::StringExtractor;
use crate::status::{StringStatus, TranslationStatus};
use crate::strings::{map_strings_with_index, StringRecord};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Creates, renames and deletes user translations
pub struct DatabaseService {
    store: Arc<RwLock<TranslationStore>>,
    extractor: Arc<dyn StringExtractor>,
    language: String,
}

impl DatabaseService {
    pub fn new(
        store: Arc<RwLock<TranslationStore>>,
        extractor: Arc<dyn StringExtractor>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            store,
            extractor,
            language: language.into(),
        }
    }

    pub fn store(&self) -> &Arc<RwLock<TranslationStore>> {
        &self.store
    }

    /// Build a translation for `m` from database strings.
    ///
    /// Covers every mod file whose status is `TranslationAvailableInDatabase`.
    /// With `only_complete_coverage`, files with any string the database
    /// cannot resolve are left out. Returns the new translation's name, or
    /// `None` when no file qualified.
    pub async fn create_translation_for_mod(
        &self,
        m: &Mod,
        only_complete_coverage: bool,
    ) -> Result<Option<String>> {
        let mut originals: Vec<(PathBuf, Vec<StringRecord>)> = Vec::new();
        for modfile in m
            .modfiles
            .iter()
            .filter(|f| f.status == TranslationStatus::TranslationAvailableInDatabase)
        {
            let path = m.file_path(modfile);
            match self.extractor.extract(&path) {
                Ok(strings) => originals.push((modfile.path.clone(), strings)),
                Err(e) => tracing::warn!(
                    "Skipping {} of '{}': {:#}",
                    modfile.path.display(),
                    m.name,
                    e
                ),
            }
        }

        let mut store = self.store.write().await;

        let strings: BTreeMap<PathBuf, Vec<StringRecord>> = {
            let database = store.database_index();
            originals
                .iter()
                .filter_map(|(path, original)| {
                    let merged = map_strings_with_index(original, &database);
                    let complete = merged
                        .iter()
                        .all(|s| s.status != StringStatus::TranslationRequired);

                    if only_complete_coverage && !complete {
                        tracing::debug!(
                            "Leaving out partially covered {} of '{}'",
                            path.display(),
                            m.name
                        );
                        return None;
                    }
                    Some((path.clone(), merged))
                })
                .collect()
        };

        if strings.is_empty() {
            tracing::info!("No database strings cover '{}'", m.name);
            return Ok(None);
        }

        let name = unique_name(&store, &format!("{} - {}", m.name, self.language));
        let mut translation = Translation::new(&name);
        translation.original_mod_id = m.mod_id;
        translation.original_file_id = m.file_id;
        translation.original_version = m.version.clone();
        translation.source = TranslationSource::Local;
        translation.timestamp = Some(chrono::Utc::now().timestamp());
        translation.strings = strings;

        store
            .add_translation(translation)
            .with_context(|| format!("Failed to create translation '{}'", name))?;

        Ok(Some(name))
    }

    pub async fn delete_translation(&self, name: &str) -> Result<()> {
        self.store
            .write()
            .await
            .remove_translation(name)
            .with_context(|| format!("Failed to delete translation '{}'", name))?;
        Ok(())
    }

    pub async fn rename_translation(&self, old_name: &str, new_name: &str) -> Result<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            anyhow::bail!("Translation name cannot be empty");
        }

        self.store
            .write()
            .await
            .rename_translation(old_name, new_name)
            .with_context(|| format!("Failed to rename translation '{}'", old_name))
    }
}

/// `base`, or `base (n)` with the first free n
fn unique_name(store: &TranslationStore, base: &str) -> String {
    if !store.contains(base) {
        return base.to_string();
    }

    (2..)
        .map(|n| format!("{} ({})", base, n))
        .find(|name| !store.contains(name))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mods::ModFile;
    use crate::scanner::MockStringExtractor;
    use crate::translations::{StoreEvent, VANILLA_TRANSLATION_NAME};
    use std::path::Path;
    use tempfile::TempDir;

    fn record(form_id: &str, original: &str) -> StringRecord {
        StringRecord::new(Some(form_id), None, "WEAP FULL", original)
    }

    fn store_with_vanilla(root: &Path) -> TranslationStore {
        let mut store = TranslationStore::new(root);
        let mut vanilla = Translation::new(VANILLA_TRANSLATION_NAME);
        vanilla.strings.insert(
            PathBuf::from("Skyrim.esm"),
            vec![
                record("A|Skyrim.esm", "Iron Sword")
                    .with_translation("Eisenschwert", StringStatus::TranslationComplete),
                record("B|Skyrim.esm", "Steel Sword")
                    .with_translation("Stahlschwert", StringStatus::TranslationComplete),
            ],
        );
        store.set_vanilla(Some(vanilla));
        store
    }

    fn weapons_mod() -> Mod {
        let mut m = Mod::new("Weapons", "/mods/Weapons");
        m.mod_id = Some(100);
        m.file_id = Some(200);
        m.version = "1.0".to_string();

        let mut full = ModFile::new("Full.esp");
        full.status = TranslationStatus::TranslationAvailableInDatabase;
        let mut partial = ModFile::new("Partial.esp");
        partial.status = TranslationStatus::TranslationAvailableInDatabase;
        let mut other = ModFile::new("Other.esp");
        other.status = TranslationStatus::RequiresTranslation;

        m.modfiles = vec![full, partial, other];
        m
    }

    fn extractor() -> MockStringExtractor {
        let mut extractor = MockStringExtractor::new();
        extractor.expect_extract().returning(|path: &Path| {
            if path.ends_with("Full.esp") {
                Ok(vec![record("1|Full.esp", "Iron Sword")])
            } else {
                Ok(vec![
                    record("1|Partial.esp", "Steel Sword"),
                    record("2|Partial.esp", "Unknown Blade"),
                ])
            }
        });
        extractor
    }

    fn service(store: TranslationStore) -> (DatabaseService, Arc<RwLock<TranslationStore>>) {
        let store = Arc::new(RwLock::new(store));
        let service = DatabaseService::new(store.clone(), Arc::new(extractor()), "German");
        (service, store)
    }

    #[tokio::test]
    async fn test_create_translation_for_mod() {
        let dir = TempDir::new().unwrap();
        let (service, store) = service(store_with_vanilla(dir.path()));

        let name = service
            .create_translation_for_mod(&weapons_mod(), false)
            .await
            .unwrap();
        assert_eq!(name.as_deref(), Some("Weapons - German"));

        let store = store.read().await;
        let t = store.get("Weapons - German").unwrap();
        assert_eq!(t.original_mod_id, Some(100));
        assert_eq!(t.original_file_id, Some(200));
        assert_eq!(t.original_version, "1.0");
        assert_eq!(t.source, TranslationSource::Local);
        assert!(t.timestamp.is_some());
        assert_eq!(
            t.files(),
            vec![PathBuf::from("Full.esp"), PathBuf::from("Partial.esp")]
        );

        let full = t.strings_for(Path::new("Full.esp")).unwrap();
        assert_eq!(full[0].string.as_deref(), Some("Eisenschwert"));
        assert_eq!(full[0].status, StringStatus::TranslationComplete);

        let partial = t.strings_for(Path::new("Partial.esp")).unwrap();
        assert_eq!(partial[1].status, StringStatus::TranslationRequired);
        assert_eq!(t.status, TranslationStatus::TranslationIncomplete);
    }

    #[tokio::test]
    async fn test_only_complete_coverage_changes_file_set() {
        let dir = TempDir::new().unwrap();
        let (service, store) = service(store_with_vanilla(dir.path()));

        service
            .create_translation_for_mod(&weapons_mod(), true)
            .await
            .unwrap();

        let store = store.read().await;
        let t = store.get("Weapons - German").unwrap();
        assert_eq!(t.files(), vec![PathBuf::from("Full.esp")]);
        assert_eq!(
            t.strings_for(Path::new("Full.esp")).unwrap()[0].string.as_deref(),
            Some("Eisenschwert")
        );
    }

    #[tokio::test]
    async fn test_create_emits_event_and_avoids_name_clash() {
        let dir = TempDir::new().unwrap();
        let mut store = store_with_vanilla(dir.path());
        store
            .add_translation(Translation::new("Weapons - German"))
            .unwrap();
        let mut events = store.subscribe();
        let (service, _) = service(store);

        let name = service
            .create_translation_for_mod(&weapons_mod(), false)
            .await
            .unwrap();
        assert_eq!(name.as_deref(), Some("Weapons - German (2)"));

        match events.try_recv().unwrap() {
            StoreEvent::TranslationAdded { name, files } => {
                assert_eq!(name, "Weapons - German (2)");
                assert_eq!(files.len(), 2);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_nothing_to_create() {
        let dir = TempDir::new().unwrap();
        let (service, store) = service(store_with_vanilla(dir.path()));

        let mut m = weapons_mod();
        for f in &mut m.modfiles {
            f.status = TranslationStatus::RequiresTranslation;
        }

        assert_eq!(service.create_translation_for_mod(&m, false).await.unwrap(), None);
        assert!(store.read().await.user_translations().is_empty());
    }

    #[tokio::test]
    async fn test_rename_and_delete() {
        let dir = TempDir::new().unwrap();
        let (service, store) = service(store_with_vanilla(dir.path()));
        service
            .create_translation_for_mod(&weapons_mod(), false)
            .await
            .unwrap();

        assert!(service.rename_translation("Weapons - German", "  ").await.is_err());
        service
            .rename_translation("Weapons - German", "Waffen")
            .await
            .unwrap();
        assert!(store.read().await.get("Waffen").is_some());

        service.delete_translation("Waffen").await.unwrap();
        assert!(store.read().await.user_translations().is_empty());
        assert!(service.delete_translation("Waffen").await.is_err());
    }
}
