//! Scans that classify mod files by translation status
//!
//! - basic scan: per mod file, from extracted strings and the local store
//! - online scan: refines `RequiresTranslation` files via masterlist routes
//!   and the online provider
//! - deep scan: re-validates installed translations against the current
//!   plugin strings and appends strings that appeared since
//!
//! A failure on one file or mod is logged and that unit is left out of the
//! result; it never aborts the batch.

mod collaborators;
mod detect;
mod extract;

pub use collaborators::*;
pub use detect::StopwordDetector;
pub use extract::{mark_untranslatable, DumpExtractor};

use crate::masterlist::Masterlist;
use crate::mods::{Mod, ModFile, ModFileId};
use crate::status::{StringStatus, TranslationStatus};
use crate::strings::{StringIndex, StringRecord};
use crate::translations::{Translation, TranslationStore};
use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Distinct strings combined into one language-detection sample
pub const LANGUAGE_SAMPLE_SIZE: usize = 19;

/// Status per scanned mod file
pub type ScanResult = BTreeMap<ModFileId, TranslationStatus>;

/// Runs scans over mods against the shared translation store
pub struct Scanner {
    store: Arc<RwLock<TranslationStore>>,
    extractor: Arc<dyn StringExtractor>,
    detector: Arc<dyn LanguageDetector>,
    provider: Arc<dyn TranslationProvider>,
    masterlist: Masterlist,
    ignore_list: Vec<String>,
    language: String,
}

impl Scanner {
    pub fn new(
        store: Arc<RwLock<TranslationStore>>,
        extractor: Arc<dyn StringExtractor>,
        detector: Arc<dyn LanguageDetector>,
        provider: Arc<dyn TranslationProvider>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            store,
            extractor,
            detector,
            provider,
            masterlist: Masterlist::new(),
            ignore_list: Vec::new(),
            language: language.into(),
        }
    }

    pub fn with_masterlist(mut self, masterlist: Masterlist) -> Self {
        self.masterlist = masterlist;
        self
    }

    pub fn with_ignore_list(mut self, ignore_list: Vec<String>) -> Self {
        self.ignore_list = ignore_list;
        self
    }

    pub fn set_masterlist(&mut self, masterlist: Masterlist) {
        self.masterlist = masterlist;
    }

    pub fn masterlist(&self) -> &Masterlist {
        &self.masterlist
    }

    fn is_routed(&self, modfile: &ModFile) -> bool {
        self.masterlist
            .route(&modfile.file_name())
            .is_some_and(|targets| !targets.is_empty())
    }

    fn is_ignored(&self, modfile: &ModFile) -> bool {
        self.masterlist
            .is_ignored(&modfile.file_name(), &self.ignore_list)
    }

    /// Basic scan, optionally followed by an online scan
    pub async fn run_scan(
        &self,
        mods: &[Mod],
        online: bool,
        progress: &dyn ProgressSink,
    ) -> ScanResult {
        let mut result = self.basic_scan(mods, progress).await;
        if online {
            self.online_scan(mods, &mut result, progress).await;
        }
        result
    }

    // ========== Basic scan ==========

    /// Classify every non-ignored mod file from its strings and the store
    pub async fn basic_scan(&self, mods: &[Mod], progress: &dyn ProgressSink) -> ScanResult {
        let store = self.store.read().await;
        let database = store.database_index();
        let mut result = ScanResult::new();

        let files: Vec<(&Mod, &ModFile)> = mods
            .iter()
            .flat_map(|m| m.modfiles.iter().map(move |f| (m, f)))
            .filter(|(_, f)| {
                let ignored = self.is_ignored(f);
                if ignored {
                    tracing::debug!("Ignoring {}", f.file_name());
                }
                !ignored
            })
            .collect();

        progress.start(files.len(), "Scanning mod files");
        for (m, modfile) in files {
            progress.advance(&modfile.file_name());

            match self.scan_modfile(m, modfile, &store, &database) {
                Ok(status) => {
                    tracing::debug!(
                        "{} / {}: {}",
                        m.name,
                        modfile.path.display(),
                        status.as_str()
                    );
                    result.insert(m.modfile_id(modfile), status);
                }
                Err(e) => tracing::warn!(
                    "Failed to scan {} in '{}': {:#}",
                    modfile.path.display(),
                    m.name,
                    e
                ),
            }
        }
        progress.finish();

        log_summary("Basic scan", &result);
        result
    }

    fn scan_modfile(
        &self,
        m: &Mod,
        modfile: &ModFile,
        store: &TranslationStore,
        database: &StringIndex<'_>,
    ) -> Result<TranslationStatus> {
        let path = m.file_path(modfile);
        let strings = self
            .extractor
            .extract(&path)
            .with_context(|| format!("Failed to extract strings from {}", path.display()))?;

        if !strings.iter().any(|s| s.status != StringStatus::NoTranslationRequired) {
            return Ok(TranslationStatus::NoStrings);
        }

        let sample = language_sample(&strings, &modfile.file_name());
        if !self.detector.requires_translation(&sample) {
            return Ok(TranslationStatus::IsTranslated);
        }

        if store.get_translation_by_modfile_path(&modfile.path).is_some()
            || store.vanilla_covers(&modfile.path)
        {
            return Ok(TranslationStatus::TranslationInstalled);
        }

        let covered = strings
            .iter()
            .all(|s| s.status == StringStatus::NoTranslationRequired || database.find(s).is_some());

        Ok(if covered {
            TranslationStatus::TranslationAvailableInDatabase
        } else {
            TranslationStatus::RequiresTranslation
        })
    }

    // ========== Online scan ==========

    /// Look up files still requiring translation online.
    ///
    /// Only mods with a known external id are queried; the provider is asked
    /// once per mod.
    pub async fn online_scan(
        &self,
        mods: &[Mod],
        result: &mut ScanResult,
        progress: &dyn ProgressSink,
    ) {
        let pending: Vec<&Mod> = mods
            .iter()
            .filter(|m| m.mod_id.is_some())
            .filter(|m| {
                m.modfiles.iter().any(|f| {
                    result.get(&m.modfile_id(f)) == Some(&TranslationStatus::RequiresTranslation)
                })
            })
            .collect();

        progress.start(pending.len(), "Searching translations online");
        for m in pending {
            progress.advance(&m.name);
            let Some(mod_id) = m.mod_id else {
                continue;
            };

            // Routed files never depend on the provider
            let mut unrouted = Vec::new();
            for modfile in &m.modfiles {
                let id = m.modfile_id(modfile);
                if result.get(&id) != Some(&TranslationStatus::RequiresTranslation) {
                    continue;
                }
                if self.is_routed(modfile) {
                    result.insert(id, TranslationStatus::TranslationAvailableOnline);
                } else {
                    unrouted.push(id);
                }
            }
            if unrouted.is_empty() {
                continue;
            }

            match self
                .provider
                .find_translations(mod_id, m.file_id, &self.language)
                .await
            {
                Ok(found) => {
                    tracing::debug!(
                        "Found {} online translation(s) for '{}'",
                        found.len(),
                        m.name
                    );
                    let status = if found.is_empty() {
                        TranslationStatus::NoTranslationAvailable
                    } else {
                        TranslationStatus::TranslationAvailableOnline
                    };
                    for id in unrouted {
                        result.insert(id, status);
                    }
                }
                Err(e) => {
                    tracing::warn!("Online lookup for '{}' failed: {:#}", m.name, e);
                    for id in &unrouted {
                        result.remove(id);
                    }
                }
            }
        }
        progress.finish();

        log_summary("Online scan", result);
    }

    // ========== Deep scan ==========

    /// Re-validate every installed user translation against its mod.
    ///
    /// Strings of the current plugin without a counterpart in the translation
    /// are appended as `TranslationRequired` (upstream `NoTranslationRequired`
    /// is kept). Each changed file is persisted on its own; a file with
    /// nothing new is left untouched, so repeating a deep scan is harmless.
    pub async fn deep_scan(&self, mods: &[Mod], progress: &dyn ProgressSink) -> ScanResult {
        let mut store = self.store.write().await;
        let mut result = ScanResult::new();

        let names: Vec<String> = store
            .user_translations()
            .iter()
            .map(|t| t.name.clone())
            .collect();

        progress.start(names.len(), "Checking installed translations");
        for name in names {
            progress.advance(&name);

            let Some(m) = store.get(&name).and_then(|t| find_original_mod(t, mods)) else {
                tracing::warn!("No original mod found for translation '{}'", name);
                continue;
            };

            let files = store.get(&name).map(Translation::files).unwrap_or_default();
            for file in files {
                match self.deep_scan_file(&mut store, &name, m, &file) {
                    Ok(Some((id, status))) => {
                        result.insert(id, status);
                    }
                    Ok(None) => {}
                    Err(e) => tracing::warn!(
                        "Failed to check {} of translation '{}': {:#}",
                        file.display(),
                        name,
                        e
                    ),
                }
            }
        }
        progress.finish();

        log_summary("Deep scan", &result);
        result
    }

    fn deep_scan_file(
        &self,
        store: &mut TranslationStore,
        name: &str,
        m: &Mod,
        file: &std::path::Path,
    ) -> Result<Option<(ModFileId, TranslationStatus)>> {
        let Some(modfile) = m.find_modfile(file) else {
            tracing::warn!(
                "Translation '{}' covers {} which '{}' does not contain",
                name,
                file.display(),
                m.name
            );
            return Ok(None);
        };

        let path = m.file_path(modfile);
        let current = self
            .extractor
            .extract(&path)
            .with_context(|| format!("Failed to extract strings from {}", path.display()))?;

        let appended: Vec<StringRecord> = {
            let existing = store
                .get(name)
                .and_then(|t| t.strings_for(file))
                .unwrap_or_default();
            let index = StringIndex::build(existing);
            current
                .iter()
                .filter(|s| index.find(s).is_none())
                .map(new_required_string)
                .collect()
        };

        if !appended.is_empty() {
            tracing::info!(
                "Translation '{}', {}: {} new string(s)",
                name,
                file.display(),
                appended.len()
            );
            store
                .append_strings(name, file, appended)
                .context("Failed to save translation")?;
        }

        let status = store
            .get(name)
            .and_then(|t| t.file_status(file))
            .unwrap_or(TranslationStatus::TranslationInstalled);

        Ok(Some((m.modfile_id(modfile), status)))
    }
}

/// Combine up to [`LANGUAGE_SAMPLE_SIZE`] distinct translatable strings
pub fn language_sample(strings: &[StringRecord], file_name: &str) -> String {
    let mut seen = HashSet::new();
    let mut sample = Vec::with_capacity(LANGUAGE_SAMPLE_SIZE);

    for string in strings {
        if string.status == StringStatus::NoTranslationRequired {
            continue;
        }
        if seen.insert(string.original.as_str()) {
            sample.push(string.original.as_str());
            if sample.len() == LANGUAGE_SAMPLE_SIZE {
                break;
            }
        }
    }

    if sample.len() < LANGUAGE_SAMPLE_SIZE {
        tracing::warn!(
            "Language detection for {} may be inaccurate: only {} distinct string(s)",
            file_name,
            sample.len()
        );
    }

    sample.join("\n")
}

/// The mod an installed translation targets: by (mod id, file id), by mod
/// id, then by the first mod containing one of its files
pub fn find_original_mod<'a>(translation: &Translation, mods: &'a [Mod]) -> Option<&'a Mod> {
    if let Some(mod_id) = translation.original_mod_id {
        if translation.original_file_id.is_some() {
            if let Some(m) = mods.iter().find(|m| {
                m.mod_id == Some(mod_id) && m.file_id == translation.original_file_id
            }) {
                return Some(m);
            }
        }
        if let Some(m) = mods.iter().find(|m| m.mod_id == Some(mod_id)) {
            return Some(m);
        }
    }

    let files = translation.files();
    mods.iter()
        .find(|m| files.iter().any(|f| m.find_modfile(f).is_some()))
}

fn new_required_string(string: &StringRecord) -> StringRecord {
    let mut string = string.clone();
    if string.status != StringStatus::NoTranslationRequired {
        string.string = None;
        string.status = StringStatus::TranslationRequired;
    }
    string
}

fn log_summary(scan: &str, result: &ScanResult) {
    let mut counts: HashMap<TranslationStatus, usize> = HashMap::new();
    for status in result.values() {
        *counts.entry(*status).or_default() += 1;
    }

    let summary: Vec<String> = TranslationStatus::all()
        .iter()
        .filter_map(|s| counts.get(s).map(|n| format!("{}: {}", s.as_str(), n)))
        .collect();

    tracing::info!(
        "{} finished for {} file(s) ({})",
        scan,
        result.len(),
        summary.join(", ")
    );
}

/// Collect files of `result` per mod name, for reporting
pub fn group_by_mod(result: &ScanResult) -> BTreeMap<String, Vec<(PathBuf, TranslationStatus)>> {
    let mut grouped: BTreeMap<String, Vec<(PathBuf, TranslationStatus)>> = BTreeMap::new();
    for (id, status) in result {
        grouped
            .entry(id.mod_name.clone())
            .or_default()
            .push((id.path.clone(), *status));
    }
    grouped
}
