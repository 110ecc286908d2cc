//! Incremental mod file status updates
//!
//! [`StateService`] keeps the statuses of loaded mod files in line with the
//! translation store without rescanning: it applies scan results and reacts
//! to translations being added or removed.

use crate::db::Database;
use crate::mods::{normalize_relative_path, Mod, ModFileId};
use crate::scanner::ScanResult;
use crate::status::TranslationStatus;
use crate::translations::StoreEvent;
use anyhow::Result;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Listens to store events and owns the checkbox cache
pub struct StateService {
    events: UnboundedReceiver<StoreEvent>,
    db: Arc<Database>,
}

impl StateService {
    pub fn new(events: UnboundedReceiver<StoreEvent>, db: Arc<Database>) -> Self {
        Self { events, db }
    }

    /// Copy scan statuses onto the matching mod files; returns how many changed
    pub fn apply_scan_result(mods: &mut [Mod], result: &ScanResult) -> usize {
        let mut changed = 0;

        for m in mods.iter_mut() {
            for modfile in m.modfiles.iter_mut() {
                let id = ModFileId::new(&m.name, &modfile.path);
                let Some(status) = result.get(&id) else {
                    continue;
                };

                if modfile.status != *status {
                    modfile.status = *status;
                    changed += 1;
                }
            }
        }

        changed
    }

    /// Handle every pending store event; returns how many files changed
    pub fn process_events(&mut self, mods: &mut [Mod]) -> usize {
        let mut changed = 0;

        while let Ok(event) = self.events.try_recv() {
            changed += match event {
                StoreEvent::TranslationAdded { name, files } => {
                    tracing::debug!("Translation '{}' added", name);
                    Self::on_translation_added(mods, &files)
                }
                StoreEvent::TranslationRemoved { name, files } => {
                    tracing::debug!("Translation '{}' removed", name);
                    Self::on_translation_removed(mods, &files)
                }
            };
        }

        changed
    }

    /// Mark the covered original files as installed
    pub fn on_translation_added(mods: &mut [Mod], files: &[PathBuf]) -> usize {
        update_covered(mods, files, TranslationStatus::TranslationInstalled, |status| {
            !matches!(
                status,
                TranslationStatus::TranslationInstalled | TranslationStatus::IsTranslated
            )
        })
    }

    /// Mark the previously covered original files as requiring translation
    pub fn on_translation_removed(mods: &mut [Mod], files: &[PathBuf]) -> usize {
        update_covered(mods, files, TranslationStatus::RequiresTranslation, |status| {
            status != TranslationStatus::IsTranslated
        })
    }

    // ========== Checkbox cache ==========

    pub fn checkbox_state(&self, path: &str) -> Result<Option<bool>> {
        self.db.get_checkbox_state(path)
    }

    pub fn set_checkbox_state(&self, path: &str, checked: bool) -> Result<()> {
        self.db.set_checkbox_state(path, checked)
    }

    pub fn load_checkbox_states(&self) -> Result<HashMap<String, bool>> {
        self.db.get_checkbox_states()
    }
}

fn update_covered(
    mods: &mut [Mod],
    files: &[PathBuf],
    status: TranslationStatus,
    applies: impl Fn(TranslationStatus) -> bool,
) -> usize {
    let covered: Vec<String> = files.iter().map(|f| normalize_relative_path(f)).collect();
    let mut changed = 0;

    for m in mods.iter_mut() {
        for modfile in m.modfiles.iter_mut() {
            if !covered.contains(&normalize_relative_path(&modfile.path)) || !applies(modfile.status)
            {
                continue;
            }

            tracing::trace!("{} / {} -> {}", m.name, modfile.path.display(), status.as_str());
            modfile.status = status;
            changed += 1;
        }
    }

    changed
}
