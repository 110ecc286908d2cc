//! Centrally maintained per-file overrides
//!
//! The masterlist is a JSON object keyed by plugin file name:
//!
//! ```json
//! {
//!   "Unofficial Skyrim Special Edition Patch.esp": {"type": "ignore"},
//!   "Obsidian Weathers.esp": {"type": "route", "targets": [
//!     {"source": "NexusMods", "mod_id": 12345, "file_id": 67890}
//!   ]}
//! }
//! ```

mod client;

pub use client::MasterlistClient;

use crate::translations::TranslationSource;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Where a routed file's translation can be found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTarget {
    pub source: TranslationSource,
    pub mod_id: u64,
    pub file_id: u64,
}

/// Override for one file name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MasterlistEntry {
    /// Exclude the file from scanning
    Ignore,
    /// Look the translation up at an explicit location
    Route { targets: Vec<RouteTarget> },
}

/// Masterlist entries, looked up by case-insensitive file name
#[derive(Debug, Clone, Default)]
pub struct Masterlist {
    entries: HashMap<String, MasterlistEntry>,
}

impl Masterlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, MasterlistEntry> =
            serde_json::from_str(json).context("Failed to parse masterlist")?;

        Ok(Self {
            entries: raw
                .into_iter()
                .map(|(name, entry)| (name.to_lowercase(), entry))
                .collect(),
        })
    }

    /// Load a cached masterlist; a missing file yields an empty masterlist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No cached masterlist at {}", path.display());
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read masterlist {}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn get(&self, file_name: &str) -> Option<&MasterlistEntry> {
        self.entries.get(&file_name.to_lowercase())
    }

    /// Whether the masterlist or the user's own list excludes `file_name`
    pub fn is_ignored(&self, file_name: &str, user_ignore_list: &[String]) -> bool {
        matches!(self.get(file_name), Some(MasterlistEntry::Ignore))
            || user_ignore_list
                .iter()
                .any(|ignored| ignored.eq_ignore_ascii_case(file_name))
    }

    /// Route targets for `file_name`, if it is routed
    pub fn route(&self, file_name: &str) -> Option<&[RouteTarget]> {
        match self.get(file_name)? {
            MasterlistEntry::Route { targets } => Some(targets),
            MasterlistEntry::Ignore => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
