//! String extraction from pre-extracted JSON dumps
//!
//! A dump is a string file (same format as translation string files) named
//! after the plugin, e.g. `<dumps>/Obsidian Weathers.esp.json`.

use super::StringExtractor;
use crate::status::StringStatus;
use crate::strings::{load_strings, StringRecord};
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Reads plugin strings from a directory of JSON dumps
#[derive(Debug, Clone)]
pub struct DumpExtractor {
    dumps_dir: PathBuf,
}

impl DumpExtractor {
    pub fn new(dumps_dir: impl Into<PathBuf>) -> Self {
        Self {
            dumps_dir: dumps_dir.into(),
        }
    }

    /// Dump file for a plugin path
    pub fn dump_path(&self, plugin: &Path) -> Option<PathBuf> {
        let file_name = plugin.file_name()?.to_string_lossy();
        Some(self.dumps_dir.join(format!("{}.json", file_name)))
    }
}

impl StringExtractor for DumpExtractor {
    fn extract(&self, path: &Path) -> Result<Vec<StringRecord>> {
        let Some(dump) = self.dump_path(path) else {
            bail!("Invalid plugin path {}", path.display());
        };
        if !dump.is_file() {
            bail!("No string dump for {} at {}", path.display(), dump.display());
        }

        let mut strings = load_strings(&dump)
            .with_context(|| format!("Failed to read string dump for {}", path.display()))?;
        mark_untranslatable(&mut strings);

        tracing::trace!("Extracted {} string(s) from {}", strings.len(), dump.display());
        Ok(strings)
    }
}

/// Flag strings without any letters (numbers, symbols, blanks) as not needing
/// translation
pub fn mark_untranslatable(strings: &mut [StringRecord]) {
    for string in strings.iter_mut() {
        if string.status == StringStatus::NoTranslationRequired
            || string.original.chars().any(char::is_alphabetic)
        {
            continue;
        }

        string.string = Some(string.original.clone());
        string.status = StringStatus::NoTranslationRequired;
    }
}
