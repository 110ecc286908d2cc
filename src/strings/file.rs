//! JSON string files
//!
//! A string file is a JSON array of [`StringRecord`]s, one file per
//! translated plugin.

use super::StringRecord;
use crate::error::{StoreError, StoreResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Load a string file, failing on malformed content
pub fn load_strings(path: &Path) -> StoreResult<Vec<StringRecord>> {
    let content = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;

    serde_json::from_str(&content).map_err(|source| StoreError::Validation {
        path: path.to_path_buf(),
        source,
    })
}

/// Save a string file atomically
pub fn save_strings(path: &Path, strings: &[StringRecord]) -> StoreResult<()> {
    let json = serde_json::to_string_pretty(strings).map_err(|source| StoreError::Validation {
        path: path.to_path_buf(),
        source,
    })?;

    write_atomic(path, json.as_bytes())
}

/// Write through a sibling temp file and rename it over the target
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let tmp = tmp_path(path);

    if let Some(parent) = tmp.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    fs::write(&tmp, bytes).map_err(|e| StoreError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))?;

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.to_path_buf();
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("strings");
    p.set_file_name(format!("{file_name}.tmp"));
    p
}
