//! Discover installed mods from a mod-manager mods directory
//!
//! Every sub-directory of the mods directory is one mod. Plugin files
//! anywhere below it become [`ModFile`]s. An MO2-style `meta.ini` supplies
//! the Nexus Mods identity and version when present.

use super::{Mod, ModFile, PluginType};
use anyhow::{Context, Result};
use regex_lite::Regex;
use std::path::Path;
use walkdir::WalkDir;

/// Identity read from a mod's `meta.ini`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModMeta {
    pub mod_id: Option<u64>,
    pub file_id: Option<u64>,
    pub version: Option<String>,
}

/// Load all mods below `mods_dir`, sorted by name
pub fn load_mods(mods_dir: &Path) -> Result<Vec<Mod>> {
    let mut mods = Vec::new();

    if !mods_dir.exists() {
        tracing::warn!("Mods directory {} does not exist", mods_dir.display());
        return Ok(mods);
    }

    let entries = std::fs::read_dir(mods_dir)
        .with_context(|| format!("Failed to read mods directory {}", mods_dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }

        match load_mod(&path) {
            Ok(m) => mods.push(m),
            Err(e) => tracing::warn!("Skipping mod at {}: {:#}", path.display(), e),
        }
    }

    mods.sort_by_key(|m| m.name.to_lowercase());
    tracing::debug!("Loaded {} mod(s) from {}", mods.len(), mods_dir.display());

    Ok(mods)
}

/// Load a single mod directory
pub fn load_mod(mod_dir: &Path) -> Result<Mod> {
    let name = mod_dir
        .file_name()
        .and_then(|n| n.to_str())
        .context("Mod directory has no valid name")?
        .to_string();

    let mut m = Mod::new(name, mod_dir);

    let meta_path = mod_dir.join("meta.ini");
    if meta_path.is_file() {
        let content = std::fs::read_to_string(&meta_path)
            .with_context(|| format!("Failed to read {}", meta_path.display()))?;
        let meta = parse_meta_ini(&content);
        m.mod_id = meta.mod_id;
        m.file_id = meta.file_id;
        m.version = meta.version.unwrap_or_default();
    }

    for entry in WalkDir::new(mod_dir).follow_links(true) {
        let entry = entry?;
        if !entry.file_type().is_file() || PluginType::from_path(entry.path()).is_none() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(mod_dir)
            .context("Plugin path outside of mod directory")?;
        m.modfiles.push(ModFile::new(relative));
    }

    m.modfiles.sort_by_key(|f| super::normalize_relative_path(&f.path));

    Ok(m)
}

/// Parse the fields of an MO2 `meta.ini` that identify the mod
pub fn parse_meta_ini(content: &str) -> ModMeta {
    let mod_id = Regex::new(r"(?m)^modid\s*=\s*(\d+)\s*$").expect("valid regex");
    let file_id = Regex::new(r"(?m)^\d+\\fileid\s*=\s*(\d+)\s*$").expect("valid regex");
    let version = Regex::new(r"(?m)^version\s*=\s*(.*?)\s*$").expect("valid regex");

    let capture_id = |re: &Regex| {
        re.captures(content)
            .and_then(|c| c[1].parse::<u64>().ok())
            .filter(|id| *id > 0)
    };

    ModMeta {
        mod_id: capture_id(&mod_id),
        file_id: capture_id(&file_id),
        version: version
            .captures(content)
            .map(|c| c[1].to_string())
            .filter(|v| !v.is_empty()),
    }
}
