//! Localizable string records
//!
//! A [`StringRecord`] is one translatable unit extracted from a plugin: the
//! original text, the translated text (if any) and its [`StringStatus`].

mod file;
pub mod matcher;

pub use file::*;
pub use matcher::{map_strings, map_strings_with_index, update_string, StringIndex};

use crate::status::StringStatus;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// One localizable string
///
/// Field order matches the persisted string-file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StringRecord {
    /// Record form id plus source file, e.g. `04000D65|Obsidian Weathers.esp`
    #[serde(default)]
    pub form_id: Option<String>,

    /// `"RECORD SUBRECORD"`, e.g. `WEAP FULL`
    #[serde(rename = "type", default)]
    pub record_type: String,

    /// Text from the untranslated plugin
    pub original: String,

    /// Translated text, `None` while untranslated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,

    /// Position within list-valued subrecords (dialogue/quest options)
    #[serde(default)]
    pub index: Option<u32>,

    #[serde(default)]
    pub editor_id: Option<String>,

    #[serde(default, deserialize_with = "status_or_default")]
    pub status: StringStatus,
}

fn status_or_default<'de, D>(deserializer: D) -> Result<StringStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringStatus>::deserialize(deserializer)?.unwrap_or_default())
}

impl StringRecord {
    /// Create an untranslated record
    pub fn new(
        form_id: Option<&str>,
        editor_id: Option<&str>,
        record_type: impl Into<String>,
        original: impl Into<String>,
    ) -> Self {
        Self {
            form_id: form_id.map(ToOwned::to_owned),
            record_type: record_type.into(),
            original: original.into(),
            string: None,
            index: None,
            editor_id: editor_id.map(ToOwned::to_owned),
            status: StringStatus::TranslationRequired,
        }
    }

    pub fn with_index(mut self, index: u32) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_translation(mut self, string: impl Into<String>, status: StringStatus) -> Self {
        self.string = Some(string.into());
        self.status = status;
        self
    }

    pub fn with_status(mut self, status: StringStatus) -> Self {
        self.status = status;
        self
    }

    /// Exact-match key: `form_id|editor_id|record_type|index`.
    ///
    /// Returns `None` without a form id; such strings are only matched by
    /// their original text.
    pub fn identity_key(&self) -> Option<String> {
        let form_id = self.form_id.as_deref()?;
        Some(format!(
            "{}|{}|{}|{}",
            form_id.to_lowercase(),
            self.editor_id.as_deref().unwrap_or_default(),
            self.record_type,
            self.index.map(|i| i.to_string()).unwrap_or_default()
        ))
    }

    /// Whether both records refer to the same logical string by identity key
    pub fn matches_identity(&self, other: &StringRecord) -> bool {
        match (self.identity_key(), other.identity_key()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Text shown for this string: the translation if present, else the original
    pub fn text(&self) -> &str {
        self.string.as_deref().unwrap_or(&self.original)
    }

    /// Explicitly reset the string to its untranslated state
    pub fn reset(&mut self) {
        self.string = Some(self.original.clone());
        self.status = StringStatus::TranslationRequired;
    }
}

// Equality deliberately ignores `string`, `status` and `form_id` so that
// differently translated copies of the same string collapse in sets.
impl PartialEq for StringRecord {
    fn eq(&self, other: &Self) -> bool {
        self.editor_id == other.editor_id
            && self.record_type == other.record_type
            && self.original == other.original
            && self.index == other.index
    }
}

impl Eq for StringRecord {}

impl Hash for StringRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.editor_id.hash(state);
        self.record_type.hash(state);
        self.original.hash(state);
        self.index.hash(state);
    }
}

/// Remove duplicate strings, keeping the first occurrence and input order
pub fn dedup_strings(strings: Vec<StringRecord>) -> Vec<StringRecord> {
    let mut seen = HashSet::new();
    let mut result = Vec::with_capacity(strings.len());

    for string in strings {
        if seen.insert(string.clone()) {
            result.push(string);
        }
    }

    result
}
