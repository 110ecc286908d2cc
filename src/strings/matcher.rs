//! Matching between an original and a translated string set
//!
//! Strings are matched by identity key first and by original text second.
//! When several candidates share a key or an original text, the first one
//! inserted into the index wins.

use super::StringRecord;
use crate::status::StringStatus;
use std::collections::HashMap;

/// Lookup index over a reference string set
#[derive(Debug, Default)]
pub struct StringIndex<'a> {
    by_id: HashMap<String, &'a StringRecord>,
    by_original: HashMap<&'a str, &'a StringRecord>,
}

impl<'a> StringIndex<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every string of `strings` in iteration order
    pub fn build<I>(strings: I) -> Self
    where
        I: IntoIterator<Item = &'a StringRecord>,
    {
        let mut index = Self::new();
        index.extend(strings);
        index
    }

    /// Index only strings that carry a translated text
    pub fn build_translated<I>(strings: I) -> Self
    where
        I: IntoIterator<Item = &'a StringRecord>,
    {
        Self::build(strings.into_iter().filter(|s| s.string.is_some()))
    }

    /// Add a string unless its key or original text is already indexed
    pub fn insert(&mut self, string: &'a StringRecord) {
        if let Some(key) = string.identity_key() {
            self.by_id.entry(key).or_insert(string);
        }
        self.by_original
            .entry(string.original.as_str())
            .or_insert(string);
    }

    pub fn extend<I>(&mut self, strings: I)
    where
        I: IntoIterator<Item = &'a StringRecord>,
    {
        for string in strings {
            self.insert(string);
        }
    }

    pub fn find_by_id(&self, string: &StringRecord) -> Option<&'a StringRecord> {
        let key = string.identity_key()?;
        self.by_id.get(&key).copied()
    }

    pub fn find_by_original(&self, original: &str) -> Option<&'a StringRecord> {
        self.by_original.get(original).copied()
    }

    /// Identity-key match, falling back to an original-text match
    pub fn find(&self, string: &StringRecord) -> Option<&'a StringRecord> {
        self.find_by_id(string)
            .or_else(|| self.find_by_original(&string.original))
    }

    pub fn len(&self) -> usize {
        self.by_original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty() && self.by_original.is_empty()
    }
}

/// Merge a translated string set into an original one.
///
/// Every original string comes back, in input order, with a status:
/// `TranslationComplete` when a translated counterpart was found (by key,
/// then by text), `TranslationRequired` otherwise. Strings already marked
/// `NoTranslationRequired` pass through with `string` set to the original.
/// Translated strings without an original counterpart are dropped.
pub fn map_strings(original: &[StringRecord], translated: &[StringRecord]) -> Vec<StringRecord> {
    map_strings_with_index(original, &StringIndex::build_translated(translated))
}

/// [`map_strings`] against a prebuilt index, e.g. the aggregate database index
pub fn map_strings_with_index(
    original: &[StringRecord],
    index: &StringIndex<'_>,
) -> Vec<StringRecord> {
    original
        .iter()
        .map(|string| {
            let mut merged = string.clone();

            if merged.status == StringStatus::NoTranslationRequired {
                merged.string = Some(merged.original.clone());
                return merged;
            }

            match index.find(&merged) {
                Some(found) => {
                    merged.string = found.string.clone();
                    merged.status = StringStatus::TranslationComplete;
                }
                None => {
                    merged.status = StringStatus::TranslationRequired;
                }
            }

            merged
        })
        .collect()
}

/// Reconcile one string against a reference index.
///
/// Copies `string` and `status` from the matching reference string onto
/// `target` and returns whether anything changed. Without a match the target
/// is left untouched.
pub fn update_string(target: &mut StringRecord, index: &StringIndex<'_>) -> bool {
    let Some(found) = index.find(target) else {
        return false;
    };

    let updated = target.string != found.string || target.status != found.status;
    if updated {
        target.string = found.string.clone();
        target.status = found.status;
    }

    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn original(form_id: &str, text: &str) -> StringRecord {
        StringRecord::new(Some(form_id), None, "WEAP FULL", text)
    }

    fn translated(form_id: &str, text: &str, string: &str) -> StringRecord {
        original(form_id, text).with_translation(string, StringStatus::TranslationComplete)
    }

    #[test]
    fn test_match_by_identity_key() {
        let merged = map_strings(
            &[original("1", "Original")],
            &[translated("1", "Original", "Translated")],
        );

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].status, StringStatus::TranslationComplete);
        assert_eq!(merged[0].string.as_deref(), Some("Translated"));
    }

    #[test]
    fn test_match_by_original_text() {
        let merged = map_strings(
            &[original("2", "Original")],
            &[translated("different", "Original", "Translated")],
        );

        assert_eq!(merged[0].status, StringStatus::TranslationComplete);
        assert_eq!(merged[0].string.as_deref(), Some("Translated"));
    }

    #[test]
    fn test_unmatched_string_requires_translation() {
        let merged = map_strings(
            &[original("3", "A")],
            &[translated("different", "B", "Translated")],
        );

        assert_eq!(merged[0].status, StringStatus::TranslationRequired);
        assert_eq!(merged[0].string, None);
    }

    #[test]
    fn test_no_translation_required_passes_through() {
        let numeric = original("4", "100").with_status(StringStatus::NoTranslationRequired);
        let merged = map_strings(&[numeric], &[translated("4", "100", "hundert")]);

        assert_eq!(merged[0].status, StringStatus::NoTranslationRequired);
        assert_eq!(merged[0].string.as_deref(), Some("100"));
    }

    #[test]
    fn test_extra_translated_strings_are_dropped() {
        let merged = map_strings(
            &[original("1", "A")],
            &[translated("1", "A", "a"), translated("9", "Z", "z")],
        );
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_output_preserves_original_order() {
        let originals: Vec<_> = (0..20)
            .map(|i| original(&format!("{i:08X}"), &format!("Text {i}")))
            .collect();
        let translations: Vec<_> = originals
            .iter()
            .rev()
            .map(|s| {
                s.clone()
                    .with_translation(format!("{} (de)", s.original), StringStatus::TranslationComplete)
            })
            .collect();

        let merged = map_strings(&originals, &translations);
        let order: Vec<_> = merged.iter().map(|s| s.original.clone()).collect();
        let expected: Vec<_> = originals.iter().map(|s| s.original.clone()).collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn test_map_strings_is_idempotent() {
        let originals = vec![original("1", "A"), original("2", "B"), original("3", "C")];
        let translations = vec![translated("1", "A", "a"), translated("x", "C", "c")];

        let first = map_strings(&originals, &translations);
        let second = map_strings(&originals, &translations);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a, b);
            assert_eq!(a.string, b.string);
            assert_eq!(a.status, b.status);
        }
    }

    #[test]
    fn test_identity_match_beats_text_match() {
        let target = original("1", "Shared");
        let translations = vec![
            translated("2", "Shared", "by text"),
            translated("1", "Something else", "by id"),
        ];

        let merged = map_strings(&[target.clone()], &translations);
        assert_eq!(merged[0].string.as_deref(), Some("by id"));

        let index = StringIndex::build(&translations);
        let mut target = target;
        assert!(update_string(&mut target, &index));
        assert_eq!(target.string.as_deref(), Some("by id"));
    }

    #[test]
    fn test_first_text_match_wins() {
        let translations = vec![
            translated("a", "Shared", "first"),
            translated("b", "Shared", "second"),
        ];
        let merged = map_strings(&[original("c", "Shared")], &translations);
        assert_eq!(merged[0].string.as_deref(), Some("first"));
    }

    #[test]
    fn test_update_string_by_original_text() {
        let reference = vec![translated("different", "Original", "Translated")];
        let index = StringIndex::build(&reference);

        let mut target = original("2", "Original");
        assert!(update_string(&mut target, &index));
        assert_eq!(target.string.as_deref(), Some("Translated"));
        assert_eq!(target.status, StringStatus::TranslationComplete);

        // Already in sync: matched but nothing to change
        assert!(!update_string(&mut target, &index));
    }

    #[test]
    fn test_update_string_without_match() {
        let reference = vec![original("different", "B")];
        let index = StringIndex::build(&reference);

        let mut target = original("3", "A");
        let before = target.clone();
        assert!(!update_string(&mut target, &index));
        assert_eq!(target.string, before.string);
        assert_eq!(target.status, before.status);
    }
}
