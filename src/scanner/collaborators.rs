//! Interfaces of the services a scan depends on
//!
//! Plugin parsing, language detection and the online lookup live outside the
//! engine. Scans only see these traits, so tests and front ends can swap in
//! their own implementations.

use crate::strings::StringRecord;
use crate::translations::TranslationSource;
use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

/// Produces the localizable strings of one mod file
#[cfg_attr(test, mockall::automock)]
pub trait StringExtractor: Send + Sync {
    /// Extract strings from the file at `path`, in file order.
    ///
    /// Strings that need no translation (numbers, internal names) should
    /// already carry `NoTranslationRequired`.
    fn extract(&self, path: &Path) -> Result<Vec<StringRecord>>;
}

/// Decides whether sample text still has to be translated
#[cfg_attr(test, mockall::automock)]
pub trait LanguageDetector: Send + Sync {
    /// `false` when the sample already reads as the target language
    fn requires_translation(&self, sample: &str) -> bool;
}

/// A translation offered by an external source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableTranslation {
    pub source: TranslationSource,
    pub name: String,
    pub mod_id: u64,
    pub file_id: Option<u64>,
}

/// Looks up translations for a mod on an external host
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    async fn find_translations(
        &self,
        mod_id: u64,
        file_id: Option<u64>,
        language: &str,
    ) -> Result<Vec<AvailableTranslation>>;
}

/// Provider used when no online source is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProvider;

#[async_trait]
impl TranslationProvider for NoProvider {
    async fn find_translations(
        &self,
        _mod_id: u64,
        _file_id: Option<u64>,
        _language: &str,
    ) -> Result<Vec<AvailableTranslation>> {
        Ok(Vec::new())
    }
}

/// Call-through progress reporting for long scans
pub trait ProgressSink: Send + Sync {
    fn start(&self, total: usize, message: &str);
    fn advance(&self, item: &str);
    fn finish(&self);
}

/// Discards progress
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn start(&self, _total: usize, _message: &str) {}
    fn advance(&self, _item: &str) {}
    fn finish(&self) {}
}
