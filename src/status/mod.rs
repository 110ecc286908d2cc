//! String and mod-file translation status state machines
//!
//! Human-facing labels live in [`display`]; this module only holds the
//! states, their ordering and the allowed transitions.

pub mod display;

use serde::{Deserialize, Serialize};

/// Translation state of a single localizable string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StringStatus {
    /// Nothing translated yet
    #[default]
    TranslationRequired,
    /// Partially translated or flagged for review
    TranslationIncomplete,
    /// Fully translated
    TranslationComplete,
    /// Numeric-only, internal names and similar; `string` mirrors `original`
    NoTranslationRequired,
}

impl StringStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StringStatus::TranslationRequired => "TranslationRequired",
            StringStatus::TranslationIncomplete => "TranslationIncomplete",
            StringStatus::TranslationComplete => "TranslationComplete",
            StringStatus::NoTranslationRequired => "NoTranslationRequired",
        }
    }

    /// Whether this string still needs work from a translator
    pub fn needs_translation(&self) -> bool {
        matches!(
            self,
            StringStatus::TranslationRequired | StringStatus::TranslationIncomplete
        )
    }

    /// Check whether an edit may move a string from `self` to `next`.
    ///
    /// Going back to `TranslationRequired` is never an edit; it only happens
    /// through an explicit reset (see `StringRecord::reset`).
    pub fn can_transition_to(&self, next: StringStatus) -> bool {
        if *self == next {
            return true;
        }

        match (self, next) {
            (_, StringStatus::TranslationRequired) => false,
            (StringStatus::TranslationRequired, _) => true,
            (StringStatus::TranslationIncomplete, StringStatus::TranslationComplete)
            | (StringStatus::TranslationIncomplete, StringStatus::NoTranslationRequired)
            | (StringStatus::TranslationComplete, StringStatus::TranslationIncomplete) => true,
            _ => false,
        }
    }
}

/// Derived status of a mod file (and, rolled up, of a mod)
///
/// Variants are declared from least to most actionable, so `Ord` gives the
/// severity ranking used for rollups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TranslationStatus {
    #[default]
    NoneStatus,
    NoStrings,
    IsTranslated,
    TranslationInstalled,
    TranslationAvailableInDatabase,
    TranslationAvailableOnline,
    TranslationIncomplete,
    RequiresTranslation,
    NoTranslationAvailable,
}

impl TranslationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationStatus::NoneStatus => "NoneStatus",
            TranslationStatus::NoStrings => "NoStrings",
            TranslationStatus::IsTranslated => "IsTranslated",
            TranslationStatus::TranslationInstalled => "TranslationInstalled",
            TranslationStatus::TranslationAvailableInDatabase => "TranslationAvailableInDatabase",
            TranslationStatus::TranslationAvailableOnline => "TranslationAvailableOnline",
            TranslationStatus::TranslationIncomplete => "TranslationIncomplete",
            TranslationStatus::RequiresTranslation => "RequiresTranslation",
            TranslationStatus::NoTranslationAvailable => "NoTranslationAvailable",
        }
    }

    pub fn all() -> &'static [TranslationStatus] {
        &[
            TranslationStatus::NoneStatus,
            TranslationStatus::NoStrings,
            TranslationStatus::IsTranslated,
            TranslationStatus::TranslationInstalled,
            TranslationStatus::TranslationAvailableInDatabase,
            TranslationStatus::TranslationAvailableOnline,
            TranslationStatus::TranslationIncomplete,
            TranslationStatus::RequiresTranslation,
            TranslationStatus::NoTranslationAvailable,
        ]
    }

    /// Roll a set of file statuses up into one: the worst file wins.
    pub fn rollup<I>(statuses: I) -> TranslationStatus
    where
        I: IntoIterator<Item = TranslationStatus>,
    {
        statuses
            .into_iter()
            .max()
            .unwrap_or(TranslationStatus::NoneStatus)
    }
}
