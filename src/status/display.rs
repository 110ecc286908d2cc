//! Display labels and colors for statuses

use super::{StringStatus, TranslationStatus};

/// Short English label for a mod file status
pub fn label(status: TranslationStatus) -> &'static str {
    match status {
        TranslationStatus::NoneStatus => "Not scanned",
        TranslationStatus::NoStrings => "No strings",
        TranslationStatus::IsTranslated => "Already translated",
        TranslationStatus::TranslationInstalled => "Translation installed",
        TranslationStatus::TranslationAvailableInDatabase => "Translation available in database",
        TranslationStatus::TranslationAvailableOnline => "Translation available online",
        TranslationStatus::TranslationIncomplete => "Translation incomplete",
        TranslationStatus::RequiresTranslation => "Requires translation",
        TranslationStatus::NoTranslationAvailable => "No translation available",
    }
}

/// Hex color used to render a mod file status
pub fn color(status: TranslationStatus) -> Option<&'static str> {
    match status {
        TranslationStatus::NoneStatus | TranslationStatus::NoStrings => None,
        TranslationStatus::IsTranslated | TranslationStatus::TranslationInstalled => {
            Some("#8be248")
        }
        TranslationStatus::TranslationAvailableInDatabase => Some("#c6e248"),
        TranslationStatus::TranslationAvailableOnline => Some("#ffc402"),
        TranslationStatus::TranslationIncomplete => Some("#ff8c00"),
        TranslationStatus::RequiresTranslation => Some("#e24848"),
        TranslationStatus::NoTranslationAvailable => Some("#9d2a2a"),
    }
}

pub fn string_label(status: StringStatus) -> &'static str {
    match status {
        StringStatus::TranslationRequired => "Translation required",
        StringStatus::TranslationIncomplete => "Translation incomplete",
        StringStatus::TranslationComplete => "Translation complete",
        StringStatus::NoTranslationRequired => "No translation required",
    }
}

pub fn string_color(status: StringStatus) -> &'static str {
    match status {
        StringStatus::TranslationRequired => "#e24848",
        StringStatus::TranslationIncomplete => "#ffc402",
        StringStatus::TranslationComplete => "#8be248",
        StringStatus::NoTranslationRequired => "#808080",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_status_has_a_label() {
        for status in TranslationStatus::all() {
            assert!(!label(*status).is_empty());
        }
    }
}
