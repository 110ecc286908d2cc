//! Stop-word based language detection
//!
//! Compares how many words of a sample are common English function words
//! against those of the target language. Plugins ship in English, so a
//! sample that reads as English still needs translating.

use super::LanguageDetector;

const ENGLISH: &[&str] = &[
    "the", "and", "of", "to", "a", "in", "is", "you", "that", "it", "for", "with", "on", "this",
    "be", "are", "your", "from", "by", "or", "not", "have", "will", "an", "at", "my", "was", "can",
];

const GERMAN: &[&str] = &[
    "der", "die", "das", "und", "ist", "nicht", "ein", "eine", "zu", "mit", "den", "dem", "ich",
    "sie", "es", "auf", "für", "von", "im", "du", "sich", "auch", "wird", "des", "ihr", "dein",
];

const FRENCH: &[&str] = &[
    "le", "la", "les", "et", "est", "un", "une", "des", "du", "de", "pour", "dans", "que", "qui",
    "vous", "pas", "sur", "avec", "ce", "il", "elle", "votre", "au", "aux", "je", "ne",
];

const SPANISH: &[&str] = &[
    "el", "la", "los", "las", "y", "es", "un", "una", "de", "del", "que", "en", "por", "para",
    "con", "no", "se", "su", "al", "lo", "como", "tu", "pero", "yo", "esta", "este",
];

const ITALIAN: &[&str] = &[
    "il", "lo", "la", "gli", "le", "e", "di", "che", "un", "una", "per", "non", "con", "del",
    "della", "sono", "questo", "questa", "si", "ti", "io", "tu", "nel", "al", "ma", "mi",
];

/// Detects English text by stop-word frequency
#[derive(Debug, Clone)]
pub struct StopwordDetector {
    target_language: String,
}

impl StopwordDetector {
    pub fn new(target_language: impl Into<String>) -> Self {
        Self {
            target_language: target_language.into(),
        }
    }

    fn target_stopwords(&self) -> &'static [&'static str] {
        match self.target_language.to_lowercase().as_str() {
            "german" => GERMAN,
            "french" => FRENCH,
            "spanish" => SPANISH,
            "italian" => ITALIAN,
            _ => &[],
        }
    }

    /// Whether the sample reads as English rather than the target language
    pub fn is_english(&self, sample: &str) -> bool {
        let words: Vec<String> = sample
            .split(|c: char| !c.is_alphabetic())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();
        if words.is_empty() {
            return false;
        }

        let target = self.target_stopwords();
        let english_hits = words.iter().filter(|w| ENGLISH.contains(&w.as_str())).count();
        let target_hits = words.iter().filter(|w| target.contains(&w.as_str())).count();

        if english_hits != target_hits {
            return english_hits > target_hits;
        }

        // Short names carry no stop words; accented letters hint at the target
        !sample
            .chars()
            .any(|c| c.is_alphabetic() && !c.is_ascii_alphabetic())
    }
}

impl LanguageDetector for StopwordDetector {
    fn requires_translation(&self, sample: &str) -> bool {
        if self.target_language.eq_ignore_ascii_case("english") {
            return false;
        }
        self.is_english(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_sentences_require_translation() {
        let detector = StopwordDetector::new("German");
        assert!(detector.requires_translation(
            "Cast this spell to change the weather.\nThe storm is coming from the north."
        ));
    }

    #[test]
    fn test_german_sentences_are_translated() {
        let detector = StopwordDetector::new("German");
        assert!(!detector.requires_translation(
            "Wirke diesen Zauber, um das Wetter zu ändern.\nDer Sturm kommt aus dem Norden."
        ));
    }

    #[test]
    fn test_short_names_fall_back_to_script() {
        let detector = StopwordDetector::new("German");
        assert!(detector.requires_translation("Iron Sword\nSteel Dagger"));
        assert!(!detector.requires_translation("Schwert aus Eisen\nStahldolch der Nördlichen"));
    }

    #[test]
    fn test_english_target_never_requires_translation() {
        let detector = StopwordDetector::new("English");
        assert!(!detector.requires_translation("The storm is coming."));
    }

    #[test]
    fn test_empty_sample() {
        assert!(!StopwordDetector::new("German").requires_translation("100 / 200"));
    }
}
