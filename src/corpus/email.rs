use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Result, SpamFilterError};
use crate::generic_types::Label;

lazy_static! {
    // Anything that is not an ASCII letter separates words.
    static ref WORD_RE: Regex = Regex::new(r"[A-Za-z]+").unwrap();
}

/// Token or n-gram -> number of occurrences.
pub type FeatureMap = HashMap<String, usize>;

/// Turns raw text into a frequency map of words or word n-grams.
#[derive(Debug, Clone, Copy)]
pub struct FeatureExtractor {
    ngram: usize,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        FeatureExtractor { ngram: 1 }
    }
}

impl FeatureExtractor {
    /// Fails with `InvalidConfig` when `ngram` is 0.
    pub fn new(ngram: usize) -> Result<Self> {
        if ngram == 0 {
            return Err(SpamFilterError::InvalidConfig(
                "n-gram width must be at least 1".to_string(),
            ));
        }
        Ok(FeatureExtractor { ngram })
    }

    pub fn ngram(&self) -> usize {
        self.ngram
    }

    /// Maximal runs of ASCII letters, in order. Case is preserved.
    pub fn tokenize<'a>(text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        WORD_RE.find_iter(text).map(|m| m.as_str())
    }

    pub fn extract(&self, text: &str) -> FeatureMap {
        let mut features = FeatureMap::new();

        if self.ngram == 1 {
            for word in Self::tokenize(text) {
                *features.entry(word.to_string()).or_insert(0) += 1;
            }
            return features;
        }

        let words: Vec<&str> = Self::tokenize(text).collect();
        // `windows` yields nothing when there are fewer words than the window size.
        for window in words.windows(self.ngram) {
            *features.entry(window.join(" ")).or_insert(0) += 1;
        }
        features
    }
}

/// A labeled email with its precomputed features.
///
/// Everything is fixed at construction. Predictions live outside the email,
/// see [`crate::classifiers::classifier::Classified`].
#[derive(Debug, Clone)]
pub struct Email {
    label: Label,
    source_id: String,
    raw_text: String,
    features: FeatureMap,
}

impl Email {
    pub fn new<S, T>(label: Label, source_id: S, raw_text: T, extractor: &FeatureExtractor) -> Self
    where
        S: Into<String>,
        T: Into<String>,
    {
        let raw_text = raw_text.into();
        let features = extractor.extract(&raw_text);
        Email {
            label,
            source_id: source_id.into(),
            raw_text,
            features,
        }
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn features(&self) -> &FeatureMap {
        &self.features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, usize)]) -> FeatureMap {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn unigrams_are_case_sensitive_and_strip_punctuation() {
        let features = FeatureExtractor::default().extract("Buy NOW!! buy buy");
        assert_eq!(features, map(&[("Buy", 1), ("NOW", 1), ("buy", 2)]));
    }

    #[test]
    fn digits_split_words() {
        let features = FeatureExtractor::default().extract("win1000dollars, win");
        assert_eq!(features, map(&[("win", 2), ("dollars", 1)]));
    }

    #[test]
    fn bigrams_slide_by_one_word() {
        let features = FeatureExtractor::new(2).unwrap().extract("a b c d");
        assert_eq!(features, map(&[("a b", 1), ("b c", 1), ("c d", 1)]));
    }

    #[test]
    fn three_words_give_two_bigrams() {
        let features = FeatureExtractor::new(2).unwrap().extract("one, two; three");
        assert_eq!(features.len(), 2);
        assert_eq!(features.values().sum::<usize>(), 2);
    }

    #[test]
    fn repeated_ngrams_accumulate() {
        let features = FeatureExtractor::new(2).unwrap().extract("free money free money");
        assert_eq!(features, map(&[("free money", 2), ("money free", 1)]));
    }

    #[test]
    fn empty_and_short_texts_yield_nothing() {
        assert!(FeatureExtractor::default().extract("").is_empty());
        assert!(FeatureExtractor::default().extract("123 !!! ...").is_empty());
        assert!(FeatureExtractor::new(3).unwrap().extract("only two").is_empty());
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(matches!(
            FeatureExtractor::new(0),
            Err(SpamFilterError::InvalidConfig(_))
        ));
        assert_eq!(FeatureExtractor::new(1).unwrap().ngram(), 1);
    }

    #[test]
    fn email_keeps_text_and_counts() {
        let extractor = FeatureExtractor::default();
        let email = Email::new(Label::Spam, "emails/1.txt", "cheap cheap pills", &extractor);
        assert_eq!(email.label(), Label::Spam);
        assert_eq!(email.source_id(), "emails/1.txt");
        assert_eq!(email.raw_text(), "cheap cheap pills");
        assert_eq!(email.features().get("cheap"), Some(&2));
        assert_eq!(email.features().get("pills"), Some(&1));
    }
}
