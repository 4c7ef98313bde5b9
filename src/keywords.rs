//! Keyword extraction from free text.
//!
//! A part-of-speech tagger can be plugged in through [`KeywordExtractor`].
//! When none is configured, or it fails or finds nothing, extraction falls
//! back to [`naive_keywords`].

use log::{debug, warn};
use thiserror::Error;

pub const MIN_NAIVE_TOKEN_CHARS: usize = 4;

#[derive(Debug, Error)]
#[error("Keyword extractor unavailable: {0}")]
pub struct ExtractorUnavailable(pub String);

pub trait KeywordExtractor {
    /// Candidate keywords in the order they appear in `text`.
    fn extract(&self, text: &str) -> Result<Vec<String>, ExtractorUnavailable>;
}

/// Whitespace tokenizer used when no smarter extractor is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaiveTokenizer;

impl KeywordExtractor for NaiveTokenizer {
    fn extract(&self, text: &str) -> Result<Vec<String>, ExtractorUnavailable> {
        Ok(naive_keywords(text))
    }
}

/// Splits on commas and whitespace and keeps lowercased tokens of at least
/// four characters.
pub fn naive_keywords(text: &str) -> Vec<String> {
    text.replace(',', " ")
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_NAIVE_TOKEN_CHARS)
        .map(str::to_lowercase)
        .collect()
}

pub fn extract_keywords(extractor: Option<&dyn KeywordExtractor>, text: &str) -> Vec<String> {
    if let Some(extractor) = extractor {
        match extractor.extract(text) {
            Ok(keywords) if !keywords.is_empty() => {
                debug!("Extracted keywords {keywords:?}");
                return keywords;
            }
            Ok(_) => debug!("Extractor found no keywords; tokenizing instead"),
            Err(err) => warn!("{err}; tokenizing instead"),
        }
    }
    naive_keywords(text)
}
