use finquery::keywords::{
    ExtractorUnavailable, KeywordExtractor, NaiveTokenizer, extract_keywords, naive_keywords,
};
use proptest::prelude::*;

struct EmptyTagger;

impl KeywordExtractor for EmptyTagger {
    fn extract(&self, _text: &str) -> Result<Vec<String>, ExtractorUnavailable> {
        Ok(Vec::new())
    }
}

struct BrokenTagger;

impl KeywordExtractor for BrokenTagger {
    fn extract(&self, _text: &str) -> Result<Vec<String>, ExtractorUnavailable> {
        Err(ExtractorUnavailable("tagger missing".to_string()))
    }
}

#[test]
fn naive_keywords_keeps_long_lowercased_tokens() {
    assert_eq!(
        naive_keywords("Compare Cash, and Total Liabilities"),
        vec!["compare", "cash", "total", "liabilities"]
    );
}

#[test]
fn naive_keywords_splits_on_commas_without_spaces() {
    assert_eq!(naive_keywords("cash,equity,debt"), vec!["cash", "equity", "debt"]);
    assert!(naive_keywords("a an the").is_empty());
}

#[test]
fn extract_keywords_falls_back_when_extractor_is_empty_or_missing() {
    let expected = vec!["show".to_string(), "assets".to_string()];
    assert_eq!(extract_keywords(None, "show me assets"), expected);
    assert_eq!(extract_keywords(Some(&EmptyTagger), "show me assets"), expected);
    assert_eq!(extract_keywords(Some(&BrokenTagger), "show me assets"), expected);
    assert_eq!(
        extract_keywords(Some(&NaiveTokenizer), "show me assets"),
        expected
    );
}

proptest! {
    #[test]
    fn naive_keywords_are_lowercase_and_at_least_four_chars(text in "[A-Za-z ,]{0,40}") {
        for keyword in naive_keywords(&text) {
            prop_assert!(keyword.chars().count() >= 4);
            prop_assert_eq!(keyword.to_lowercase(), keyword.clone());
            prop_assert!(!keyword.contains(','));
        }
    }
}
