//! Locale-aware string ordering for name and language sorts.
//!
//! Comparison runs in levels: base letters (accents and case folded away),
//! then accents, then case with lowercase first, then code points.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Precomputed sort key for one string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    base: String,
    accents: String,
    case: Vec<bool>,
    raw: String,
}

impl CollationKey {
    pub fn new(text: &str) -> Self {
        let decomposed: String = text.nfkd().collect();
        let stripped: Vec<char> = decomposed.chars().filter(|c| !is_combining_mark(*c)).collect();

        Self {
            base: stripped.iter().collect::<String>().to_lowercase(),
            accents: decomposed.to_lowercase(),
            case: stripped.iter().map(|c| c.is_uppercase()).collect(),
            raw: text.to_string(),
        }
    }
}

pub fn locale_compare(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}
