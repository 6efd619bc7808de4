//! # Text Normalizer
//!
//! Cleans raw OCR output or chat text before pattern matching: confusable
//! separators are unified, word hashtags and markup-unsafe characters are dropped
//! and whitespace is collapsed. Digits are never altered.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

lazy_static! {
    // A tag starting with a digit ("#10км") only loses its `#`
    static ref HASHTAG_REGEX: Regex =
        Regex::new(r"#(?:[\p{L}_][\p{L}\p{N}_]*)?").expect("Hashtag pattern should be valid");
    static ref WHITESPACE_REGEX: Regex =
        Regex::new(r"\s+").expect("Whitespace pattern should be valid");
}

/// Map a single character to its canonical form, or drop it
fn canonical_char(c: char) -> Option<char> {
    match c {
        '|' => Some('/'),
        '*' => Some(':'),
        '‘' | '’' | '′' | '`' | '´' | 'ʼ' => Some('\''),
        '“' | '”' | '″' | '„' | '«' | '»' => Some('"'),
        '<' | '>' | '&' => None,
        other => Some(other),
    }
}

/// Normalize raw text for pattern matching
///
/// Never fails; empty or noise-only input yields an empty string.
///
/// # Examples
///
/// ```rust
/// use runlog::text_normalizer::normalize;
///
/// assert_eq!(normalize("  5,2 км   #япобегал "), "5,2 км");
/// assert_eq!(normalize("1*43*08  06’51”"), "1:43:08 06'51\"");
/// assert_eq!(normalize("<b>10 km</b> & more"), "b10 km/b more");
/// ```
pub fn normalize(raw: &str) -> String {
    let without_tags = HASHTAG_REGEX.replace_all(raw, " ");

    let mapped: String = without_tags.chars().filter_map(canonical_char).collect();
    // Two apostrophes in a row are an OCR reading of a double quote
    let mapped = mapped.replace("''", "\"");

    let collapsed = WHITESPACE_REGEX.replace_all(&mapped, " ");
    let normalized = collapsed.trim().to_string();

    trace!(raw = %raw, normalized = %normalized, "Normalized text");
    normalized
}
