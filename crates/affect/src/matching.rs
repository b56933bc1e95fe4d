//! Lexicon matching against a lowercased message.
//!
//! Japanese is written without spaces, so its entries match anywhere. English
//! entries must start and end on a word boundary, otherwise "whatever" would
//! count as "hate" and "gloves" as "love".

use kioku_core::emotion::Language;

/// Whether `entry` occurs in `lowered` under the rules for `language`.
pub(crate) fn occurs(language: Language, lowered: &str, entry: &str) -> bool {
    match language {
        Language::Japanese => lowered.contains(entry),
        Language::English => contains_word(lowered, entry),
    }
}

/// Substring match that also requires a non-word character (or the end of
/// the text) on both sides. Multi-word entries like "no way" are fine; only
/// their outer edges are checked.
fn contains_word(haystack: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    haystack.match_indices(word).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + word.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

// ASCII only: English embedded in Japanese text ("今日はhappy") still counts.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}
