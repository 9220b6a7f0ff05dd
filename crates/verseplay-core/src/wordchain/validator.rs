//! Line validation for the word-chain game.
//!
//! Two pure checks: `is_valid_form` gates a candidate line on shape
//! (keyword containment, length, character classes) and `is_duplicate`
//! rejects near-repeats of earlier lines in the session. Both are
//! order-independent over the prior lines and have no side effects.

/// Punctuation allowed inside a line besides CJK ideographs.
const ALLOWED_PUNCTUATION: &str = "、，。？！";

/// Unique-character overlap above which two containment-related lines
/// count as the same line.
const OVERLAP_THRESHOLD: f64 = 0.6;

/// Character-count bounds of a valid line, inclusive.
const MIN_CHARS: usize = 4;
const MAX_CHARS: usize = 30;

fn is_allowed_char(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c) || ALLOWED_PUNCTUATION.contains(c)
}

/// Whether `text` is a well-formed line for `keyword`.
///
/// A valid line is non-empty, contains the keyword as a substring, runs
/// 4 to 30 characters, and consists only of CJK ideographs and the
/// punctuation 、，。？！.
pub fn is_valid_form(text: &str, keyword: &str) -> bool {
    if text.is_empty() || !text.contains(keyword) {
        return false;
    }
    let char_count = text.chars().count();
    if !(MIN_CHARS..=MAX_CHARS).contains(&char_count) {
        return false;
    }
    text.chars().all(is_allowed_char)
}

/// Unique-character overlap ratio between two strings.
///
/// `|intersection of unique chars| / |unique chars of the shorter
/// string|`, where "shorter" is by character count. Zero when either
/// side is empty.
pub fn overlap_ratio(a: &str, b: &str) -> f64 {
    use std::collections::HashSet;

    let set_a: HashSet<char> = a.chars().collect();
    let set_b: HashSet<char> = b.chars().collect();
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let shorter = if a.chars().count() <= b.chars().count() {
        &set_a
    } else {
        &set_b
    };
    let intersection = set_a.intersection(&set_b).count();
    intersection as f64 / shorter.len() as f64
}

/// Whether `text` duplicates any line in `prior`.
///
/// A duplicate is an exact match, or a substring containment in either
/// direction whose unique-character overlap exceeds 0.6. Symmetric in
/// its two sides: `is_duplicate(a, [b]) == is_duplicate(b, [a])`.
pub fn is_duplicate<S: AsRef<str>>(text: &str, prior: &[S]) -> bool {
    prior.iter().any(|p| {
        let p = p.as_ref();
        if text == p {
            return true;
        }
        (text.contains(p) || p.contains(text)) && overlap_ratio(text, p) > OVERLAP_THRESHOLD
    })
}
