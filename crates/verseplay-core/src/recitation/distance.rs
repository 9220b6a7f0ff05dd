//! Levenshtein distance over characters.

/// Classic edit distance: unit-cost insert, delete, substitute.
///
/// Two-row dynamic program over `chars()`, so multi-byte CJK text is
/// counted per character, not per byte.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(prev[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut prev, &mut current);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_have_zero_distance() {
        assert_eq!(levenshtein("床前明月光", "床前明月光"), 0);
    }

    #[test]
    fn empty_sides() {
        assert_eq!(levenshtein("", "明月"), 2);
        assert_eq!(levenshtein("明月", ""), 2);
        assert_eq!(levenshtein("", ""), 0);
    }

    #[test]
    fn single_substitution() {
        assert_eq!(levenshtein("床前明月光", "床前白月光"), 1);
    }

    #[test]
    fn insertion_and_deletion() {
        assert_eq!(levenshtein("明月光", "床明月光"), 1);
        assert_eq!(levenshtein("床明月光", "明月光"), 1);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = "疑是地上霜";
        let b = "疑似地上的霜";
        assert_eq!(levenshtein(a, b), levenshtein(b, a));
    }

    #[test]
    fn counts_characters_not_bytes() {
        // One CJK character differs; byte-wise the difference would be 3.
        assert_eq!(levenshtein("月", "日"), 1);
    }
}
