//! Canonical letter keys.
//!
//! An anagram key (sometimes called an alphagram) is the lowercased letters of
//! a word in sorted order. Two words are anagrams exactly when their keys are
//! equal, which is what lets the corpus index group anagrams with one hash
//! lookup.

use std::collections::HashMap;

/// Sorted, lowercased letters of `word`.
///
/// Empty input maps to the empty key.
///
/// ```
/// use letters::letter_key::anagram_key;
///
/// assert_eq!(anagram_key("Abroad"), "aabdor");
/// assert_eq!(anagram_key("aboard"), anagram_key("abroad"));
/// ```
#[must_use]
pub fn anagram_key(word: &str) -> String {
    sorted_letters(word).into_iter().collect()
}

/// Same as [`anagram_key`] but keeps the letters as a `Vec<char>`, which is what
/// the subset enumeration in the sub-anagram resolver walks over.
#[must_use]
pub fn sorted_letters(word: &str) -> Vec<char> {
    let mut letters: Vec<char> = word.to_lowercase().chars().collect();
    letters.sort_unstable();
    letters
}

/// Number of characters in `word` (not bytes).
#[must_use]
pub fn word_length(word: &str) -> usize {
    word.chars().count()
}

/// Is `first` an anagram of `second`?
#[must_use]
pub fn is_anagram(first: &str, second: &str) -> bool {
    word_length(first) == word_length(second) && anagram_key(first) == anagram_key(second)
}

/// Are all the letters of `part` (respecting multiplicity) contained in `whole`?
///
/// An empty `part` is never a sub-anagram.
#[must_use]
pub fn is_sub_anagram(part: &str, whole: &str) -> bool {
    if part.is_empty() || word_length(part) > word_length(whole) {
        return false;
    }

    let mut available: HashMap<char, usize> = HashMap::new();
    for c in whole.to_lowercase().chars() {
        *available.entry(c).or_default() += 1;
    }

    part.to_lowercase().chars().all(|c| match available.get_mut(&c) {
        Some(count) if *count > 0 => {
            *count -= 1;
            true
        }
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anagram_key_sorts_and_lowercases() {
        assert_eq!(anagram_key("listen"), "eilnst");
        assert_eq!(anagram_key("LISTEN"), "eilnst");
        assert_eq!(anagram_key("aboard"), "aabdor");
    }

    #[test]
    fn test_anagram_key_is_permutation_invariant() {
        let word = "triangle";
        let permutations = ["integral", "alerting", "relating", "altering", "gnartile"];
        for p in permutations {
            assert_eq!(anagram_key(word), anagram_key(p), "{p} should share a key with {word}");
        }
    }

    #[test]
    fn test_anagram_key_empty() {
        assert_eq!(anagram_key(""), "");
        assert!(sorted_letters("").is_empty());
    }

    #[test]
    fn test_word_length_counts_chars() {
        assert_eq!(word_length("aboard"), 6);
        assert_eq!(word_length(""), 0);
        assert_eq!(word_length("café"), 4);
    }

    #[test]
    fn test_is_anagram() {
        assert!(is_anagram("aboard", "abroad"));
        assert!(is_anagram("Dormitory", "dirtyroom"));
        assert!(!is_anagram("aboard", "abord"));
        assert!(!is_anagram("cat", "cot"));
    }

    #[test]
    fn test_is_sub_anagram() {
        assert!(is_sub_anagram("abord", "aboard"));
        assert!(is_sub_anagram("aa", "aboard"));
        assert!(is_sub_anagram("aboard", "abroad"));
        assert!(is_sub_anagram("DOB", "aboard"));
    }

    #[test]
    fn test_is_sub_anagram_respects_multiplicity() {
        // only two a's are available
        assert!(!is_sub_anagram("aaa", "aboard"));
        assert!(!is_sub_anagram("oo", "aboard"));
    }

    #[test]
    fn test_is_sub_anagram_edge_cases() {
        assert!(!is_sub_anagram("", "aboard"));
        assert!(!is_sub_anagram("aboards", "aboard"));
        assert!(!is_sub_anagram("z", ""));
    }
}
