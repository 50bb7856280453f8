//! Sub-anagram resolution.
//!
//! A sub-anagram of `W` is any corpus word built from a subset (at least
//! [`MIN_SUB_ANAGRAM_SIZE`](crate::config::MIN_SUB_ANAGRAM_SIZE) letters) of the
//! letters of `W`, respecting how many times each letter appears.
//!
//! # Approach
//!
//! 1. Sort the letters of the query.
//! 2. For every size `k` from the minimum up to the full length, walk every
//!    `C(L, k)` combination of *positions* in the sorted sequence. Because the
//!    source sequence is sorted and combinations preserve relative order, each
//!    combination is already an anagram key.
//! 3. Union the anagram classes of all those keys, drop the query word, and sort
//!    longest first (alphabetical within a length).
//!
//! Positions rather than distinct letters are combined on purpose: `aboard` has
//! two `a`s, and only position-based combinations produce the key `aa`. The same
//! key may be produced several times; duplicates are removed at the word level.
//!
//! Results are memoized per query word. The cache key is the lowercased word and
//! nothing else, which is sound because the index behind the resolver never changes.

use crate::corpus::CorpusIndex;
use crate::letter_key::{sorted_letters, word_length};
use dashmap::DashMap;
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// Memoizing sub-anagram resolver over one immutable [`CorpusIndex`].
#[derive(Debug)]
pub struct SubAnagramResolver {
    index: Arc<CorpusIndex>,
    min_size: usize,
    memo: DashMap<String, Arc<Vec<String>>>,
}

impl SubAnagramResolver {
    #[must_use]
    pub fn new(index: Arc<CorpusIndex>, min_size: usize) -> Self {
        Self { index, min_size, memo: DashMap::new() }
    }

    #[must_use]
    pub fn index(&self) -> &CorpusIndex {
        &self.index
    }

    /// Sub-anagrams of `word`, longest first then alphabetical, never including `word`.
    ///
    /// Words shorter than the minimum subset size have no sub-anagrams.
    pub fn resolve(&self, word: &str) -> Arc<Vec<String>> {
        let key = word.to_lowercase();
        if let Some(hit) = self.memo.get(&key) {
            debug!("sub-anagram memo hit for '{key}'");
            return Arc::clone(hit.value());
        }

        // entry() holds the shard lock, so a concurrent request for the same word waits
        // for this computation instead of repeating it
        let query = key.clone();
        let entry = self
            .memo
            .entry(key)
            .or_insert_with(|| Arc::new(sub_anagrams_of(&self.index, &query, self.min_size)));
        Arc::clone(entry.value())
    }

    /// Number of distinct query words currently memoized.
    #[must_use]
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }
}

/// Uncached sub-anagram computation (see the module docs for the algorithm).
#[must_use]
pub fn sub_anagrams_of(index: &CorpusIndex, word: &str, min_size: usize) -> Vec<String> {
    let query = word.to_lowercase();
    let letters = sorted_letters(&query);

    let mut found: HashSet<&str> = HashSet::new();
    let mut keys_visited = 0usize;
    for size in min_size.max(1)..=letters.len() {
        for_each_combination(&letters, size, |key| {
            keys_visited += 1;
            found.extend(index.anagram_class(key).iter().map(String::as_str));
        });
    }
    found.remove(query.as_str());

    let mut words: Vec<String> = found.into_iter().map(str::to_string).collect();
    words.sort_by(|a, b| word_length(b).cmp(&word_length(a)).then_with(|| a.cmp(b)));
    debug!("'{query}': {keys_visited} subset keys, {} sub-anagrams", words.len());
    words
}

/// Call `visit` with every `size`-combination of positions in `letters`, joined
/// into a string, in lexicographic order of positions.
fn for_each_combination<F>(letters: &[char], size: usize, mut visit: F)
where
    F: FnMut(&str),
{
    let n = letters.len();
    if size == 0 || size > n {
        return;
    }

    let mut positions: Vec<usize> = (0..size).collect();
    let mut key = String::with_capacity(size * 4);
    loop {
        key.clear();
        key.extend(positions.iter().map(|&i| letters[i]));
        visit(&key);

        // find the rightmost position that can still move right
        let Some(i) = (0..size).rev().find(|&i| positions[i] != i + n - size) else {
            return;
        };
        positions[i] += 1;
        for j in i + 1..size {
            positions[j] = positions[j - 1] + 1;
        }
    }
}

/// Sub-anagrams of one length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Anagrams {
    pub words: Vec<String>,
    pub count: usize,
}

/// Sub-anagrams grouped by length, as served to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubAnagrams {
    /// Length of the longest sub-anagram (0 when there are none).
    pub max: usize,
    pub words: BTreeMap<usize, Anagrams>,
}

impl SubAnagrams {
    /// Group a longest-first list by length. With `best_only`, only the longest
    /// group is kept.
    #[must_use]
    pub fn group(sorted_words: &[String], best_only: bool) -> SubAnagrams {
        let max = sorted_words.iter().map(|w| word_length(w)).max().unwrap_or(0);
        let mut words: BTreeMap<usize, Anagrams> = BTreeMap::new();
        for word in sorted_words {
            let len = word_length(word);
            if best_only && len != max {
                continue;
            }
            let group = words.entry(len).or_default();
            group.words.push(word.clone());
            group.count = group.words.len();
        }
        SubAnagrams { max, words }
    }

    /// Total number of words across all groups.
    #[must_use]
    pub fn total(&self) -> usize {
        self.words.values().map(|g| g.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> Arc<CorpusIndex> {
        Arc::new(CorpusIndex::build(
            "sowpods",
            ["aa", "ab", "ad", "bo", "do", "oar", "abo", "bad", "dab", "road", "broad", "abord", "abroad", "aboard", "zoo", "a"],
        ))
    }

    fn combinations(letters: &str, size: usize) -> Vec<String> {
        let letters: Vec<char> = letters.chars().collect();
        let mut out = Vec::new();
        for_each_combination(&letters, size, |k| out.push(k.to_string()));
        out
    }

    #[test]
    fn test_combinations_count() {
        assert_eq!(combinations("abcd", 2), vec!["ab", "ac", "ad", "bc", "bd", "cd"]);
        assert_eq!(combinations("abcd", 4), vec!["abcd"]);
        assert_eq!(combinations("abcdef", 3).len(), 20);
        assert!(combinations("abc", 4).is_empty());
        assert!(combinations("abc", 0).is_empty());
    }

    #[test]
    fn test_combinations_keep_repeated_letters() {
        // positions, not distinct letters: "aab" has two different "ab" subsets
        assert_eq!(combinations("aab", 2), vec!["aa", "ab", "ab"]);
    }

    #[test]
    fn test_sub_anagrams_of_aboard() {
        let index = sample_index();
        let words = sub_anagrams_of(&index, "aboard", 2);
        assert!(words.contains(&"abroad".to_string()));
        assert!(words.contains(&"abord".to_string()));
        assert!(words.contains(&"aa".to_string()));
        assert!(words.contains(&"broad".to_string()));
        assert!(!words.contains(&"aboard".to_string()));
        assert!(!words.contains(&"zoo".to_string()));
        // single letters are below the minimum size
        assert!(!words.contains(&"a".to_string()));
    }

    #[test]
    fn test_sub_anagrams_sorted_longest_first_then_alphabetical() {
        let index = sample_index();
        let words = sub_anagrams_of(&index, "aboard", 2);
        assert_eq!(
            words,
            vec!["abroad", "abord", "broad", "road", "abo", "bad", "dab", "oar", "aa", "ab", "ad", "bo", "do"]
        );
    }

    #[test]
    fn test_sub_anagrams_no_duplicates_with_repeated_letters() {
        let index = sample_index();
        let words = sub_anagrams_of(&index, "aboard", 2);
        let unique: HashSet<&String> = words.iter().collect();
        assert_eq!(unique.len(), words.len());
    }

    #[test]
    fn test_repeated_letters_are_required_for_double_letter_words() {
        let index = sample_index();
        // only one 'a' available, so "aa" cannot be formed
        let words = sub_anagrams_of(&index, "abroz", 2);
        assert!(!words.contains(&"aa".to_string()));
        assert!(words.contains(&"ab".to_string()));
    }

    #[test]
    fn test_short_and_empty_queries() {
        let index = sample_index();
        assert!(sub_anagrams_of(&index, "a", 2).is_empty());
        assert!(sub_anagrams_of(&index, "", 2).is_empty());
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let index = sample_index();
        assert_eq!(sub_anagrams_of(&index, "ABOARD", 2), sub_anagrams_of(&index, "aboard", 2));
    }

    #[test]
    fn test_min_size_is_respected() {
        let index = sample_index();
        let words = sub_anagrams_of(&index, "aboard", 5);
        assert_eq!(words, vec!["abroad", "abord", "broad"]);
    }

    #[test]
    fn test_resolver_memoizes() {
        let resolver = SubAnagramResolver::new(sample_index(), 2);
        let first = resolver.resolve("aboard");
        let second = resolver.resolve("Aboard");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(resolver.memo_len(), 1);
        resolver.resolve("bad");
        assert_eq!(resolver.memo_len(), 2);
    }

    #[test]
    fn test_resolver_concurrent_requests_agree() {
        let resolver = Arc::new(SubAnagramResolver::new(sample_index(), 2));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let resolver = Arc::clone(&resolver);
                std::thread::spawn(move || resolver.resolve("aboard"))
            })
            .collect();
        let results: Vec<Arc<Vec<String>>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for r in &results {
            assert_eq!(**r, *results[0]);
        }
        assert_eq!(resolver.memo_len(), 1);
    }

    #[test]
    fn test_group_by_length() {
        let index = sample_index();
        let words = sub_anagrams_of(&index, "aboard", 2);
        let grouped = SubAnagrams::group(&words, false);
        assert_eq!(grouped.max, 6);
        assert_eq!(grouped.words[&6].words, vec!["abroad"]);
        assert_eq!(grouped.words[&5].count, 2);
        assert!(grouped.words[&2].words.contains(&"aa".to_string()));
        assert_eq!(grouped.total(), words.len());
    }

    #[test]
    fn test_group_best_only() {
        let words: Vec<String> = ["abroad", "abord", "broad", "aa"].iter().map(|s| s.to_string()).collect();
        let grouped = SubAnagrams::group(&words, true);
        assert_eq!(grouped.max, 6);
        assert_eq!(grouped.words.len(), 1);
        assert_eq!(grouped.words[&6], Anagrams { words: vec!["abroad".to_string()], count: 1 });
    }

    #[test]
    fn test_group_empty() {
        let grouped = SubAnagrams::group(&[], false);
        assert_eq!(grouped.max, 0);
        assert!(grouped.words.is_empty());
    }
}
