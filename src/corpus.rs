//! The corpus index: every word of a named dictionary, grouped by length and by
//! anagram key.
//!
//! The index is built once and never mutated afterwards, so every query here is a
//! plain read. The only lazily computed piece is the conundrum set per length,
//! held in a `OnceCell` so concurrent callers compute it at most once.

use crate::letter_key::{anagram_key, word_length};
use crate::word_list::{FrequencyList, WordList};
use instant::Instant;
use log::{debug, info};
use once_cell::sync::OnceCell;
use std::collections::{BTreeSet, HashMap, HashSet};

static NO_WORDS: BTreeSet<String> = BTreeSet::new();

/// Read-only index over one dictionary.
#[derive(Debug)]
pub struct CorpusIndex {
    name: String,
    words: HashSet<String>,
    frequencies: HashMap<String, u64>,
    by_length: HashMap<usize, BTreeSet<String>>,
    by_anagram_key: HashMap<String, BTreeSet<String>>,
    /// One slot per length present in the corpus, filled on first request.
    conundrums: HashMap<usize, OnceCell<BTreeSet<String>>>,
}

/// Build an index from a parsed word list, attaching frequencies when the corpus
/// carries them. Words that only appear in `frequencies` are added to the corpus too.
#[must_use]
pub fn load_corpus(name: &str, word_list: &WordList, frequencies: Option<&FrequencyList>) -> CorpusIndex {
    let plain = word_list.words.iter().map(|w| (w.as_str(), None));
    match frequencies {
        Some(frequencies) => CorpusIndex::build_with_frequencies(
            name,
            plain.chain(frequencies.entries.iter().map(|(w, f)| (w.as_str(), Some(*f)))),
        ),
        None => CorpusIndex::build_with_frequencies(name, plain),
    }
}

impl CorpusIndex {
    /// Single pass over `words`: each word is lowercased, then filed under its
    /// length and its anagram key. Empty strings are ignored.
    pub fn build<I, S>(name: &str, words: I) -> CorpusIndex
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build_with_frequencies(name, words.into_iter().map(|w| (w, None)))
    }

    /// Like [`CorpusIndex::build`] but each word may carry a frequency. When a word
    /// appears more than once, the first frequency seen for it is kept.
    pub fn build_with_frequencies<I, S>(name: &str, entries: I) -> CorpusIndex
    where
        I: IntoIterator<Item = (S, Option<u64>)>,
        S: AsRef<str>,
    {
        let start = Instant::now();
        let mut index = CorpusIndex {
            name: name.to_string(),
            words: HashSet::new(),
            frequencies: HashMap::new(),
            by_length: HashMap::new(),
            by_anagram_key: HashMap::new(),
            conundrums: HashMap::new(),
        };

        for (raw, frequency) in entries {
            let word = raw.as_ref().trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            if let Some(frequency) = frequency {
                index.frequencies.entry(word.clone()).or_insert(frequency);
            }
            if !index.words.insert(word.clone()) {
                continue;
            }
            index.by_length.entry(word_length(&word)).or_default().insert(word.clone());
            index.by_anagram_key.entry(anagram_key(&word)).or_default().insert(word);
        }

        index.conundrums = index.by_length.keys().map(|&len| (len, OnceCell::new())).collect();

        info!(
            "Indexed {} '{}' words ({} anagram classes, {} with frequencies) in {:.3}s",
            index.words.len(),
            index.name,
            index.by_anagram_key.len(),
            index.frequencies.len(),
            start.elapsed().as_secs_f64()
        );
        index
    }

    /// Name of the dictionary this index was built from (e.g. `sowpods`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total number of distinct words.
    #[must_use]
    pub fn size(&self) -> usize {
        self.words.len()
    }

    /// Case-insensitive membership test.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// All words of exactly `length` characters, alphabetically. Empty when there are none.
    #[must_use]
    pub fn words_of_length(&self, length: usize) -> &BTreeSet<String> {
        self.by_length.get(&length).unwrap_or(&NO_WORDS)
    }

    /// Every word sharing `key` (already an anagram key), alphabetically.
    #[must_use]
    pub fn anagram_class(&self, key: &str) -> &BTreeSet<String> {
        self.by_anagram_key.get(key).unwrap_or(&NO_WORDS)
    }

    /// Exact anagrams of `word`, excluding `word` itself (compared case-insensitively).
    #[must_use]
    pub fn anagrams_of(&self, word: &str) -> Vec<&str> {
        let lowered = word.to_lowercase();
        self.anagram_class(&anagram_key(&lowered))
            .iter()
            .filter(|w| **w != lowered)
            .map(String::as_str)
            .collect()
    }

    /// Words of `length` with no anagram partner, alphabetically.
    ///
    /// Computed on first request for each length and cached for the lifetime of the index.
    #[must_use]
    pub fn conundrums_of_length(&self, length: usize) -> &BTreeSet<String> {
        let Some(cell) = self.conundrums.get(&length) else {
            return &NO_WORDS;
        };
        cell.get_or_init(|| {
            let conundrums: BTreeSet<String> = self
                .words_of_length(length)
                .iter()
                .filter(|w| self.anagram_class(&anagram_key(w)).len() == 1)
                .cloned()
                .collect();
            debug!("Computed {} conundrums of length {length}", conundrums.len());
            conundrums
        })
    }

    /// Frequency recorded for `word`, if the corpus carries one.
    #[must_use]
    pub fn frequency(&self, word: &str) -> Option<u64> {
        self.frequencies.get(&word.to_lowercase()).copied()
    }

    /// `(word, frequency)` for every word that has a frequency, in no particular order.
    pub fn frequencies(&self) -> impl Iterator<Item = (&str, u64)> {
        self.frequencies.iter().map(|(w, f)| (w.as_str(), *f))
    }
}
