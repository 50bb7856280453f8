//! Parse the raw corpus files the index is built from.
//!
//! Two formats are understood:
//! - a plain word list, one word per line (SOWPODS style), read into [`WordList`];
//! - a frequency list, `word frequency` separated by whitespace on each line
//!   (the Wikipedia word-frequency format), read into [`FrequencyList`].
//!
//! Both parsers are lenient in the same way: lines are trimmed, blank or
//! malformed lines are skipped silently, and words are normalized to lowercase.
//!
//! As with the rest of the crate, parsing from a `&str` works everywhere
//! (including WASM, where text arrives via `fetch()`), while `load_from_path`
//! is only compiled for native builds.

use nom::bytes::complete::take_till1;
use nom::character::complete::{space1, u64 as frequency};
use nom::combinator::all_consuming;
use nom::sequence::separated_pair;
use nom::IResult;
use std::collections::HashSet;

#[cfg(not(target_arch = "wasm32"))]
use crate::errors::LoadError;

/// A plain word corpus: lowercase, deduplicated, sorted by (length, alphabetical).
#[derive(Debug, Clone, Default)]
pub struct WordList {
    pub words: Vec<String>,
}

/// A frequency-annotated corpus in file order, first occurrence of a word wins.
#[derive(Debug, Clone, Default)]
pub struct FrequencyList {
    pub entries: Vec<(String, u64)>,
}

impl WordList {
    /// Parse one word per line.
    #[must_use]
    pub fn parse_from_str(contents: &str) -> WordList {
        let mut words: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.contains(char::is_whitespace))
            .map(str::to_lowercase)
            .collect();

        // dedup() only removes adjacent duplicates, so sort alphabetically first
        words.sort();
        words.dedup();
        words.sort_by(|a, b| a.chars().count().cmp(&b.chars().count()).then_with(|| a.cmp(b)));

        WordList { words }
    }

    /// Native-only convenience method: read from a file path and parse.
    ///
    /// # Errors
    ///
    /// Will return [`LoadError::Io`] if unable to read a file at `path`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<WordList, LoadError> {
        read_corpus(path.as_ref()).map(|data| Self::parse_from_str(&data))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// `word frequency`, nothing else on the line.
fn frequency_line(line: &str) -> IResult<&str, (&str, u64)> {
    all_consuming(separated_pair(take_till1(char::is_whitespace), space1, frequency))(line)
}

impl FrequencyList {
    /// Parse `word frequency` lines.
    #[must_use]
    pub fn parse_from_str(contents: &str) -> FrequencyList {
        let mut seen = HashSet::new();
        let entries = contents
            .lines()
            .filter_map(|raw_line| {
                let (_, (word, freq)) = frequency_line(raw_line.trim()).ok()?;
                let word = word.to_lowercase();
                seen.insert(word.clone()).then_some((word, freq))
            })
            .collect();

        FrequencyList { entries }
    }

    /// Native-only convenience method: read from a file path and parse.
    ///
    /// # Errors
    ///
    /// Will return [`LoadError::Io`] if unable to read a file at `path`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<FrequencyList, LoadError> {
        read_corpus(path.as_ref()).map(|data| Self::parse_from_str(&data))
    }

    /// Keep only the first `limit` entries (0 keeps everything).
    #[must_use]
    pub fn truncated(mut self, limit: usize) -> FrequencyList {
        if limit != 0 {
            self.entries.truncate(limit);
        }
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn read_corpus(path: &std::path::Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &FrequencyList) -> Vec<&str> {
        list.entries.iter().map(|(word, _)| word.as_str()).collect()
    }

    #[test]
    fn test_parse_words_basic() {
        let list = WordList::parse_from_str("aardvark\naa\naah\n");
        assert_eq!(list.words, vec!["aa", "aah", "aardvark"]);
    }

    #[test]
    fn test_parse_words_normalizes_and_dedups() {
        let list = WordList::parse_from_str("Cat\ncat\n  DOG  \n\n\ncat");
        assert_eq!(list.words, vec!["cat", "dog"]);
    }

    #[test]
    fn test_parse_words_skips_multi_token_lines() {
        let list = WordList::parse_from_str("cat\nnot a word\ndog");
        assert_eq!(list.words, vec!["cat", "dog"]);
    }

    #[test]
    fn test_parse_words_empty_input() {
        let list = WordList::parse_from_str("");
        assert!(list.is_empty());
    }

    #[test]
    fn test_parse_frequencies_basic() {
        let list = FrequencyList::parse_from_str("the 100\nof 90\nand 90\n");
        assert_eq!(
            list.entries,
            vec![("the".to_string(), 100), ("of".to_string(), 90), ("and".to_string(), 90)]
        );
    }

    #[test]
    fn test_parse_frequencies_handles_whitespace() {
        let list = FrequencyList::parse_from_str("  the\t100  \nof    90");
        assert_eq!(words(&list), vec!["the", "of"]);
    }

    #[test]
    fn test_parse_frequencies_skips_malformed_lines() {
        let input = "the 100\nbroken\nword abc\ntoo many 3 tokens\n-5 x\nof 90";
        let list = FrequencyList::parse_from_str(input);
        assert_eq!(words(&list), vec!["the", "of"]);
    }

    #[test]
    fn test_parse_frequencies_first_occurrence_wins() {
        let list = FrequencyList::parse_from_str("The 100\nthe 5");
        assert_eq!(list.entries, vec![("the".to_string(), 100)]);
    }

    #[test]
    fn test_truncated() {
        let list = FrequencyList::parse_from_str("a 3\nb 2\nc 1");
        assert_eq!(list.clone().truncated(2).len(), 2);
        assert_eq!(list.truncated(0).len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = WordList::load_from_path("definitely/not/here.txt").unwrap_err();
        assert_eq!(err.code(), "L001");
        assert!(err.to_string().contains("definitely/not/here.txt"));
    }
}
