//! The query facade the CLI and WASM shells talk to.
//!
//! [`Letters`] owns everything that is loaded once (the anagram dictionary, the
//! frequency corpus and its rarity scores, the ladder store) and exposes every
//! query as a method returning `Result<_, LettersError>`.
//!
//! A missing piece of data is reported as [`LettersError::NotLoaded`] rather than
//! an empty result, so a caller can tell "nothing matched" apart from "nothing
//! was loaded". Lookups that simply find nothing are not errors.
//!
//! # Examples
//!
//! ```
//! use letters::corpus::CorpusIndex;
//! use letters::engine::{Letters, LettersError};
//!
//! let letters = Letters::default()
//!     .with_dictionary(CorpusIndex::build("sowpods", ["aboard", "abroad", "abord", "aa"]));
//!
//! assert_eq!(letters.anagrams("aboard")?, vec!["abroad"]);
//! let subs = letters.sub_anagrams("aboard", false)?;
//! assert_eq!(subs.max, 6);
//!
//! // ladders were never loaded
//! assert!(matches!(letters.ladder("came-will"), Err(LettersError::NotLoaded { .. })));
//! # Ok::<(), LettersError>(())
//! ```

use crate::config::QueryConfig;
use crate::corpus::CorpusIndex;
use crate::errors::LoadError;
use crate::ladder::{LadderSearch, LadderStore, LadderSummary, PairLadder, PairLadders};
use crate::rarity::{rank_by_frequency, RarityScores, Score};
use crate::sub_anagrams::{SubAnagramResolver, SubAnagrams};
use log::{info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Query-time errors.
#[derive(Debug, thiserror::Error)]
pub enum LettersError {
    /// A query needed data that has not been loaded.
    #[error("{what} not loaded")]
    NotLoaded { what: &'static str },

    /// Random sampling had nothing to sample from.
    #[error("no match for {query}")]
    NoMatch { query: String },

    /// Loading corpus or ladder data failed.
    #[error("load failure: {0}")]
    Load(#[from] LoadError),
}

impl LettersError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            LettersError::NotLoaded { .. } => "Q001",
            LettersError::NoMatch { .. } => "Q002",
            LettersError::Load(_) => "Q003",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            LettersError::NotLoaded { .. } => "Query issued before its data was loaded",
            LettersError::NoMatch { .. } => "Random selection from an empty result set",
            LettersError::Load(_) => "Corpus or ladder data could not be loaded",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            LettersError::NotLoaded { .. } => "Anagram queries need the word dictionary, word scores need the frequency corpus, and ladder queries need ladder data. The query was made before the matching data was loaded.",
            LettersError::NoMatch { .. } => "A random conundrum or ladder was requested, but no candidate satisfies the requested length and difficulty.",
            LettersError::Load(_) => "Wraps a LoadError (see Load Errors section for specific error codes).",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            LettersError::NotLoaded { .. } => Some("Load the data first, e.g. pass --words, --frequencies or --ladders"),
            LettersError::NoMatch { .. } => Some("Try another word length or difficulty class"),
            LettersError::Load(_) => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        match self {
            LettersError::Load(le) => format!("{}\n  caused by: {}", self.code(), le.display_detailed()),
            _ => crate::errors::format_error_with_code_and_help(&self.to_string(), self.code(), self.help()),
        }
    }
}

/// Result of validating a word against the dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedWord {
    pub word: String,
    pub dictionary: String,
    pub dictionary_size: usize,
    pub valid: bool,
}

/// Everything loaded for serving queries.
#[derive(Debug, Default)]
pub struct Letters {
    config: QueryConfig,
    resolver: Option<SubAnagramResolver>,
    scores: Option<RarityScores>,
    ladders: Option<LadderStore>,
}

impl Letters {
    #[must_use]
    pub fn new(config: QueryConfig) -> Self {
        Self { config, ..Self::default() }
    }

    #[must_use]
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Install the dictionary used for validation, anagram and conundrum queries.
    #[must_use]
    pub fn with_dictionary(mut self, index: CorpusIndex) -> Self {
        self.resolver = Some(SubAnagramResolver::new(Arc::new(index), self.config.min_sub_anagram_size));
        self
    }

    /// Derive rarity scores from a frequency-bearing corpus. Ladders that are
    /// already loaded are rescored and re-ranked with them.
    #[must_use]
    pub fn with_frequency_corpus(mut self, index: CorpusIndex) -> Self {
        let scores = rank_by_frequency(index.frequencies());
        if let Some(ladders) = &mut self.ladders {
            ladders.rescore(&scores);
        }
        self.scores = Some(scores);
        self
    }

    /// Annotate `records` with the current rarity scores and install them as the
    /// ladder store. Until a frequency corpus is loaded every word scores 0, which
    /// leaves all ladders outside the (exclusive) difficulty bands.
    #[must_use]
    pub fn with_ladders<I>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = PairLadders>,
    {
        let scores = match &self.scores {
            Some(scores) => scores.clone(),
            None => {
                warn!("Loading ladders without word scores; every difficulty will be 0");
                RarityScores::default()
            }
        };
        self.ladders = Some(LadderStore::build(records, &scores, self.config));
        self
    }

    /// Native-only: read ladder records from a file or directory, then install them.
    ///
    /// # Errors
    ///
    /// [`LettersError::Load`] when the ladder data can't be read or decoded.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_ladders_from_path<P: AsRef<std::path::Path>>(self, path: P) -> Result<Self, LettersError> {
        let records = crate::ladder::source::load_from_path(path)?;
        Ok(self.with_ladders(records))
    }

    fn resolver(&self) -> Result<&SubAnagramResolver, LettersError> {
        self.resolver.as_ref().ok_or(LettersError::NotLoaded { what: "dictionary" })
    }

    fn dictionary(&self) -> Result<&CorpusIndex, LettersError> {
        self.resolver().map(SubAnagramResolver::index)
    }

    fn ladder_store(&self) -> Result<&LadderStore, LettersError> {
        self.ladders.as_ref().ok_or(LettersError::NotLoaded { what: "ladders" })
    }

    /// Rarity scores, once a frequency corpus is loaded.
    ///
    /// # Errors
    ///
    /// [`LettersError::NotLoaded`] without a frequency corpus.
    pub fn scores(&self) -> Result<&RarityScores, LettersError> {
        self.scores.as_ref().ok_or(LettersError::NotLoaded { what: "word scores" })
    }

    /// Is `word` in the dictionary?
    ///
    /// # Errors
    ///
    /// [`LettersError::NotLoaded`] without a dictionary.
    pub fn validate(&self, word: &str) -> Result<ValidatedWord, LettersError> {
        let dictionary = self.dictionary()?;
        Ok(ValidatedWord {
            word: word.to_string(),
            dictionary: dictionary.name().to_string(),
            dictionary_size: dictionary.size(),
            valid: dictionary.contains(word),
        })
    }

    /// Exact anagrams of `word`, alphabetically, without `word` itself.
    ///
    /// # Errors
    ///
    /// [`LettersError::NotLoaded`] without a dictionary.
    pub fn anagrams(&self, word: &str) -> Result<Vec<String>, LettersError> {
        Ok(self.dictionary()?.anagrams_of(word).into_iter().map(str::to_string).collect())
    }

    /// Sub-anagrams of `word` grouped by length; `best_only` keeps the longest group.
    ///
    /// # Errors
    ///
    /// [`LettersError::NotLoaded`] without a dictionary.
    pub fn sub_anagrams(&self, word: &str, best_only: bool) -> Result<SubAnagrams, LettersError> {
        let words = self.resolver()?.resolve(word);
        Ok(SubAnagrams::group(&words, best_only))
    }

    /// Conundrums (words without an anagram partner) of `length`, alphabetically.
    ///
    /// # Errors
    ///
    /// [`LettersError::NotLoaded`] without a dictionary.
    pub fn conundrums(&self, length: usize) -> Result<Vec<String>, LettersError> {
        Ok(self.dictionary()?.conundrums_of_length(length).iter().cloned().collect())
    }

    /// One conundrum of `length`, chosen uniformly.
    ///
    /// # Errors
    ///
    /// [`LettersError::NotLoaded`] without a dictionary, [`LettersError::NoMatch`]
    /// when there are no conundrums of that length.
    pub fn random_conundrum<R: Rng + ?Sized>(&self, length: usize, rng: &mut R) -> Result<String, LettersError> {
        let conundrums: Vec<&String> = self.dictionary()?.conundrums_of_length(length).iter().collect();
        conundrums
            .choose(rng)
            .map(|w| (*w).clone())
            .ok_or_else(|| LettersError::NoMatch { query: format!("conundrums of length {length}") })
    }

    /// Every dictionary word of `length`, alphabetically.
    ///
    /// # Errors
    ///
    /// [`LettersError::NotLoaded`] without a dictionary.
    pub fn words(&self, length: usize) -> Result<Vec<String>, LettersError> {
        Ok(self.dictionary()?.words_of_length(length).iter().cloned().collect())
    }

    /// Rarity score of every scored word of `length`, alphabetically.
    ///
    /// # Errors
    ///
    /// [`LettersError::NotLoaded`] without a frequency corpus.
    pub fn word_scores(&self, length: usize) -> Result<BTreeMap<String, Score>, LettersError> {
        Ok(self.scores()?.scores_of_length(length))
    }

    /// All ladders for `pair`, oriented the way `pair` is written.
    ///
    /// # Errors
    ///
    /// [`LettersError::NotLoaded`] without ladder data.
    pub fn ladder(&self, pair: &str) -> Result<PairLadder, LettersError> {
        Ok(self.ladder_store()?.ladder_for_pair(pair))
    }

    /// Easy ladders of one word length.
    ///
    /// # Errors
    ///
    /// [`LettersError::NotLoaded`] without ladder data.
    pub fn ladders(&self, word_length: usize) -> Result<Vec<LadderSummary>, LettersError> {
        Ok(self.ladder_store()?.ladders_by_length(word_length))
    }

    /// Ladders of one word length inside the band covered by `classes`.
    ///
    /// # Errors
    ///
    /// [`LettersError::NotLoaded`] without ladder data.
    pub fn ladders_by_difficulty_class(&self, word_length: usize, classes: &[u32]) -> Result<Vec<LadderSummary>, LettersError> {
        Ok(self.ladder_store()?.ladders_by_difficulty_class(word_length, classes))
    }

    /// Filtered, ranked and paginated ladder listing.
    ///
    /// # Errors
    ///
    /// [`LettersError::NotLoaded`] without ladder data.
    pub fn search_ladders(&self, search: &LadderSearch) -> Result<Vec<LadderSummary>, LettersError> {
        Ok(self.ladder_store()?.search(search))
    }

    /// One ladder of `word_length` chosen uniformly from difficulty class `class`.
    ///
    /// # Errors
    ///
    /// [`LettersError::NotLoaded`] without ladder data, [`LettersError::NoMatch`]
    /// when the class has no ladders of that length.
    pub fn random_ladder<R: Rng + ?Sized>(&self, class: u32, word_length: usize, rng: &mut R) -> Result<PairLadder, LettersError> {
        let (lower, upper) = self.config.class_band(class);
        self.random_ladder_in_range(word_length, lower, upper, rng)
    }

    /// One ladder of `word_length` chosen uniformly with difficulty inside `(lower, upper)`.
    ///
    /// # Errors
    ///
    /// As for [`Letters::random_ladder`].
    pub fn random_ladder_in_range<R: Rng + ?Sized>(
        &self,
        word_length: usize,
        lower: u64,
        upper: u64,
        rng: &mut R,
    ) -> Result<PairLadder, LettersError> {
        let ladder = self
            .ladder_store()?
            .random_ladder_in_range(word_length, lower, upper, rng)
            .ok_or_else(|| LettersError::NoMatch {
                query: format!("{word_length}-letter ladders with difficulty in ({lower}, {upper})"),
            })?;
        info!("Random ladder: {}", ladder.pair);
        Ok(ladder)
    }
}
