//! Rarity scores derived from word frequencies.
//!
//! Words are ranked by descending frequency with dense ranking: the most frequent
//! word scores 1, words with equal frequency share a score, and the next distinct
//! frequency scores one more than the previous. Higher score means rarer word.
//!
//! Words without a frequency get no score at all. When a chain is scored, a
//! missing score counts as 0 toward difficulty and can never make a word the
//! "hardest" one.

use instant::Instant;
use log::info;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::letter_key::word_length;

pub type Score = u32;

/// Word -> dense frequency rank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RarityScores {
    scores: HashMap<String, Score>,
}

/// The rarest word of a chain and its score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HardestWord {
    pub word: String,
    pub score: Score,
}

/// Rank `(word, frequency)` pairs by descending frequency (dense ranking).
///
/// ```
/// use letters::rarity::rank_by_frequency;
///
/// let scores = rank_by_frequency([("a", 100), ("b", 100), ("c", 90)]);
/// assert_eq!(scores.get("a"), Some(1));
/// assert_eq!(scores.get("b"), Some(1));
/// assert_eq!(scores.get("c"), Some(2));
/// ```
pub fn rank_by_frequency<'a, I>(entries: I) -> RarityScores
where
    I: IntoIterator<Item = (&'a str, u64)>,
{
    let start = Instant::now();
    let mut sorted: Vec<(&str, u64)> = entries.into_iter().collect();
    // ties are ordered by word only so the ranking is reproducible; they share a score anyway
    sorted.sort_by(|(wa, fa), (wb, fb)| fb.cmp(fa).then_with(|| wa.cmp(wb)));

    let mut scores = HashMap::with_capacity(sorted.len());
    let mut rank: Score = 0;
    let mut previous: Option<u64> = None;
    for (word, frequency) in sorted {
        if previous != Some(frequency) {
            rank += 1;
            previous = Some(frequency);
        }
        scores.entry(word.to_lowercase()).or_insert(rank);
    }

    info!(
        "Ranked {} words into {rank} rarity scores in {:.3}s",
        scores.len(),
        start.elapsed().as_secs_f64()
    );
    RarityScores { scores }
}

impl RarityScores {
    /// Score for `word` (case-insensitive), or `None` when the word had no frequency.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<Score> {
        match self.scores.get(word) {
            Some(score) => Some(*score),
            None if word.chars().any(char::is_uppercase) => self.scores.get(&word.to_lowercase()).copied(),
            None => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Sum of the scores of every word in `chain`; unscored words add 0.
    pub fn ladder_difficulty<S: AsRef<str>>(&self, chain: &[S]) -> u64 {
        chain
            .iter()
            .map(|w| u64::from(self.get(w.as_ref()).unwrap_or(0)))
            .sum()
    }

    /// The first word of `chain` with the strictly highest score.
    ///
    /// `None` when no word in the chain has a positive score.
    pub fn hardest_word<S: AsRef<str>>(&self, chain: &[S]) -> Option<HardestWord> {
        let mut hardest: Option<HardestWord> = None;
        let mut best: Score = 0;
        for word in chain {
            let score = self.get(word.as_ref()).unwrap_or(0);
            if score > best {
                best = score;
                hardest = Some(HardestWord { word: word.as_ref().to_string(), score });
            }
        }
        hardest
    }

    /// Every scored word of exactly `length` characters, alphabetically.
    #[must_use]
    pub fn scores_of_length(&self, length: usize) -> BTreeMap<String, Score> {
        self.scores
            .iter()
            .filter(|(word, _)| word_length(word) == length)
            .map(|(word, score)| (word.clone(), *score))
            .collect()
    }
}

impl FromIterator<(String, Score)> for RarityScores {
    fn from_iter<T: IntoIterator<Item = (String, Score)>>(iter: T) -> Self {
        RarityScores { scores: iter.into_iter().collect() }
    }
}
