//! Word ladders: precomputed chains of single-letter changes between two words.
//!
//! - `mod.rs`: pair strings and the types shared by the store and the loader
//! - [`store`]: the read-only [`LadderStore`] and its queries
//! - [`source`]: decoding ladder JSON files into [`PairLadders`] records

pub mod source;
pub mod store;

pub use store::{load_ladders, LadderSearch, LadderStore};

use crate::config::{CHAIN_SEPARATOR, PAIR_SEPARATOR};
use crate::letter_key::word_length;
use nom::bytes::complete::take_till1;
use nom::character::complete::char as separator;
use nom::combinator::all_consuming;
use nom::sequence::separated_pair;
use nom::IResult;
use serde::Serialize;

/// One ingestion record: a pair and every chain recorded for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairLadders {
    pub pair: String,
    pub chains: Vec<Vec<String>>,
}

/// One stored chain for a pair, annotated at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LadderVariant {
    pub pair: String,
    pub chain: Vec<String>,
    /// Number of words in the chain.
    pub length: usize,
    /// Number of variants recorded for this pair.
    pub variations: usize,
    /// 1-based index of this variant within its pair.
    pub variant: usize,
    /// Sum of the rarity scores of every word in the chain.
    pub difficulty: u64,
    pub hardest_word: Option<String>,
    /// Score of `hardest_word`, 0 when there is none.
    pub hardest_word_score: u32,
    /// Length of each endpoint word, cached for length filters.
    pub(crate) word_length: usize,
}

impl LadderVariant {
    #[must_use]
    pub fn chain_string(&self) -> String {
        self.chain.join(CHAIN_SEPARATOR)
    }
}

/// One row of a ladder listing: a pair represented by its best variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LadderSummary {
    pub pair: String,
    pub min_length: usize,
    pub difficulty: u64,
    /// Number of variants recorded for the pair.
    pub solutions: usize,
}

impl From<&LadderVariant> for LadderSummary {
    fn from(v: &LadderVariant) -> Self {
        LadderSummary {
            pair: v.pair.clone(),
            min_length: v.length,
            difficulty: v.difficulty,
            solutions: v.variations,
        }
    }
}

/// All chains for one pair, oriented in the order the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairLadder {
    pub pair: String,
    /// Comma-joined chains, first word matching the first word of `pair`.
    pub chains: Vec<String>,
    /// Longest chain length among the variants, `None` when nothing was found.
    pub minimum_chain: Option<usize>,
    /// Lowest difficulty among the variants, `None` when nothing was found.
    pub minimum_difficulty: Option<u64>,
}

impl PairLadder {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

fn pair_word(input: &str) -> IResult<&str, &str> {
    take_till1(|c| c == PAIR_SEPARATOR)(input)
}

fn pair_parts(input: &str) -> IResult<&str, (&str, &str)> {
    all_consuming(separated_pair(pair_word, separator(PAIR_SEPARATOR), pair_word))(input)
}

/// Split `first-second` into its two words. `None` unless there are exactly two
/// non-empty words.
#[must_use]
pub fn split_pair(pair: &str) -> Option<(&str, &str)> {
    pair_parts(pair).ok().map(|(_, words)| words)
}

/// `second-first` for `first-second`.
#[must_use]
pub fn flip_pair(pair: &str) -> Option<String> {
    let (first, second) = split_pair(pair)?;
    Some(format!("{second}{PAIR_SEPARATOR}{first}"))
}

/// The pair with its words in alphabetical order.
#[must_use]
pub fn canonical_pair(pair: &str) -> Option<String> {
    let (first, second) = split_pair(pair)?;
    let (a, b) = if first <= second { (first, second) } else { (second, first) };
    Some(format!("{a}{PAIR_SEPARATOR}{b}"))
}

/// Word length shared by both words of the pair; `None` if malformed or unequal.
#[must_use]
pub fn pair_word_length(pair: &str) -> Option<usize> {
    let (first, second) = split_pair(pair)?;
    let len = word_length(first);
    (len == word_length(second)).then_some(len)
}
