//! The ladder store: every loaded ladder variant, ranked once at load time.
//!
//! Variants are kept in a single vector sorted by
//! `(difficulty, hardest_word_score, pair, variant)`. Every listing query is a
//! filter over that vector, so results come out already ranked, and a pair is
//! represented by the first of its variants that survives the filter.

use super::{flip_pair, pair_word_length, split_pair, LadderSummary, LadderVariant, PairLadder, PairLadders};
use crate::config::{QueryConfig, CHAIN_SEPARATOR};
use crate::rarity::RarityScores;
use instant::Instant;
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// Read-only collection of ladder variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LadderStore {
    config: QueryConfig,
    variants: Vec<LadderVariant>,
    by_pair: HashMap<String, Vec<usize>>,
}

/// Conjunctive ladder filters. Empty lists and `None` mean "don't filter on this".
///
/// Field aliases accept the names used by the JSON search API (`length`,
/// `difficulty`, `ladder_filter`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LadderSearch {
    /// Word lengths; a ladder matches if its words have any of these lengths.
    #[serde(alias = "length")]
    pub lengths: Vec<usize>,
    /// Difficulty classes, collapsed into one contiguous band.
    #[serde(alias = "difficulty")]
    pub difficulty_classes: Vec<u32>,
    /// Case-sensitive substring of the stored pair string.
    #[serde(alias = "ladder_filter")]
    pub substring: Option<String>,
    /// Maximum number of ladder rows considered; defaults to the configured page size.
    pub page_size: Option<usize>,
}

/// Annotate and rank ladder records using the default [`QueryConfig`].
pub fn load_ladders<I>(records: I, scores: &RarityScores) -> LadderStore
where
    I: IntoIterator<Item = PairLadders>,
{
    LadderStore::build(records, scores, QueryConfig::default())
}

impl LadderStore {
    /// Annotate every chain with its length, difficulty and hardest word, then rank.
    ///
    /// Records are skipped (with a warning) when the pair is malformed, when its
    /// two words differ in length, or when the same pair was already loaded. Chains
    /// with fewer than two words are dropped from their record.
    pub fn build<I>(records: I, scores: &RarityScores, config: QueryConfig) -> LadderStore
    where
        I: IntoIterator<Item = PairLadders>,
    {
        let start = Instant::now();
        let mut variants = Vec::new();
        let mut loaded_pairs: HashSet<String> = HashSet::new();

        for record in records {
            let Some(word_length) = pair_word_length(&record.pair) else {
                warn!("Skipping ladder with invalid pair \"{}\"", record.pair);
                continue;
            };
            if loaded_pairs.contains(&record.pair) {
                warn!("Skipping duplicate ladder pair \"{}\"", record.pair);
                continue;
            }

            let chains: Vec<Vec<String>> = record
                .chains
                .into_iter()
                .filter(|chain| {
                    let keep = chain.len() >= 2;
                    if !keep {
                        debug!("Dropping short chain {chain:?} for \"{}\"", record.pair);
                    }
                    keep
                })
                .collect();
            if chains.is_empty() {
                warn!("Skipping ladder pair \"{}\" with no usable chains", record.pair);
                continue;
            }

            let variations = chains.len();
            for (index, chain) in chains.into_iter().enumerate() {
                variants.push(LadderVariant {
                    pair: record.pair.clone(),
                    length: chain.len(),
                    variations,
                    variant: index + 1,
                    difficulty: 0,
                    hardest_word: None,
                    hardest_word_score: 0,
                    chain,
                    word_length,
                });
            }
            loaded_pairs.insert(record.pair);
        }

        let mut store = LadderStore { config, variants, by_pair: HashMap::new() };
        store.rank(scores);
        info!(
            "Loaded {} ladder variants for {} pairs in {:.3}s",
            store.variants.len(),
            store.by_pair.len(),
            start.elapsed().as_secs_f64()
        );
        store
    }

    /// Recompute every variant's difficulty and hardest word from `scores`, then re-rank.
    pub fn rescore(&mut self, scores: &RarityScores) {
        let start = Instant::now();
        self.rank(scores);
        info!("Rescored {} ladder variants in {:.3}s", self.variants.len(), start.elapsed().as_secs_f64());
    }

    fn rank(&mut self, scores: &RarityScores) {
        for v in &mut self.variants {
            let hardest = scores.hardest_word(&v.chain);
            v.difficulty = scores.ladder_difficulty(&v.chain);
            v.hardest_word_score = hardest.as_ref().map_or(0, |h| h.score);
            v.hardest_word = hardest.map(|h| h.word);
        }

        self.variants.sort_by(|a, b| {
            a.difficulty
                .cmp(&b.difficulty)
                .then_with(|| a.hardest_word_score.cmp(&b.hardest_word_score))
                .then_with(|| a.pair.cmp(&b.pair))
                .then_with(|| a.variant.cmp(&b.variant))
        });

        self.by_pair.clear();
        for (i, v) in self.variants.iter().enumerate() {
            self.by_pair.entry(v.pair.clone()).or_default().push(i);
        }
    }

    #[must_use]
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Number of variants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Number of distinct stored pairs.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.by_pair.len()
    }

    /// All variants for `pair`, looked up in both word orders.
    ///
    /// Chains stored under the opposite order are reversed so every chain starts
    /// with the first word of `pair`. Variants are ordered by hardest-word score,
    /// then variant number. A pair with no ladders yields an empty result.
    #[must_use]
    pub fn ladder_for_pair(&self, pair: &str) -> PairLadder {
        let mut lookups = vec![pair.to_string()];
        if let Some(flipped) = flip_pair(pair) {
            if flipped != pair {
                lookups.push(flipped);
            }
        }

        let mut found: Vec<&LadderVariant> = lookups
            .iter()
            .filter_map(|p| self.by_pair.get(p))
            .flatten()
            .map(|&i| &self.variants[i])
            .collect();
        found.sort_by_key(|v| (v.hardest_word_score, v.variant));

        oriented(pair, &found)
    }

    /// Easy ladders for one word length: difficulty strictly between 0 and the
    /// configured easy ceiling, one row per pair.
    #[must_use]
    pub fn ladders_by_length(&self, word_length: usize) -> Vec<LadderSummary> {
        self.ladders_in_band(word_length, 0, self.config.easy_ladder_ceiling)
    }

    /// Ladders for one word length whose difficulty lies strictly inside `(lower, upper)`.
    #[must_use]
    pub fn ladders_in_band(&self, word_length: usize, lower: u64, upper: u64) -> Vec<LadderSummary> {
        summarize(self.variants_in_band(word_length, lower, upper))
    }

    /// Ladders for one word length in the band covered by `classes`
    /// (see [`QueryConfig::difficulty_band`]). No classes, no ladders.
    #[must_use]
    pub fn ladders_by_difficulty_class(&self, word_length: usize, classes: &[u32]) -> Vec<LadderSummary> {
        match self.config.difficulty_band(classes) {
            Some((lower, upper)) => self.ladders_in_band(word_length, lower, upper),
            None => Vec::new(),
        }
    }

    /// Apply every supplied filter, keep the first `page_size` ranked variants,
    /// then collapse them to one row per pair.
    #[must_use]
    pub fn search(&self, search: &LadderSearch) -> Vec<LadderSummary> {
        let band = self.config.difficulty_band(&search.difficulty_classes);
        let page_size = search.page_size.unwrap_or(self.config.default_page_size);

        let matching = self
            .variants
            .iter()
            .filter(|v| band.map_or(true, |(lower, upper)| v.difficulty > lower && v.difficulty < upper))
            .filter(|v| search.lengths.is_empty() || search.lengths.contains(&v.word_length))
            .filter(|v| search.substring.as_deref().map_or(true, |s| v.pair.contains(s)))
            .take(page_size);

        summarize(matching)
    }

    /// One ladder picked uniformly from the ranked variants of `word_length`
    /// inside `(lower, upper)`. `None` when the band is empty.
    pub fn random_ladder_in_range<R>(&self, word_length: usize, lower: u64, upper: u64, rng: &mut R) -> Option<PairLadder>
    where
        R: Rng + ?Sized,
    {
        let candidates: Vec<&LadderVariant> = self.variants_in_band(word_length, lower, upper).collect();
        let chosen = candidates.choose(rng)?;
        debug!("Picked \"{}\" out of {} candidates", chosen.pair, candidates.len());
        Some(oriented(&chosen.pair, &[*chosen]))
    }

    fn variants_in_band(&self, word_length: usize, lower: u64, upper: u64) -> impl Iterator<Item = &LadderVariant> {
        self.variants
            .iter()
            .filter(move |v| v.word_length == word_length && v.difficulty > lower && v.difficulty < upper)
    }
}

/// One summary per pair, keeping the first variant seen.
fn summarize<'a>(variants: impl Iterator<Item = &'a LadderVariant>) -> Vec<LadderSummary> {
    let mut seen: HashSet<&str> = HashSet::new();
    variants
        .filter(|v| seen.insert(v.pair.as_str()))
        .map(LadderSummary::from)
        .collect()
}

/// Does `variant`'s chain already start at `first`? A chain that touches neither
/// end falls back to comparing the stored pair with `requested`.
fn runs_forward(variant: &LadderVariant, requested: &str, first: Option<&str>) -> bool {
    let starts_at = |word: Option<&String>| word.map(String::as_str) == first;
    if first.is_some() && starts_at(variant.chain.first()) {
        true
    } else if first.is_some() && starts_at(variant.chain.last()) {
        false
    } else {
        variant.pair == requested
    }
}

/// Render `variants` for a caller who asked for `requested`: every chain starts
/// with the first word of `requested`, whichever way it was stored.
fn oriented(requested: &str, variants: &[&LadderVariant]) -> PairLadder {
    let first = split_pair(requested).map(|(first, _)| first);
    let chains = variants
        .iter()
        .map(|v| {
            if runs_forward(v, requested, first) {
                v.chain_string()
            } else {
                let reversed: Vec<&str> = v.chain.iter().rev().map(String::as_str).collect();
                reversed.join(CHAIN_SEPARATOR)
            }
        })
        .collect();

    PairLadder {
        pair: requested.to_string(),
        chains,
        minimum_chain: variants.iter().map(|v| v.length).max(),
        minimum_difficulty: variants.iter().map(|v| v.difficulty).min(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn chain(words: &str) -> Vec<String> {
        words.split(',').map(str::to_string).collect()
    }

    fn record(pair: &str, chains: &[&str]) -> PairLadders {
        PairLadders { pair: pair.to_string(), chains: chains.iter().map(|c| chain(c)).collect() }
    }

    fn sample_records() -> Vec<PairLadders> {
        vec![
            record("came-will", &["came,wame,wale,wall,will", "came,cale,wale,wall,will"]),
            record("like-went", &["like,lime,line,lint,lent,went"]),
            record("cold-warm", &["cold,cord,card,ward,warm"]),
            record("cat-dog", &["cat,cot,cog,dog"]),
        ]
    }

    /// Every word scores 1, so difficulty equals chain length.
    fn flat_scores(records: &[PairLadders]) -> RarityScores {
        records
            .iter()
            .flat_map(|r| r.chains.iter().flatten())
            .map(|w| (w.clone(), 1))
            .collect()
    }

    fn sample_store() -> LadderStore {
        let records = sample_records();
        let scores = flat_scores(&records);
        load_ladders(records, &scores)
    }

    #[test]
    fn test_load_annotates_variants() {
        let store = sample_store();
        assert_eq!(store.len(), 5);
        assert_eq!(store.pair_count(), 4);

        let came_will: Vec<&LadderVariant> = store.variants.iter().filter(|v| v.pair == "came-will").collect();
        assert_eq!(came_will.len(), 2);
        assert!(came_will.iter().all(|v| v.variations == 2 && v.length == 5 && v.difficulty == 5));
        assert_eq!(came_will[0].variant, 1);
        assert_eq!(came_will[1].variant, 2);
        assert_eq!(came_will[0].hardest_word.as_deref(), Some("came"));
        assert_eq!(came_will[0].hardest_word_score, 1);
    }

    #[test]
    fn test_load_skips_bad_records() {
        let records = vec![
            record("came-will", &["came,wame,wale,wall,will"]),
            record("came-will", &["came,cale,wale,wall,will"]),
            record("broken", &["a,b"]),
            record("cat-will", &["cat,will"]),
            record("cat-cot", &["cat"]),
        ];
        let store = load_ladders(records, &RarityScores::default());
        assert_eq!(store.pair_count(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.ladder_for_pair("came-will").chains, vec!["came,wame,wale,wall,will"]);
    }

    #[test]
    fn test_ladder_for_pair() {
        let store = sample_store();
        let ladder = store.ladder_for_pair("came-will");
        assert_eq!(ladder.pair, "came-will");
        assert_eq!(ladder.chains[0], "came,wame,wale,wall,will");
        assert_eq!(ladder.chains.len(), 2);
        assert_eq!(ladder.minimum_chain, Some(5));
        assert_eq!(ladder.minimum_difficulty, Some(5));
    }

    #[test]
    fn test_ladder_for_reversed_pair() {
        let store = sample_store();
        let forward = store.ladder_for_pair("came-will");
        let backward = store.ladder_for_pair("will-came");
        assert_eq!(backward.pair, "will-came");
        assert_eq!(backward.chains[0], "will,wall,wale,wame,came");
        assert_eq!(backward.minimum_chain, Some(5));
        for (f, b) in forward.chains.iter().zip(&backward.chains) {
            let reversed: Vec<&str> = f.split(',').rev().collect();
            assert_eq!(reversed.join(","), *b);
        }
    }

    #[test]
    fn test_ladder_for_unknown_pair() {
        let store = sample_store();
        let ladder = store.ladder_for_pair("abcd-efgh");
        assert!(ladder.is_empty());
        assert_eq!(ladder.minimum_chain, None);
        assert_eq!(ladder.minimum_difficulty, None);

        assert!(store.ladder_for_pair("not a pair").is_empty());
    }

    #[test]
    fn test_ladders_by_length() {
        let store = sample_store();
        let ladders = store.ladders_by_length(4);
        assert_eq!(ladders.len(), 3);
        // ranked by difficulty: came-will (5), cold-warm (5), like-went (6)
        let pairs: Vec<&str> = ladders.iter().map(|l| l.pair.as_str()).collect();
        assert_eq!(pairs, vec!["came-will", "cold-warm", "like-went"]);
        assert_eq!(ladders[0].solutions, 2);

        assert_eq!(store.ladders_by_length(3).len(), 1);
        assert!(store.ladders_by_length(7).is_empty());
    }

    #[test]
    fn test_easy_band_excludes_zero_difficulty() {
        let records = sample_records();
        let store = load_ladders(records, &RarityScores::default());
        assert!(store.ladders_by_length(4).is_empty());
    }

    #[test]
    fn test_ladders_by_difficulty_class() {
        let store = sample_store();
        assert_eq!(store.ladders_by_difficulty_class(4, &[1]).len(), 3);
        assert!(store.ladders_by_difficulty_class(4, &[2]).is_empty());
        assert!(store.ladders_by_difficulty_class(4, &[]).is_empty());
    }

    #[test]
    fn test_class_union_matches_direct_band() {
        let store = sample_store();
        assert_eq!(store.ladders_by_difficulty_class(4, &[1, 2]), store.ladders_in_band(4, 0, 20_000));
    }

    #[test]
    fn test_band_bounds_are_exclusive() {
        let store = sample_store();
        assert!(store.ladders_in_band(4, 5, 6).is_empty());
        let pairs: Vec<String> = store.ladders_in_band(4, 4, 6).into_iter().map(|l| l.pair).collect();
        assert_eq!(pairs, vec!["came-will", "cold-warm"]);
    }

    #[test]
    fn test_search_by_substring() {
        let store = sample_store();
        let search = LadderSearch {
            lengths: vec![4],
            difficulty_classes: vec![1, 2],
            substring: Some("wil".to_string()),
            page_size: None,
        };
        let pairs: Vec<String> = store.search(&search).into_iter().map(|l| l.pair).collect();
        assert_eq!(pairs, vec!["came-will"]);
    }

    #[test]
    fn test_search_substring_is_case_sensitive() {
        let store = sample_store();
        let search = LadderSearch { substring: Some("WIL".to_string()), ..LadderSearch::default() };
        assert!(store.search(&search).is_empty());
    }

    #[test]
    fn test_search_lengths_are_alternatives() {
        let store = sample_store();
        let search = LadderSearch { lengths: vec![3, 4], ..LadderSearch::default() };
        assert_eq!(store.search(&search).len(), 4);
        let search = LadderSearch { lengths: vec![3], ..LadderSearch::default() };
        assert_eq!(store.search(&search)[0].pair, "cat-dog");
    }

    #[test]
    fn test_search_without_filters_returns_everything_ranked() {
        let store = sample_store();
        let pairs: Vec<String> = store.search(&LadderSearch::default()).into_iter().map(|l| l.pair).collect();
        assert_eq!(pairs, vec!["cat-dog", "came-will", "cold-warm", "like-went"]);
    }

    #[test]
    fn test_search_page_size_counts_variants() {
        let store = sample_store();
        // the first two ranked rows are cat-dog and came-will variant 1
        let search = LadderSearch { page_size: Some(2), ..LadderSearch::default() };
        assert_eq!(store.search(&search).len(), 2);
        // came-will's two variants collapse into one pair
        let search = LadderSearch { page_size: Some(3), ..LadderSearch::default() };
        assert_eq!(store.search(&search).len(), 2);
    }

    #[test]
    fn test_search_deserializes_api_names() {
        let search: LadderSearch =
            serde_json::from_str(r#"{"ladder_filter": "lik", "length": [4]}"#).unwrap();
        assert_eq!(search.substring.as_deref(), Some("lik"));
        assert_eq!(search.lengths, vec![4]);
        assert!(search.difficulty_classes.is_empty());
        let store = sample_store();
        let pairs: Vec<String> = store.search(&search).into_iter().map(|l| l.pair).collect();
        assert_eq!(pairs, vec!["like-went"]);
    }

    #[test]
    fn test_random_ladder_in_range() {
        let store = sample_store();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let ladder = store.random_ladder_in_range(4, 0, 10_000, &mut rng).unwrap();
            assert!(["came-will", "like-went", "cold-warm"].contains(&ladder.pair.as_str()));
            assert_eq!(ladder.chains.len(), 1);
            assert!(ladder.chains[0].starts_with(ladder.pair.split('-').next().unwrap()));
        }
    }

    #[test]
    fn test_random_ladder_in_empty_range() {
        let store = sample_store();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(store.random_ladder_in_range(4, 10_000, 20_000, &mut rng), None);
        assert_eq!(store.random_ladder_in_range(9, 0, 10_000, &mut rng), None);
        assert_eq!(LadderStore::default().random_ladder_in_range(4, 0, 10_000, &mut rng), None);
    }

    #[test]
    fn test_rescore_reranks_variants() {
        let records = sample_records();
        let mut store = load_ladders(records.clone(), &RarityScores::default());
        assert!(store.ladders_by_length(4).is_empty());

        store.rescore(&flat_scores(&records));
        assert_eq!(store, sample_store());
        let pairs: Vec<String> = store.ladders_by_length(4).into_iter().map(|l| l.pair).collect();
        assert_eq!(pairs, vec!["came-will", "cold-warm", "like-went"]);
        assert_eq!(store.ladder_for_pair("will-came").chains[0], "will,wall,wale,wame,came");
    }

    #[test]
    fn test_chain_stored_backwards_is_oriented_by_its_words() {
        let records = vec![record("came-will", &["will,wall,wale,wame,came"])];
        let store = load_ladders(records, &RarityScores::default());
        assert_eq!(store.ladder_for_pair("came-will").chains, vec!["came,wame,wale,wall,will"]);
        assert_eq!(store.ladder_for_pair("will-came").chains, vec!["will,wall,wale,wame,came"]);
    }

    #[test]
    fn test_custom_easy_ceiling() {
        let records = sample_records();
        let scores = flat_scores(&records);
        let config = QueryConfig { easy_ladder_ceiling: 6, ..QueryConfig::default() };
        let store = LadderStore::build(records, &scores, config);
        let pairs: Vec<String> = store.ladders_by_length(4).into_iter().map(|l| l.pair).collect();
        assert_eq!(pairs, vec!["came-will", "cold-warm"]);
    }
}
