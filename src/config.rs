//! Tunable query constants.
//!
//! Every number the query layer depends on lives here as a named constant, and
//! [`QueryConfig`] carries them into the index, resolver and ladder store so a
//! shell (or a test) can override any of them at construction time.

/// Width of one difficulty class: class `c` covers `((c-1)*w, c*w)`.
pub const DIFFICULTY_BAND_WIDTH: u64 = 10_000;
/// Smallest subset of letters the sub-anagram resolver will consider.
pub const MIN_SUB_ANAGRAM_SIZE: usize = 2;
/// Ladders strictly below this difficulty count as "easy".
pub const EASY_LADDER_CEILING: u64 = 10_000;
/// Number of ladder rows returned by a search when no page size is given.
pub const DEFAULT_PAGE_SIZE: usize = 200;
/// Joins the two endpoint words of a ladder pair, e.g. `came-will`.
pub const PAIR_SEPARATOR: char = '-';
/// Joins the words of a ladder chain when it is rendered as a single string.
pub const CHAIN_SEPARATOR: &str = ",";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryConfig {
    pub difficulty_band_width: u64,
    pub min_sub_anagram_size: usize,
    pub easy_ladder_ceiling: u64,
    pub default_page_size: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            difficulty_band_width: DIFFICULTY_BAND_WIDTH,
            min_sub_anagram_size: MIN_SUB_ANAGRAM_SIZE,
            easy_ladder_ceiling: EASY_LADDER_CEILING,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryConfig {
    /// Open band `(lower, upper)` covered by a set of difficulty classes.
    ///
    /// Several classes collapse into one contiguous span from the lowest class
    /// to the highest, so `[1, 3]` also covers class 2. Returns `None` for an
    /// empty class list.
    #[must_use]
    pub fn difficulty_band(&self, classes: &[u32]) -> Option<(u64, u64)> {
        let lowest = u64::from(*classes.iter().min()?);
        let highest = u64::from(*classes.iter().max()?);
        let lower = lowest.saturating_sub(1) * self.difficulty_band_width;
        let upper = highest * self.difficulty_band_width;
        Some((lower, upper))
    }

    /// Band for a single class.
    #[must_use]
    pub fn class_band(&self, class: u32) -> (u64, u64) {
        let class = u64::from(class);
        (
            class.saturating_sub(1) * self.difficulty_band_width,
            class * self.difficulty_band_width,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = QueryConfig::default();
        assert_eq!(config.difficulty_band_width, 10_000);
        assert_eq!(config.min_sub_anagram_size, 2);
        assert_eq!(config.easy_ladder_ceiling, 10_000);
        assert_eq!(config.default_page_size, 200);
    }

    #[test]
    fn test_single_class_band() {
        let config = QueryConfig::default();
        assert_eq!(config.difficulty_band(&[1]), Some((0, 10_000)));
        assert_eq!(config.difficulty_band(&[3]), Some((20_000, 30_000)));
        assert_eq!(config.class_band(3), (20_000, 30_000));
    }

    #[test]
    fn test_multiple_classes_form_contiguous_span() {
        let config = QueryConfig::default();
        assert_eq!(config.difficulty_band(&[1, 2]), Some((0, 20_000)));
        // non-adjacent classes still cover everything in between
        assert_eq!(config.difficulty_band(&[3, 1]), Some((0, 30_000)));
    }

    #[test]
    fn test_empty_classes() {
        assert_eq!(QueryConfig::default().difficulty_band(&[]), None);
    }

    #[test]
    fn test_class_zero_does_not_underflow() {
        let config = QueryConfig::default();
        assert_eq!(config.class_band(0), (0, 0));
        assert_eq!(config.difficulty_band(&[0, 1]), Some((0, 10_000)));
    }

    #[test]
    fn test_custom_band_width() {
        let config = QueryConfig { difficulty_band_width: 100, ..QueryConfig::default() };
        assert_eq!(config.difficulty_band(&[2, 4]), Some((100, 400)));
    }
}
