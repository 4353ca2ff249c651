//! Bigram table compilation and bit weighting.
//!
//! Every distinct bigram of the corpus gets one bit position. Positions are
//! assigned by descending corpus frequency, so common bigrams land in the
//! low bits and most fingerprints stay a few bytes long. Rare bigrams only
//! lengthen the fingerprints of the few entries that contain them.

use crate::index::types::{BigramTable, Weight};
use crate::utils::Bigram;
use ahash::AHashMap;

/// Heuristic weights for bigram text, evaluated in order; the maximum
/// matching weight wins and unmatched bigrams weigh 1.
const BIGRAM_PATTERN_WEIGHTS: &[(fn(&str) -> bool, Weight)] = &[
    // uppercase, digit, punctuation
    (|b| b.chars().any(|c| !c.is_ascii_lowercase()), 2),
    // word start
    (|b| b.starts_with(' '), 3),
    // module segment start
    (|b| b.starts_with(':'), 4),
    // container marker
    (|b| b.contains(" :"), 3),
    // member sigils and the member marker
    (|b| b.contains(['#', '.', '(']), 50),
];

/// Rank every distinct bigram by descending frequency across all sets.
///
/// Ties keep first-seen order, so an order-stable corpus always compiles to
/// the same table.
pub fn compile_bigrams<S: AsRef<[Bigram]>>(bigram_sets: &[S]) -> BigramTable {
    let mut first_seen: Vec<&Bigram> = Vec::new();
    let mut tally: AHashMap<&Bigram, usize> = AHashMap::new();

    for set in bigram_sets {
        for bigram in set.as_ref() {
            let count = tally.entry(bigram).or_insert_with(|| {
                first_seen.push(bigram);
                0
            });
            *count += 1;
        }
    }

    // Stable sort: equal counts stay in first-seen order
    first_seen.sort_by(|a, b| tally[b].cmp(&tally[a]));

    tracing::debug!(
        distinct = first_seen.len(),
        "Ranked bigrams by corpus frequency"
    );

    BigramTable::from_ranked(first_seen.into_iter().cloned().collect())
}

/// Weight of a single bigram
pub fn bigram_weight(bigram: &str) -> Weight {
    BIGRAM_PATTERN_WEIGHTS
        .iter()
        .filter(|(matches, _)| matches(bigram))
        .map(|&(_, weight)| weight)
        .max()
        .unwrap_or(1)
}

/// Weight of every bit position, indexed by position
pub fn compute_bit_weights(table: &BigramTable) -> Vec<Weight> {
    table.iter().map(|(bigram, _)| bigram_weight(bigram)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(bigrams: &[&str]) -> Vec<Bigram> {
        bigrams.iter().map(|b| b.to_string()).collect()
    }

    #[test]
    fn test_rank_by_frequency() {
        let sets = vec![set(&["ab", "cd"]), set(&["cd", "ef"]), set(&["cd", "ef"])];
        let table = compile_bigrams(&sets);

        assert_eq!(table.position("cd"), Some(0));
        assert_eq!(table.position("ef"), Some(1));
        assert_eq!(table.position("ab"), Some(2));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let sets = vec![set(&["zz", "aa"]), set(&["mm"])];
        let table = compile_bigrams(&sets);

        assert_eq!(table.bigram(0), Some("zz"));
        assert_eq!(table.bigram(1), Some("aa"));
        assert_eq!(table.bigram(2), Some("mm"));
    }

    #[test]
    fn test_empty_corpus() {
        let sets: Vec<Vec<Bigram>> = Vec::new();
        assert!(compile_bigrams(&sets).is_empty());
    }

    #[test]
    fn test_bigram_weights() {
        assert_eq!(bigram_weight("aa"), 1);
        assert_eq!(bigram_weight("aB"), 2);
        assert_eq!(bigram_weight("a1"), 2);
        assert_eq!(bigram_weight(" a"), 3);
        assert_eq!(bigram_weight(":F"), 4);
        assert_eq!(bigram_weight(" :"), 3);
    }

    #[test]
    fn test_member_indicators_dominate() {
        assert_eq!(bigram_weight("e("), 50);
        assert_eq!(bigram_weight("(("), 50);
        assert_eq!(bigram_weight(" ("), 50);
        assert_eq!(bigram_weight(":("), 50);
        assert_eq!(bigram_weight("#f"), 50);
        assert_eq!(bigram_weight(".c"), 50);
    }

    #[test]
    fn test_weights_follow_positions() {
        let table = BigramTable::from_ranked(set(&["aa", ".x", " b"]));
        assert_eq!(compute_bit_weights(&table), vec![1, 50, 3]);
    }
}
