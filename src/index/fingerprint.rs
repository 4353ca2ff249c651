use crate::index::types::{BigramTable, BitPosition, Fingerprint};
use crate::utils::Bigram;

/// Share of the member-name bonus in a member's tiebreaker
const MEMBER_NAME_SHARE: f64 = 0.03;

/// Pack an entry's bigrams into a minimal-length bit array.
///
/// Bigrams missing from the table are skipped; a table compiled from the
/// same corpus contains all of them.
pub fn generate_fingerprint(bigrams: &[Bigram], table: &BigramTable) -> Fingerprint {
    let positions: Vec<BitPosition> = bigrams
        .iter()
        .filter_map(|bigram| table.position(bigram))
        .collect();

    let Some(&max) = positions.iter().max() else {
        return Fingerprint::default();
    };

    let mut bytes = vec![0u8; (max as usize + 1).div_ceil(8)];
    for position in positions {
        bytes[(position / 8) as usize] |= 1 << (position % 8);
    }

    Fingerprint(bytes)
}

/// Tiebreaker favoring short names.
///
/// Members blend in their bare name length so that a short member on a long
/// owner outranks a long member on a short owner.
pub fn tiebreaker_bonus(full_name: &str, member_name: Option<&str>) -> f64 {
    let bonus = 1.0 / full_name.chars().count().max(1) as f64;

    match member_name {
        Some(member) => {
            let member_bonus = 1.0 / member.chars().count().max(1) as f64;
            bonus * (1.0 - MEMBER_NAME_SHARE) + member_bonus * MEMBER_NAME_SHARE
        }
        None => bonus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::compile::compile_bigrams;
    use crate::utils::derive_bigrams;

    fn table(bigrams: &[&str]) -> BigramTable {
        BigramTable::from_ranked(bigrams.iter().map(|b| b.to_string()).collect())
    }

    #[test]
    fn test_minimal_length() {
        let table = table(&["a0", "a1", "a2", "a3", "a4", "a5", "a6", "a7", "a8"]);

        let low = generate_fingerprint(&["a0".to_string(), "a7".to_string()], &table);
        assert_eq!(low.0, vec![0b1000_0001]);

        let high = generate_fingerprint(&["a8".to_string()], &table);
        assert_eq!(high.0, vec![0, 0b0000_0001]);
    }

    #[test]
    fn test_empty_bigram_set() {
        let table = table(&["ab"]);
        assert!(generate_fingerprint(&[], &table).is_empty());
    }

    #[test]
    fn test_fingerprint_round_trip() {
        let names = [
            ("ActiveSupport::Cache::Store", None),
            ("ActiveSupport::Cache::Store#fetch_multi", Some("fetch_multi")),
            ("HashWithIndifferentAccess", None),
        ];
        let sets: Vec<Vec<Bigram>> = names
            .iter()
            .map(|(name, member)| derive_bigrams(name, *member))
            .collect();
        let table = compile_bigrams(&sets);

        for set in &sets {
            let fingerprint = generate_fingerprint(set, &table);
            let mut decoded: Vec<&str> = fingerprint
                .positions()
                .filter_map(|p| table.bigram(p))
                .collect();
            let mut expected: Vec<&str> = set.iter().map(String::as_str).collect();
            decoded.sort_unstable();
            expected.sort_unstable();
            assert_eq!(decoded, expected);
        }
    }

    #[test]
    fn test_round_trip_drops_unknown_bigrams() {
        let table = table(&["ab", "bc"]);
        let set = vec!["ab".to_string(), "zz".to_string()];
        let fingerprint = generate_fingerprint(&set, &table);
        assert_eq!(fingerprint.positions().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_tiebreaker_bonus() {
        assert_eq!(tiebreaker_bonus("Foo", None), 1.0 / 3.0);

        let member = tiebreaker_bonus("Foo#ab", Some("ab"));
        let expected = (1.0 / 6.0) * 0.97 + 0.5 * 0.03;
        assert!((member - expected).abs() < 1e-12);
    }

    #[test]
    fn test_short_member_beats_long_member() {
        // Same full-name length, shorter member name
        let short = tiebreaker_bonus("LongOwnerName#a", Some("a"));
        let long = tiebreaker_bonus("Own#abcdefghijk", Some("abcdefghijk"));
        assert!(short > long);
    }
}
