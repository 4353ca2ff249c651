use crate::index::types::{BitPosition, SearchIndex};
use crate::index::writer::JS_MODULE_PREFIX;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Ways a loaded search index can violate its own invariants
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("bigram table is not a dense bijection (position {position} is duplicated or out of range)")]
    SparseBigramTable { position: BitPosition },

    #[error("weight table has {weights} weights for {bigrams} bigrams")]
    WeightCountMismatch { weights: usize, bigrams: usize },

    #[error("entry {entry} sets bit {position} but only {bits} bit positions exist")]
    FingerprintOutOfBounds {
        entry: usize,
        position: BitPosition,
        bits: usize,
    },
}

/// Parse a search index from JSON or from its JavaScript module form.
pub fn parse_index(source: &str) -> Result<SearchIndex> {
    let json = source
        .trim()
        .strip_prefix(JS_MODULE_PREFIX)
        .map(|body| body.trim_end().trim_end_matches(';'))
        .unwrap_or(source);

    let index: SearchIndex =
        serde_json::from_str(json).context("Failed to parse search index")?;
    validate(&index)?;

    Ok(index)
}

/// Load a search index written by [`crate::index::writer::write_index`].
pub fn read_index(path: &Path) -> Result<SearchIndex> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read search index {}", path.display()))?;
    let index = parse_index(&source)
        .with_context(|| format!("Invalid search index {}", path.display()))?;

    tracing::debug!(
        entries = index.entries.len(),
        bigrams = index.bigrams.len(),
        "Loaded search index from {}",
        path.display()
    );

    Ok(index)
}

/// Check that every bit any fingerprint sets has a bigram and a weight.
pub fn validate(index: &SearchIndex) -> Result<(), IndexError> {
    let bits = index.bigrams.len();

    if index.weights.len() != bits {
        return Err(IndexError::WeightCountMismatch {
            weights: index.weights.len(),
            bigrams: bits,
        });
    }

    for (entry_idx, entry) in index.entries.iter().enumerate() {
        // Trailing zero bytes are harmless; only set bits must be in range
        if let Some(position) = entry.fingerprint.positions().last()
            && position as usize >= bits
        {
            return Err(IndexError::FingerprintOutOfBounds {
                entry: entry_idx,
                position,
                bits,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::{BigramTable, Entry, Fingerprint};

    fn index_with(fingerprint: Vec<u8>, weights: Vec<u32>) -> SearchIndex {
        SearchIndex {
            bigrams: BigramTable::from_ranked(vec![" a".to_string(), "ab".to_string()]),
            weights,
            entries: vec![Entry {
                fingerprint: Fingerprint(fingerprint),
                tiebreaker_bonus: 0.5,
                url: "/A.html".to_string(),
                owner_name: "A".to_string(),
                member_name: None,
                summary: None,
            }],
        }
    }

    #[test]
    fn test_valid_index() {
        assert!(validate(&index_with(vec![0b11], vec![3, 1])).is_ok());
    }

    #[test]
    fn test_weight_count_mismatch() {
        let err = validate(&index_with(vec![0b11], vec![3])).unwrap_err();
        assert!(matches!(err, IndexError::WeightCountMismatch { weights: 1, bigrams: 2 }));
    }

    #[test]
    fn test_fingerprint_out_of_bounds() {
        let err = validate(&index_with(vec![0b100], vec![3, 1])).unwrap_err();
        assert!(matches!(err, IndexError::FingerprintOutOfBounds { entry: 0, position: 2, .. }));
    }

    #[test]
    fn test_parse_json_and_js_module() {
        let json = r#"{"bigrams":{" a":0,"ab":1},"weights":[3,1],"entries":[[[3],0.5,"/A.html","A",null,null]]}"#;
        let from_json = parse_index(json).unwrap();
        let from_module = parse_index(&format!("{JS_MODULE_PREFIX}{json};\n")).unwrap();

        assert_eq!(from_json, from_module);
        assert_eq!(from_json.entries[0].url, "/A.html");
        assert_eq!(from_json.bigrams.position("ab"), Some(1));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_index("not json").is_err());
    }
}
