use crate::index::types::{BigramTable, BitPosition};
use crate::utils::query_bigrams;

/// Compile a live query into the bit positions it tests.
///
/// Positions keep typed order and duplicates, so a bigram typed twice
/// counts twice. Bigrams unknown to the table are dropped.
pub fn compile_query(query: &str, table: &BigramTable) -> Vec<BitPosition> {
    query_bigrams(query)
        .iter()
        .filter_map(|bigram| table.position(bigram))
        .collect()
}
