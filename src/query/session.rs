use crate::index::types::{SearchIndex, MAX_RESULTS};
use crate::query::compiler::compile_query;
use crate::query::scorer::{top_hits, ScoreSlate, SearchHit};

/// What a result renderer receives for one hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultView<'a> {
    pub url: &'a str,
    pub owner_name: &'a str,
    pub member_name: Option<&'a str>,
    pub summary: Option<&'a str>,
    pub score: f64,
}

impl<'a> SearchHit<'a> {
    pub fn view(&self) -> ResultView<'a> {
        ResultView {
            url: &self.entry.url,
            owner_name: &self.entry.owner_name,
            member_name: self.entry.member_name.as_deref(),
            summary: self.entry.summary.as_deref(),
            score: self.score,
        }
    }
}

/// One search session over a loaded index.
///
/// The index is shared read-only; the slate belongs to the session and is
/// reused by every query.
pub struct SearchSession<'a> {
    index: &'a SearchIndex,
    slate: ScoreSlate<'a>,
}

impl<'a> SearchSession<'a> {
    pub fn new(index: &'a SearchIndex, max_results: usize) -> Self {
        Self {
            index,
            slate: ScoreSlate::new(max_results),
        }
    }

    pub fn with_default_capacity(index: &'a SearchIndex) -> Self {
        Self::new(index, MAX_RESULTS)
    }

    pub fn index(&self) -> &'a SearchIndex {
        self.index
    }

    pub fn max_results(&self) -> usize {
        self.slate.capacity()
    }

    /// Ranked hits for `query`, best first; empty when nothing scores
    pub fn search(&mut self, query: &str) -> Vec<SearchHit<'a>> {
        let positions = compile_query(query, &self.index.bigrams);
        let hits = top_hits(&positions, self.index, &mut self.slate);
        tracing::debug!(
            query,
            positions = positions.len(),
            hits = hits.len(),
            "search"
        );
        hits
    }
}
