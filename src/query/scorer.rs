//! Relevance scoring and bounded top-K selection
//!
//! An entry scores `weight + tiebreaker_bonus` for every compiled bit
//! position set in its fingerprint. The slate keeps the K best entries of
//! one linear scan and ranks them exactly as a stable descending sort of
//! the whole corpus would.

use crate::index::types::{BitPosition, Entry, SearchIndex};
use std::cmp::Ordering;

/// Score one entry against compiled query positions
#[inline]
pub fn compute_score(positions: &[BitPosition], entry: &Entry, index: &SearchIndex) -> f64 {
    let mut score = 0.0;
    for &position in positions {
        if entry.fingerprint.contains(position) {
            score += index.weight(position) as f64 + entry.tiebreaker_bonus;
        }
    }
    score
}

/// A scored entry
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub score: f64,
    pub entry: &'a Entry,
}

#[derive(Debug, Clone, Copy)]
struct Slot<'a> {
    score: f64,
    /// Scan order of the entry, for stable ranking
    seq: usize,
    entry: Option<&'a Entry>,
}

impl Slot<'_> {
    const EMPTY: Self = Self {
        score: 0.0,
        seq: usize::MAX,
        entry: None,
    };
}

/// Ranking order: score descending, then scan order ascending
fn rank_order(a: &Slot<'_>, b: &Slot<'_>) -> Ordering {
    b.score.total_cmp(&a.score).then(a.seq.cmp(&b.seq))
}

/// Fixed-capacity holder of the best candidates seen during a scan.
///
/// The weakest slot is cached; a candidate that does not beat it costs one
/// comparison. Replacing the slot drops the cache and the next candidate
/// rescans all K slots.
#[derive(Debug, Clone)]
pub struct ScoreSlate<'a> {
    slots: Vec<Slot<'a>>,
    worst: Option<usize>,
}

impl<'a> ScoreSlate<'a> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::EMPTY; capacity],
            worst: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Empty every slot for a new scan
    pub fn clear(&mut self) {
        self.slots.fill(Slot::EMPTY);
        self.worst = None;
    }

    /// Index of the slot that loses first: lowest score, latest in scan
    /// order among equal scores.
    fn worst_slot(&mut self) -> usize {
        if let Some(worst) = self.worst {
            return worst;
        }
        let mut worst = 0;
        for (i, slot) in self.slots.iter().enumerate().skip(1) {
            if rank_order(slot, &self.slots[worst]) == Ordering::Greater {
                worst = i;
            }
        }
        self.worst = Some(worst);
        worst
    }

    /// Offer a candidate. Returns true if it took a slot.
    ///
    /// Candidates must be offered in increasing `seq`; an equal score never
    /// displaces an earlier entry.
    pub fn offer(&mut self, score: f64, seq: usize, entry: &'a Entry) -> bool {
        if self.slots.is_empty() {
            return false;
        }
        let worst = self.worst_slot();
        if score > self.slots[worst].score {
            self.slots[worst] = Slot {
                score,
                seq,
                entry: Some(entry),
            };
            self.worst = None;
            true
        } else {
            false
        }
    }

    /// Occupied slots with a positive score, best first
    pub fn ranked(&self) -> Vec<SearchHit<'a>> {
        let mut slots = self.slots.clone();
        slots.sort_by(rank_order);
        slots
            .into_iter()
            .filter(|slot| slot.score > 0.0)
            .filter_map(|slot| {
                slot.entry.map(|entry| SearchHit {
                    score: slot.score,
                    entry,
                })
            })
            .collect()
    }
}

/// Scan every entry of the index and return the top-K positive hits
pub fn top_hits<'a>(
    positions: &[BitPosition],
    index: &'a SearchIndex,
    slate: &mut ScoreSlate<'a>,
) -> Vec<SearchHit<'a>> {
    slate.clear();
    if positions.is_empty() {
        return Vec::new();
    }
    for (seq, entry) in index.entries.iter().enumerate() {
        let score = compute_score(positions, entry, index);
        slate.offer(score, seq, entry);
    }
    slate.ranked()
}
