//! Free-text search over activity and card names.
//!
//! Matching is a case-insensitive substring scan over the full list.
//! Recomputation is debounced behind a fixed quiet period driven by
//! explicit timestamps, keeping the whole module clock-free and
//! deterministic.

use crate::constants::SEARCH_DEBOUNCE_MS;
use crate::model::{CardSet, ProcessedActivity};

/// A single hit, pointing back at the activity row to scroll to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub activity_id: String,
    pub activity_name: String,
    /// The text that matched — the activity name itself or a card name.
    pub match_text: String,
}

/// Scan activity names and the card names attached to each activity.
///
/// A blank query matches nothing. At most one result per activity, with
/// the activity-name match winning over card matches; result order
/// follows the input order.
pub fn search_activities(
    activities: &[ProcessedActivity],
    cards: &[CardSet],
    query: &str,
) -> Vec<SearchResult> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    for pa in activities {
        let a = &pa.activity;
        if a.name.to_lowercase().contains(&needle) {
            results.push(SearchResult {
                activity_id: a.id.clone(),
                activity_name: a.name.clone(),
                match_text: a.name.clone(),
            });
            continue;
        }

        let card_hit = cards
            .iter()
            .filter(|card| card.activity_id.contains(&a.id))
            .flat_map(|card| card.item.iter())
            .find(|item| item.name.to_lowercase().contains(&needle));
        if let Some(item) = card_hit {
            results.push(SearchResult {
                activity_id: a.id.clone(),
                activity_name: a.name.clone(),
                match_text: item.name.clone(),
            });
        }
    }
    results
}

/// Wrap-around cursor over a result list. Starts before the first result
/// (the "0 / N" state), and wraps at both ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchCursor {
    index: Option<usize>,
}

impl SearchCursor {
    pub fn current(&self) -> Option<usize> {
        self.index
    }

    /// Back to the before-first state, for when the query changes.
    pub fn reset(&mut self) {
        self.index = None;
    }

    /// Advance to the next result, wrapping past the end.
    pub fn next(&mut self, len: usize) -> Option<usize> {
        self.index = if len == 0 {
            None
        } else {
            Some(match self.index {
                Some(i) => (i + 1) % len,
                None => 0,
            })
        };
        self.index
    }

    /// Step back to the previous result, wrapping past the start.
    pub fn prev(&mut self, len: usize) -> Option<usize> {
        self.index = if len == 0 {
            None
        } else {
            Some(match self.index {
                Some(0) | None => len - 1,
                Some(i) => i - 1,
            })
        };
        self.index
    }
}

/// Fixed quiet-period debounce for search input.
///
/// Each keystroke restarts the window; `poll` hands the query over once
/// the window has elapsed. Timestamps are plain milliseconds supplied by
/// the caller, so any single-threaded timer can drive this.
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    pending: Option<(String, u64)>,
}

impl Debouncer {
    /// Record a keystroke at `now_ms`, restarting the quiet period.
    pub fn submit(&mut self, query: impl Into<String>, now_ms: u64) {
        self.pending = Some((query.into(), now_ms + SEARCH_DEBOUNCE_MS));
    }

    /// Take the pending query once its quiet period has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Option<String> {
        match &self.pending {
            Some((_, due)) if now_ms >= *due => self.pending.take().map(|(query, _)| query),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
