//! Per-pattern search result cache.
//!
//! Each pattern keeps the outcome of its most recent cache-eligible search
//! in a single slot: the caller's cache key, the searched range, and either
//! a match region or a definitive no-match. The slot is replaced wholesale
//! on every store, so the superseded value is dropped by the swap rather
//! than by a separate free step.
//!
//! Reuse soundness rests on two facts about non-anchored patterns:
//! moving the start later can never introduce a match where a covering
//! search already proved none, and a cached match whose span still lies
//! inside the new range is still the leftmost match for it.

use std::sync::{Mutex, PoisonError};

use crate::region::MatchRegion;

/// Cache key value meaning "no key supplied": the cache is neither read
/// nor written for such calls.
pub const NO_CACHE_KEY: u64 = 0;

/// The last cache-eligible search this pattern performed.
#[derive(Debug)]
struct CacheEntry {
    /// Caller-assigned identity of the buffer version searched.
    key: u64,
    /// Offset the search was issued at.
    start: usize,
    /// Offset the search covered through.
    end: usize,
    /// `None` is a definitive no-match over `[start, end)`.
    outcome: Option<MatchRegion>,
}

/// Single-slot result cache, one per pattern.
#[derive(Debug)]
pub(crate) struct SearchCache {
    slot: Mutex<Option<CacheEntry>>,
}

impl SearchCache {
    /// Create an empty cache.
    pub(crate) const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Check whether the cached outcome answers a request over
    /// `[start, end)` on the buffer identified by `key`.
    ///
    /// Returns `None` when a fresh search is required, `Some(None)` for a
    /// cached definitive no-match, and `Some(Some(region))` with an
    /// independent copy of the cached match.
    ///
    /// A cached no-match is only reused when the new range does not extend
    /// past the end the original search covered; a cached match is reused
    /// when its whole-match span lies within the new range.
    pub(crate) fn probe(&self, key: u64, start: usize, end: usize) -> Option<Option<MatchRegion>> {
        // Poisoning is recovered: the slot is always structurally valid.
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = slot.as_ref()?;
        if entry.key != key || entry.start > start {
            return None;
        }
        match &entry.outcome {
            None => (end <= entry.end).then_some(None),
            Some(region) => {
                let (beg0, end0) = region
                    .whole_match()
                    .map_or((0, 0), |span| (span.start, span.end));
                (beg0 >= start && end0 <= end).then(|| Some(region.clone()))
            }
        }
    }

    /// Record the outcome of a search issued at `start` and covering
    /// through `end`, replacing whatever was cached before.
    pub(crate) fn store(&self, key: u64, start: usize, end: usize, outcome: Option<&MatchRegion>) {
        // Clone outside the lock; the swap inside it is cheap.
        let entry = CacheEntry {
            key,
            start,
            end,
            outcome: outcome.cloned(),
        };
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(entry);
    }
}
