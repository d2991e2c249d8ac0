//! Multi-pattern best-match selection.
//!
//! Searches an ordered list of patterns over one range and returns the
//! pattern with the earliest match. List order is caller-significant:
//! it often encodes priority (grammar rule order), so on equal match
//! starts the first pattern in the list wins.

use crate::error::{Result, ScanError};
use crate::pattern::Pattern;
use crate::region::MatchRegion;

/// The winning pattern of a batch search.
#[derive(Debug, Clone)]
pub struct BatchMatch {
    /// Index of the winning pattern in the searched list.
    pub pattern_index: usize,
    /// The winning pattern's match.
    pub region: MatchRegion,
}

impl BatchMatch {
    /// Serialize to the flat integer form: the region's group pairs with
    /// the winner index appended.
    #[must_use]
    pub fn to_flat(&self) -> Vec<i32> {
        let mut flat = self.region.to_flat();
        flat.push(self.pattern_index as i32);
        flat
    }
}

/// Search every pattern over `[start, end)` and pick the earliest match.
///
/// Each pattern runs its own cache-aware search with the shared
/// `cache_key`. The best candidate is the one with the smallest
/// whole-match start; only a strictly smaller start displaces it. A
/// candidate matching exactly at `start` cannot be beaten, so iteration
/// stops there without consulting the remaining patterns. The outcome is
/// identical to searching every pattern uncached and picking the
/// earliest-start, first-in-order winner.
///
/// # Errors
///
/// Returns [`ScanError::InvalidRange`] if `start > end` or
/// `end > buffer.len()`.
pub fn search_batch<'a, I>(
    patterns: I,
    cache_key: u64,
    buffer: &[u8],
    start: usize,
    end: usize,
) -> Result<Option<BatchMatch>>
where
    I: IntoIterator<Item = &'a Pattern>,
{
    if start > end || end > buffer.len() {
        return Err(ScanError::invalid_range(start, end, buffer.len()));
    }

    let mut best: Option<(usize, BatchMatch)> = None;
    for (pattern_index, pattern) in patterns.into_iter().enumerate() {
        if let Some(region) = pattern.search(cache_key, buffer, start, end)? {
            let candidate_start = region.whole_match().map_or(0, |span| span.start);
            let supersedes = match &best {
                None => true,
                Some((best_start, _)) => candidate_start < *best_start,
            };
            if supersedes {
                let unbeatable = candidate_start == start;
                best = Some((
                    candidate_start,
                    BatchMatch {
                        pattern_index,
                        region,
                    },
                ));
                if unbeatable {
                    break;
                }
            }
        }
    }
    Ok(best.map(|(_, winner)| winner))
}
