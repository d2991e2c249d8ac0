//! Match region value type.
//!
//! A [`MatchRegion`] records where a pattern matched inside a buffer: one
//! byte span per capture group, with group 0 always covering the whole
//! match. Regions are plain values; the copy stored in a pattern's cache and
//! the copy handed to the caller are independent, so neither can be
//! corrupted by releasing the other.

use std::fmt;
use std::ops::Range;

/// Sentinel written to the flat encoding for a group that did not
/// participate in the match.
pub const NO_GROUP: i32 = -1;

/// Byte spans of a single match, one per capture group.
#[derive(Clone, PartialEq, Eq)]
pub struct MatchRegion {
    groups: Vec<Option<Range<usize>>>,
}

impl MatchRegion {
    /// Create a region from per-group spans.
    ///
    /// Group 0 is the whole match; unmatched optional groups are `None`.
    #[must_use]
    pub const fn new(groups: Vec<Option<Range<usize>>>) -> Self {
        Self { groups }
    }

    /// Get the span of a capture group, if it participated in the match.
    #[must_use]
    pub fn group(&self, index: usize) -> Option<Range<usize>> {
        self.groups.get(index).cloned().flatten()
    }

    /// Get the whole-match span (group 0).
    #[must_use]
    pub fn whole_match(&self) -> Option<Range<usize>> {
        self.group(0)
    }

    /// Number of capture groups, counting group 0 and unmatched groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Check if the region carries no groups at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate over all group spans in order.
    pub fn iter(&self) -> impl Iterator<Item = Option<Range<usize>>> + '_ {
        self.groups.iter().cloned()
    }

    /// Serialize to the flat integer form used at marshalling boundaries.
    ///
    /// Layout is `[beg0, end0, beg1, end1, ...]`; an unmatched group is
    /// encoded as the sentinel pair `(NO_GROUP, NO_GROUP)`.
    #[must_use]
    pub fn to_flat(&self) -> Vec<i32> {
        let mut flat = Vec::with_capacity(self.groups.len() * 2);
        for group in &self.groups {
            match group {
                Some(span) => {
                    flat.push(span.start as i32);
                    flat.push(span.end as i32);
                }
                None => {
                    flat.push(NO_GROUP);
                    flat.push(NO_GROUP);
                }
            }
        }
        flat
    }
}

impl fmt::Debug for MatchRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for group in &self.groups {
            match group {
                Some(span) => list.entry(&format_args!("{}..{}", span.start, span.end)),
                None => list.entry(&format_args!("-")),
            };
        }
        list.finish()
    }
}
