//! Test utilities for exercising the caching layer.
//!
//! Provides a scripted [`SearchEngine`] whose matches are declared up
//! front and whose invocations are counted, so tests can observe cache
//! hits, bypasses and batch short-circuits without a real matching engine.

use std::ops::Range;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::engine::{EngineError, SearchEngine};
use crate::region::MatchRegion;

/// A scripted engine with a call counter.
///
/// The engine "matches" at the declared spans: a search over
/// `[start, end)` reports the leftmost declared span that fits the range
/// (or, in anchored mode, the one starting exactly at `start`). Cloning
/// shares the counter, so a test can keep a handle after moving the engine
/// into a pattern.
#[derive(Clone)]
pub struct ScriptedEngine {
    inner: Arc<Inner>,
}

struct Inner {
    spans: Vec<Range<usize>>,
    anchored: bool,
    fail: bool,
    calls: AtomicUsize,
}

impl ScriptedEngine {
    /// An engine matching at the given spans.
    #[must_use]
    pub fn with_spans(spans: Vec<Range<usize>>) -> Self {
        Self::build(spans, false, false)
    }

    /// An engine matching a span only when the search starts exactly at
    /// it, imitating a position-anchored pattern.
    #[must_use]
    pub fn anchored(spans: Vec<Range<usize>>) -> Self {
        Self::build(spans, true, false)
    }

    /// An engine that never matches.
    #[must_use]
    pub fn never_matching() -> Self {
        Self::build(Vec::new(), false, false)
    }

    /// An engine that fails every search.
    #[must_use]
    pub fn failing() -> Self {
        Self::build(Vec::new(), false, true)
    }

    /// Number of searches issued to this engine.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::Relaxed)
    }

    fn build(spans: Vec<Range<usize>>, anchored: bool, fail: bool) -> Self {
        Self {
            inner: Arc::new(Inner {
                spans,
                anchored,
                fail,
                calls: AtomicUsize::new(0),
            }),
        }
    }
}

impl SearchEngine for ScriptedEngine {
    fn search(
        &self,
        _haystack: &[u8],
        start: usize,
        end: usize,
    ) -> Result<Option<MatchRegion>, EngineError> {
        self.inner.calls.fetch_add(1, Ordering::Relaxed);
        if self.inner.fail {
            return Err(EngineError::new("scripted failure"));
        }
        let hit = self
            .inner
            .spans
            .iter()
            .filter(|span| span.end <= end)
            .filter(|span| {
                if self.inner.anchored {
                    span.start == start
                } else {
                    span.start >= start
                }
            })
            .min_by_key(|span| span.start)
            .cloned();
        Ok(hit.map(|span| MatchRegion::new(vec![Some(span)])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_engine_reports_leftmost_fitting_span() {
        let engine = ScriptedEngine::with_spans(vec![5..9, 2..4]);
        let region = engine.search(b"..........", 0, 10).unwrap().unwrap();
        assert_eq!(region.whole_match(), Some(2..4));

        let region = engine.search(b"..........", 3, 10).unwrap().unwrap();
        assert_eq!(region.whole_match(), Some(5..9));

        assert!(engine.search(b"..........", 3, 8).unwrap().is_none());
        assert_eq!(engine.calls(), 3);
    }

    #[test]
    fn anchored_engine_requires_exact_start() {
        let engine = ScriptedEngine::anchored(vec![2..4]);
        assert!(engine.search(b"....", 2, 4).unwrap().is_some());
        assert!(engine.search(b"....", 1, 4).unwrap().is_none());
    }
}
