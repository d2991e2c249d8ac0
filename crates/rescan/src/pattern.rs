//! Compiled pattern handles.
//!
//! A [`Pattern`] owns one compiled engine resource together with the state
//! this layer adds on top: the position-anchor property computed once at
//! creation, and the per-pattern result cache. [`Pattern::search`] is the
//! cache-aware search: it answers from the cache when the previous result
//! provably still holds, and otherwise consults the engine and records the
//! outcome.

use std::fmt;

use tracing::{debug, trace};

use crate::cache::{NO_CACHE_KEY, SearchCache};
use crate::engine::{RegexEngine, SearchEngine, has_position_anchor};
use crate::error::{Result, ScanError};
use crate::region::MatchRegion;

/// A compiled pattern plus its search cache.
pub struct Pattern {
    // Declared before the engine: the cache (and any region it holds) is
    // dropped before the compiled pattern resource.
    cache: SearchCache,
    engine: Box<dyn SearchEngine>,
    has_position_anchor: bool,
}

impl Pattern {
    /// Compile a pattern from raw bytes with the default [`RegexEngine`].
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Compile`] if the engine rejects the pattern;
    /// no handle is produced.
    pub fn compile(pattern: &[u8], ignore_case: bool) -> Result<Self> {
        let engine = RegexEngine::compile(pattern, ignore_case)?;
        debug!(pattern = engine.as_str(), ignore_case, "compiled pattern");
        Ok(Self::from_engine(
            Box::new(engine),
            has_position_anchor(pattern),
        ))
    }

    /// Compile a pattern from a string.
    pub fn compile_str(pattern: &str, ignore_case: bool) -> Result<Self> {
        Self::compile(pattern.as_bytes(), ignore_case)
    }

    /// Wrap an already-compiled engine.
    ///
    /// `has_position_anchor` marks patterns whose match outcome depends on
    /// the exact search start offset (a `\G`-style anchor); their results
    /// are never cached.
    #[must_use]
    pub fn from_engine(engine: Box<dyn SearchEngine>, has_position_anchor: bool) -> Self {
        Self {
            cache: SearchCache::new(),
            engine,
            has_position_anchor,
        }
    }

    /// Whether this pattern anchors to the search start.
    #[must_use]
    pub const fn has_position_anchor(&self) -> bool {
        self.has_position_anchor
    }

    /// Search `buffer` over `[start, end)`.
    ///
    /// `Ok(None)` is a definitive no-match for the range. `cache_key`
    /// identifies the buffer version; passing [`NO_CACHE_KEY`] disables the
    /// cache for this call. Results are byte-for-byte identical to an
    /// uncached search.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidRange`] if `start > end` or
    /// `end > buffer.len()`; the cache is left untouched.
    pub fn search(
        &self,
        cache_key: u64,
        buffer: &[u8],
        start: usize,
        end: usize,
    ) -> Result<Option<MatchRegion>> {
        if start > end || end > buffer.len() {
            return Err(ScanError::invalid_range(start, end, buffer.len()));
        }

        let cache_eligible = cache_key != NO_CACHE_KEY && !self.has_position_anchor;
        if cache_eligible && let Some(outcome) = self.cache.probe(cache_key, start, end) {
            trace!(cache_key, start, end, "search answered from cache");
            return Ok(outcome);
        }

        // The engine runs outside the cache lock; concurrent searches on
        // the same pattern may overlap here.
        let outcome = match self.engine.search(buffer, start, end) {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(error = %err, "engine fault treated as no-match");
                None
            }
        };

        if cache_eligible {
            self.cache.store(cache_key, start, end, outcome.as_ref());
        }
        Ok(outcome)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("has_position_anchor", &self.has_position_anchor)
            .finish_non_exhaustive()
    }
}
