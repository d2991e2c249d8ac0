//! Id-keyed pattern registry.
//!
//! The registry is the boundary surface for callers that address patterns
//! by opaque handle ids rather than owned values (host-runtime bindings,
//! tokenizer tables). Each id maps to a shared [`Pattern`]; searches
//! resolve the id under a read lock and then run entirely outside it, so
//! registry traffic never serializes matching work. A release during an
//! in-flight search on the same pattern is safe: the search holds its own
//! reference and the pattern is dropped when the last one goes away.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::batch::{BatchMatch, search_batch};
use crate::error::{Result, ScanError};
use crate::pattern::Pattern;
use crate::region::MatchRegion;

/// Opaque handle to a registered pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternId(u64);

impl PatternId {
    /// Reconstruct an id from its raw integer form.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw integer form, for marshalling.
    #[must_use]
    pub const fn into_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A collection of patterns addressed by [`PatternId`].
pub struct PatternRegistry {
    patterns: RwLock<HashMap<PatternId, Arc<Pattern>>>,
    next_id: AtomicU64,
}

impl PatternRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            patterns: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Compile a pattern with the default engine and register it.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Compile`] if the pattern is rejected; nothing
    /// is registered.
    pub fn create(&self, pattern: &[u8], ignore_case: bool) -> Result<PatternId> {
        Ok(self.insert(Pattern::compile(pattern, ignore_case)?))
    }

    /// Register an already-constructed pattern (e.g. one wrapping a custom
    /// engine).
    pub fn insert(&self, pattern: Pattern) -> PatternId {
        let id = PatternId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut patterns = self
            .patterns
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        patterns.insert(id, Arc::new(pattern));
        id
    }

    /// Get a shared handle to a registered pattern.
    #[must_use]
    pub fn get(&self, id: PatternId) -> Option<Arc<Pattern>> {
        let patterns = self.patterns.read().unwrap_or_else(PoisonError::into_inner);
        patterns.get(&id).cloned()
    }

    /// Run a cache-aware search with the pattern registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::PatternNotFound`] for an unknown id, or
    /// [`ScanError::InvalidRange`] for an out-of-range request.
    pub fn search(
        &self,
        id: PatternId,
        cache_key: u64,
        buffer: &[u8],
        start: usize,
        end: usize,
    ) -> Result<Option<MatchRegion>> {
        let pattern = self.resolve(id)?;
        pattern.search(cache_key, buffer, start, end)
    }

    /// Run a batch search across the patterns registered under `ids`,
    /// in that order.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::PatternNotFound`] if any id is unknown, or
    /// [`ScanError::InvalidRange`] for an out-of-range request.
    pub fn search_batch(
        &self,
        ids: &[PatternId],
        cache_key: u64,
        buffer: &[u8],
        start: usize,
        end: usize,
    ) -> Result<Option<BatchMatch>> {
        let patterns = ids
            .iter()
            .map(|&id| self.resolve(id))
            .collect::<Result<Vec<_>>>()?;
        search_batch(
            patterns.iter().map(Arc::as_ref),
            cache_key,
            buffer,
            start,
            end,
        )
    }

    /// Release the pattern registered under `id`, dropping its cache and
    /// compiled resource.
    ///
    /// Releasing an unknown id has no effect and returns `false`.
    pub fn release(&self, id: PatternId) -> bool {
        let mut patterns = self
            .patterns
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        patterns.remove(&id).is_some()
    }

    /// Number of registered patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        let patterns = self.patterns.read().unwrap_or_else(PoisonError::into_inner);
        patterns.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn resolve(&self, id: PatternId) -> Result<Arc<Pattern>> {
        self.get(id).ok_or(ScanError::PatternNotFound { id })
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PatternRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternRegistry")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_search_release() {
        let registry = PatternRegistry::new();
        let id = registry.create(br"\d+", false).unwrap();
        assert_eq!(registry.len(), 1);

        let region = registry.search(id, 1, b"ab 12", 0, 5).unwrap().unwrap();
        assert_eq!(region.whole_match(), Some(3..5));

        assert!(registry.release(id));
        assert!(registry.is_empty());
        assert!(!registry.release(id));
    }

    #[test]
    fn unknown_id_is_reported() {
        let registry = PatternRegistry::new();
        let bogus = PatternId::from_raw(999);
        let err = registry.search(bogus, 1, b"x", 0, 1).unwrap_err();
        assert!(matches!(err, ScanError::PatternNotFound { id } if id == bogus));
    }

    #[test]
    fn batch_with_unknown_id_fails() {
        let registry = PatternRegistry::new();
        let id = registry.create(b"a", false).unwrap();
        let bogus = PatternId::from_raw(999);
        assert!(registry.search_batch(&[id, bogus], 1, b"a", 0, 1).is_err());
    }

    #[test]
    fn batch_reports_winner_index_in_id_order() {
        let registry = PatternRegistry::new();
        let a = registry.create(b"zzz", false).unwrap();
        let b = registry.create(b"bc", false).unwrap();
        let winner = registry
            .search_batch(&[a, b], 1, b"abcd", 0, 4)
            .unwrap()
            .unwrap();
        assert_eq!(winner.pattern_index, 1);
        assert_eq!(winner.region.whole_match(), Some(1..3));
    }

    #[test]
    fn ids_are_never_reused() {
        let registry = PatternRegistry::new();
        let first = registry.create(b"a", false).unwrap();
        registry.release(first);
        let second = registry.create(b"a", false).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn release_during_outstanding_reference() {
        let registry = PatternRegistry::new();
        let id = registry.create(b"abc", false).unwrap();
        let held = registry.get(id).unwrap();
        assert!(registry.release(id));
        // The held reference still searches normally.
        assert!(held.search(1, b"xxabc", 0, 5).unwrap().is_some());
    }
}
