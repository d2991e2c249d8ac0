//! rescan: cached regex searching for tokenization engines
//!
//! This crate sits between a text-processing caller (a tokenizer or
//! syntax highlighter) and a pattern-matching engine. Such callers search
//! the same logical text over and over with slightly shifted sub-ranges;
//! rescan remembers each pattern's last result and proves, per call,
//! whether it can stand in for a fresh search — and when several patterns
//! scan the same region, it picks the one matching earliest, with
//! first-in-order tie-breaking and short-circuiting.
//!
//! # Features
//!
//! - **Per-pattern result caching** keyed by a caller-supplied buffer
//!   identity, transparent by construction: cached answers are always
//!   identical to uncached ones
//! - **Position-anchor awareness**: `\G`-style patterns are detected at
//!   creation and never served from cache
//! - **Batch search** across an ordered pattern list with earliest-match
//!   selection and early exit
//! - **Pluggable engines** behind the [`SearchEngine`] trait; the default
//!   engine is the `regex` crate's bytes API
//! - **Id-keyed registry** for handle-based callers (feature: host
//!   bindings, tokenizer tables)
//!
//! # Example
//!
//! ```
//! use rescan::{Pattern, search_batch};
//!
//! # fn main() -> rescan::Result<()> {
//! let keyword = Pattern::compile_str(r"\bfn\b", false)?;
//! let number = Pattern::compile_str(r"\d+", false)?;
//!
//! let line = b"fn answer() { 42 }";
//! let winner = search_batch([&keyword, &number], 1, line, 0, line.len())?
//!     .expect("something matches");
//! assert_eq!(winner.pattern_index, 0);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod error;
pub mod region;

// The engine seam and the caching layer above it
pub mod batch;
mod cache;
pub mod engine;
pub mod pattern;
pub mod registry;

pub use batch::{BatchMatch, search_batch};
pub use cache::NO_CACHE_KEY;
pub use engine::{EngineError, RegexEngine, SearchEngine, has_position_anchor};
pub use error::{Result, ScanError};
pub use pattern::Pattern;
pub use region::{MatchRegion, NO_GROUP};
pub use registry::{PatternId, PatternRegistry};

// Test utilities
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

#[cfg(any(test, feature = "test-utils"))]
pub use test_utils::ScriptedEngine;
