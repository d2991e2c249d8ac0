//! The matching-engine seam.
//!
//! This layer does not match text itself; it delegates to a
//! [`SearchEngine`] and only decides when a previous result may substitute
//! for a fresh search. The trait keeps the engine pluggable: production
//! code uses [`RegexEngine`] (backed by the `regex` crate's bytes API),
//! tests use the scripted engine from `test_utils`.

use std::fmt;

use regex::bytes::{Regex, RegexBuilder};
use thiserror::Error;

use crate::error::{Result, ScanError};
use crate::region::MatchRegion;

/// A fault inside the matching engine during a search.
///
/// Never surfaced to callers of this layer; a failed search is reported as
/// "no match".
#[derive(Debug, Error)]
#[error("engine failure: {message}")]
pub struct EngineError {
    /// The engine's diagnostic message.
    pub message: String,
}

impl EngineError {
    /// Create an engine error from a diagnostic message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A compiled pattern that can search a byte buffer.
///
/// # Contract
///
/// `search` reports the leftmost match whose whole-match span starts at or
/// after `start` and ends at or before `end`. Bytes before `start` stay
/// visible to look-behind and word-boundary constructs; bytes at or after
/// `end` are outside the search entirely. Callers guarantee
/// `start <= end <= haystack.len()`.
///
/// # Concurrency
///
/// Implementations must tolerate concurrent `search` calls on the same
/// compiled pattern: the caching layer never serializes engine
/// invocations, only its own cache bookkeeping. Engines that keep mutable
/// scratch state across calls must synchronize it internally.
pub trait SearchEngine: Send + Sync {
    /// Search `haystack` over `[start, end)`.
    fn search(
        &self,
        haystack: &[u8],
        start: usize,
        end: usize,
    ) -> std::result::Result<Option<MatchRegion>, EngineError>;
}

/// The default engine, backed by `regex::bytes`.
///
/// Compiles with capture-group tracking and searches with positional
/// context, so `^`, look-around and word boundaries behave relative to the
/// full buffer rather than the sub-range. The `regex` crate rejects the
/// `\G` position anchor at compile time; patterns using it must come in
/// through a custom [`SearchEngine`].
pub struct RegexEngine {
    regex: Regex,
}

impl RegexEngine {
    /// Compile a pattern from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Compile`] if the pattern is not valid UTF-8 or
    /// is rejected by the engine.
    pub fn compile(pattern: &[u8], ignore_case: bool) -> Result<Self> {
        let source = std::str::from_utf8(pattern)
            .map_err(|err| ScanError::compile(format!("pattern is not valid UTF-8: {err}")))?;
        let regex = RegexBuilder::new(source)
            .case_insensitive(ignore_case)
            .build()
            .map_err(|err| ScanError::compile(err.to_string()))?;
        Ok(Self { regex })
    }

    /// Get the pattern source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl SearchEngine for RegexEngine {
    fn search(
        &self,
        haystack: &[u8],
        start: usize,
        end: usize,
    ) -> std::result::Result<Option<MatchRegion>, EngineError> {
        let window = &haystack[..end];
        Ok(self.regex.captures_at(window, start).map(|caps| {
            MatchRegion::new(
                caps.iter()
                    .map(|group| group.map(|m| m.start()..m.end()))
                    .collect(),
            )
        }))
    }
}

impl fmt::Debug for RegexEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegexEngine")
            .field("pattern", &self.regex.as_str())
            .finish()
    }
}

/// Scan raw pattern bytes for the `\G` position anchor.
///
/// A purely syntactic one-pass scan: escape pairs are stepped over, so
/// `\\G` (a literal backslash before `G`) is not flagged, but an anchor
/// inside a character class still is. A false positive only costs the
/// caching optimization for that pattern, never correctness, so the
/// pattern is deliberately not parsed.
#[must_use]
pub fn has_position_anchor(pattern: &[u8]) -> bool {
    let mut i = 0;
    while i + 1 < pattern.len() {
        if pattern[i] == b'\\' {
            if pattern[i + 1] == b'G' {
                return true;
            }
            i += 2;
        } else {
            i += 1;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_and_search() {
        let engine = RegexEngine::compile(br"\d+", false).unwrap();
        let region = engine.search(b"abc 123 xyz", 0, 11).unwrap().unwrap();
        assert_eq!(region.whole_match(), Some(4..7));
    }

    #[test]
    fn search_respects_start() {
        let engine = RegexEngine::compile(br"a", false).unwrap();
        let region = engine.search(b"a..a..", 1, 6).unwrap().unwrap();
        assert_eq!(region.whole_match(), Some(3..4));
    }

    #[test]
    fn search_respects_end() {
        let engine = RegexEngine::compile(br"abc", false).unwrap();
        assert!(engine.search(b"..abc", 0, 4).unwrap().is_none());
        assert!(engine.search(b"..abc", 0, 5).unwrap().is_some());
    }

    #[test]
    fn context_before_start_is_visible() {
        // \b depends on the byte before the search start
        let engine = RegexEngine::compile(br"\bword", false).unwrap();
        assert!(engine.search(b"password", 4, 8).unwrap().is_none());
        assert!(engine.search(b"pas sword", 5, 9).unwrap().is_none());
        assert!(engine.search(b"pas word", 4, 8).unwrap().is_some());
    }

    #[test]
    fn unmatched_group_is_none() {
        let engine = RegexEngine::compile(br"(a)|(b)", false).unwrap();
        let region = engine.search(b"b", 0, 1).unwrap().unwrap();
        assert_eq!(region.group(1), None);
        assert_eq!(region.group(2), Some(0..1));
    }

    #[test]
    fn ignore_case_flag() {
        let engine = RegexEngine::compile(b"hello", true).unwrap();
        assert!(engine.search(b"say HELLO", 0, 9).unwrap().is_some());

        let engine = RegexEngine::compile(b"hello", false).unwrap();
        assert!(engine.search(b"say HELLO", 0, 9).unwrap().is_none());
    }

    #[test]
    fn compile_rejects_bad_pattern() {
        let err = RegexEngine::compile(b"[unclosed", false).unwrap_err();
        assert!(err.is_compile());
    }

    #[test]
    fn compile_rejects_invalid_utf8() {
        let err = RegexEngine::compile(&[0x80, 0xff], false).unwrap_err();
        assert!(err.is_compile());
    }

    #[test]
    fn anchor_scan() {
        assert!(has_position_anchor(br"\Gfoo"));
        assert!(has_position_anchor(br"foo\G"));
        assert!(has_position_anchor(br"[\G]"));
        assert!(!has_position_anchor(br"foo"));
        assert!(!has_position_anchor(br"\\Gfoo"));
        assert!(!has_position_anchor(br"G\\"));
        assert!(!has_position_anchor(b""));
    }
}
