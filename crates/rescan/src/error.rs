//! Error types for rescan.
//!
//! The matching layer deliberately has a small error surface: only pattern
//! compilation and argument validation fail loudly. Engine faults during a
//! search are collapsed to "no match" at the search boundary, so searching
//! itself is a binary outcome space.

use thiserror::Error;

use crate::registry::PatternId;

/// The main error type for rescan operations.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The matching engine rejected the pattern.
    #[error("failed to compile pattern: {message}")]
    Compile {
        /// The engine's diagnostic message.
        message: String,
    },

    /// The requested search range is not valid for the buffer.
    #[error("invalid search range [{start}, {end}) for buffer of {len} bytes")]
    InvalidRange {
        /// Requested start offset (inclusive).
        start: usize,
        /// Requested end offset (exclusive).
        end: usize,
        /// Length of the buffer being searched.
        len: usize,
    },

    /// No pattern is registered under the given id.
    #[error("pattern with id {id} not found")]
    PatternNotFound {
        /// The pattern id that was not found.
        id: PatternId,
    },
}

/// Result type alias for rescan operations.
pub type Result<T> = std::result::Result<T, ScanError>;

impl ScanError {
    /// Create a compile error from an engine diagnostic.
    pub fn compile(message: impl Into<String>) -> Self {
        Self::Compile {
            message: message.into(),
        }
    }

    /// Create an invalid range error.
    #[must_use]
    pub const fn invalid_range(start: usize, end: usize, len: usize) -> Self {
        Self::InvalidRange { start, end, len }
    }

    /// Create a pattern not found error.
    #[must_use]
    pub const fn pattern_not_found(id: PatternId) -> Self {
        Self::PatternNotFound { id }
    }

    /// Check if this is a compile error.
    #[must_use]
    pub const fn is_compile(&self) -> bool {
        matches!(self, Self::Compile { .. })
    }

    /// Check if this is an argument validation error.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidRange { .. } | Self::PatternNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_display() {
        let err = ScanError::compile("unclosed group");
        let msg = err.to_string();
        assert!(msg.contains("failed to compile"));
        assert!(msg.contains("unclosed group"));
        assert!(err.is_compile());
        assert!(!err.is_invalid_argument());
    }

    #[test]
    fn invalid_range_display() {
        let err = ScanError::invalid_range(7, 3, 10);
        let msg = err.to_string();
        assert!(msg.contains("[7, 3)"));
        assert!(msg.contains("10 bytes"));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn pattern_not_found_display() {
        let err = ScanError::pattern_not_found(PatternId::from_raw(42));
        assert!(err.to_string().contains("42"));
        assert!(err.is_invalid_argument());
    }
}
