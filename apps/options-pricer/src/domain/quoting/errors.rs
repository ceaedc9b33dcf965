//! Quoting Errors

use thiserror::Error;

/// Errors combining leg quotes into a structure quote.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AggregationError {
    /// Legs and quotes must pair up one-to-one.
    #[error("leg count mismatch: {legs} legs but {quotes} market entries")]
    LegCountMismatch {
        /// Number of legs in the structure.
        legs: usize,
        /// Number of leg market entries supplied.
        quotes: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = AggregationError::LegCountMismatch { legs: 2, quotes: 1 };
        assert_eq!(
            err.to_string(),
            "leg count mismatch: 2 legs but 1 market entries"
        );
    }
}
