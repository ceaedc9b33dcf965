//! Parse Errors

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::structure::StructureError;

/// A shorthand order that could not be resolved.
///
/// Always carries a human-readable reason naming what failed; a parse
/// error aborts the whole request, the order is never partially applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing to parse.
    #[error("order text is empty")]
    EmptyInput,

    /// No token survived the other passes as a plausible ticker.
    #[error("no underlying ticker found in '{text}'")]
    MissingTicker {
        /// The original order text.
        text: String,
    },

    /// No strike tokens found.
    #[error("no strikes found")]
    MissingStrikes,

    /// No expiry token found.
    #[error("no expiry found")]
    MissingExpiry,

    /// An explicit-year expiry resolved before the parse date.
    #[error("expiry {expiry} is before the parse date")]
    ExpiredExpiry {
        /// The resolved expiry.
        expiry: NaiveDate,
    },

    /// Neither a strike suffix, a type word, nor the structure tag fixed
    /// the option type.
    #[error("cannot determine option type (call or put)")]
    UnknownOptionRight,

    /// Strikes with no tag and no single/custom fallback.
    #[error("ambiguous structure: {strikes} strikes but no recognized structure tag")]
    AmbiguousStructure {
        /// Number of strikes listed.
        strikes: usize,
    },

    /// "live" and a stock reference are contradictory.
    #[error("a live order cannot be tied to a stock reference")]
    LiveWithStockRef,

    /// A token matched a numeric shape but failed to parse.
    #[error("cannot parse number '{token}'")]
    InvalidNumber {
        /// The offending token.
        token: String,
    },

    /// A slash-group part that is not a strike.
    #[error("cannot parse strike '{token}'")]
    InvalidStrike {
        /// The offending token.
        token: String,
    },

    /// Leg construction failed downstream of token interpretation.
    #[error(transparent)]
    Structure(#[from] StructureError),
}
