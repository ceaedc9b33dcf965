//! Option Right Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Option right (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionRight {
    /// Call option.
    Call,
    /// Put option.
    Put,
}

impl OptionRight {
    /// Single-letter display code ("C" or "P").
    #[must_use]
    pub const fn code(&self) -> char {
        match self {
            Self::Call => 'C',
            Self::Put => 'P',
        }
    }

    /// Parse a single-letter code, case-insensitive.
    #[must_use]
    pub const fn from_code(c: char) -> Option<Self> {
        match c {
            'C' | 'c' => Some(Self::Call),
            'P' | 'p' => Some(Self::Put),
            _ => None,
        }
    }

    /// Per-unit payoff at expiration for a given spot.
    #[must_use]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            Self::Call => (spot - strike).max(0.0),
            Self::Put => (strike - spot).max(0.0),
        }
    }
}

impl fmt::Display for OptionRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_code() {
        assert_eq!(OptionRight::Call.code(), 'C');
        assert_eq!(OptionRight::Put.code(), 'P');
    }

    #[test]
    fn right_from_code() {
        assert_eq!(OptionRight::from_code('c'), Some(OptionRight::Call));
        assert_eq!(OptionRight::from_code('P'), Some(OptionRight::Put));
        assert_eq!(OptionRight::from_code('x'), None);
    }

    #[test]
    fn right_intrinsic() {
        assert_eq!(OptionRight::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionRight::Call.intrinsic(90.0, 100.0), 0.0);
        assert_eq!(OptionRight::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionRight::Put.intrinsic(110.0, 100.0), 0.0);
    }

    #[test]
    fn right_serde() {
        let json = serde_json::to_string(&OptionRight::Put).unwrap();
        assert_eq!(json, "\"put\"");
        let parsed: OptionRight = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, OptionRight::Put);
    }
}
