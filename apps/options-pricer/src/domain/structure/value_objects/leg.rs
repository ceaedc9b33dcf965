//! Option Leg Value Object

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OptionRight;

/// Position side (long or short).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    /// Long position (bought).
    Long,
    /// Short position (sold/written).
    Short,
}

impl PositionSide {
    /// Get the sign multiplier for this side.
    #[must_use]
    pub const fn sign(&self) -> i32 {
        match self {
            Self::Long => 1,
            Self::Short => -1,
        }
    }

    /// Check if this is a long position.
    #[must_use]
    pub const fn is_long(&self) -> bool {
        matches!(self, Self::Long)
    }

    /// Check if this is a short position.
    #[must_use]
    pub const fn is_short(&self) -> bool {
        matches!(self, Self::Short)
    }

    /// The opposite side.
    #[must_use]
    pub const fn flipped(&self) -> Self {
        match self {
            Self::Long => Self::Short,
            Self::Short => Self::Long,
        }
    }
}

/// A single option leg within a structure.
///
/// The ratio is a positive per-structure weight; direction lives on
/// `side`. `signed_ratio` is what the aggregator consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionLeg {
    /// Display label ("Leg 1", "Leg 2", ...).
    label: String,
    /// Expiration date.
    expiry: NaiveDate,
    /// Strike price.
    strike: Decimal,
    /// Call or put.
    right: OptionRight,
    /// Position side.
    side: PositionSide,
    /// Per-structure ratio magnitude (positive, usually 1).
    ratio: Decimal,
}

impl OptionLeg {
    /// Create a new leg.
    #[must_use]
    pub const fn new(
        label: String,
        expiry: NaiveDate,
        strike: Decimal,
        right: OptionRight,
        side: PositionSide,
        ratio: Decimal,
    ) -> Self {
        Self {
            label,
            expiry,
            strike,
            right,
            side,
            ratio,
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Expiration date.
    #[must_use]
    pub const fn expiry(&self) -> NaiveDate {
        self.expiry
    }

    /// Strike price.
    #[must_use]
    pub const fn strike(&self) -> Decimal {
        self.strike
    }

    /// Call or put.
    #[must_use]
    pub const fn right(&self) -> OptionRight {
        self.right
    }

    /// Position side.
    #[must_use]
    pub const fn side(&self) -> PositionSide {
        self.side
    }

    /// Ratio magnitude (always positive).
    #[must_use]
    pub const fn ratio(&self) -> Decimal {
        self.ratio
    }

    /// Signed ratio (positive for long, negative for short).
    #[must_use]
    pub fn signed_ratio(&self) -> Decimal {
        self.ratio * Decimal::from(self.side.sign())
    }

    /// Leg with the opposite side, same everything else.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            side: self.side.flipped(),
            ..self.clone()
        }
    }
}
