//! Structure Market Data Value Object

use serde::{Deserialize, Serialize};

use super::{MarketSize, MarketValue};

/// Screen market for a whole structure.
///
/// Built only by the aggregator, which guarantees bid <= offer whenever
/// both sides are available. A side touched by any unavailable leg input
/// is itself unavailable; no partial blending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StructureMarketData {
    /// Structure bid (what the screen pays for the package).
    pub bid: MarketValue,
    /// Structure offer (what the screen sells the package at).
    pub offer: MarketValue,
    /// Midpoint, present only when both sides are.
    pub mid: MarketValue,
    /// Structures fillable against the bid.
    pub bid_size: MarketSize,
    /// Structures fillable against the offer.
    pub offer_size: MarketSize,
}

impl StructureMarketData {
    /// A fully unavailable structure market.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            bid: MarketValue::Unavailable,
            offer: MarketValue::Unavailable,
            mid: MarketValue::Unavailable,
            bid_size: MarketSize::Unavailable,
            offer_size: MarketSize::Unavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_everything() {
        let data = StructureMarketData::unavailable();
        assert!(!data.bid.is_available());
        assert!(!data.offer.is_available());
        assert!(!data.mid.is_available());
        assert!(!data.bid_size.is_available());
        assert!(!data.offer_size.is_available());
    }

    #[test]
    fn serde_unavailable_is_dashes() {
        let json = serde_json::to_string(&StructureMarketData::unavailable()).unwrap();
        assert_eq!(
            json,
            "{\"bid\":\"--\",\"offer\":\"--\",\"mid\":\"--\",\"bid_size\":\"--\",\"offer_size\":\"--\"}"
        );
    }
}
